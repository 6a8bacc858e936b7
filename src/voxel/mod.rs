//! Voxel data structures and operations

pub mod chunk;
pub mod coords;
pub mod world;
pub mod raycast;

pub use chunk::{Chunk, ChunkCoord, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use world::VoxelWorld;
pub use raycast::{intersect_ray, RayHit};

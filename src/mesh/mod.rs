//! Chunk mesh generation

pub mod face;
pub mod palette;
pub mod builder;

pub use face::{Face, FACES};
pub use palette::{Color, Palette};
pub use builder::{generate_geometry_for_chunk, regeneration_set, ChunkMesh, MeshBuilder, MeshVertex};

//! Per-chunk geometry with face culling.
//!
//! Every solid voxel emits one quad per face whose neighbor cell is empty.
//! Neighbors across the chunk border are read through the world, so a chunk's
//! mesh depends on its six face-adjacent chunks as well as its own contents.
//! Coplanar faces are not merged.

use bytemuck::{Pod, Zeroable};

use crate::core::types::{IVec3, UVec3, Vec3, AIR};
use crate::math::Aabb;
use crate::voxel::coords;
use crate::voxel::{ChunkCoord, VoxelWorld};
use super::face::{FACES, QUAD_INDICES};
use super::palette::Palette;

/// Renderable geometry of one chunk, positions relative to the chunk origin
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    /// 3 floats per vertex
    pub positions: Vec<f32>,
    /// 3 floats per vertex, constant across a face
    pub normals: Vec<f32>,
    /// RGB in `[0, 1]`, 3 floats per vertex
    pub colors: Vec<f32>,
    /// 6 per face, two counter-clockwise triangles
    pub indices: Vec<u32>,
}

/// Interleaved vertex layout for GPU upload
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl ChunkMesh {
    /// Create an empty mesh for `coord`
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            ..Default::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// World-space translation to place this chunk-local mesh
    pub fn translation(&self, chunk_size: u32) -> Vec3 {
        self.coord.as_ivec3().as_vec3() * chunk_size as f32
    }

    /// Chunk-local bounds of the emitted vertices
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.chunks_exact(3).map(Vec3::from_slice))
    }

    pub fn world_bounds(&self, chunk_size: u32) -> Option<Aabb> {
        self.bounds().map(|b| b.translated(self.translation(chunk_size)))
    }

    /// Vertices in interleaved form
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .zip(self.colors.chunks_exact(3))
            .map(|((p, n), c)| MeshVertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                color: [c[0], c[1], c[2]],
            })
            .collect()
    }

    /// Raw bytes of the index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn push_face(&mut self, local: UVec3, face_index: usize, color: [f32; 3]) {
        let face = &FACES[face_index];
        let base = self.vertex_count() as u32;
        let origin = local.as_vec3();
        let normal = face.dir.as_vec3().to_array();
        for corner in face.corners {
            self.positions.extend_from_slice(&(origin + Vec3::from(corner)).to_array());
            self.normals.extend_from_slice(&normal);
            self.colors.extend_from_slice(&color);
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }
}

/// Builds chunk meshes from a borrowed world and palette
pub struct MeshBuilder<'a> {
    world: &'a VoxelWorld,
    palette: &'a Palette,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(world: &'a VoxelWorld, palette: &'a Palette) -> Self {
        Self { world, palette }
    }

    /// Geometry for the chunk at `coord`. An unallocated chunk is all empty and
    /// yields an empty mesh.
    pub fn build_chunk(&self, coord: ChunkCoord) -> ChunkMesh {
        let mut mesh = ChunkMesh::new(coord);
        let Some(chunk) = self.world.chunk(coord) else {
            return mesh;
        };

        let n = self.world.chunk_size();
        let origin = coord.world_origin(n);

        for y in 0..n {
            for z in 0..n {
                for x in 0..n {
                    let local = UVec3::new(x, y, z);
                    let voxel = chunk.get(coords::linearize(local, n));
                    if voxel == AIR {
                        continue;
                    }
                    let color = self.palette.color_for(voxel).to_array();

                    for (face_index, face) in FACES.iter().enumerate() {
                        let neighbor = local.as_ivec3() + face.dir;
                        let inside = neighbor.cmpge(IVec3::ZERO).all()
                            && neighbor.cmplt(IVec3::splat(n as i32)).all();
                        let neighbor_voxel = if inside {
                            chunk.get(coords::linearize(neighbor.as_uvec3(), n))
                        } else {
                            self.world.get_voxel(origin.wrapping_add(neighbor))
                        };
                        if neighbor_voxel == AIR {
                            mesh.push_face(local, face_index, color);
                        }
                    }
                }
            }
        }

        mesh
    }

    /// Meshes for every allocated chunk, in coordinate order
    pub fn build_all(&self) -> Vec<ChunkMesh> {
        let mut coords: Vec<_> = self.world.chunk_coords().collect();
        coords.sort();
        coords.into_iter().map(|c| self.build_chunk(c)).collect()
    }
}

/// Geometry for one chunk; see [`MeshBuilder::build_chunk`]
pub fn generate_geometry_for_chunk(world: &VoxelWorld, coord: ChunkCoord, palette: &Palette) -> ChunkMesh {
    MeshBuilder::new(world, palette).build_chunk(coord)
}

/// Chunks whose meshes can change when the voxel at `pos` changes: its own
/// chunk and the chunks of its six face neighbors, without duplicates.
pub fn regeneration_set(pos: IVec3, chunk_size: u32) -> Vec<ChunkCoord> {
    let mut out = vec![coords::chunk_coord_of(pos, chunk_size)];
    for face in &FACES {
        let coord = coords::chunk_coord_of(pos.wrapping_add(face.dir), chunk_size);
        if !out.contains(&coord) {
            out.push(coord);
        }
    }
    out
}

//! Sparse world of lazily allocated chunks

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::types::{IVec3, MaterialId, Result, AIR};
use super::chunk::{Chunk, ChunkCoord, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use super::coords;

/// Sparse voxel storage: chunk coordinate -> dense chunk.
///
/// Chunks are allocated on first write and are never dropped individually, so
/// the absence of a chunk means every voxel in it is empty, while a present
/// chunk may still be all zero.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelWorld {
    /// Chunk edge length, fixed for the lifetime of the world
    chunk_size: u32,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl VoxelWorld {
    /// Create an empty world with the given chunk edge length (1..=256)
    pub fn new(chunk_size: u32) -> Result<Self> {
        validate_chunk_size(chunk_size)?;
        Ok(Self {
            chunk_size,
            chunks: HashMap::new(),
        })
    }

    /// Assemble a world from already validated chunks
    pub(crate) fn from_chunks(chunk_size: u32, chunks: HashMap<ChunkCoord, Chunk>) -> Self {
        Self { chunk_size, chunks }
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Chunk coordinate holding the voxel at `pos`
    pub fn compute_chunk_id(&self, pos: IVec3) -> ChunkCoord {
        coords::chunk_coord_of(pos, self.chunk_size)
    }

    /// Linear in-chunk offset of the voxel at `pos`
    pub fn compute_voxel_offset(&self, pos: IVec3) -> usize {
        coords::voxel_offset(pos, self.chunk_size)
    }

    /// Get the chunk holding `pos`, allocating an empty one if needed
    pub fn get_or_create_chunk(&mut self, pos: IVec3) -> &mut Chunk {
        let coord = self.compute_chunk_id(pos);
        let chunk_size = self.chunk_size;
        self.chunks.entry(coord).or_insert_with(|| {
            log::trace!("Allocating chunk {}", coord);
            Chunk::new(chunk_size)
        })
    }

    /// Get the chunk holding `pos` without allocating
    pub fn get_chunk(&self, pos: IVec3) -> Option<&Chunk> {
        self.chunks.get(&self.compute_chunk_id(pos))
    }

    /// Get a chunk by its chunk coordinate
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Write a voxel.
    ///
    /// When the containing chunk does not exist and `create_if_missing` is false
    /// the write is dropped, so erasing untouched space never allocates.
    /// Returns whether the value was stored.
    pub fn set_voxel(&mut self, pos: IVec3, id: MaterialId, create_if_missing: bool) -> bool {
        if !create_if_missing && !self.chunks.contains_key(&self.compute_chunk_id(pos)) {
            return false;
        }
        let offset = self.compute_voxel_offset(pos);
        self.get_or_create_chunk(pos).set(offset, id);
        true
    }

    /// Checked variant of [`set_voxel`](Self::set_voxel) for ids from outside the engine.
    ///
    /// Ids outside `[0, 255]` fail with `InvalidInput` instead of being truncated.
    pub fn try_set_voxel(&mut self, pos: IVec3, id: i64, create_if_missing: bool) -> Result<bool> {
        let id = MaterialId::try_from(id)
            .map_err(|_| Error::InvalidInput(format!("material id {id} outside 0..=255")))?;
        Ok(self.set_voxel(pos, id, create_if_missing))
    }

    /// Material at `pos`; `0` when no chunk covers it
    pub fn get_voxel(&self, pos: IVec3) -> MaterialId {
        match self.get_chunk(pos) {
            Some(chunk) => chunk.get(self.compute_voxel_offset(pos)),
            None => AIR,
        }
    }

    /// Zero every chunk while keeping the allocations
    pub fn clear(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.fill(AIR);
        }
    }

    /// Coordinates of every allocated chunk
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Iterate over all allocated chunks
    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    /// Number of allocated chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of non-empty voxels across all chunks
    pub fn solid_count(&self) -> usize {
        self.chunks.values().map(Chunk::solid_count).sum()
    }
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunks: HashMap::new(),
        }
    }
}

/// Reject chunk edge lengths outside `1..=MAX_CHUNK_SIZE`
pub fn validate_chunk_size(chunk_size: u32) -> Result<()> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(Error::InvalidInput(format!(
            "chunk size {chunk_size} outside 1..={MAX_CHUNK_SIZE}"
        )));
    }
    Ok(())
}

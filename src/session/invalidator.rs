//! Chunk invalidation tracking for mesh regeneration after edits.

use std::collections::{HashMap, HashSet};

use crate::core::types::IVec3;
use crate::mesh::regeneration_set;
use crate::voxel::ChunkCoord;

/// Tracks which chunk meshes need regeneration.
///
/// A voxel edit dirties its own chunk and the chunks of its six face
/// neighbors, since face visibility crosses chunk borders.
#[derive(Debug, Default)]
pub struct ChunkInvalidator {
    /// Chunks needing a mesh rebuild
    dirty_chunks: HashSet<ChunkCoord>,
    /// Generation counters for cache invalidation
    generations: HashMap<ChunkCoord, u32>,
}

impl ChunkInvalidator {
    /// Create a new chunk invalidator with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a specific chunk as dirty and increment its generation.
    pub fn mark_chunk_dirty(&mut self, coord: ChunkCoord) {
        self.dirty_chunks.insert(coord);
        let generation = self.generations.entry(coord).or_insert(0);
        *generation = generation.wrapping_add(1);
    }

    /// Mark every chunk whose mesh depends on the voxel at `pos`.
    pub fn mark_voxel_dirty(&mut self, pos: IVec3, chunk_size: u32) {
        for coord in regeneration_set(pos, chunk_size) {
            self.mark_chunk_dirty(coord);
        }
    }

    /// Mark a batch of chunks dirty.
    pub fn mark_all(&mut self, coords: impl IntoIterator<Item = ChunkCoord>) {
        for coord in coords {
            self.mark_chunk_dirty(coord);
        }
    }

    /// Take all dirty chunks in coordinate order and clear the dirty list.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        let mut dirty: Vec<_> = self.dirty_chunks.drain().collect();
        dirty.sort();
        dirty
    }

    /// Get the current generation counter for a chunk.
    ///
    /// Generation counter increments each time a chunk is marked dirty.
    pub fn generation(&self, coord: &ChunkCoord) -> u32 {
        self.generations.get(coord).copied().unwrap_or(0)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty_chunks.is_empty()
    }

    pub fn is_chunk_dirty(&self, coord: &ChunkCoord) -> bool {
        self.dirty_chunks.contains(coord)
    }

    /// Get count of dirty chunks (for diagnostics).
    pub fn dirty_chunk_count(&self) -> usize {
        self.dirty_chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invalidator_empty() {
        let inv = ChunkInvalidator::new();
        assert!(!inv.has_dirty());
        assert_eq!(inv.dirty_chunk_count(), 0);
    }

    #[test]
    fn test_mark_chunk_dirty() {
        let mut inv = ChunkInvalidator::new();
        let coord = ChunkCoord::new(1, 2, 3);
        inv.mark_chunk_dirty(coord);

        assert!(inv.is_chunk_dirty(&coord));
        assert_eq!(inv.generation(&coord), 1);

        inv.mark_chunk_dirty(coord);
        assert_eq!(inv.dirty_chunk_count(), 1);
        assert_eq!(inv.generation(&coord), 2);
    }

    #[test]
    fn test_mark_interior_voxel() {
        let mut inv = ChunkInvalidator::new();
        inv.mark_voxel_dirty(IVec3::new(10, 10, 10), 32);
        assert_eq!(inv.take_dirty_chunks(), vec![ChunkCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_mark_border_voxel() {
        let mut inv = ChunkInvalidator::new();
        inv.mark_voxel_dirty(IVec3::new(31, 5, 5), 32);
        assert_eq!(
            inv.take_dirty_chunks(),
            vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 0)]
        );
    }

    #[test]
    fn test_take_clears_but_keeps_generations() {
        let mut inv = ChunkInvalidator::new();
        let coord = ChunkCoord::new(0, 0, 0);
        inv.mark_all([coord, ChunkCoord::new(-1, 0, 0)]);

        assert_eq!(inv.take_dirty_chunks().len(), 2);
        assert!(!inv.has_dirty());
        assert!(inv.take_dirty_chunks().is_empty());
        assert_eq!(inv.generation(&coord), 1);
    }
}

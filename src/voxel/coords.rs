//! Pure conversions between world voxel coordinates and chunk storage addresses.
//!
//! Chunk coordinates are floor divisions of the voxel coordinate by the chunk
//! edge length; in-chunk positions use the Euclidean remainder, so negative
//! coordinates land in `[0, N)` like positive ones.

use crate::core::types::{DVec3, IVec3, UVec3};
use super::chunk::ChunkCoord;

/// Chunk containing the voxel at `pos`
#[inline]
pub fn chunk_coord_of(pos: IVec3, chunk_size: u32) -> ChunkCoord {
    let n = chunk_size as i32;
    ChunkCoord::new(pos.x.div_euclid(n), pos.y.div_euclid(n), pos.z.div_euclid(n))
}

/// Position of `pos` inside its chunk
#[inline]
pub fn local_of(pos: IVec3, chunk_size: u32) -> UVec3 {
    let n = chunk_size as i32;
    UVec3::new(
        pos.x.rem_euclid(n) as u32,
        pos.y.rem_euclid(n) as u32,
        pos.z.rem_euclid(n) as u32,
    )
}

/// Linear offset of an in-chunk position: `y*N² + z*N + x`
#[inline]
pub fn linearize(local: UVec3, chunk_size: u32) -> usize {
    let n = chunk_size as usize;
    local.y as usize * n * n + local.z as usize * n + local.x as usize
}

/// Linear offset of the voxel at `pos` inside its chunk
#[inline]
pub fn voxel_offset(pos: IVec3, chunk_size: u32) -> usize {
    linearize(local_of(pos, chunk_size), chunk_size)
}

/// Inverse of [`linearize`]
pub fn local_from_offset(offset: usize, chunk_size: u32) -> UVec3 {
    let n = chunk_size as usize;
    UVec3::new((offset % n) as u32, (offset / (n * n)) as u32, ((offset / n) % n) as u32)
}

/// Voxel cell containing a world-space point
pub fn voxel_from_point(point: DVec3) -> IVec3 {
    point.floor().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chunk_coord_of() {
        assert_eq!(chunk_coord_of(IVec3::new(0, 0, 0), 32), ChunkCoord::new(0, 0, 0));
        assert_eq!(chunk_coord_of(IVec3::new(31, 32, 64), 32), ChunkCoord::new(0, 1, 2));
        assert_eq!(chunk_coord_of(IVec3::new(-1, -32, -33), 32), ChunkCoord::new(-1, -1, -2));
    }

    #[test]
    fn test_local_of_negative() {
        assert_eq!(local_of(IVec3::new(-1, -32, -33), 32), UVec3::new(31, 0, 31));
        assert_eq!(local_of(IVec3::new(5, 37, 64), 32), UVec3::new(5, 5, 0));
    }

    #[test]
    fn test_linearize_layout() {
        assert_eq!(linearize(UVec3::new(1, 0, 0), 4), 1);
        assert_eq!(linearize(UVec3::new(0, 0, 1), 4), 4);
        assert_eq!(linearize(UVec3::new(0, 1, 0), 4), 16);
        assert_eq!(voxel_offset(IVec3::new(-1, -1, -1), 4), 63);
    }

    #[test]
    fn test_offset_is_bijection() {
        let n = 5;
        let mut seen = HashSet::new();
        for y in 0..n {
            for z in 0..n {
                for x in 0..n {
                    let local = UVec3::new(x, y, z);
                    let offset = linearize(local, n);
                    assert!(offset < (n * n * n) as usize);
                    assert!(seen.insert(offset));
                    assert_eq!(local_from_offset(offset, n), local);
                }
            }
        }
        assert_eq!(seen.len(), (n * n * n) as usize);
    }

    #[test]
    fn test_voxel_from_point() {
        assert_eq!(voxel_from_point(DVec3::new(0.5, 2.0, -0.5)), IVec3::new(0, 2, -1));
        assert_eq!(voxel_from_point(DVec3::new(-0.0, 31.99, -32.0)), IVec3::new(0, 31, -32));
    }
}

//! Chunk system for dense cubic blocks of voxel material ids

use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;
use crate::core::types::{IVec3, MaterialId, AIR};

/// Default edge length of a chunk, in voxels
pub const DEFAULT_CHUNK_SIZE: u32 = 32;

/// Largest supported chunk edge length (a 16 MiB chunk)
pub const MAX_CHUNK_SIZE: u32 = 256;

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn as_ivec3(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// World voxel coordinate of this chunk's minimum corner.
    ///
    /// Wraps for the outermost chunks, whose corner lies just past the i32
    /// range; adding an in-chunk offset with `wrapping_add` still lands on the
    /// right voxel.
    pub fn world_origin(&self, chunk_size: u32) -> IVec3 {
        self.as_ivec3().wrapping_mul(IVec3::splat(chunk_size as i32))
    }

    /// Coordinate of the chunk `offset` chunks away
    pub fn offset(&self, offset: IVec3) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }

    /// Canonical text key, `"x,y,z"`
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for ChunkCoord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let mut next = || -> Result<i32, Error> {
            parts
                .next()
                .and_then(|p| p.parse::<i32>().ok())
                .ok_or_else(|| Error::MalformedPayload(format!("invalid chunk key {s:?}")))
        };
        let coord = ChunkCoord::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(Error::MalformedPayload(format!("invalid chunk key {s:?}")));
        }
        Ok(coord)
    }
}

/// A dense `N³` block of material ids, addressed by `y*N² + z*N + x`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    size: u32,
    data: Box<[MaterialId]>,
}

impl Chunk {
    /// Create a new all-empty chunk with edge length `size`
    pub fn new(size: u32) -> Self {
        Self {
            size,
            data: vec![AIR; Self::volume(size)].into_boxed_slice(),
        }
    }

    /// Rebuild a chunk from its raw contents; the length must be exactly `size³`
    pub fn from_bytes(size: u32, bytes: Vec<MaterialId>) -> Result<Self, Error> {
        let expected = Self::volume(size);
        if bytes.len() != expected {
            return Err(Error::MalformedPayload(format!(
                "chunk holds {} voxels, expected {}",
                bytes.len(),
                expected
            )));
        }
        Ok(Self {
            size,
            data: bytes.into_boxed_slice(),
        })
    }

    /// Number of voxels in a chunk of edge length `size`
    pub fn volume(size: u32) -> usize {
        let n = size as usize;
        n * n * n
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Material at linear offset
    #[inline]
    pub fn get(&self, offset: usize) -> MaterialId {
        self.data[offset]
    }

    /// Write material at linear offset
    #[inline]
    pub fn set(&mut self, offset: usize, id: MaterialId) {
        self.data[offset] = id;
    }

    /// Raw contents in offset order
    pub fn as_bytes(&self) -> &[MaterialId] {
        &self.data
    }

    /// Overwrite every voxel with `id`
    pub fn fill(&mut self, id: MaterialId) {
        self.data.fill(id);
    }

    /// True when every voxel is empty
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == AIR)
    }

    /// Number of non-empty voxels
    pub fn solid_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != AIR).count()
    }
}

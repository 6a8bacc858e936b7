//! Core type aliases and re-exports

pub use glam::{
    Vec3,
    DVec3,
    IVec3, UVec3,
};

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// Voxel material tag. `0` is empty space, anything else is an opaque material.
pub type MaterialId = u8;

/// The material id of empty space.
pub const AIR: MaterialId = 0;

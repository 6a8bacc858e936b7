//! voxsculpt - sparse chunked voxel world engine for voxel sculpting

pub mod core;
pub mod math;
pub mod voxel;
pub mod mesh;
pub mod codec;
pub mod session;

//! Session configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{MaterialId, Result, AIR};
use crate::voxel::world::validate_chunk_size;
use crate::voxel::DEFAULT_CHUNK_SIZE;

/// Configuration for an editing session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Chunk edge length for newly created worlds. Loaded payloads keep their own.
    pub chunk_size: u32,
    /// Maximum number of undo snapshots kept; the oldest is dropped first
    pub undo_limit: usize,
    /// Material of the default ground plane
    pub plane_material: MaterialId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            undo_limit: 100,
            plane_material: 1,
        }
    }
}

impl SessionConfig {
    /// Create a new session config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.chunk_size)?;
        if self.plane_material == AIR {
            return Err(Error::InvalidInput("plane_material must be a solid material".to_string()));
        }
        Ok(())
    }
}

//! Saving and loading world payloads on disk

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::types::Result;
use crate::voxel::VoxelWorld;
use super::SceneMetadata;

/// Write the world payload to `path`, replacing any existing file.
///
/// The payload goes to a sibling `.tmp` file first and is renamed into place,
/// so a crash mid-write leaves the previous save intact.
pub fn save_world(path: impl AsRef<Path>, world: &VoxelWorld, metadata: &SceneMetadata) -> Result<()> {
    let path = path.as_ref();
    let text = super::serialize(world, metadata)?;

    let temp_path = path.with_extension("tmp");
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
    }
    fs::rename(&temp_path, path)?;

    log::info!("Saved {} chunks to {}", world.chunk_count(), path.display());
    Ok(())
}

/// Read a world payload written by [`save_world`] (or any host using the same format)
pub fn load_world(path: impl AsRef<Path>) -> Result<(VoxelWorld, SceneMetadata)> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let (world, metadata) = super::decode(&text)?;
    log::info!("Loaded {} chunks from {}", world.chunk_count(), path.display());
    Ok((world, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::types::IVec3;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("world.json");

        let mut world = VoxelWorld::new(16).unwrap();
        world.set_voxel(IVec3::new(1, 2, 3), 4, true);
        world.set_voxel(IVec3::new(-20, 0, 0), 5, true);
        let metadata = SceneMetadata {
            background: Some("#d3d3d3".to_string()),
            custom_colors: Vec::new(),
        };

        save_world(&path, &world, &metadata).expect("save failed");
        assert!(!path.with_extension("tmp").exists());

        let (loaded, loaded_meta) = load_world(&path).expect("load failed");
        assert_eq!(loaded, world);
        assert_eq!(loaded_meta, metadata);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("world.json");

        let mut world = VoxelWorld::new(4).unwrap();
        world.set_voxel(IVec3::ZERO, 1, true);
        save_world(&path, &world, &SceneMetadata::default()).unwrap();

        world.set_voxel(IVec3::ZERO, 2, true);
        save_world(&path, &world, &SceneMetadata::default()).unwrap();

        let (loaded, _) = load_world(&path).unwrap();
        assert_eq!(loaded.get_voxel(IVec3::ZERO), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let result = load_world(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("world.json");
        fs::write(&path, "{\"cellSize\": 4, \"cells\": [").unwrap();
        assert!(matches!(load_world(&path), Err(Error::Parse(_))));
    }
}

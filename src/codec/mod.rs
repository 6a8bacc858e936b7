//! World (de)serialization for persistence, sharing and undo snapshots.
//!
//! The payload is JSON:
//!
//! ```json
//! {"cellSize":32,"cells":[{"key":"0,0,0","value":[0,1,0,...]}],"background":"#d3d3d3","customColors":["#008080"]}
//! ```
//!
//! Every allocated chunk is written, including all-zero ones. `background` and
//! `customColors` belong to the host application and are carried through
//! untouched; they are omitted when unset.

pub mod disk_io;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{MaterialId, Result};
use crate::mesh::palette::{Color, Palette};
use crate::voxel::world::validate_chunk_size;
use crate::voxel::{Chunk, ChunkCoord, VoxelWorld};

/// Scene metadata stored next to the voxels but owned by the host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneMetadata {
    /// Background color, as the host wrote it
    pub background: Option<String>,
    /// Extra palette entries appended to the base palette, as `#rrggbb`
    pub custom_colors: Vec<String>,
}

impl SceneMetadata {
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.custom_colors.is_empty()
    }

    /// Base palette extended with the parseable custom colors.
    /// Unparseable entries are skipped with a warning.
    pub fn palette(&self) -> Palette {
        let custom: Vec<Color> = self
            .custom_colors
            .iter()
            .filter_map(|s| match Color::parse_hex(s) {
                Ok(color) => Some(color),
                Err(e) => {
                    log::warn!("Skipping custom color: {}", e);
                    None
                }
            })
            .collect();
        Palette::with_custom(&custom)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadOut<'a> {
    cell_size: u32,
    cells: Vec<CellOut<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_list")]
    custom_colors: &'a [String],
}

fn is_empty_list(list: &&[String]) -> bool {
    list.is_empty()
}

#[derive(Serialize)]
struct CellOut<'a> {
    key: String,
    value: &'a [MaterialId],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadIn {
    cell_size: u32,
    cells: Vec<CellIn>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    custom_colors: Vec<String>,
}

#[derive(Deserialize)]
struct CellIn {
    key: String,
    value: Vec<MaterialId>,
}

/// Serialize the whole world plus metadata. Chunks are written in coordinate
/// order, so equal worlds produce equal text.
pub fn serialize(world: &VoxelWorld, metadata: &SceneMetadata) -> Result<String> {
    let mut chunks: Vec<(&ChunkCoord, &Chunk)> = world.chunks().collect();
    chunks.sort_by_key(|(coord, _)| **coord);

    let payload = PayloadOut {
        cell_size: world.chunk_size(),
        cells: chunks
            .into_iter()
            .map(|(coord, chunk)| CellOut {
                key: coord.key(),
                value: chunk.as_bytes(),
            })
            .collect(),
        background: metadata.background.as_deref(),
        custom_colors: &metadata.custom_colors,
    };

    let text = serde_json::to_string(&payload)?;
    log::debug!(
        "Serialized {} chunks ({} bytes)",
        payload.cells.len(),
        text.len()
    );
    Ok(text)
}

/// Decode a payload into a fresh world and its metadata
pub fn decode(text: &str) -> Result<(VoxelWorld, SceneMetadata)> {
    let payload: PayloadIn = serde_json::from_str(text)?;

    validate_chunk_size(payload.cell_size)
        .map_err(|e| Error::MalformedPayload(e.to_string()))?;
    let chunk_size = payload.cell_size;

    let mut chunks = HashMap::with_capacity(payload.cells.len());
    for cell in payload.cells {
        let coord: ChunkCoord = cell.key.parse()?;
        check_coord_in_range(coord, chunk_size)?;
        let chunk = Chunk::from_bytes(chunk_size, cell.value)?;
        if chunks.insert(coord, chunk).is_some() {
            return Err(Error::MalformedPayload(format!("duplicate chunk key {:?}", cell.key)));
        }
    }

    log::debug!("Deserialized {} chunks of size {}", chunks.len(), chunk_size);

    let metadata = SceneMetadata {
        background: payload.background,
        custom_colors: payload.custom_colors,
    };
    Ok((VoxelWorld::from_chunks(chunk_size, chunks), metadata))
}

/// Replace `world` wholesale with the payload's contents, adopting its chunk
/// size. On error `world` is left unchanged.
pub fn deserialize(text: &str, world: &mut VoxelWorld) -> Result<SceneMetadata> {
    let (decoded, metadata) = decode(text)?;
    *world = decoded;
    Ok(metadata)
}

/// The chunk's voxels must be addressable with i32 world coordinates
fn check_coord_in_range(coord: ChunkCoord, chunk_size: u32) -> Result<()> {
    let n = chunk_size as i32;
    let fits = |c: i32| c.checked_mul(n).and_then(|o| o.checked_add(n - 1)).is_some();
    if fits(coord.x) && fits(coord.y) && fits(coord.z) {
        Ok(())
    } else {
        Err(Error::MalformedPayload(format!("chunk {coord} outside the addressable world")))
    }
}

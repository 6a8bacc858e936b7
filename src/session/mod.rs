//! Editing session: one world plus its metadata, undo history and dirty chunks.
//!
//! A session is the host-facing entry point. Every edit records a serialized
//! pre-edit snapshot, writes the voxel and marks the chunks whose meshes
//! depend on it. The host drains [`Session::rebuild_dirty`] once per frame.

pub mod config;
pub mod history;
pub mod invalidator;

pub use config::SessionConfig;
pub use history::UndoHistory;
pub use invalidator::ChunkInvalidator;

use std::collections::BTreeSet;

use crate::codec::{self, SceneMetadata};
use crate::core::types::{DVec3, IVec3, MaterialId, Result, AIR};
use crate::mesh::{regeneration_set, ChunkMesh, MeshBuilder, Palette};
use crate::voxel::coords::voxel_from_point;
use crate::voxel::{ChunkCoord, RayHit, VoxelWorld};

/// Edit applied at a picked voxel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    /// Place a material in the empty cell in front of the hit face
    Place(MaterialId),
    /// Clear the hit voxel
    Erase,
}

impl Tool {
    fn material(self) -> MaterialId {
        match self {
            Tool::Place(id) => id,
            Tool::Erase => AIR,
        }
    }
}

pub struct Session {
    config: SessionConfig,
    world: VoxelWorld,
    metadata: SceneMetadata,
    history: UndoHistory,
    invalidator: ChunkInvalidator,
}

impl Session {
    /// Empty session with a world of `config.chunk_size`
    pub fn new(config: SessionConfig) -> Result<Self> {
        let world = VoxelWorld::new(config.chunk_size)?;
        Self::from_world(config, world, SceneMetadata::default())
    }

    /// Wrap an existing world; all of its chunks start dirty
    pub fn from_world(config: SessionConfig, world: VoxelWorld, metadata: SceneMetadata) -> Result<Self> {
        config.validate()?;
        let mut invalidator = ChunkInvalidator::new();
        invalidator.mark_all(world.chunk_coords());
        Ok(Self {
            history: UndoHistory::new(config.undo_limit),
            config,
            world,
            metadata,
            invalidator,
        })
    }

    /// Open a session from a strict payload; any decode error is returned.
    /// The payload's chunk size wins over `config.chunk_size`.
    pub fn from_payload(payload: &str, config: SessionConfig) -> Result<Self> {
        let (world, metadata) = codec::decode(payload)?;
        Self::from_world(config, world, metadata)
    }

    /// Open a session from a stored payload, falling back to a fresh world
    /// with the ground plane when none is stored or it fails to decode.
    pub fn load_or_default(payload: Option<&str>, config: SessionConfig) -> Result<Self> {
        if let Some(text) = payload {
            match Self::from_payload(text, config.clone()) {
                Ok(session) => {
                    log::info!(
                        "Loaded world: {} chunks, {} voxels",
                        session.world.chunk_count(),
                        session.world.solid_count()
                    );
                    return Ok(session);
                }
                Err(e) => log::warn!("Stored world unreadable, starting fresh: {}", e),
            }
        }

        let mut session = Self::new(config)?;
        session.generate_plane();
        Ok(session)
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn metadata(&self) -> &SceneMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Palette for meshing: base colors plus the scene's custom colors
    pub fn palette(&self) -> Palette {
        self.metadata.palette()
    }

    pub fn set_background(&mut self, background: Option<String>) {
        self.metadata.background = background;
    }

    /// Replace the custom colors. Every chunk is re-meshed since material
    /// colors can change.
    pub fn set_custom_colors(&mut self, colors: Vec<String>) {
        self.metadata.custom_colors = colors;
        self.invalidator.mark_all(self.world.chunk_coords());
    }

    /// Serialize the world and metadata
    pub fn save(&self) -> Result<String> {
        codec::serialize(&self.world, &self.metadata)
    }

    /// Write one voxel as an undoable edit.
    ///
    /// Erasing inside a chunk that was never allocated leaves the world
    /// unchanged but is still recorded.
    pub fn set_voxel(&mut self, pos: IVec3, id: MaterialId) -> Result<()> {
        let snapshot = self.save()?;
        self.history.record(snapshot);
        self.world.set_voxel(pos, id, id != AIR);
        self.invalidator.mark_voxel_dirty(pos, self.world.chunk_size());
        Ok(())
    }

    /// Pick the first solid voxel along the segment `start..end`
    pub fn pick(&self, start: DVec3, end: DVec3) -> Result<Option<RayHit>> {
        self.world.intersect_ray(start, end)
    }

    /// Pick along the segment and apply `tool` at the hit.
    ///
    /// Placing targets the cell half a voxel out of the hit face, erasing the
    /// cell half a voxel in. Returns the edited cell, or `None` on a miss.
    pub fn apply_tool_at_ray(&mut self, start: DVec3, end: DVec3, tool: Tool) -> Result<Option<IVec3>> {
        let Some(hit) = self.pick(start, end)? else {
            return Ok(None);
        };
        let id = tool.material();
        let offset = if id != AIR { 0.5 } else { -0.5 };
        let target = voxel_from_point(hit.position + hit.normal.as_dvec3() * offset);
        self.set_voxel(target, id)?;
        Ok(Some(target))
    }

    /// Restore the previous snapshot. Returns `false` when there is none.
    pub fn undo(&mut self) -> Result<bool> {
        if !self.history.can_undo() {
            return Ok(false);
        }
        let current = self.save()?;
        let Some(snapshot) = self.history.undo(current) else {
            return Ok(false);
        };
        self.restore(&snapshot)?;
        log::debug!(
            "Undo: {} undo / {} redo left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        Ok(true)
    }

    /// Re-apply the last undone snapshot. Returns `false` when there is none.
    pub fn redo(&mut self) -> Result<bool> {
        if !self.history.can_redo() {
            return Ok(false);
        }
        let current = self.save()?;
        let Some(snapshot) = self.history.redo(current) else {
            return Ok(false);
        };
        self.restore(&snapshot)?;
        log::debug!(
            "Redo: {} undo / {} redo left",
            self.history.undo_len(),
            self.history.redo_len()
        );
        Ok(true)
    }

    /// Adopt the voxels of a snapshot. Scene metadata is not undo state and is
    /// kept as it is.
    fn restore(&mut self, snapshot: &str) -> Result<()> {
        let (world, _) = codec::decode(snapshot)?;
        // Chunks of the outgoing world may vanish; their meshes must be cleared too
        let previous: Vec<ChunkCoord> = self.world.chunk_coords().collect();
        self.world = world;
        self.invalidator.mark_all(previous);
        self.invalidator.mark_all(self.world.chunk_coords());
        Ok(())
    }

    /// Zero every voxel, rebuild the ground plane and forget the history
    pub fn reset(&mut self) {
        self.world.clear();
        self.invalidator.mark_all(self.world.chunk_coords());
        self.generate_plane();
        self.history.clear();
        log::info!("World reset");
    }

    /// Fill the `y = 0` layer of chunk (0,0,0) with the plane material
    pub fn generate_plane(&mut self) {
        self.fill_plane(self.config.plane_material);
    }

    /// Clear the `y = 0` layer of chunk (0,0,0)
    pub fn remove_plane(&mut self) {
        self.fill_plane(AIR);
    }

    /// Remove the plane when its origin voxel is solid, generate it otherwise
    pub fn toggle_plane(&mut self) {
        if self.world.get_voxel(IVec3::ZERO) != AIR {
            self.remove_plane();
        } else {
            self.generate_plane();
        }
    }

    fn fill_plane(&mut self, id: MaterialId) {
        let chunk_size = self.world.chunk_size();
        let n = chunk_size as i32;
        let mut affected = BTreeSet::new();
        for z in 0..n {
            for x in 0..n {
                let pos = IVec3::new(x, 0, z);
                self.world.set_voxel(pos, id, id != AIR);
                affected.extend(regeneration_set(pos, chunk_size));
            }
        }
        self.invalidator.mark_all(affected);
    }

    /// Whether any chunk mesh is stale
    pub fn has_dirty(&self) -> bool {
        self.invalidator.has_dirty()
    }

    /// Drain the dirty set without meshing
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkCoord> {
        self.invalidator.take_dirty_chunks()
    }

    /// Generation of a chunk's mesh; bumps every time the chunk is dirtied
    pub fn chunk_generation(&self, coord: &ChunkCoord) -> u32 {
        self.invalidator.generation(coord)
    }

    /// Rebuild the mesh of every dirty chunk, in coordinate order.
    ///
    /// Chunks that are absent or empty yield empty meshes so the host can drop
    /// what it had uploaded for them.
    pub fn rebuild_dirty(&mut self, palette: &Palette) -> Vec<ChunkMesh> {
        let dirty = self.invalidator.take_dirty_chunks();
        let builder = MeshBuilder::new(&self.world, palette);
        let meshes: Vec<ChunkMesh> = dirty.into_iter().map(|coord| builder.build_chunk(coord)).collect();
        log::debug!("Rebuilt {} chunk meshes", meshes.len());
        meshes
    }
}

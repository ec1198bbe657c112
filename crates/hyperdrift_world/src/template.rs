//! World templates
//!
//! Serializable world layouts loaded from RON files. A template describes the
//! fixed set of volumes, collectibles, and named layers plus the spawn pose;
//! building it validates the data and produces a live [`World`].
//!
//! Validation failures are data-construction bugs and fail loudly here, at
//! build time. The simulation assumes a validated world and never re-checks.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

use hyperdrift_math::Vec4;

use crate::{Collectible, Extents, Layer, Volume, VolumeKind, World};

/// Serializable volume description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeTemplate {
    /// Center position [x, y, z, w]
    pub position: [f32; 4],
    /// Extents [width, height, depth]
    pub extents: [f32; 3],
    /// Flat or Ramp(direction)
    pub kind: VolumeKind,
}

/// Serializable collectible description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleTemplate {
    /// Position [x, y, z, w]
    pub position: [f32; 4],
    /// Score awarded on pickup
    #[serde(default = "default_value")]
    pub value: u32,
}

fn default_value() -> u32 {
    10
}

/// Serializable named layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerTemplate {
    pub name: String,
    pub w: f32,
}

/// A complete serializable world layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldTemplate {
    /// World name (for display/debugging)
    pub name: String,
    /// Player spawn position [x, y, z, w]
    pub spawn: [f32; 4],
    /// Platform volumes
    pub volumes: Vec<VolumeTemplate>,
    /// Collectibles
    #[serde(default)]
    pub collectibles: Vec<CollectibleTemplate>,
    /// Named layers for the jump-to-layer selector
    #[serde(default)]
    pub layers: Vec<LayerTemplate>,
}

impl WorldTemplate {
    /// Load a template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WorldLoadError> {
        let contents = fs::read_to_string(path)?;
        let template = ron::from_str(&contents)?;
        Ok(template)
    }

    /// Save a template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WorldLoadError> {
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let contents =
            ron::ser::to_string_pretty(self, pretty).map_err(WorldLoadError::Serialize)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the template and build a live world.
    pub fn build(&self) -> Result<World, WorldBuildError> {
        let mut world = World::new(Vec4::new(
            self.spawn[0],
            self.spawn[1],
            self.spawn[2],
            self.spawn[3],
        ));

        for (index, v) in self.volumes.iter().enumerate() {
            let extents = Extents::new(v.extents[0], v.extents[1], v.extents[2]);
            if !extents.is_valid() {
                return Err(WorldBuildError::DegenerateExtents { index });
            }
            world.add_volume(Volume {
                position: Vec4::new(v.position[0], v.position[1], v.position[2], v.position[3]),
                extents,
                kind: v.kind,
            });
        }

        for c in &self.collectibles {
            world.add_collectible(Collectible::new(
                Vec4::new(c.position[0], c.position[1], c.position[2], c.position[3]),
                c.value,
            ));
        }

        for l in &self.layers {
            if world.layer_named(&l.name).is_some() {
                return Err(WorldBuildError::DuplicateLayer(l.name.clone()));
            }
            world.add_layer(Layer { name: l.name.clone(), w: l.w });
        }

        log::info!(
            "Built world '{}': {} volumes, {} collectibles, {} layers",
            self.name,
            world.volumes().len(),
            world.live_collectible_count(),
            world.layers().len()
        );

        Ok(world)
    }
}

/// Error loading or saving a world template
#[derive(Debug)]
pub enum WorldLoadError {
    /// IO error (file not found, permission denied, ...)
    Io(io::Error),
    /// Parse error (invalid RON, unknown ramp direction, ...)
    Parse(ron::error::SpannedError),
    /// Serialization error on save
    Serialize(ron::Error),
}

impl From<io::Error> for WorldLoadError {
    fn from(e: io::Error) -> Self {
        WorldLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for WorldLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        WorldLoadError::Parse(e)
    }
}

impl std::fmt::Display for WorldLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldLoadError::Io(e) => write!(f, "failed to read world file: {}", e),
            WorldLoadError::Parse(e) => write!(f, "failed to parse world file: {}", e),
            WorldLoadError::Serialize(e) => write!(f, "failed to serialize world: {}", e),
        }
    }
}

impl std::error::Error for WorldLoadError {}

/// Error validating a world template at build time
#[derive(Debug, PartialEq)]
pub enum WorldBuildError {
    /// A volume has zero or negative extents
    DegenerateExtents { index: usize },
    /// Two layers share a name
    DuplicateLayer(String),
}

impl std::fmt::Display for WorldBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldBuildError::DegenerateExtents { index } => {
                write!(f, "volume {} has zero or negative extents", index)
            }
            WorldBuildError::DuplicateLayer(name) => {
                write!(f, "duplicate layer name '{}'", name)
            }
        }
    }
}

impl std::error::Error for WorldBuildError {}

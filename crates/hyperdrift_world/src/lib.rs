//! World model for Hyperdrift
//!
//! This crate owns the authoritative simulation state:
//!
//! - [`PlayerPose`] - the one entity whose w changes continuously
//! - [`Volume`] - immutable platform slabs, flat or ramp, each at a single w
//! - [`Collectible`] - pickups whose `collected` flag flips exactly once
//! - [`Layer`] - named w coordinates for navigation shortcuts
//! - [`World`] - the container tying the above together
//! - [`WorldTemplate`] - RON-serializable world layout
//!
//! It knows nothing about rendering or input; those live at the boundaries.

mod player;
mod volume;
mod collectible;
mod world;
mod template;

pub use player::PlayerPose;
pub use volume::{Extents, RampDirection, Volume, VolumeKind};
pub use collectible::Collectible;
pub use world::{CollectibleKey, Layer, World, BASE_FLOOR_BAND};
pub use template::{
    CollectibleTemplate, LayerTemplate, VolumeTemplate, WorldBuildError, WorldLoadError,
    WorldTemplate,
};

// Re-export math types for convenience
pub use hyperdrift_math::{Vec3, Vec4};

//! 4D Mathematics for Hyperdrift
//!
//! This crate provides the vector types and the projection primitive that
//! turn native 4D world coordinates into renderable 3D coordinates.
//!
//! ## Core Types
//!
//! - [`Vec4`] - 4D point/vector; `w` is the layer coordinate
//! - [`Vec3`] - projected output consumed by the rendering boundary
//! - [`ViewAngles`] - accumulated X-W and Z-W view rotation
//! - [`rotate_and_project`] - the dual-plane rotation + perspective projection

mod vec3;
mod vec4;
mod projection;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use projection::{rotate_and_project, project, Projected, ViewAngles, SCALE_FLOOR};

//! Dual-plane rotation and perspective projection
//!
//! The world is 4D but the display is 3D, so every rendered point passes
//! through this projection: translate w relative to the viewer, rotate in the
//! X-W plane, rotate in the Z-W plane, then scale by a perspective factor
//! derived from the remaining w distance.
//!
//! The two rotations are applied sequentially, with the intermediate w from
//! the X-W step feeding the Z-W step. This is a contract, not an
//! implementation detail: callers depend on the exact numeric results, so the
//! sequence must never be collapsed into a combined rotation matrix.
//!
//! Y is exempt from both rotations. Gravity always points down no matter how
//! far the view is tilted into the fourth dimension.

use serde::{Serialize, Deserialize};

use crate::{Vec3, Vec4};

/// Minimum perspective scale factor.
///
/// Guards against a sign flip or blow-up when the post-rotation w distance is
/// very negative. Configuration validation rejects degenerate projection
/// distances, so this floor is the only runtime guard needed.
pub const SCALE_FLOOR: f32 = 0.01;

/// Accumulated view rotation into the fourth dimension.
///
/// These are camera state, not entity state: `xw` is the angle applied in the
/// X-W plane, `zw` the angle applied in the Z-W plane afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    pub xw: f32,
    pub zw: f32,
}

impl ViewAngles {
    pub const IDENTITY: Self = Self { xw: 0.0, zw: 0.0 };

    /// Create view angles from explicit plane rotations
    #[inline]
    pub const fn new(xw: f32, zw: f32) -> Self {
        Self { xw, zw }
    }

    /// Accumulate a rotation delta in both planes
    #[inline]
    pub fn accumulate(&mut self, d_xw: f32, d_zw: f32) {
        self.xw += d_xw;
        self.zw += d_zw;
    }
}

/// A projected point together with its perspective scale factor.
///
/// The scale is reused by the render feed to shrink entities that sit far
/// away along w, so it is returned rather than recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub position: Vec3,
    pub scale: f32,
}

/// Project a 4D point into renderable 3D space.
///
/// * `ref_w` - the viewer's own w coordinate; all w distances are relative
/// * `angles` - accumulated X-W / Z-W view rotation
/// * `distance` - perspective projection distance (validated, nonzero)
/// * `w_sensitivity` - how strongly w distance feeds the perspective divide
///
/// Assumes validated configuration and never panics.
pub fn project(
    point: Vec4,
    ref_w: f32,
    angles: ViewAngles,
    distance: f32,
    w_sensitivity: f32,
) -> Projected {
    // 1. w relative to the viewer
    let rel_w = point.w - ref_w;

    // 2. Rotate in the X-W plane
    let (sin_xw, cos_xw) = angles.xw.sin_cos();
    let x1 = point.x * cos_xw - rel_w * sin_xw;
    let w1 = point.x * sin_xw + rel_w * cos_xw;

    // 3. Rotate in the Z-W plane, consuming w1 from the previous step
    let (sin_zw, cos_zw) = angles.zw.sin_cos();
    let z1 = point.z * cos_zw - w1 * sin_zw;
    let w2 = point.z * sin_zw + w1 * cos_zw;

    // 4. Perspective-style scale from the remaining w distance
    let scale = (distance / (distance + w2 * w_sensitivity)).max(SCALE_FLOOR);

    // 5. Y is never mixed with w
    Projected {
        position: Vec3::new(x1 * scale, point.y * scale, z1 * scale),
        scale,
    }
}

/// Convenience wrapper returning only the projected position.
#[inline]
pub fn rotate_and_project(
    point: Vec4,
    ref_w: f32,
    angles: ViewAngles,
    distance: f32,
    w_sensitivity: f32,
) -> Vec3 {
    project(point, ref_w, angles, distance, w_sensitivity).position
}

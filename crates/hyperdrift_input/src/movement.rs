//! Per-sample movement delta

/// A 4-axis movement delta produced once per input sample.
///
/// Transient value object: consumers downstream never learn which device
/// produced it (keyboard, pointer, or overlay controls).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Movement4D {
    /// Strafe axis (+right)
    pub dx: f32,
    /// Vertical intent (+up); gravity owns actual vertical motion
    pub dy: f32,
    /// Forward axis (+forward)
    pub dz: f32,
    /// Fourth-axis delta, continuous movement or a discrete step
    pub dw: f32,
}

impl Movement4D {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0, dz: 0.0, dw: 0.0 };

    /// True when every axis is zero
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.dz == 0.0 && self.dw == 0.0
    }
}

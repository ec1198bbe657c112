//! Platform volumes
//!
//! Volumes are 3D slabs positioned at a single w value. They have no extent
//! along w at all; solidity across layers is decided purely by w distance in
//! the grounding resolver. Volumes are built once at world construction and
//! never move.

use serde::{Serialize, Deserialize};

use hyperdrift_math::Vec4;

/// Axis-aligned extents of a volume in x/y/z. There is no w extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extents {
    /// Create new extents
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// All extents strictly positive
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.depth > 0.0
    }
}

/// The horizontal axis direction a ramp rises toward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RampDirection {
    /// Rises toward +x
    PlusX,
    /// Rises toward -x
    MinusX,
    /// Rises toward +z
    PlusZ,
    /// Rises toward -z
    MinusZ,
}

/// What kind of surface a volume presents.
///
/// A ramp's rise direction lives inside the variant, so a ramp without a
/// direction cannot be constructed; a malformed world file fails at decode
/// time rather than misbehaving during simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VolumeKind {
    Flat,
    Ramp(RampDirection),
}

/// A platform volume: a 3D slab at a single w coordinate.
///
/// `position` is the slab's center; the walkable surface of a flat volume is
/// at `position.y + height/2`, and a ramp interpolates between the slab's
/// bottom and top along its rise direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub position: Vec4,
    pub extents: Extents,
    pub kind: VolumeKind,
}

impl Volume {
    /// Create a flat platform
    pub const fn flat(position: Vec4, extents: Extents) -> Self {
        Self { position, extents, kind: VolumeKind::Flat }
    }

    /// Create a ramp rising in the given direction
    pub const fn ramp(position: Vec4, extents: Extents, direction: RampDirection) -> Self {
        Self { position, extents, kind: VolumeKind::Ramp(direction) }
    }

    /// The w layer this volume lives in
    #[inline]
    pub fn layer_w(&self) -> f32 {
        self.position.w
    }

    /// Height of the top surface (flat contact height)
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.extents.height * 0.5
    }

    /// Height of the bottom surface (a ramp's starting height)
    #[inline]
    pub fn base(&self) -> f32 {
        self.position.y - self.extents.height * 0.5
    }

    /// Horizontal span along the rise direction (width for X, depth for Z)
    pub fn rise_span(&self, direction: RampDirection) -> f32 {
        match direction {
            RampDirection::PlusX | RampDirection::MinusX => self.extents.width,
            RampDirection::PlusZ | RampDirection::MinusZ => self.extents.depth,
        }
    }

    /// Does a point at (px, pz) sit over this volume's footprint?
    ///
    /// `margin` widens the footprint to account for the player's own size.
    pub fn overlaps_horizontal(&self, px: f32, pz: f32, margin: f32) -> bool {
        (px - self.position.x).abs() <= self.extents.width * 0.5 + margin
            && (pz - self.position.z).abs() <= self.extents.depth * 0.5 + margin
    }

    /// Fractional position along the ramp's rise direction, clamped to [0, 1].
    ///
    /// Clamping is part of the contract: a player standing just before the
    /// ramp's low edge reads exactly 0, just past the high edge exactly 1.
    /// There is no extrapolation beyond the footprint.
    pub fn ramp_progress(&self, direction: RampDirection, px: f32, pz: f32) -> f32 {
        let span = self.rise_span(direction);
        let raw = match direction {
            RampDirection::PlusX => (px - (self.position.x - span * 0.5)) / span,
            RampDirection::MinusX => ((self.position.x + span * 0.5) - px) / span,
            RampDirection::PlusZ => (pz - (self.position.z - span * 0.5)) / span,
            RampDirection::MinusZ => ((self.position.z + span * 0.5) - pz) / span,
        };
        raw.clamp(0.0, 1.0)
    }

    /// The surface height under a point at (px, pz).
    ///
    /// Flat volumes answer their top surface; ramps interpolate from bottom
    /// to top along the rise direction.
    pub fn contact_height(&self, px: f32, pz: f32) -> f32 {
        match self.kind {
            VolumeKind::Flat => self.top(),
            VolumeKind::Ramp(direction) => {
                self.base() + self.ramp_progress(direction, px, pz) * self.extents.height
            }
        }
    }

    /// A ramp's rise angle over its footprint; 0 for flat volumes
    pub fn rise_angle(&self) -> f32 {
        match self.kind {
            VolumeKind::Flat => 0.0,
            VolumeKind::Ramp(direction) => {
                self.extents.height.atan2(self.rise_span(direction))
            }
        }
    }
}

//! Collectibles
//!
//! Pickups positioned at a single w. The `collected` flag is the only
//! mutable field in the entity set and it transitions false -> true exactly
//! once; nothing ever resets it.

use serde::{Serialize, Deserialize};

use hyperdrift_math::Vec4;

/// A collectible marker in the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Fixed position, single w value
    pub position: Vec4,
    /// Score awarded on pickup
    pub value: u32,
    /// Monotonic: flips to true once, never back
    pub collected: bool,
}

impl Collectible {
    /// Create an uncollected collectible
    pub const fn new(position: Vec4, value: u32) -> Self {
        Self { position, value, collected: false }
    }

    /// Mark collected. Returns the value on the first call, 0 afterwards.
    pub fn collect(&mut self) -> u32 {
        if self.collected {
            0
        } else {
            self.collected = true;
            self.value
        }
    }
}

//! World container
//!
//! Owns the authoritative mutable state: the player pose, the fixed volume
//! list, the collectible set, and the named layer table. Created once at
//! session start; volumes and layers are immutable afterwards.

use slotmap::{new_key_type, SlotMap};
use serde::{Serialize, Deserialize};

use hyperdrift_math::Vec4;

use crate::{Collectible, PlayerPose, Volume};

new_key_type! {
    /// Generational key for a collectible in the world
    pub struct CollectibleKey;
}

/// A named w coordinate used for navigation shortcuts
/// (the "jump to layer" selector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub w: f32,
}

/// Vertical band of the implicit base floor.
///
/// The base floor is a conceptual volume at any w with contact height 0 and
/// no x/z bound; it grounds the player whenever y is at or below this value.
pub const BASE_FLOOR_BAND: f32 = 0.5;

/// The 4D world: player, platforms, collectibles, layers.
#[derive(Debug)]
pub struct World {
    /// The only entity whose w changes continuously
    pub player: PlayerPose,
    /// Spawn pose position, also the respawn target
    spawn: Vec4,
    /// Immutable platform set
    volumes: Vec<Volume>,
    /// Collectibles; `collected` is the only field that ever mutates
    collectibles: SlotMap<CollectibleKey, Collectible>,
    /// Named layers for the jump-to-layer selector
    layers: Vec<Layer>,
}

impl World {
    /// Create an empty world with the player at the given spawn
    pub fn new(spawn: Vec4) -> Self {
        Self {
            player: PlayerPose::at_spawn(spawn),
            spawn,
            volumes: Vec::new(),
            collectibles: SlotMap::with_key(),
            layers: Vec::new(),
        }
    }

    /// The spawn/respawn position
    #[inline]
    pub fn spawn(&self) -> Vec4 {
        self.spawn
    }

    /// Add a volume (world-build time only)
    pub fn add_volume(&mut self, volume: Volume) {
        self.volumes.push(volume);
    }

    /// Add a collectible, returning its key
    pub fn add_collectible(&mut self, collectible: Collectible) -> CollectibleKey {
        self.collectibles.insert(collectible)
    }

    /// Register a named layer
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// All volumes
    #[inline]
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// All named layers
    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Look up a layer's w by name
    pub fn layer_named(&self, name: &str) -> Option<f32> {
        self.layers.iter().find(|l| l.name == name).map(|l| l.w)
    }

    /// Get a collectible by key
    pub fn get_collectible(&self, key: CollectibleKey) -> Option<&Collectible> {
        self.collectibles.get(key)
    }

    /// Iterate all collectibles (including collected ones)
    pub fn collectibles(&self) -> impl Iterator<Item = (CollectibleKey, &Collectible)> {
        self.collectibles.iter()
    }

    /// Iterate collectibles that are still live (not collected)
    pub fn live_collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.values().filter(|c| !c.collected)
    }

    /// Number of collectibles not yet collected
    pub fn live_collectible_count(&self) -> usize {
        self.live_collectibles().count()
    }

    /// Collect every live collectible within `radius` of the player in x/y/z
    /// and within `w_radius` along w. Returns the total value gained.
    ///
    /// Each collectible can only ever pay out once.
    pub fn collect_near(&mut self, radius: f32, w_radius: f32) -> u32 {
        let player_pos = self.player.position;
        let mut gained = 0u32;
        for c in self.collectibles.values_mut() {
            if c.collected {
                continue;
            }
            if c.position.w_distance(player_pos) > w_radius {
                continue;
            }
            if c.position.xyz_distance(player_pos) <= radius {
                gained = gained.saturating_add(c.collect());
            }
        }
        if gained > 0 {
            self.player.award(gained);
        }
        gained
    }
}

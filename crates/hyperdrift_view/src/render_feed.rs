//! Render feed
//!
//! Once per tick the engine emits, for every live entity, a projected 3D
//! position, a scale factor, and an opacity derived from w distance to the
//! player. The renderer owning meshes and materials is an external
//! collaborator; nothing here is drawable by itself.

use hyperdrift_math::{project, Vec3, ViewAngles};
use hyperdrift_world::World;

/// Tuning for projection and w falloff
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Perspective projection distance (validated nonzero at config time)
    pub projection_distance: f32,
    /// How strongly w distance feeds the perspective divide
    pub w_sensitivity: f32,
    /// w distance at which opacity reaches the floor
    pub falloff_distance: f32,
    /// Entities never fade below this opacity
    pub opacity_floor: f32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            projection_distance: 12.0,
            w_sensitivity: 0.6,
            falloff_distance: 12.0,
            opacity_floor: 0.15,
        }
    }
}

/// What an entity sprite represents, for the renderer's material choice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Platform,
    Ramp,
    Collectible,
}

/// One drawable entity: projected position, scale, opacity
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySprite {
    pub kind: SpriteKind,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

/// Where to place the camera/avatar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPlacement {
    pub position: Vec3,
    pub yaw: f32,
}

/// The full per-tick feed handed to the renderer
#[derive(Clone, Debug)]
pub struct RenderFeed {
    pub player: PlayerPlacement,
    pub entities: Vec<EntitySprite>,
}

/// Opacity as a continuous function of w distance, clamped to the floor.
#[inline]
pub fn w_falloff_opacity(w_distance: f32, config: &FeedConfig) -> f32 {
    (1.0 - w_distance.abs() / config.falloff_distance).max(config.opacity_floor)
}

/// Build the render feed from the current world state.
///
/// Collected collectibles are not live and are excluded. Pure: the world is
/// only read.
pub fn build_render_feed(world: &World, angles: ViewAngles, config: &FeedConfig) -> RenderFeed {
    let player = &world.player;
    let ref_w = player.position.w;

    let mut entities = Vec::with_capacity(world.volumes().len());

    for volume in world.volumes() {
        let projected = project(
            volume.position,
            ref_w,
            angles,
            config.projection_distance,
            config.w_sensitivity,
        );
        let kind = match volume.kind {
            hyperdrift_world::VolumeKind::Flat => SpriteKind::Platform,
            hyperdrift_world::VolumeKind::Ramp(_) => SpriteKind::Ramp,
        };
        entities.push(EntitySprite {
            kind,
            position: projected.position,
            scale: projected.scale,
            opacity: w_falloff_opacity(volume.position.w - ref_w, config),
        });
    }

    for collectible in world.live_collectibles() {
        let projected = project(
            collectible.position,
            ref_w,
            angles,
            config.projection_distance,
            config.w_sensitivity,
        );
        entities.push(EntitySprite {
            kind: SpriteKind::Collectible,
            position: projected.position,
            scale: projected.scale,
            opacity: w_falloff_opacity(collectible.position.w - ref_w, config),
        });
    }

    let player_projected = project(
        player.position,
        ref_w,
        angles,
        config.projection_distance,
        config.w_sensitivity,
    );

    RenderFeed {
        player: PlayerPlacement { position: player_projected.position, yaw: player.yaw },
        entities,
    }
}

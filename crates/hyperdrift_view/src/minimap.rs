//! Minimap projections
//!
//! Two alternate orthographic 2D views of the same world, independent of the
//! main perspective projection:
//!
//! - *Side view*: screen x from world x, screen y from w; world z shows up
//!   only as a short directional tick (a depth cue, not position).
//! - *Top-down view*: screen axes from world x/z; w is encoded as marker
//!   size and opacity, fading with w distance to the player but never to
//!   zero.
//!
//! Both are pure functions of world state with no collision semantics.

use hyperdrift_world::{VolumeKind, World};

/// Minimap tuning
#[derive(Clone, Debug)]
pub struct MinimapConfig {
    /// w mapped to the bottom edge of the side view
    pub w_min: f32,
    /// w mapped to the top edge of the side view
    pub w_max: f32,
    /// World half-extent in x/z covered by the map
    pub world_half_extent: f32,
    /// Map edge length in pixels
    pub map_size: f32,
    /// Base marker size in pixels
    pub marker_size: f32,
    /// Markers never shrink below this size
    pub min_marker_size: f32,
    /// Markers never fade below this opacity
    pub min_opacity: f32,
    /// w distance at which top-down markers reach their floors
    pub w_falloff: f32,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            w_min: -6.0,
            w_max: 6.0,
            world_half_extent: 40.0,
            map_size: 200.0,
            marker_size: 6.0,
            min_marker_size: 1.5,
            min_opacity: 0.2,
            w_falloff: 12.0,
        }
    }
}

/// Maximum length of the side-view depth tick, in pixels
const TICK_MAX: f32 = 6.0;

const PLATFORM_COLOR: [f32; 4] = [0.55, 0.58, 0.65, 1.0];
const RAMP_COLOR: [f32; 4] = [0.45, 0.65, 0.55, 1.0];
const COLLECTIBLE_COLOR: [f32; 4] = [0.95, 0.80, 0.25, 1.0];

/// A drawable 2D marker
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub screen_x: f32,
    pub screen_y: f32,
    pub color: [f32; 4],
    pub size: f32,
    pub label: Option<String>,
}

/// Depth cue attached to a side-view marker: a short directional tick
/// whose signed length encodes world z
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthTick {
    pub screen_x: f32,
    pub screen_y: f32,
    pub length: f32,
}

/// The player's direction-oriented triangle marker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTriangle {
    pub screen_x: f32,
    pub screen_y: f32,
    /// Facing angle for orienting the triangle
    pub heading: f32,
    pub size: f32,
}

/// Dashed horizontal guide at the player's current w, with numeric readout
#[derive(Clone, Debug, PartialEq)]
pub struct GuideLine {
    pub screen_y: f32,
    pub label: String,
}

/// Side view output: x across, w up
#[derive(Clone, Debug)]
pub struct SideViewFeed {
    pub markers: Vec<Marker>,
    pub ticks: Vec<DepthTick>,
    pub player: PlayerTriangle,
    pub guide: GuideLine,
}

/// Top-down output: x across, z down
#[derive(Clone, Debug)]
pub struct TopDownFeed {
    pub markers: Vec<Marker>,
    pub player: PlayerTriangle,
}

/// Map a world x/z coordinate onto the map edge
fn to_screen(config: &MinimapConfig, world_coord: f32) -> f32 {
    let t = (world_coord / config.world_half_extent + 1.0) * 0.5;
    t * config.map_size
}

/// Map w onto the side view's vertical axis (w_max at the top)
fn w_to_screen_y(config: &MinimapConfig, w: f32) -> f32 {
    let t = (w - config.w_min) / (config.w_max - config.w_min);
    (1.0 - t) * config.map_size
}

/// Build the side view: w as vertical position.
pub fn side_view(world: &World, config: &MinimapConfig) -> SideViewFeed {
    let mut markers = Vec::new();
    let mut ticks = Vec::new();

    let mut push = |x: f32, z: f32, w: f32, color: [f32; 4], size: f32| {
        let screen_x = to_screen(config, x);
        let screen_y = w_to_screen_y(config, w);
        markers.push(Marker { screen_x, screen_y, color, size, label: None });
        // z is only a depth cue, never a position
        ticks.push(DepthTick {
            screen_x,
            screen_y,
            length: (z / config.world_half_extent) * TICK_MAX,
        });
    };

    for volume in world.volumes() {
        let color = match volume.kind {
            VolumeKind::Flat => PLATFORM_COLOR,
            VolumeKind::Ramp(_) => RAMP_COLOR,
        };
        push(
            volume.position.x,
            volume.position.z,
            volume.position.w,
            color,
            config.marker_size,
        );
    }
    for collectible in world.live_collectibles() {
        push(
            collectible.position.x,
            collectible.position.z,
            collectible.position.w,
            COLLECTIBLE_COLOR,
            config.marker_size * 0.7,
        );
    }

    let player_pos = world.player.position;
    let player = PlayerTriangle {
        screen_x: to_screen(config, player_pos.x),
        screen_y: w_to_screen_y(config, player_pos.w),
        heading: world.player.yaw,
        size: config.marker_size,
    };

    let guide = GuideLine {
        screen_y: w_to_screen_y(config, player_pos.w),
        label: format!("w = {:.1}", player_pos.w),
    };

    SideViewFeed { markers, ticks, player, guide }
}

/// Attenuation for top-down markers as a function of w distance
fn w_attenuation(w_distance: f32, config: &MinimapConfig) -> f32 {
    (1.0 - w_distance.abs() / config.w_falloff).max(0.0)
}

/// Build the top-down view: w as marker size and opacity.
pub fn top_down(world: &World, config: &MinimapConfig) -> TopDownFeed {
    let player_w = world.player.position.w;
    let mut markers = Vec::new();

    let mut push = |x: f32, z: f32, w: f32, mut color: [f32; 4], base_size: f32| {
        let atten = w_attenuation(w - player_w, config);
        // Fade and shrink with w distance, clamped to nonzero floors:
        // markers never vanish or invert to negative size.
        color[3] = (atten).max(config.min_opacity);
        let size = (base_size * atten).max(config.min_marker_size);
        markers.push(Marker {
            screen_x: to_screen(config, x),
            screen_y: to_screen(config, z),
            color,
            size,
            label: None,
        });
    };

    for volume in world.volumes() {
        let color = match volume.kind {
            VolumeKind::Flat => PLATFORM_COLOR,
            VolumeKind::Ramp(_) => RAMP_COLOR,
        };
        push(
            volume.position.x,
            volume.position.z,
            volume.position.w,
            color,
            config.marker_size,
        );
    }
    for collectible in world.live_collectibles() {
        push(
            collectible.position.x,
            collectible.position.z,
            collectible.position.w,
            COLLECTIBLE_COLOR,
            config.marker_size * 0.7,
        );
    }

    let player_pos = world.player.position;
    let player = PlayerTriangle {
        screen_x: to_screen(config, player_pos.x),
        screen_y: to_screen(config, player_pos.z),
        heading: world.player.yaw,
        size: config.marker_size,
    };

    TopDownFeed { markers, player }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdrift_math::Vec4;
    use hyperdrift_world::{Collectible, Extents, Volume};

    const EPSILON: f32 = 0.0001;

    fn world() -> World {
        let mut world = World::new(Vec4::new(0.0, 1.0, 0.0, 0.0));
        world.add_volume(Volume::flat(Vec4::ZERO, Extents::new(30.0, 1.0, 30.0)));
        world.add_collectible(Collectible::new(Vec4::new(10.0, 1.0, -10.0, 3.0), 10));
        world
    }

    #[test]
    fn test_side_view_maps_w_to_vertical() {
        let mut world = world();
        let config = MinimapConfig::default();

        // Player at w=0: dead center of the -6..6 range
        let feed = side_view(&world, &config);
        assert!((feed.player.screen_y - config.map_size * 0.5).abs() < EPSILON);

        // Player at w_max: top edge
        world.player.position.w = config.w_max;
        let feed = side_view(&world, &config);
        assert!(feed.player.screen_y.abs() < EPSILON);
    }

    #[test]
    fn test_side_view_guide_tracks_player() {
        let mut world = world();
        world.player.position.w = 2.5;
        let feed = side_view(&world, &MinimapConfig::default());
        assert_eq!(feed.guide.screen_y, feed.player.screen_y);
        assert_eq!(feed.guide.label, "w = 2.5");
    }

    #[test]
    fn test_side_view_z_is_a_tick_not_position() {
        let world = world();
        let feed = side_view(&world, &MinimapConfig::default());
        // The collectible sits at z=-10: its tick points the other way
        assert_eq!(feed.markers.len(), feed.ticks.len());
        assert!(feed.ticks[1].length < 0.0);
        assert!(feed.ticks[1].length.abs() <= TICK_MAX);
    }

    #[test]
    fn test_top_down_maps_x_and_z() {
        let world = world();
        let config = MinimapConfig::default();
        let feed = top_down(&world, &config);
        // Collectible at (10, -10): right of center, above center
        let m = &feed.markers[1];
        assert!(m.screen_x > config.map_size * 0.5);
        assert!(m.screen_y < config.map_size * 0.5);
    }

    #[test]
    fn test_top_down_far_w_clamps_to_floors() {
        let mut world = world();
        // Push the player far away along w
        world.player.position.w = 1000.0;
        let config = MinimapConfig::default();
        let feed = top_down(&world, &config);

        for m in &feed.markers {
            assert_eq!(m.size, config.min_marker_size);
            assert_eq!(m.color[3], config.min_opacity);
            assert!(m.size > 0.0);
            assert!(m.color[3] > 0.0);
        }
    }

    #[test]
    fn test_top_down_same_layer_full_strength() {
        let world = world();
        let config = MinimapConfig::default();
        let feed = top_down(&world, &config);
        // First volume shares the player's w
        assert_eq!(feed.markers[0].size, config.marker_size);
        assert_eq!(feed.markers[0].color[3], 1.0);
    }

    #[test]
    fn test_collected_items_not_drawn() {
        let mut world = world();
        world.player.position = Vec4::new(10.0, 1.0, -10.0, 3.0);
        world.collect_near(1.0, 1.0);

        let side = side_view(&world, &MinimapConfig::default());
        let top = top_down(&world, &MinimapConfig::default());
        assert_eq!(side.markers.len(), 1);
        assert_eq!(top.markers.len(), 1);
    }

    #[test]
    fn test_player_triangle_carries_heading() {
        let mut world = world();
        world.player.yaw = 0.75;
        let feed = top_down(&world, &MinimapConfig::default());
        assert_eq!(feed.player.heading, 0.75);
    }
}

//! Game session
//!
//! Owns the world, the ground resolver, and the control mapper, and advances
//! them together once per tick. The caller (the window loop, or a test)
//! forwards raw input events to the mapper and then calls [`Session::step`],
//! which returns the drawable feeds for the frame.

use hyperdrift_input::ControlMapper;
use hyperdrift_math::Vec4;
use hyperdrift_physics::GroundResolver;
use hyperdrift_view::{
    build_render_feed, side_view, top_down, FeedConfig, MinimapConfig, RenderFeed, SideViewFeed,
    TopDownFeed,
};
use hyperdrift_world::{World, WorldBuildError, WorldLoadError, WorldTemplate};

use crate::config::AppConfig;

/// Everything the frontend needs to draw one frame
pub struct FrameOutput {
    pub feed: RenderFeed,
    pub side_map: SideViewFeed,
    pub top_map: TopDownFeed,
    /// Present every `hud_interval_ticks` ticks
    pub hud: Option<HudSnapshot>,
}

/// Periodic HUD readout
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    pub layer: f32,
    pub grounded: bool,
    pub collectibles_left: usize,
}

/// Errors from setting up a session
#[derive(Debug)]
pub enum SessionError {
    Load(WorldLoadError),
    Build(WorldBuildError),
}

impl From<WorldLoadError> for SessionError {
    fn from(e: WorldLoadError) -> Self {
        SessionError::Load(e)
    }
}

impl From<WorldBuildError> for SessionError {
    fn from(e: WorldBuildError) -> Self {
        SessionError::Build(e)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Load(e) => write!(f, "World load error: {}", e),
            SessionError::Build(e) => write!(f, "World build error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// The running game state
pub struct Session {
    world: World,
    resolver: GroundResolver,
    pub mapper: ControlMapper,
    feed_config: FeedConfig,
    minimap_config: MinimapConfig,
    pickup_radius: f32,
    pickup_w_radius: f32,
    layer_min: f32,
    layer_max: f32,
    hud_interval: u32,
    tick: u64,
}

impl Session {
    /// Build a session from configuration, loading the world template from
    /// the configured path.
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        let template = WorldTemplate::load(&config.world.path)?;
        let world = template.build()?;
        Ok(Self::new(config, world))
    }

    /// Build a session around an already constructed world.
    pub fn new(config: &AppConfig, world: World) -> Self {
        Self {
            world,
            resolver: GroundResolver::new(config.physics.to_resolver_config()),
            mapper: ControlMapper::new(config.input.to_mapper_config()),
            feed_config: config.view.to_feed_config(),
            minimap_config: config.minimap.to_minimap_config(),
            pickup_radius: config.world.pickup_radius,
            pickup_w_radius: config.world.pickup_w_radius,
            layer_min: config.input.layer_min,
            layer_max: config.input.layer_max,
            hud_interval: config.debug.hud_interval_ticks.max(1),
            tick: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Jump the player to a named layer, if the world defines one.
    pub fn jump_to_named_layer(&mut self, name: &str) -> bool {
        match self.world.layer_named(name) {
            Some(w) => {
                self.mapper.jump_to_layer(w);
                true
            }
            None => {
                log::warn!("No layer named '{}'", name);
                false
            }
        }
    }

    /// Advance the simulation by one tick and produce the frame's feeds.
    pub fn step(&mut self, dt: f32, captured: bool) -> FrameOutput {
        let movement = self.mapper.sample(dt, captured);

        let mut pose = self.world.player.clone();
        pose.yaw = self.mapper.yaw();

        // Horizontal movement rotates with the camera yaw; w does not.
        let (sin_yaw, cos_yaw) = pose.yaw.sin_cos();
        let world_dx = movement.dx * cos_yaw + movement.dz * sin_yaw;
        let world_dz = movement.dz * cos_yaw - movement.dx * sin_yaw;
        pose.position.x += world_dx;
        pose.position.z += world_dz;

        // Signed forward speed along the facing direction; the yaw rotation
        // preserves the forward component, so it is the raw dz over dt.
        // Drives ramp launches (which use its magnitude).
        pose.forward_speed = if dt > 0.0 { movement.dz / dt } else { 0.0 };

        // A positive vertical axis while grounded is a jump request
        if movement.dy > 0.0 {
            self.resolver.jump(&mut pose);
        }

        // Apply w movement; a layer jump overrides incremental motion
        if let Some(w) = self.mapper.take_layer_jump() {
            pose.position.w = w;
        } else {
            pose.position.w =
                (pose.position.w + movement.dw).clamp(self.layer_min, self.layer_max);
        }

        let spawn = self.world.spawn();
        self.resolver.step(&mut pose, self.world.volumes(), spawn, dt);
        self.world.player = pose;

        let gathered = self
            .world
            .collect_near(self.pickup_radius, self.pickup_w_radius);
        if gathered > 0 {
            log::info!(
                "Picked up {} points (total {})",
                gathered,
                self.world.player.score
            );
        }

        self.tick += 1;
        let hud = if self.tick % u64::from(self.hud_interval) == 0 {
            Some(self.hud_snapshot())
        } else {
            None
        };

        FrameOutput {
            feed: build_render_feed(&self.world, self.mapper.view_angles(), &self.feed_config),
            side_map: side_view(&self.world, &self.minimap_config),
            top_map: top_down(&self.world, &self.minimap_config),
            hud,
        }
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.world.player.score,
            layer: self.world.player.position.w,
            grounded: self.world.player.grounded,
            collectibles_left: self.world.live_collectible_count(),
        }
    }

    /// Current player position, for window title readouts
    pub fn player_position(&self) -> Vec4 {
        self.world.player.position
    }
}

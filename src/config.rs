//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`HD_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use hyperdrift_input::{MapperConfig, WAxisMode};
use hyperdrift_physics::ResolverConfig;
use hyperdrift_view::{FeedConfig, MinimapConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// World configuration
    #[serde(default)]
    pub world: WorldConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Projection and render feed configuration
    #[serde(default)]
    pub view: ViewConfig,
    /// Minimap configuration
    #[serde(default)]
    pub minimap: MapConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`HD_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // HD_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("HD_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        Ok(config.validated())
    }

    /// Clamp degenerate values a hand-edited file could introduce.
    ///
    /// A zero projection distance would divide by zero in the projection,
    /// and an empty minimap w range would collapse the side view.
    pub fn validated(mut self) -> Self {
        if self.view.projection_distance <= 0.0 {
            log::warn!(
                "view.projection_distance {} is not positive, using 12",
                self.view.projection_distance
            );
            self.view.projection_distance = 12.0;
        }
        if self.view.falloff_distance <= 0.0 {
            log::warn!(
                "view.falloff_distance {} is not positive, using 12",
                self.view.falloff_distance
            );
            self.view.falloff_distance = 12.0;
        }
        if self.minimap.w_max <= self.minimap.w_min {
            log::warn!(
                "minimap w range [{}, {}] is empty, using [-6, 6]",
                self.minimap.w_min,
                self.minimap.w_max
            );
            self.minimap.w_min = -6.0;
            self.minimap.w_max = 6.0;
        }
        if self.input.layer_max < self.input.layer_min {
            log::warn!(
                "input layer range [{}, {}] is empty, using [-6, 6]",
                self.input.layer_min,
                self.input.layer_max
            );
            self.input.layer_min = -6.0;
            self.input.layer_max = 6.0;
        }
        self
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hyperdrift".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// World configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Path to the world template (RON)
    pub path: String,
    /// Radius within which collectibles are picked up
    pub pickup_radius: f32,
    /// Maximum w distance for a pickup
    pub pickup_w_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            path: "worlds/playground.ron".to_string(),
            pickup_radius: 1.2,
            pickup_w_radius: 1.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Movement speed (units per second)
    pub move_speed: f32,
    /// W-axis movement speed in continuous mode (units per second)
    pub w_speed: f32,
    /// Mouse sensitivity for 3D look
    pub mouse_sensitivity: f32,
    /// Mouse sensitivity for 4D look (right button held)
    pub w_look_sensitivity: f32,
    /// Step w discretely instead of continuously
    pub discrete_w: bool,
    /// Discrete step size along w
    pub w_step_size: f32,
    /// Milliseconds between discrete steps
    pub w_step_debounce_ms: u64,
    /// Lowest reachable layer
    pub layer_min: f32,
    /// Highest reachable layer
    pub layer_max: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            w_speed: 3.0,
            mouse_sensitivity: 0.002,
            w_look_sensitivity: 0.005,
            discrete_w: true,
            w_step_size: 1.0,
            w_step_debounce_ms: 200,
            layer_min: -6.0,
            layer_max: 6.0,
        }
    }
}

impl InputConfig {
    pub fn to_mapper_config(&self) -> MapperConfig {
        MapperConfig {
            move_speed: self.move_speed,
            w_speed: self.w_speed,
            mouse_sensitivity: self.mouse_sensitivity,
            w_look_sensitivity: self.w_look_sensitivity,
            w_mode: if self.discrete_w {
                WAxisMode::Discrete
            } else {
                WAxisMode::Continuous
            },
            step_size: self.w_step_size,
            debounce: std::time::Duration::from_millis(self.w_step_debounce_ms),
            layer_min: self.layer_min,
            layer_max: self.layer_max,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Jump velocity
    pub jump_velocity: f32,
    /// Maximum w distance at which a volume is solid
    pub w_collision_radius: f32,
    /// Horizontal margin added to volume footprints
    pub footprint_margin: f32,
    /// Forward speed above which leaving a ramp launches the player
    pub ramp_launch_speed: f32,
    /// Scales the vertical impulse of a ramp launch
    pub ramp_impulse_scale: f32,
    /// Airborne ticks required before a landing scores
    pub landing_bonus_min_ticks: u32,
    /// Points per airborne tick on a scoring landing
    pub landing_bonus_scale: f32,
    /// Falling below this y respawns the player
    pub respawn_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            jump_velocity: 8.0,
            w_collision_radius: 8.0,
            footprint_margin: 0.5,
            ramp_launch_speed: 6.0,
            ramp_impulse_scale: 0.55,
            landing_bonus_min_ticks: 18,
            landing_bonus_scale: 0.5,
            respawn_y: -40.0,
        }
    }
}

impl PhysicsConfig {
    pub fn to_resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            gravity: self.gravity,
            jump_velocity: self.jump_velocity,
            w_collision_radius: self.w_collision_radius,
            footprint_margin: self.footprint_margin,
            ramp_launch_speed: self.ramp_launch_speed,
            ramp_impulse_scale: self.ramp_impulse_scale,
            landing_bonus_min_ticks: self.landing_bonus_min_ticks,
            landing_bonus_scale: self.landing_bonus_scale,
            respawn_y: self.respawn_y,
        }
    }
}

/// Projection and render feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Perspective projection distance
    pub projection_distance: f32,
    /// How strongly w distance feeds the perspective divide
    pub w_sensitivity: f32,
    /// w distance at which opacity reaches the floor
    pub falloff_distance: f32,
    /// Entities never fade below this opacity
    pub opacity_floor: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            projection_distance: 12.0,
            w_sensitivity: 0.6,
            falloff_distance: 12.0,
            opacity_floor: 0.15,
        }
    }
}

impl ViewConfig {
    pub fn to_feed_config(&self) -> FeedConfig {
        FeedConfig {
            projection_distance: self.projection_distance,
            w_sensitivity: self.w_sensitivity,
            falloff_distance: self.falloff_distance,
            opacity_floor: self.opacity_floor,
        }
    }
}

/// Minimap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// w mapped to the bottom edge of the side view
    pub w_min: f32,
    /// w mapped to the top edge of the side view
    pub w_max: f32,
    /// World half-extent in x/z covered by the map
    pub world_half_extent: f32,
    /// Map edge length in pixels
    pub map_size: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            w_min: -6.0,
            w_max: 6.0,
            world_half_extent: 40.0,
            map_size: 200.0,
        }
    }
}

impl MapConfig {
    pub fn to_minimap_config(&self) -> MinimapConfig {
        MinimapConfig {
            w_min: self.w_min,
            w_max: self.w_max,
            world_half_extent: self.world_half_extent,
            map_size: self.map_size,
            ..MinimapConfig::default()
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Ticks between HUD snapshots
    pub hud_interval_ticks: u32,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            hud_interval_ticks: 30,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

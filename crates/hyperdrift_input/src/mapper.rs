//! Control mapper
//!
//! Converts raw device input into a [`Movement4D`] per tick. Events write
//! into held-key and pointer-delta buffers as they arrive; [`ControlMapper::sample`]
//! drains those buffers exactly once per tick, so input faster than one tick
//! coalesces rather than racing.
//!
//! Controls:
//! - W/S: forward/backward (z)
//! - A/D: strafe left/right (x)
//! - Space/Shift: up/down intent (y)
//! - Q/E: ana/kata, the fourth axis (w), continuous or discrete stepping
//! - Mouse drag while captured: camera yaw/pitch
//! - Right-click held + drag: 4D look (X-W / Z-W view angles)

use std::time::Duration;

use bitflags::bitflags;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use hyperdrift_math::ViewAngles;

use crate::Movement4D;

bitflags! {
    /// Currently held movement keys
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Held: u16 {
        const FORWARD  = 1 << 0;
        const BACKWARD = 1 << 1;
        const LEFT     = 1 << 2;
        const RIGHT    = 1 << 3;
        const RISE     = 1 << 4;
        const FALL     = 1 << 5;
        const ANA      = 1 << 6;
        const KATA     = 1 << 7;
    }
}

/// How the fourth axis responds to its key pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WAxisMode {
    /// Proportional to held keys, applied every tick like the other axes
    Continuous,
    /// One fixed-size step per key-down edge, gated by a debounce interval
    Discrete,
}

/// Mapper tuning
#[derive(Clone, Debug)]
pub struct MapperConfig {
    /// Movement speed for x/y/z axes (units/sec)
    pub move_speed: f32,
    /// Fourth-axis speed in continuous mode (units/sec)
    pub w_speed: f32,
    /// Pointer sensitivity for camera yaw/pitch
    pub mouse_sensitivity: f32,
    /// Pointer sensitivity for the 4D view angles
    pub w_look_sensitivity: f32,
    /// Fourth-axis mode
    pub w_mode: WAxisMode,
    /// Step size in discrete mode (world w units)
    pub step_size: f32,
    /// Minimum time between accepted discrete steps
    pub debounce: Duration,
    /// Lowest reachable layer w (jump targets clamp here)
    pub layer_min: f32,
    /// Highest reachable layer w
    pub layer_max: f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            w_speed: 3.0,
            mouse_sensitivity: 0.002,
            w_look_sensitivity: 0.005,
            w_mode: WAxisMode::Discrete,
            step_size: 1.0,
            debounce: Duration::from_millis(200),
            layer_min: -6.0,
            layer_max: 6.0,
        }
    }
}

/// Maximum camera pitch, just shy of straight up/down
const PITCH_LIMIT: f32 = 1.55;

/// The input/control mapper.
///
/// Overlay controls (on-screen step buttons, the jump-to-layer selector)
/// feed the same queues as the keyboard, so downstream consumers are
/// input-source-agnostic.
pub struct ControlMapper {
    config: MapperConfig,

    held: Held,
    /// Right mouse button held: pointer deltas route into the 4D view angles
    look_4d: bool,

    // Pointer delta accumulator, drained once per sample
    pending_dx: f32,
    pending_dy: f32,

    // Routing destinations for the single pointer stream
    yaw: f32,
    pitch: f32,
    view_angles: ViewAngles,

    // Discrete fourth-axis stepping. Keyboard-originated steps are movement
    // input and only honored while the pointer is captured; overlay steps
    // work regardless, so the two queue separately.
    queued_overlay_w: f32,
    queued_keyboard_w: f32,
    last_step_at: Option<Duration>,
    pending_layer_jump: Option<f32>,
}

impl ControlMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            held: Held::empty(),
            look_4d: false,
            pending_dx: 0.0,
            pending_dy: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            view_angles: ViewAngles::IDENTITY,
            queued_overlay_w: 0.0,
            queued_keyboard_w: 0.0,
            last_step_at: None,
            pending_layer_jump: None,
        }
    }

    /// Process a keyboard event. `now` comes from the injected clock and
    /// feeds the discrete-step debounce. Returns true if the key was handled.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, now: Duration) -> bool {
        let pressed = state == ElementState::Pressed;
        let bit = match key {
            KeyCode::KeyW => Held::FORWARD,
            KeyCode::KeyS => Held::BACKWARD,
            KeyCode::KeyA => Held::LEFT,
            KeyCode::KeyD => Held::RIGHT,
            KeyCode::Space => Held::RISE,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Held::FALL,
            KeyCode::KeyQ => Held::ANA,
            KeyCode::KeyE => Held::KATA,
            _ => return false,
        };

        // Discrete stepping is edge-driven: only a transition from released
        // to held can fire, so OS key repeat never produces extra steps.
        if pressed
            && !self.held.contains(bit)
            && self.config.w_mode == WAxisMode::Discrete
        {
            let direction = if bit == Held::ANA {
                1.0
            } else if bit == Held::KATA {
                -1.0
            } else {
                0.0
            };
            if direction != 0.0 {
                if let Some(step) = self.try_step(direction, now) {
                    self.queued_keyboard_w += step;
                }
            }
        }

        self.held.set(bit, pressed);
        true
    }

    /// Process a mouse button event. Right button gates the 4D look mode.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.look_4d = state == ElementState::Pressed;
        }
    }

    /// Accumulate a raw pointer delta. Routing into camera look or 4D view
    /// angles is decided at sample time; there is only one delta stream.
    pub fn process_pointer_delta(&mut self, dx: f64, dy: f64) {
        self.pending_dx += dx as f32;
        self.pending_dy += dy as f32;
    }

    /// Overlay button: step toward +w. Shares the keyboard's debounce but
    /// drains without pointer capture.
    pub fn overlay_step_up(&mut self, now: Duration) {
        if let Some(step) = self.try_step(1.0, now) {
            self.queued_overlay_w += step;
        }
    }

    /// Overlay button: step toward -w. Shares the keyboard's debounce but
    /// drains without pointer capture.
    pub fn overlay_step_down(&mut self, now: Duration) {
        if let Some(step) = self.try_step(-1.0, now) {
            self.queued_overlay_w += step;
        }
    }

    /// Request a jump to a named layer's w. Out-of-range targets clamp to
    /// the configured bounds; nothing is reported beyond that.
    pub fn jump_to_layer(&mut self, w: f32) {
        let clamped = w.clamp(self.config.layer_min, self.config.layer_max);
        self.pending_layer_jump = Some(clamped);
    }

    /// Drain a pending layer jump, if any
    pub fn take_layer_jump(&mut self) -> Option<f32> {
        self.pending_layer_jump.take()
    }

    fn try_step(&mut self, direction: f32, now: Duration) -> Option<f32> {
        if let Some(last) = self.last_step_at {
            if now.saturating_sub(last) < self.config.debounce {
                return None;
            }
        }
        self.last_step_at = Some(now);
        Some(direction * self.config.step_size)
    }

    /// Drain accumulated input into a [`Movement4D`] for this tick.
    ///
    /// Movement input - continuous axes and keyboard-queued discrete steps -
    /// is honored only while the pointer is captured; uncaptured keyboard
    /// steps are discarded, not deferred. Overlay steps and layer jumps
    /// drain regardless, since the overlay controls work without capture.
    pub fn sample(&mut self, dt: f32, captured: bool) -> Movement4D {
        // Route the pointer stream. The 4D look modifier wins; otherwise
        // the deltas feed normal camera yaw/pitch while captured.
        if self.look_4d {
            self.view_angles.accumulate(
                self.pending_dx * self.config.w_look_sensitivity,
                self.pending_dy * self.config.w_look_sensitivity,
            );
        } else if captured {
            self.yaw += self.pending_dx * self.config.mouse_sensitivity;
            self.pitch = (self.pitch - self.pending_dy * self.config.mouse_sensitivity)
                .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;

        let axis = |pos: Held, neg: Held| -> f32 {
            (self.held.contains(pos) as i32 - self.held.contains(neg) as i32) as f32
        };

        let (dx, dy, dz) = if captured {
            (
                axis(Held::RIGHT, Held::LEFT) * self.config.move_speed * dt,
                axis(Held::RISE, Held::FALL) * self.config.move_speed * dt,
                axis(Held::FORWARD, Held::BACKWARD) * self.config.move_speed * dt,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let keyboard_w = std::mem::take(&mut self.queued_keyboard_w);
        let dw = match self.config.w_mode {
            WAxisMode::Continuous => {
                let held = if captured {
                    axis(Held::ANA, Held::KATA) * self.config.w_speed * dt
                } else {
                    0.0
                };
                held + std::mem::take(&mut self.queued_overlay_w)
            }
            WAxisMode::Discrete => {
                let from_keyboard = if captured { keyboard_w } else { 0.0 };
                std::mem::take(&mut self.queued_overlay_w) + from_keyboard
            }
        };

        Movement4D { dx, dy, dz, dw }
    }

    /// Camera yaw accumulated from the pointer
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Camera pitch accumulated from the pointer
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Accumulated 4D view angles
    #[inline]
    pub fn view_angles(&self) -> ViewAngles {
        self.view_angles
    }

    /// Whether the 4D look modifier is currently held
    #[inline]
    pub fn is_look_4d(&self) -> bool {
        self.look_4d
    }
}

//! Hyperdrift frontend
//!
//! Window and event plumbing around [`Session`]. Raw winit events are
//! forwarded to the control mapper; each redraw advances the simulation one
//! tick and hands the resulting feeds to the renderer (external, not wired
//! here - the frame is still fully produced each tick).

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

use hyperdrift::{AppConfig, Session};
use hyperdrift_input::{Clock, SystemClock};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    session: Session,
    clock: SystemClock,
    last_frame: std::time::Instant,
    cursor_captured: bool,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let session = Session::from_config(&config)
            .unwrap_or_else(|e| panic!("Failed to load world '{}': {}", config.world.path, e));

        log::info!(
            "Loaded world '{}' with {} volumes and {} collectibles",
            config.world.path,
            session.world().volumes().len(),
            session.world().live_collectible_count()
        );

        Self {
            config,
            window: None,
            session,
            clock: SystemClock::new(),
            last_frame: std::time::Instant::now(),
            cursor_captured: false,
        }
    }

    /// Capture cursor for FPS-style controls
    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            // Try Locked mode first (best for FPS), fall back to Confined
            let grab_result = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));

            if grab_result.is_ok() {
                window.set_cursor_visible(false);
                self.cursor_captured = true;
                log::info!("Cursor captured - Escape to release");
            } else {
                log::warn!("Failed to capture cursor");
            }
        }
    }

    /// Release cursor
    fn release_cursor(&mut self) {
        if let Some(window) = &self.window {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
            self.cursor_captured = false;
            log::info!("Cursor released - click to capture");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title(&self.config.window.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window.width,
                    self.config.window.height,
                ));

            let window = Arc::new(
                event_loop
                    .create_window(window_attributes)
                    .expect("Failed to create window"),
            );

            if self.config.window.fullscreen {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            window.request_redraw();
            self.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let now = self.clock.now();
                    // Handle special keys on press
                    if event.state == ElementState::Pressed {
                        match key {
                            KeyCode::Escape => {
                                // Escape releases cursor first, then exits if pressed again
                                if self.cursor_captured {
                                    self.release_cursor();
                                } else {
                                    event_loop.exit();
                                }
                                return;
                            }
                            KeyCode::PageUp => {
                                self.session.mapper.overlay_step_up(now);
                            }
                            KeyCode::PageDown => {
                                self.session.mapper.overlay_step_down(now);
                            }
                            KeyCode::KeyF => {
                                if let Some(window) = &self.window {
                                    let new_fullscreen = if window.fullscreen().is_some() {
                                        None
                                    } else {
                                        Some(Fullscreen::Borderless(None))
                                    };
                                    window.set_fullscreen(new_fullscreen);
                                }
                            }
                            _ => {}
                        }
                    }
                    // Pass to mapper for movement keys
                    self.session.mapper.process_keyboard(key, event.state, now);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                // Click to capture cursor (FPS style)
                if state == ElementState::Pressed
                    && button == MouseButton::Left
                    && !self.cursor_captured
                {
                    self.capture_cursor();
                }
                self.session.mapper.process_mouse_button(button, state);
            }

            WindowEvent::RedrawRequested => {
                // Calculate delta time
                let now = std::time::Instant::now();
                let raw_dt = (now - self.last_frame).as_secs_f32();
                // Cap dt to prevent huge physics steps on first frame or after window focus
                let dt = raw_dt.min(1.0 / 30.0);
                self.last_frame = now;

                let frame = self.session.step(dt, self.cursor_captured);

                if let Some(hud) = &frame.hud {
                    log::debug!(
                        "score {} | layer {:.1} | {} left | {}",
                        hud.score,
                        hud.layer,
                        hud.collectibles_left,
                        if hud.grounded { "grounded" } else { "airborne" }
                    );
                }

                // Update window title with debug info
                if let Some(window) = &self.window {
                    let pos = self.session.player_position();
                    let base_title = &self.config.window.title;
                    let hint = if self.cursor_captured {
                        "Esc to release"
                    } else {
                        "Click to capture"
                    };
                    let title = format!(
                        "{} - ({:.1}, {:.1}, {:.1}) W:{:.1} score {} [{}]",
                        base_title,
                        pos.x,
                        pos.y,
                        pos.z,
                        pos.w,
                        self.session.world().player.score,
                        hint
                    );
                    window.set_title(&title);
                }

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.session.mapper.process_pointer_delta(delta.0, delta.1);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.cursor_captured {
            self.release_cursor();
        }
        let hud = self.session.hud_snapshot();
        log::info!(
            "Exiting with score {} and {} collectibles left",
            hud.score,
            hud.collectibles_left
        );
    }
}

fn main() {
    // Initialize logging
    env_logger::init();
    log::info!("Starting Hyperdrift");

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}

//! Hyperdrift - a 4D platforming engine
//!
//! The world lives in four spatial dimensions (x, y, z, w); the fourth axis
//! behaves as a stack of parallel layers the player shifts between. The
//! engine simulates movement, ground collision, ramps, and collectibles, and
//! emits pure data feeds for an external renderer.

pub mod config;
pub mod session;

pub use config::AppConfig;
pub use session::{FrameOutput, HudSnapshot, Session, SessionError};

pub use hyperdrift_input as input;
pub use hyperdrift_math as math;
pub use hyperdrift_physics as physics;
pub use hyperdrift_view as view;
pub use hyperdrift_world as world;

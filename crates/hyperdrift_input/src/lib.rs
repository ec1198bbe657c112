//! Input handling for Hyperdrift
//!
//! Converts raw keyboard/pointer/overlay events into a single
//! [`Movement4D`] contract per tick, regardless of source device. The fourth
//! axis supports continuous movement or discrete, debounced layer steps; a
//! modifier reroutes pointer drags from camera look into the 4D view angles.

mod clock;
mod movement;
mod mapper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use movement::Movement4D;
pub use mapper::{ControlMapper, MapperConfig, WAxisMode};

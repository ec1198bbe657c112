//! Collision and grounding for Hyperdrift
//!
//! The per-tick query that turns a 4D player position and velocity into
//! ground contact, ramp interaction, and fourth-axis solidity. Solidity is a
//! function of w distance: volumes beyond the collision radius cannot be
//! touched regardless of x/y/z overlap.

mod resolver;

pub use resolver::{
    GroundContact, GroundResolver, ResolverConfig, CONTACT_BAND_ABOVE, CONTACT_BAND_BELOW,
};

//! Player pose
//!
//! The single mutable actor in the world. Mutated once per tick by the
//! control mapper and the grounding resolver; owned by the frame driver.

use hyperdrift_math::Vec4;

/// The player's full simulation state.
///
/// `grounded` and `airborne_ticks` are recomputed/maintained by the grounding
/// resolver each tick; nothing here is carried over speculatively.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerPose {
    /// Position in native 4D space
    pub position: Vec4,
    /// Facing angle, rotation about Y in the x/z plane (radians)
    pub yaw: f32,
    /// Signed forward speed along the facing direction (units/sec)
    pub forward_speed: f32,
    /// Vertical velocity (units/sec, negative = falling)
    pub vertical_velocity: f32,
    /// Whether the player stands on a qualifying surface this tick
    pub grounded: bool,
    /// Consecutive ticks spent airborne, reset on landing
    pub airborne_ticks: u32,
    /// Accumulated score/currency
    pub score: u32,
}

impl PlayerPose {
    /// Create a pose at the given spawn position, at rest and airborne.
    ///
    /// The first resolver tick settles the grounded flag.
    pub fn at_spawn(spawn: Vec4) -> Self {
        Self {
            position: spawn,
            yaw: 0.0,
            forward_speed: 0.0,
            vertical_velocity: 0.0,
            grounded: false,
            airborne_ticks: 0,
            score: 0,
        }
    }

    /// Reset to the spawn pose with zeroed velocities.
    ///
    /// This is the designed respawn transition, not an error path. Score is
    /// kept; falling off the world costs position, not progress.
    pub fn respawn(&mut self, spawn: Vec4) {
        self.position = spawn;
        self.forward_speed = 0.0;
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.airborne_ticks = 0;
    }

    /// Award score, saturating rather than wrapping
    pub fn award(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_spawn() {
        let spawn = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let pose = PlayerPose::at_spawn(spawn);

        assert_eq!(pose.position, spawn);
        assert_eq!(pose.forward_speed, 0.0);
        assert_eq!(pose.vertical_velocity, 0.0);
        assert!(!pose.grounded);
        assert_eq!(pose.airborne_ticks, 0);
        assert_eq!(pose.score, 0);
    }

    #[test]
    fn test_respawn_keeps_score() {
        let spawn = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let mut pose = PlayerPose::at_spawn(spawn);
        pose.position = Vec4::new(50.0, -100.0, 3.0, 7.0);
        pose.vertical_velocity = -40.0;
        pose.forward_speed = 9.0;
        pose.airborne_ticks = 120;
        pose.award(250);

        pose.respawn(spawn);

        assert_eq!(pose.position, spawn);
        assert_eq!(pose.vertical_velocity, 0.0);
        assert_eq!(pose.forward_speed, 0.0);
        assert_eq!(pose.airborne_ticks, 0);
        assert_eq!(pose.score, 250);
    }

    #[test]
    fn test_award_saturates() {
        let mut pose = PlayerPose::at_spawn(Vec4::ZERO);
        pose.score = u32::MAX - 1;
        pose.award(10);
        assert_eq!(pose.score, u32::MAX);
    }
}

//! Grounding resolver
//!
//! Given the current player pose and the fixed volume set, decides ground
//! contact and its consequences each tick: snapping onto surfaces, ramp
//! launches, landing bonuses, and the respawn safety net.
//!
//! The resolver recomputes `grounded` from scratch every tick from the pose
//! and the volumes; the flag is never carried over speculatively. It performs
//! no rendering or minimap work and emits only an updated pose.

use hyperdrift_math::Vec4;
use hyperdrift_world::{PlayerPose, Volume, BASE_FLOOR_BAND};

/// How far below a contact height the player still counts as grounded
pub const CONTACT_BAND_BELOW: f32 = 2.0;
/// How far above a contact height the player still counts as grounded
pub const CONTACT_BAND_ABOVE: f32 = 1.0;

/// Tuning for the grounding resolver
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    /// Gravity acceleration (negative = down)
    pub gravity: f32,
    /// Volumes farther than this along w cannot be touched at all
    pub w_collision_radius: f32,
    /// Footprint margin added to volume half-extents for overlap tests
    pub footprint_margin: f32,
    /// Vertical velocity applied on jump
    pub jump_velocity: f32,
    /// Minimum |forward speed| for a ramp to launch the player
    pub ramp_launch_speed: f32,
    /// Launch impulse = |forward speed| * scale * sin(rise angle)
    pub ramp_impulse_scale: f32,
    /// Airborne ticks required before a landing pays a bonus
    pub landing_bonus_min_ticks: u32,
    /// Score per airborne tick on a qualifying landing
    pub landing_bonus_scale: f32,
    /// Falling below this y triggers a respawn
    pub respawn_y: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            w_collision_radius: 8.0,
            footprint_margin: 0.5,
            jump_velocity: 8.0,
            ramp_launch_speed: 6.0,
            ramp_impulse_scale: 0.55,
            landing_bonus_min_ticks: 18,
            landing_bonus_scale: 0.5,
            respawn_y: -40.0,
        }
    }
}

/// A qualifying ground contact candidate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundContact {
    /// Surface height the player would stand at
    pub height: f32,
    /// Rise angle of the surface (0 for flat and the base floor)
    pub rise_angle: f32,
    /// Whether the surface is a ramp (drives the launch behavior)
    pub on_ramp: bool,
}

/// The per-tick grounding resolver
pub struct GroundResolver {
    pub config: ResolverConfig,
}

impl GroundResolver {
    /// Create a resolver with the given configuration
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Attempt a jump; only has an effect while grounded
    pub fn jump(&self, pose: &mut PlayerPose) {
        if pose.grounded {
            pose.vertical_velocity = self.config.jump_velocity;
            pose.grounded = false;
        }
    }

    /// Find the best ground contact for the pose, if any.
    ///
    /// Candidates are volumes within the w collision radius whose widened
    /// footprint covers the player and whose surface height is within the
    /// contact band of the player's y. The implicit base floor (contact
    /// height 0, unbounded in x/z, any w) qualifies whenever y is at or
    /// below its band. When several candidates qualify, the highest surface
    /// wins: the player stands on the topmost.
    pub fn best_contact(&self, pose: &PlayerPose, volumes: &[Volume]) -> Option<GroundContact> {
        let px = pose.position.x;
        let py = pose.position.y;
        let pz = pose.position.z;
        let pw = pose.position.w;

        let mut best: Option<GroundContact> = None;

        for volume in volumes {
            // Fourth-axis solidity gate: beyond the radius the volume is
            // intangible no matter the x/y/z overlap.
            if (pw - volume.layer_w()).abs() > self.config.w_collision_radius {
                continue;
            }
            if !volume.overlaps_horizontal(px, pz, self.config.footprint_margin) {
                continue;
            }

            let height = volume.contact_height(px, pz);
            if py < height - CONTACT_BAND_BELOW || py > height + CONTACT_BAND_ABOVE {
                continue;
            }

            let candidate = GroundContact {
                height,
                rise_angle: volume.rise_angle(),
                on_ramp: matches!(volume.kind, hyperdrift_world::VolumeKind::Ramp(_)),
            };
            if best.map_or(true, |b| candidate.height > b.height) {
                best = Some(candidate);
            }
        }

        // Base floor: always a candidate, at any w, with no x/z bound.
        if py <= BASE_FLOOR_BAND {
            let floor = GroundContact { height: 0.0, rise_angle: 0.0, on_ramp: false };
            if best.map_or(true, |b| floor.height > b.height) {
                best = Some(floor);
            }
        }

        best
    }

    /// Run one resolver tick: integrate gravity, resolve grounding, apply
    /// landing bonuses and ramp launches, and respawn if the player fell out
    /// of the world.
    pub fn step(&self, pose: &mut PlayerPose, volumes: &[Volume], spawn: Vec4, dt: f32) {
        // Integrate gravity
        pose.vertical_velocity += self.config.gravity * dt;
        pose.position.y += pose.vertical_velocity * dt;

        // Safety net first: the base floor has no lower bound, so contact
        // resolution would otherwise snap a player who already fell out of
        // the world back to y = 0. The respawn is a designed transition,
        // not an error.
        if pose.position.y < self.config.respawn_y {
            log::info!(
                "Player fell out of the world at {:?}, respawning",
                pose.position
            );
            pose.respawn(spawn);
            return;
        }

        let contact = self.best_contact(pose, volumes);

        match contact {
            // Only settle onto a surface while falling or at rest; a player
            // moving upward through the band (fresh jump) stays airborne.
            Some(contact) if pose.vertical_velocity <= 0.0 => {
                pose.position.y = contact.height;
                pose.vertical_velocity = 0.0;

                // Landing transition: award the air-time bonus exactly once
                if pose.airborne_ticks > 0 {
                    if pose.airborne_ticks > self.config.landing_bonus_min_ticks {
                        let bonus =
                            (pose.airborne_ticks as f32 * self.config.landing_bonus_scale) as u32;
                        pose.award(bonus);
                        log::debug!(
                            "Landing bonus: {} after {} airborne ticks",
                            bonus,
                            pose.airborne_ticks
                        );
                    }
                    pose.airborne_ticks = 0;
                }
                pose.grounded = true;

                // Ramp launch happens in the same tick, not deferred
                if contact.on_ramp && pose.forward_speed.abs() > self.config.ramp_launch_speed {
                    pose.vertical_velocity = pose.forward_speed.abs()
                        * self.config.ramp_impulse_scale
                        * contact.rise_angle.sin();
                    pose.grounded = false;
                }
            }
            _ => {
                pose.grounded = false;
                pose.airborne_ticks = pose.airborne_ticks.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperdrift_world::{Extents, RampDirection, Volume};

    const DT: f32 = 1.0 / 60.0;
    const EPSILON: f32 = 0.0001;

    fn resolver() -> GroundResolver {
        GroundResolver::new(ResolverConfig::default())
    }

    fn flat_platform(w: f32) -> Volume {
        Volume::flat(Vec4::new(0.0, 0.0, 0.0, w), Extents::new(30.0, 1.0, 30.0))
    }

    fn ramp() -> Volume {
        // Spans x in [-5, 5], bottom y=0, top y=4
        Volume::ramp(
            Vec4::new(0.0, 2.0, 0.0, 0.0),
            Extents::new(10.0, 4.0, 6.0),
            RampDirection::PlusX,
        )
    }

    fn pose_at(x: f32, y: f32, z: f32, w: f32) -> PlayerPose {
        let mut pose = PlayerPose::at_spawn(Vec4::new(x, y, z, w));
        pose.grounded = false;
        pose
    }

    #[test]
    fn test_grounded_on_flat_volume() {
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
        // Surface of a height-1 slab centered at y=0
        assert!((pose.position.y - 0.5).abs() < EPSILON);
        assert_eq!(pose.vertical_velocity, 0.0);
    }

    #[test]
    fn test_w_distance_defeats_grounding() {
        // Same x/y/z, but w=9 exceeds the collision radius of 8: the volume
        // is intangible and the player falls past its surface.
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 9.0);

        // Several ticks: the player drops off the 0.5 surface...
        for _ in 0..30 {
            r.step(&mut pose, &volumes, Vec4::ZERO, DT);
        }

        // ...and settles on the base floor at 0, not the volume at 0.5
        assert!(pose.grounded);
        assert!((pose.position.y - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_w_within_radius_still_solid() {
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 7.5);

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
        assert!((pose.position.y - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_highest_contact_wins() {
        let r = resolver();
        let low = flat_platform(0.0);
        let high = Volume::flat(Vec4::new(0.0, 1.0, 0.0, 0.0), Extents::new(10.0, 1.0, 10.0));
        let mut pose = pose_at(0.0, 1.5, 0.0, 0.0);

        r.step(&mut pose, &[low, high], Vec4::ZERO, DT);

        assert!(pose.grounded);
        // Stands on the topmost qualifying surface (1.0 + 0.5)
        assert!((pose.position.y - 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_base_floor_catches_everywhere() {
        let r = resolver();
        // Far from any volume, at an arbitrary w
        let mut pose = pose_at(500.0, 0.4, -300.0, 3.7);

        r.step(&mut pose, &[], Vec4::ZERO, DT);

        assert!(pose.grounded);
        assert!((pose.position.y - 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_ramp_contact_follows_progress() {
        let r = resolver();
        let volumes = [ramp()];
        let mut pose = pose_at(0.0, 2.0, 0.0, 0.0);

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
        // Midpoint of the ramp: height 2
        assert!((pose.position.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_ramp_launch_above_speed_threshold() {
        let r = resolver();
        let volumes = [ramp()];
        let mut pose = pose_at(0.0, 2.0, 0.0, 0.0);
        pose.forward_speed = 10.0; // above the 6.0 threshold

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        // Launched in the same tick: airborne with upward velocity
        assert!(!pose.grounded);
        assert!(pose.vertical_velocity > 0.0);
    }

    #[test]
    fn test_no_ramp_launch_below_threshold() {
        let r = resolver();
        let volumes = [ramp()];
        let mut pose = pose_at(0.0, 2.0, 0.0, 0.0);
        pose.forward_speed = 3.0;

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
        assert_eq!(pose.vertical_velocity, 0.0);
    }

    #[test]
    fn test_flat_volume_never_launches() {
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);
        pose.forward_speed = 50.0;

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
    }

    #[test]
    fn test_landing_bonus_paid_exactly_once() {
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);
        pose.airborne_ticks = 40; // above the 18-tick minimum

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        let expected = (40.0 * r.config.landing_bonus_scale) as u32;
        assert!(pose.grounded);
        assert_eq!(pose.score, expected);
        assert_eq!(pose.airborne_ticks, 0);

        // Further grounded ticks pay nothing
        for _ in 0..10 {
            r.step(&mut pose, &volumes, Vec4::ZERO, DT);
        }
        assert_eq!(pose.score, expected);
    }

    #[test]
    fn test_short_hop_pays_no_bonus() {
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);
        pose.airborne_ticks = 5; // below the minimum

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(pose.grounded);
        assert_eq!(pose.score, 0);
        assert_eq!(pose.airborne_ticks, 0);
    }

    #[test]
    fn test_airborne_ticks_accumulate() {
        let r = resolver();
        let mut pose = pose_at(0.0, 30.0, 0.0, 0.0);

        for _ in 0..5 {
            r.step(&mut pose, &[], Vec4::ZERO, DT);
        }

        assert!(!pose.grounded);
        assert_eq!(pose.airborne_ticks, 5);
    }

    #[test]
    fn test_jump_only_while_grounded() {
        let r = resolver();
        let mut pose = pose_at(0.0, 0.0, 0.0, 0.0);
        pose.grounded = true;

        r.jump(&mut pose);
        assert!(!pose.grounded);
        assert_eq!(pose.vertical_velocity, r.config.jump_velocity);

        let v = pose.vertical_velocity;
        r.jump(&mut pose); // airborne: no effect
        assert_eq!(pose.vertical_velocity, v);
    }

    #[test]
    fn test_jump_not_swallowed_by_band() {
        // Right after a jump the player is still inside the contact band but
        // moving upward; the resolver must not snap them back down.
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);
        pose.grounded = true;
        r.jump(&mut pose);

        r.step(&mut pose, &volumes, Vec4::ZERO, DT);

        assert!(!pose.grounded);
        assert!(pose.position.y > 0.5);
    }

    #[test]
    fn test_respawn_below_threshold() {
        let r = resolver();
        let spawn = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let mut pose = pose_at(12.0, -50.0, 8.0, 5.0);
        pose.vertical_velocity = -30.0;
        pose.forward_speed = 4.0;

        r.step(&mut pose, &[], spawn, DT);

        assert_eq!(pose.position, spawn);
        assert_eq!(pose.vertical_velocity, 0.0);
        assert_eq!(pose.forward_speed, 0.0);
    }

    #[test]
    fn test_base_floor_does_not_preempt_respawn() {
        // The unbounded base floor must not snap a player who is already
        // below the respawn threshold back to y = 0; the respawn runs
        // before contact resolution.
        let r = resolver();
        let spawn = Vec4::new(0.0, 1.0, 0.0, 0.0);
        let mut pose = pose_at(0.0, -45.0, 0.0, 0.0);
        pose.vertical_velocity = -10.0;

        r.step(&mut pose, &[], spawn, DT);

        assert_eq!(pose.position, spawn);
        assert!(!pose.grounded);
        assert_eq!(pose.vertical_velocity, 0.0);
    }

    #[test]
    fn test_grounded_recomputed_each_tick() {
        // A stale grounded flag from a previous tick must not survive the
        // volume disappearing from reach.
        let r = resolver();
        let volumes = [flat_platform(0.0)];
        let mut pose = pose_at(0.0, 0.5, 0.0, 0.0);
        r.step(&mut pose, &volumes, Vec4::ZERO, DT);
        assert!(pose.grounded);

        // Teleport the player far away horizontally, above base-floor band
        pose.position.x = 100.0;
        pose.position.y = 5.0;
        r.step(&mut pose, &volumes, Vec4::ZERO, DT);
        assert!(!pose.grounded);
    }
}

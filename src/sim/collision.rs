//! Ball-terrain collision response
//!
//! Reflection with restitution, plus the two heuristics that keep play
//! moving: a slope assist for balls creeping down shallow hills, and a hard
//! settle stop that ends infinite low-energy micro-bouncing.

use glam::Vec3;

use super::state::Ball;
use super::terrain::Terrain;
use crate::tuning::Tuning;

/// Standard reflection of `v` about the unit normal `n`: v − 2n(n·v)
#[inline]
pub fn reflect_velocity(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * n.dot(v) * n
}

/// What the contact resolution did, for logging and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// No contact, or the ball was already moving away from the surface
    None,
    /// Reflected off the surface with energy loss
    Bounced,
    /// Hard-stopped on the surface
    Settled,
}

/// Resolve ball-terrain contact in place.
///
/// Triggers when the ball's underside is at or below the surface AND the
/// velocity points into it. A resting or zero velocity (dot ≥ 0) is a no-op,
/// so degenerate reflections never happen.
pub fn resolve_ground_contact(
    ball: &mut Ball,
    terrain: &Terrain,
    tuning: &Tuning,
    now: f32,
    last_action_time: f32,
) -> ContactOutcome {
    let ground = terrain.height(ball.pos.x, ball.pos.y);
    if ball.pos.z - ball.radius > ground {
        return ContactOutcome::None;
    }
    let normal = terrain.normal(ball.pos.x, ball.pos.y);
    if ball.vel.dot(normal) >= 0.0 {
        return ContactOutcome::None;
    }

    // Reflect with energy loss and clamp back onto the surface
    ball.vel = tuning.restitution * reflect_velocity(ball.vel, normal);
    ball.pos.z = ground + ball.radius;

    // Slow balls on a slope get a push so they don't crawl forever; the time
    // window prevents runaway feedback on long runs
    if normal.z < tuning.slope_flat_cutoff
        && ball.speed() < tuning.slope_assist_max_speed
        && now - last_action_time < tuning.slope_assist_window
    {
        ball.vel *= tuning.slope_assist_gain;
    }

    // Long after the kick, a slow contact is stopped outright
    if now - last_action_time > tuning.settle_timeout && ball.speed() < tuning.settle_max_speed {
        ball.vel = Vec3::ZERO;
        ball.pos.z = ground + ball.radius;
        return ContactOutcome::Settled;
    }

    ContactOutcome::Bounced
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flat_terrain() -> Terrain {
        let mut rng = Pcg32::seed_from_u64(1);
        Terrain::generate(64, 100.0, 0, &mut rng)
    }

    #[test]
    fn test_reflection_off_flat_floor() {
        // Straight down onto a flat floor comes straight back up
        let v = reflect_velocity(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        assert!((v - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_reflection_preserves_tangential_component() {
        let v = reflect_velocity(Vec3::new(3.0, -2.0, -5.0), Vec3::Z);
        assert!((v - Vec3::new(3.0, -2.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn test_bounce_applies_restitution() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let ground = terrain.height(0.0, 0.0);

        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, ground + 0.5);
        ball.vel = Vec3::new(1.0, 0.0, -10.0);
        let incoming_speed = ball.speed();

        let outcome = resolve_ground_contact(&mut ball, &terrain, &tuning, 1.0, 0.0);
        assert_eq!(outcome, ContactOutcome::Bounced);
        // Reflection preserves the norm, restitution scales it
        assert!((ball.speed() - tuning.restitution * incoming_speed).abs() < 1e-4);
        assert!(ball.vel.z > 0.0);
        assert!((ball.pos.z - (ground + ball.radius)).abs() < 1e-5);
    }

    #[test]
    fn test_no_contact_above_ground() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, terrain.height(0.0, 0.0) + 10.0);
        ball.vel = Vec3::new(0.0, 0.0, -1.0);
        let before = ball.vel;

        assert_eq!(
            resolve_ground_contact(&mut ball, &terrain, &tuning, 0.0, 0.0),
            ContactOutcome::None
        );
        assert_eq!(ball.vel, before);
    }

    #[test]
    fn test_zero_velocity_contact_is_a_noop() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, terrain.height(0.0, 0.0));
        ball.vel = Vec3::ZERO;

        assert_eq!(
            resolve_ground_contact(&mut ball, &terrain, &tuning, 0.0, 0.0),
            ContactOutcome::None
        );
        assert_eq!(ball.vel, Vec3::ZERO);
    }

    #[test]
    fn test_receding_velocity_is_a_noop() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, terrain.height(0.0, 0.0));
        ball.vel = Vec3::new(0.0, 0.0, 2.0);
        let before = ball.vel;

        assert_eq!(
            resolve_ground_contact(&mut ball, &terrain, &tuning, 0.0, 0.0),
            ContactOutcome::None
        );
        assert_eq!(ball.vel, before);
    }

    #[test]
    fn test_settle_after_timeout() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let ground = terrain.height(0.0, 0.0);
        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, ground + 0.5);
        ball.vel = Vec3::new(0.0, 0.0, -0.4);

        // Well past the settle timeout, slow contacts hard-stop
        let outcome =
            resolve_ground_contact(&mut ball, &terrain, &tuning, tuning.settle_timeout + 5.0, 0.0);
        assert_eq!(outcome, ContactOutcome::Settled);
        assert_eq!(ball.vel, Vec3::ZERO);
        assert!((ball.pos.z - (ground + ball.radius)).abs() < 1e-5);
    }

    #[test]
    fn test_no_settle_inside_timeout() {
        let terrain = flat_terrain();
        let tuning = Tuning::default();
        let ground = terrain.height(0.0, 0.0);
        let mut ball = Ball::new(1.0);
        ball.pos = Vec3::new(0.0, 0.0, ground + 0.5);
        ball.vel = Vec3::new(0.0, 0.0, -0.4);

        let outcome = resolve_ground_contact(&mut ball, &terrain, &tuning, 2.0, 0.0);
        assert_eq!(outcome, ContactOutcome::Bounced);
        assert!(ball.vel.z > 0.0);
    }

    proptest! {
        /// Reflection preserves the norm, so post-bounce speed is exactly
        /// restitution × incoming speed for any velocity that triggers contact.
        #[test]
        fn prop_restitution_fraction(
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
            vz in -20.0f32..-2.0,
        ) {
            let terrain = flat_terrain();
            let tuning = Tuning::default();
            let ground = terrain.height(0.0, 0.0);

            let mut ball = Ball::new(1.0);
            ball.pos = Vec3::new(0.0, 0.0, ground + 0.5);
            ball.vel = Vec3::new(vx, vy, vz);
            let incoming_speed = ball.speed();

            let outcome = resolve_ground_contact(&mut ball, &terrain, &tuning, 1.0, 0.0);
            prop_assert_eq!(outcome, ContactOutcome::Bounced);
            let expected = tuning.restitution * incoming_speed;
            prop_assert!((ball.speed() - expected).abs() < expected * 1e-4 + 1e-5);
        }

        /// Reflecting twice about the same normal gives back the original vector.
        #[test]
        fn prop_reflection_involution(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            vz in -20.0f32..20.0,
        ) {
            let v = Vec3::new(vx, vy, vz);
            let twice = reflect_velocity(reflect_velocity(v, Vec3::Z), Vec3::Z);
            prop_assert!((twice - v).length() < 1e-4);
        }
    }
}

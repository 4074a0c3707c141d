//! Per-frame simulation step
//!
//! Advances the ball under gravity while the aim phase is Idle, animates the
//! active aim parameter otherwise, and applies the discrete input events.
//! The caller supplies dt, so the step works at variable frame intervals.

use std::f32::consts::TAU;

use glam::Vec3;

use super::collision::{ContactOutcome, resolve_ground_contact};
use super::state::{AimPhase, SimState};
use super::target::check_hit;

/// Input events for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Confirm the current aim parameter (advances the phase, or launches)
    pub confirm: bool,
    /// Respawn the ball at a random position
    pub reset_ball: bool,
    /// Move the target to a random position
    pub reset_target: bool,
}

/// Advance the simulation by `dt` seconds.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    state.time += dt;
    let now = state.time;

    if input.reset_ball {
        state.respawn_ball();
    }
    if input.reset_target {
        state.respawn_target();
    }
    if input.confirm {
        confirm(state);
    }

    let tuning = state.tuning;
    let elapsed = now - state.aim.last_action_time;

    match state.aim.phase {
        AimPhase::Idle => integrate(state, dt),
        // Unbounded sweep: the aim indicator keeps rotating
        AimPhase::ChoosingPhi => {
            state.aim.angle_phi = TAU * elapsed * tuning.phi_freq;
        }
        AimPhase::ChoosingTheta => {
            state.aim.angle_theta =
                tuning.theta_base + tuning.theta_swing * (TAU * elapsed * tuning.theta_freq).sin();
        }
        AimPhase::ChoosingForce => {
            state.aim.force_strength =
                tuning.force_base + tuning.force_swing * (TAU * elapsed * tuning.force_freq).sin();
        }
    }

    // Stop detection: slow and near the ground starts a new aiming cycle
    if state.aim.phase == AimPhase::Idle {
        let ground = state.terrain.height(state.ball.pos.x, state.ball.pos.y);
        if state.ball.speed() < tuning.stop_threshold
            && state.ball.pos.z <= ground + 1.5 * state.ball.radius
        {
            state.aim.phase = AimPhase::ChoosingPhi;
            state.ball.pos.z = ground + state.ball.radius;
            state.ball.vel = Vec3::ZERO;
            state.aim.last_action_time = now;
            state.aim.reset_params(&tuning);
            log::debug!("ball stopped at {:?}, aiming", state.ball.pos);
        }
    }
}

/// Semi-implicit Euler step with target hit test and ground collision.
fn integrate(state: &mut SimState, dt: f32) {
    // Mass cancels: acceleration is g regardless of m
    let gravity = Vec3::new(0.0, 0.0, -state.tuning.gravity);
    state.ball.vel += dt * gravity;

    // Hit test against the movement segment before committing the position
    let old_pos = state.ball.pos;
    let new_pos = old_pos + dt * state.ball.vel;
    if check_hit(old_pos, new_pos, state.target.pos, state.target.outer_radius) {
        on_win(state);
    }
    state.ball.pos = new_pos;

    let tuning = state.tuning;
    let last_action = state.aim.last_action_time;
    match resolve_ground_contact(&mut state.ball, &state.terrain, &tuning, state.time, last_action)
    {
        ContactOutcome::Bounced => {
            log::trace!("bounce: speed {:.2}", state.ball.speed());
        }
        ContactOutcome::Settled => {
            log::debug!("ball settled at {:?}", state.ball.pos);
        }
        ContactOutcome::None => {}
    }
}

/// Advance the aim phase, or launch from the force phase. Does nothing while
/// the ball is in motion.
fn confirm(state: &mut SimState) {
    match state.aim.phase {
        AimPhase::Idle => {}
        AimPhase::ChoosingPhi => {
            state.aim.phase = AimPhase::ChoosingTheta;
            state.aim.last_action_time = state.time;
        }
        AimPhase::ChoosingTheta => {
            state.aim.phase = AimPhase::ChoosingForce;
            state.aim.last_action_time = state.time;
        }
        AimPhase::ChoosingForce => launch(state),
    }
}

/// Kick the ball with the frozen aim parameters and return to the movement
/// phase.
fn launch(state: &mut SimState) {
    let direction = state.aim.kick_direction();
    state.ball.vel = direction * state.aim.force_strength * state.tuning.force_coef;
    state.aim.phase = AimPhase::Idle;
    state.aim.last_action_time = state.time;
    log::info!(
        "launch: phi {:.2} theta {:.2} force {:.2}",
        state.aim.angle_phi,
        state.aim.angle_theta,
        state.aim.force_strength
    );
}

fn on_win(state: &mut SimState) {
    state.wins += 1;
    state.last_win_time = Some(state.time);
    log::info!("ball through the target! wins: {}", state.wins);
    state.respawn_target();
}

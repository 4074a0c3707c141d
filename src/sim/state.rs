//! Simulation state and core types
//!
//! Everything the simulation mutates lives in one explicit context struct;
//! no hidden statics, and the whole state serializes for replay/debugging.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::consts::*;
use crate::tuning::Tuning;

/// Discrete aiming phase
///
/// Exactly one phase is active; transitions are strictly sequential
/// Idle → Phi → Theta → Force → (launch) → Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimPhase {
    /// Ball in flight or rolling; physics integration runs
    Idle,
    /// Horizontal kick angle sweeping continuously
    ChoosingPhi,
    /// Vertical kick angle oscillating between bounds
    ChoosingTheta,
    /// Kick strength oscillating between bounds
    ChoosingForce,
}

/// The ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Aiming parameters, animated while their phase is active and frozen on
/// confirmation (the phase gates which parameter gets recomputed)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AimState {
    pub phase: AimPhase,
    pub angle_phi: f32,
    pub angle_theta: f32,
    pub force_strength: f32,
    /// Anchors the oscillation phase; stamped on every phase change
    pub last_action_time: f32,
}

impl AimState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: AimPhase::Idle,
            angle_phi: 0.0,
            angle_theta: tuning.theta_base,
            force_strength: tuning.force_base,
            last_action_time: 0.0,
        }
    }

    /// Reset the aim parameters to their defaults (start of a new aim cycle).
    pub fn reset_params(&mut self, tuning: &Tuning) {
        self.angle_phi = 0.0;
        self.angle_theta = tuning.theta_base;
        self.force_strength = tuning.force_base;
    }

    /// Unit launch heading: (1,0,0) pitched up by theta, then yawed by phi.
    pub fn kick_direction(&self) -> Vec3 {
        let rot = Quat::from_rotation_z(self.angle_phi) * Quat::from_rotation_y(-self.angle_theta);
        rot * Vec3::X
    }
}

/// The torus target; always faces the Y axis (a (0,1,0) vector goes through
/// the hole)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec3,
    pub outer_radius: f32,
    pub inner_radius: f32,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG driving terrain generation and respawn placement
    pub rng: Pcg32,
    /// Simulated time in seconds, accumulated from caller-supplied dt
    pub time: f32,
    pub terrain: Terrain,
    pub ball: Ball,
    pub aim: AimState,
    pub target: Target,
    /// Time of the last target pass-through, gating the cosmetic win response
    pub last_win_time: Option<f32>,
    pub wins: u32,
    pub tuning: Tuning,
}

impl SimState {
    /// Create a state with the default terrain configuration.
    pub fn new(seed: u64) -> Self {
        Self::with_terrain(seed, TERRAIN_SAMPLES, TERRAIN_LENGTH, N_BUMPS)
    }

    /// Create a state with an explicit terrain configuration.
    pub fn with_terrain(seed: u64, resolution: usize, length: f32, n_bumps: usize) -> Self {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::generate(resolution, length, n_bumps, &mut rng);

        let mut state = Self {
            seed,
            rng,
            time: 0.0,
            terrain,
            ball: Ball::new(BALL_RADIUS),
            aim: AimState::new(&tuning),
            target: Target {
                pos: Vec3::ZERO,
                outer_radius: TARGET_OUTER_RADIUS,
                inner_radius: TARGET_INNER_RADIUS,
            },
            last_win_time: None,
            wins: 0,
            tuning,
        };
        state.respawn_ball();
        state.respawn_target();
        state
    }

    /// Drop the ball at a random in-bounds position well above the ground,
    /// with zero velocity, and restart the movement phase.
    pub fn respawn_ball(&mut self) {
        let boundary = self.terrain.length * SPAWN_MARGIN;
        let x = self.rng.random_range(-boundary..=boundary);
        let y = self.rng.random_range(-boundary..=boundary);
        let z = self.terrain.height(x, y) + SPAWN_HEIGHT_RADII * self.ball.radius;

        self.ball.pos = Vec3::new(x, y, z);
        self.ball.vel = Vec3::ZERO;
        self.aim.phase = AimPhase::Idle;
        self.aim.last_action_time = self.time;
        log::debug!("ball respawned at {:?}", self.ball.pos);
    }

    /// Move the target to a random in-bounds position resting on the ground.
    pub fn respawn_target(&mut self) {
        let boundary = self.terrain.length * SPAWN_MARGIN;
        let x = self.rng.random_range(-boundary..=boundary);
        let y = self.rng.random_range(-boundary..=boundary);
        let z = self.terrain.height(x, y) + self.target.outer_radius;

        self.target.pos = Vec3::new(x, y, z);
        log::debug!("target moved to {:?}", self.target.pos);
    }

    /// Redraw the terrain bumps (the host's "regenerate" action).
    pub fn regenerate_terrain(&mut self, n_bumps: usize) {
        // Split the borrow: regenerate needs &mut terrain and &mut rng
        let Self { terrain, rng, .. } = self;
        terrain.regenerate(n_bumps, rng);
        self.respawn_ball();
        self.respawn_target();
    }

    /// True within the cosmetic win-response window after a target pass.
    pub fn win_animation_active(&self) -> bool {
        self.last_win_time
            .is_some_and(|t| self.time - t <= WIN_ANIMATION_SECS)
    }

    /// Pure data handoff for the renderer.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            ball_pos: self.ball.pos,
            ball_vel: self.ball.vel,
            target_pos: self.target.pos,
            phase: self.aim.phase,
            angle_phi: self.aim.angle_phi,
            angle_theta: self.aim.angle_theta,
            force_strength: self.aim.force_strength,
            kick_force: self.aim.kick_direction() * self.aim.force_strength * self.tuning.force_coef,
            gravity: self.tuning.gravity,
            win_animation: self.win_animation_active(),
        }
    }
}

/// Everything a renderer needs each frame: ball and target transforms, the
/// aim arrow, and the parabola-shader uniforms (kick force and gravity).
/// The simulation never touches GPU state; this snapshot is the only bridge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub ball_pos: Vec3,
    pub ball_vel: Vec3,
    pub target_pos: Vec3,
    pub phase: AimPhase,
    pub angle_phi: f32,
    pub angle_theta: f32,
    pub force_strength: f32,
    /// kick_direction × force_strength × force_coef
    pub kick_force: Vec3,
    pub gravity: f32,
    pub win_animation: bool,
}

//! La Boule Magique - a 3D arcade game of kicking a ball through a torus
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, ball physics, aiming, hit detection)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, cameras and input plumbing live in the host application. The
//! simulation only consumes discrete input events and produces state
//! snapshots for the host to draw.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Timestep used by the headless demo (hosts supply their own dt)
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    /// Terrain defaults
    pub const TERRAIN_LENGTH: f32 = 100.0;
    pub const TERRAIN_SAMPLES: usize = 200;
    pub const N_BUMPS: usize = 30;

    /// Bump centers are drawn within ±BUMP_MARGIN × length on each axis
    pub const BUMP_MARGIN: f32 = 0.45;
    pub const BUMP_HEIGHT_MIN: f32 = 1.0;
    pub const BUMP_HEIGHT_MAX: f32 = 10.0;
    pub const BUMP_SPREAD_MIN: f32 = 1.0;
    pub const BUMP_SPREAD_MAX: f32 = 10.0;
    /// Keeps the boundary wall term finite inside the domain
    pub const BOUNDARY_EPS: f32 = 0.01;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.0;
    /// Ball and target respawn within ±SPAWN_MARGIN × length on each axis
    pub const SPAWN_MARGIN: f32 = 0.4;
    /// Respawn height above the ground, in ball radii
    pub const SPAWN_HEIGHT_RADII: f32 = 15.0;

    /// Target torus dimensions
    pub const TARGET_OUTER_RADIUS: f32 = 2.2;
    pub const TARGET_INNER_RADIUS: f32 = 0.2;

    /// How long the cosmetic win response stays active (seconds)
    pub const WIN_ANIMATION_SECS: f32 = 5.0;
}

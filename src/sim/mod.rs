//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep (the host drives the tick rate)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod target;
pub mod terrain;
pub mod tick;

pub use collision::{ContactOutcome, reflect_velocity, resolve_ground_contact};
pub use state::{AimPhase, AimState, Ball, RenderSnapshot, SimState, Target};
pub use target::check_hit;
pub use terrain::{Bump, Terrain, TerrainMesh, TerrainVertex, build_mesh, height_at};
pub use tick::{TickInput, tick};

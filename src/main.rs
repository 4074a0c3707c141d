//! La Boule Magique headless demo
//!
//! Runs the simulation with a trivial auto-player that confirms each aim
//! phase after a short hold, so launch parameters sample the oscillators at
//! varied points. Useful for soak-testing the physics and reproducing seeds
//! from bug reports.
//!
//! Usage: boule-magique [seed] [seconds]

use boule_magique::consts::DEFAULT_DT;
use boule_magique::sim::{AimPhase, SimState, TickInput, tick};

/// How long the auto-player lets each aim oscillator run before confirming
const AIM_HOLD_SECS: f32 = 0.8;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let mut state = SimState::new(seed);
    log::info!(
        "seed {seed}: simulating {seconds}s at {:.0} Hz, terrain {} bumps",
        1.0 / DEFAULT_DT,
        state.terrain.bumps.len()
    );

    let mut last_phase = state.aim.phase;
    let mut phase_entered = 0.0f32;
    let steps = (seconds / DEFAULT_DT) as u64;

    for _ in 0..steps {
        if state.aim.phase != last_phase {
            last_phase = state.aim.phase;
            phase_entered = state.time;
        }

        let input = TickInput {
            confirm: state.aim.phase != AimPhase::Idle
                && state.time - phase_entered > AIM_HOLD_SECS,
            ..Default::default()
        };
        tick(&mut state, &input, DEFAULT_DT);
    }

    log::info!(
        "done: {} wins in {:.0}s, ball at {:.1?}",
        state.wins,
        state.time,
        state.ball.pos
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize snapshot: {err}"),
    }
}

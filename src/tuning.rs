//! Data-driven game balance
//!
//! Every physics and aiming tunable lives in one serializable block so a
//! host can override values from JSON without recompiling.

use serde::{Deserialize, Serialize};

/// Physics and aiming tunables
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²), well below real gravity for playability
    pub gravity: f32,
    /// Multiplier applied to the chosen force strength at launch
    pub force_coef: f32,
    /// Fraction of speed kept after a bounce
    pub restitution: f32,
    /// Below this speed near the ground the ball counts as stopped
    pub stop_threshold: f32,

    /// Surfaces with normal.z above this cutoff count as flat (no slope assist)
    pub slope_flat_cutoff: f32,
    /// Slope assist only kicks in below this speed
    pub slope_assist_max_speed: f32,
    /// Velocity multiplier applied by slope assist
    pub slope_assist_gain: f32,
    /// Slope assist window after the last action (seconds)
    pub slope_assist_window: f32,

    /// After this many seconds since the last action, a slow contact hard-stops
    pub settle_timeout: f32,
    /// Contact speed below which the hard stop applies
    pub settle_max_speed: f32,

    /// Aim oscillation frequencies (Hz)
    pub phi_freq: f32,
    pub theta_freq: f32,
    pub force_freq: f32,
    /// Theta oscillates around theta_base ± theta_swing
    pub theta_base: f32,
    pub theta_swing: f32,
    /// Force oscillates around force_base ± force_swing
    pub force_base: f32,
    pub force_swing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 9.81 * 0.2,
            force_coef: 6.0,
            restitution: 0.8,
            stop_threshold: 0.2,

            slope_flat_cutoff: 0.995,
            slope_assist_max_speed: 3.0,
            slope_assist_gain: 1.3,
            slope_assist_window: 5.0,

            settle_timeout: 10.0,
            settle_max_speed: 0.5,

            phi_freq: 0.5,
            theta_freq: 0.5,
            force_freq: 0.5,
            theta_base: std::f32::consts::FRAC_PI_4,
            theta_swing: std::f32::consts::PI / 12.0,
            force_base: 1.0,
            force_swing: 0.7,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.gravity, tuning.gravity);
        assert_eq!(back.force_coef, tuning.force_coef);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"gravity": 3.924, "restitution": 0.5}"#).unwrap();
        assert_eq!(tuning.gravity, 3.924);
        assert_eq!(tuning.restitution, 0.5);
        // Untouched fields keep defaults
        assert_eq!(tuning.force_coef, 6.0);
        assert_eq!(tuning.stop_threshold, 0.2);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}

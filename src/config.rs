//! Simulation configuration.
//!
//! Every tunable the two historical cloud variants disagreed on lives here,
//! so one simulation covers both: the full cloud globe is the default, and
//! the older streamline look is a preset. Presets round-trip through JSON
//! files the same way scenes are persisted elsewhere in this codebase's
//! lineage.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Construction-time parameters for a [`crate::FlowSphere`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Particle pool size
    pub points: usize,
    /// Target mean particle lifetime in seconds (sets the recycle rate)
    pub lifetime: f64,
    /// Seed for the particle position sampler
    pub seed: u64,

    /// Gradient noise amplitude
    pub noise_amplitude: f64,
    /// Gradient noise frequency
    pub noise_frequency: f64,
    /// Gradient noise seed
    pub noise_seed: u32,

    /// Latitudinal band multiplier (6 gives six undulations pole to pole)
    pub band_count: f64,
    /// Weight of the banding term in the potential
    pub band_strength: f64,

    /// Convergence bias passed to the curl evaluator (negative pulls flow
    /// toward low potential)
    pub bias: f64,
    /// Scale on the latitude-dependent rotational deflection
    pub coriolis_strength: f64,
    /// Advection step scale in surface units per second
    pub cloud_speed: f64,
    /// Planetary rotation phase decrement per second
    pub spin_rate: f64,
    /// Add the analytic prevailing-circulation term
    pub trade_winds: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            points: 12_000,
            lifetime: 5.0,
            seed: 0,
            noise_amplitude: 1.0 / 256.0,
            noise_frequency: 1.8,
            noise_seed: 1,
            band_count: 6.0,
            band_strength: 0.25,
            bias: -0.25,
            coriolis_strength: 2.0,
            cloud_speed: 0.125,
            spin_rate: 0.15,
            trade_winds: true,
        }
    }
}

impl FlowConfig {
    /// The older flow-visualization tuning: calmer noise, stronger
    /// convergence, no trade winds or spin.
    pub fn streamlines() -> Self {
        Self {
            noise_frequency: 1.5,
            band_strength: 0.15,
            bias: -0.5,
            coriolis_strength: 1.0,
            spin_rate: 0.0,
            trade_winds: false,
            ..Self::default()
        }
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let config = FlowConfig::streamlines();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: FlowConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.points, config.points);
        assert_eq!(back.noise_frequency, config.noise_frequency);
        assert_eq!(back.bias, config.bias);
        assert_eq!(back.trade_winds, config.trade_winds);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FlowConfig =
            serde_json::from_str(r#"{"points": 500, "lifetime": 2.5}"#).expect("deserialize");
        assert_eq!(config.points, 500);
        assert_eq!(config.lifetime, 2.5);
        // unspecified fields fall back to defaults
        assert_eq!(config.band_count, 6.0);
        assert!(config.trade_winds);
    }
}

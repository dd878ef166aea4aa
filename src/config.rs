//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::devices::{HouseLoad, SolarPv};
use crate::sim::engine::Engine;
use crate::sim::types::{EnergyState, SimConfig};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `pro` system preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or pick a preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Inverter and battery ratings.
    #[serde(default)]
    pub system: SystemConfig,
    /// Simulation timing.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Solar PV profile parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// House consumption profile parameters.
    #[serde(default)]
    pub house: HouseConfig,
}

/// Inverter and battery ratings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// Inverter rating (W). Not used by the balance.
    pub inverter_max_power_w: f64,
    /// Battery charge/discharge cap (W).
    pub battery_max_power_w: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            inverter_max_power_w: 5000.0,
            battery_max_power_w: 5000.0,
        }
    }
}

/// Simulation timing and seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of timesteps per simulated day (must be > 0).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_day: 24,
            days: 1,
            seed: 42,
        }
    }
}

/// Solar PV profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Peak generation (W).
    pub peak_w: f64,
    /// Sunrise timestep index (inclusive).
    pub sunrise_idx: usize,
    /// Sunset timestep index (exclusive).
    pub sunset_idx: usize,
    /// Multiplicative noise standard deviation.
    pub noise_std: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            peak_w: 8000.0,
            sunrise_idx: 6,
            sunset_idx: 18,
            noise_std: 0.05,
        }
    }
}

/// House consumption profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseConfig {
    /// Baseline consumption (W).
    pub base_w: f64,
    /// Sinusoidal amplitude (W).
    pub amp_w: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (W).
    pub noise_std: f64,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            base_w: 800.0,
            amp_w: 500.0,
            phase_rad: 1.2,
            noise_std: 50.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.battery_max_power_w"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["basic", "standard", "pro"];

    /// One inverter, up to two battery modules (2000 W).
    pub fn basic() -> Self {
        Self::with_system(2000.0, 2000.0)
    }

    /// One inverter, up to three battery modules (3000 W).
    pub fn standard() -> Self {
        Self::with_system(3000.0, 3000.0)
    }

    /// One inverter, up to five battery modules (5000 W).
    pub fn pro() -> Self {
        Self::with_system(5000.0, 5000.0)
    }

    fn with_system(inverter_max_power_w: f64, battery_max_power_w: f64) -> Self {
        Self {
            system: SystemConfig {
                inverter_max_power_w,
                battery_max_power_w,
            },
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "basic" => Ok(Self::basic()),
            "standard" => Ok(Self::standard()),
            "pro" => Ok(Self::pro()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. A battery cap above
    /// the inverter rating is logged but accepted.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigError {
                    field: field.into(),
                    message: message.into(),
                });
            }
        };

        let sys = &self.system;
        check(
            non_negative(sys.inverter_max_power_w),
            "system.inverter_max_power_w",
            "must be finite and >= 0",
        );
        check(
            non_negative(sys.battery_max_power_w),
            "system.battery_max_power_w",
            "must be finite and >= 0",
        );

        let s = &self.simulation;
        check(s.steps_per_day > 0, "simulation.steps_per_day", "must be > 0");
        check(s.days > 0, "simulation.days", "must be > 0");

        let sol = &self.solar;
        check(non_negative(sol.peak_w), "solar.peak_w", "must be finite and >= 0");
        check(
            sol.sunrise_idx < sol.sunset_idx,
            "solar.sunrise_idx",
            "must be < solar.sunset_idx",
        );
        check(
            s.steps_per_day == 0 || sol.sunset_idx <= s.steps_per_day,
            "solar.sunset_idx",
            "must be <= simulation.steps_per_day",
        );
        check(sol.noise_std.is_finite(), "solar.noise_std", "must be finite");

        let h = &self.house;
        check(non_negative(h.base_w), "house.base_w", "must be finite and >= 0");
        check(h.amp_w.is_finite(), "house.amp_w", "must be finite");
        check(h.phase_rad.is_finite(), "house.phase_rad", "must be finite");
        check(h.noise_std.is_finite(), "house.noise_std", "must be finite");

        if sys.battery_max_power_w > sys.inverter_max_power_w {
            warn!(
                battery_max_power_w = sys.battery_max_power_w,
                inverter_max_power_w = sys.inverter_max_power_w,
                "battery cap exceeds inverter rating; the inverter rating is not enforced"
            );
        }

        errors
    }

    /// Energy state seeded with this scenario's ratings.
    pub fn energy_state(&self) -> EnergyState {
        EnergyState::with_capacity(
            self.system.inverter_max_power_w,
            self.system.battery_max_power_w,
        )
    }

    /// Builds a ready-to-run engine. Call [`ScenarioConfig::validate`] first:
    /// invalid timing or solar windows panic here.
    pub fn build_engine(&self) -> Engine {
        let s = &self.simulation;
        let config = SimConfig::new(s.steps_per_day, s.days, s.seed);

        let sol = &self.solar;
        let pv = SolarPv::new(
            sol.peak_w,
            sol.sunrise_idx,
            sol.sunset_idx,
            sol.noise_std,
            &config,
            s.seed,
        );

        let h = &self.house;
        let house = HouseLoad::new(
            h.base_w,
            h.amp_w,
            h.phase_rad,
            h.noise_std,
            s.steps_per_day,
            s.seed.wrapping_add(HOUSE_SEED_OFFSET),
        );

        Engine::new(config, pv, house, self.energy_state())
    }
}

/// Seed offset for the house RNG to avoid correlation with the PV noise.
const HOUSE_SEED_OFFSET: u64 = 57;

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let errors = ScenarioConfig::default().validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn presets_set_system_ratings() {
        let cases = [("basic", 2000.0), ("standard", 3000.0), ("pro", 5000.0)];
        for (name, watts) in cases {
            let cfg = ScenarioConfig::from_preset(name).expect("known preset");
            assert_eq!(cfg.system.inverter_max_power_w, watts);
            assert_eq!(cfg.system.battery_max_power_w, watts);
            assert!(cfg.validate().is_empty(), "preset \"{name}\" should be valid");
        }
    }

    #[test]
    fn from_preset_unknown() {
        let e = ScenarioConfig::from_preset("deluxe").expect_err("unknown preset");
        assert!(e.message.contains("unknown preset"));
        assert!(e.to_string().starts_with("config error: preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[system]
inverter_max_power_w = 3000
battery_max_power_w = 2500

[simulation]
steps_per_day = 96
days = 2
seed = 7

[solar]
peak_w = 6000.0
sunrise_idx = 24
sunset_idx = 80
noise_std = 0.1

[house]
base_w = 600.0
amp_w = 200.0
phase_rad = 0.0
noise_std = 20.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("valid TOML");
        assert_eq!(cfg.system.battery_max_power_w, 2500.0);
        assert_eq!(cfg.simulation.steps_per_day, 96);
        assert_eq!(cfg.solar.sunset_idx, 80);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ScenarioConfig::from_toml_str("[system]\nbattery_max_power_w = 2000.0\n")
            .expect("valid TOML");
        assert_eq!(cfg.system.battery_max_power_w, 2000.0);
        assert_eq!(cfg.system.inverter_max_power_w, 5000.0);
        assert_eq!(cfg.simulation.steps_per_day, 24);
    }

    #[test]
    fn unknown_field_rejected() {
        let result = ScenarioConfig::from_toml_str("[system]\nturbo = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_negative_cap() {
        let mut cfg = ScenarioConfig::basic();
        cfg.system.battery_max_power_w = -10.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "system.battery_max_power_w"));
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = ScenarioConfig::default();
        cfg.simulation.steps_per_day = 0;
        cfg.simulation.days = 0;
        cfg.solar.sunrise_idx = 20;
        let fields: Vec<_> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"simulation.steps_per_day".to_string()));
        assert!(fields.contains(&"simulation.days".to_string()));
        assert!(fields.contains(&"solar.sunrise_idx".to_string()));
    }

    #[test]
    fn validation_catches_non_finite_profile_parameters() {
        let mut cfg = ScenarioConfig::default();
        cfg.solar.noise_std = f64::INFINITY;
        cfg.house.noise_std = f64::NAN;
        cfg.house.phase_rad = f64::NEG_INFINITY;
        let fields: Vec<_> = cfg.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["solar.noise_std", "house.phase_rad", "house.noise_std"]
        );
    }

    #[test]
    fn non_finite_noise_in_toml_is_reported() {
        let cfg =
            ScenarioConfig::from_toml_str("[solar]\nnoise_std = inf\n").expect("valid TOML");
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "config error: solar.noise_std: must be finite"
        );
    }

    #[test]
    fn cap_above_inverter_rating_is_accepted() {
        let mut cfg = ScenarioConfig::basic();
        cfg.system.battery_max_power_w = 4000.0;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn energy_state_carries_ratings() {
        let state = ScenarioConfig::standard().energy_state();
        assert_eq!(state.inverter_max_power, 3000.0);
        assert_eq!(state.battery_max_power, 3000.0);
        assert_eq!(state.pv_power, 0.0);
    }

    #[test]
    fn build_engine_respects_timing() {
        let mut cfg = ScenarioConfig::pro();
        cfg.simulation.days = 2;
        let engine = cfg.build_engine();
        assert_eq!(engine.config().total_steps(), 48);
    }
}

//! Core simulation types: timing configuration, energy state, and step records.

use std::fmt;
use std::str::FromStr;

use super::power_balance::{GridDirection, PowerFlows, allocate};
use crate::error::BalanceError;

/// Default inverter rating (W) of a freshly constructed [`EnergyState`].
pub const DEFAULT_INVERTER_MAX_POWER_W: f64 = 5000.0;
/// Default battery power cap (W) of a freshly constructed [`EnergyState`].
pub const DEFAULT_BATTERY_MAX_POWER_W: f64 = 5000.0;

/// Simulation timing configuration.
///
/// # Examples
///
/// ```
/// use home_energy_balance::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(24, 1, 42);
/// assert_eq!(cfg.dt_hours, 1.0);
/// assert_eq!(cfg.total_steps(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation steps per day.
    pub steps_per_day: usize,
    /// Number of days to simulate.
    pub days: usize,
    /// Duration of one timestep in hours, derived as `24.0 / steps_per_day`.
    pub dt_hours: f64,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_day` or `days` is zero.
    pub fn new(steps_per_day: usize, days: usize, seed: u64) -> Self {
        assert!(steps_per_day > 0, "steps_per_day must be > 0");
        assert!(days > 0, "days must be > 0");
        Self {
            steps_per_day,
            days,
            dt_hours: 24.0 / steps_per_day as f64,
            seed,
        }
    }

    /// Total number of simulation steps across all days.
    pub fn total_steps(&self) -> usize {
        self.steps_per_day * self.days
    }
}

/// Named fields of an [`EnergyState`], for keyed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PvPower,
    HouseConsumption,
    BatteryPower,
    GridPower,
    InverterMaxPower,
    BatteryMaxPower,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PvPower,
        Self::HouseConsumption,
        Self::BatteryPower,
        Self::GridPower,
        Self::InverterMaxPower,
        Self::BatteryMaxPower,
    ];

    /// The snake_case key used by keyed access and config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PvPower => "pv_power",
            Self::HouseConsumption => "house_consumption",
            Self::BatteryPower => "battery_power",
            Self::GridPower => "grid_power",
            Self::InverterMaxPower => "inverter_max_power",
            Self::BatteryMaxPower => "battery_max_power",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| BalanceError::UnknownField(s.to_string()))
    }
}

/// Instantaneous power state of a home system (all values in W).
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyState {
    /// PV generation (>= 0).
    pub pv_power: f64,
    /// House consumption (>= 0).
    pub house_consumption: f64,
    /// Battery flow (positive=charge, negative=discharge).
    pub battery_power: f64,
    /// Grid flow magnitude (>= 0); see [`EnergyState::grid_direction`].
    pub grid_power: f64,
    /// Inverter rating. Carried as configuration only; the balance ignores it.
    pub inverter_max_power: f64,
    /// Battery charge/discharge cap.
    pub battery_max_power: f64,
    grid_direction: GridDirection,
}

impl Default for EnergyState {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INVERTER_MAX_POWER_W, DEFAULT_BATTERY_MAX_POWER_W)
    }
}

impl EnergyState {
    /// Creates a zeroed state with default capacities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zeroed state with the given inverter rating and battery cap.
    pub fn with_capacity(inverter_max_power: f64, battery_max_power: f64) -> Self {
        Self {
            pv_power: 0.0,
            house_consumption: 0.0,
            battery_power: 0.0,
            grid_power: 0.0,
            inverter_max_power,
            battery_max_power,
            grid_direction: GridDirection::Idle,
        }
    }

    /// Returns the value of `field`.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::PvPower => self.pv_power,
            Field::HouseConsumption => self.house_consumption,
            Field::BatteryPower => self.battery_power,
            Field::GridPower => self.grid_power,
            Field::InverterMaxPower => self.inverter_max_power,
            Field::BatteryMaxPower => self.battery_max_power,
        }
    }

    /// Overwrites `field` with `value`.
    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::PvPower => &mut self.pv_power,
            Field::HouseConsumption => &mut self.house_consumption,
            Field::BatteryPower => &mut self.battery_power,
            Field::GridPower => &mut self.grid_power,
            Field::InverterMaxPower => &mut self.inverter_max_power,
            Field::BatteryMaxPower => &mut self.battery_max_power,
        };
        *slot = value;
    }

    /// Looks up a field by its snake_case name.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::UnknownField`] if `name` is not a field.
    pub fn get_named(&self, name: &str) -> Result<f64, BalanceError> {
        Ok(self.get(name.parse()?))
    }

    /// Sets a field by its snake_case name.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::UnknownField`] if `name` is not a field; the
    /// state is left unchanged.
    pub fn set_named(&mut self, name: &str, value: f64) -> Result<(), BalanceError> {
        self.set(name.parse()?, value);
        Ok(())
    }

    /// Direction of the last computed `grid_power`.
    pub fn grid_direction(&self) -> GridDirection {
        self.grid_direction
    }

    /// Runs the balance on the current PV, house and battery cap values and
    /// stores the resulting battery and grid flows.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidInput`] if an input is negative or not
    /// finite; the state is left unchanged.
    pub fn balance(&mut self) -> Result<PowerFlows, BalanceError> {
        let flows = allocate(
            self.pv_power,
            self.house_consumption,
            self.battery_max_power,
        )?;
        self.battery_power = flows.battery_w;
        self.grid_power = flows.grid_w;
        self.grid_direction = flows.direction;
        Ok(flows)
    }

    /// Zeroes the four power flows, keeping the capacity settings.
    pub fn reset(&mut self) {
        self.pv_power = 0.0;
        self.house_consumption = 0.0;
        self.battery_power = 0.0;
        self.grid_power = 0.0;
        self.grid_direction = GridDirection::Idle;
    }
}

/// Complete record of one simulation timestep.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Timestep index.
    pub timestep: usize,
    /// Simulation time in hours.
    pub time_hr: f64,
    /// PV generation (W).
    pub pv_w: f64,
    /// House consumption (W).
    pub house_w: f64,
    /// Battery power (W; positive=charge, negative=discharge).
    pub battery_w: f64,
    /// Grid power magnitude (W).
    pub grid_w: f64,
    /// Whether `grid_w` was exported or imported.
    pub grid_direction: GridDirection,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} ({:>5.1}h) | pv={:>8.1} W  house={:>8.1} W | bat={:>8.1} W | grid={:>8.1} W ({})",
            self.timestep,
            self.time_hr,
            self.pv_w,
            self.house_w,
            self.battery_w,
            self.grid_w,
            self.grid_direction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(24, 1, 42);
        assert_eq!(cfg.steps_per_day, 24);
        assert_eq!(cfg.dt_hours, 1.0);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.total_steps(), 24);
    }

    #[test]
    fn sim_config_multi_day() {
        let cfg = SimConfig::new(96, 2, 0);
        assert_eq!(cfg.total_steps(), 192);
        assert_eq!(cfg.dt_hours, 0.25);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_steps_panics() {
        SimConfig::new(0, 1, 0);
    }

    #[test]
    fn new_state_is_zeroed_with_default_caps() {
        let s = EnergyState::new();
        assert_eq!(s.pv_power, 0.0);
        assert_eq!(s.house_consumption, 0.0);
        assert_eq!(s.battery_power, 0.0);
        assert_eq!(s.grid_power, 0.0);
        assert_eq!(s.inverter_max_power, 5000.0);
        assert_eq!(s.battery_max_power, 5000.0);
        assert_eq!(s.grid_direction(), GridDirection::Idle);
    }

    #[test]
    fn field_names_parse_back() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut s = EnergyState::new();
        let before = s.clone();
        assert_eq!(
            s.set_named("solar_power", 1.0),
            Err(BalanceError::UnknownField("solar_power".to_string()))
        );
        assert_eq!(s, before);
        assert!(s.get_named("").is_err());
    }

    #[test]
    fn keyed_access_round_trips() {
        let mut s = EnergyState::new();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            s.set(field, i as f64 * 10.0);
        }
        assert_eq!(s.get(Field::PvPower), 0.0);
        assert_eq!(s.house_consumption, 10.0);
        assert_eq!(s.get_named("battery_max_power"), Ok(50.0));
    }

    #[test]
    fn balance_stores_flows() {
        let mut s = EnergyState::with_capacity(2000.0, 2000.0);
        s.pv_power = 0.0;
        s.house_consumption = 3000.0;
        let flows = s.balance().expect("valid inputs");
        assert_eq!(s.battery_power, -2000.0);
        assert_eq!(s.grid_power, 1000.0);
        assert_eq!(s.grid_direction(), GridDirection::Import);
        assert_eq!(flows.signed_grid_w(), -1000.0);
    }

    #[test]
    fn balance_ignores_inverter_rating() {
        let mut s = EnergyState::with_capacity(100.0, 5000.0);
        s.pv_power = 8000.0;
        s.house_consumption = 500.0;
        s.balance().expect("valid inputs");
        assert_eq!(s.battery_power, 5000.0);
        assert_eq!(s.grid_power, 2500.0);
    }

    #[test]
    fn failed_balance_leaves_state_unchanged() {
        let mut s = EnergyState::new();
        s.house_consumption = -1.0;
        let before = s.clone();
        assert!(s.balance().is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn reset_keeps_capacities() {
        let mut s = EnergyState::with_capacity(3000.0, 3000.0);
        s.pv_power = 8000.0;
        s.house_consumption = 500.0;
        s.balance().expect("valid inputs");
        s.reset();
        assert_eq!(s, EnergyState::with_capacity(3000.0, 3000.0));
    }

    #[test]
    fn step_result_display_does_not_panic() {
        let r = StepResult {
            timestep: 3,
            time_hr: 3.0,
            pv_w: 1200.0,
            house_w: 400.0,
            battery_w: 800.0,
            grid_w: 0.0,
            grid_direction: GridDirection::Idle,
        };
        let s = format!("{r}");
        assert!(s.contains("idle"));
    }
}

//! Simulation engine that feeds generated profiles through the power balance.

use tracing::info;

use crate::devices::{Device, HouseLoad, SolarPv};
use crate::error::BalanceError;

use super::types::{EnergyState, SimConfig, StepResult};

/// Simulation engine owning the profile generators and the energy state.
pub struct Engine {
    config: SimConfig,
    pv: SolarPv,
    house: HouseLoad,
    state: EnergyState,
}

impl Engine {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation timing
    /// * `pv` - Solar PV profile
    /// * `house` - House consumption profile
    /// * `state` - Energy state carrying the inverter rating and battery cap
    pub fn new(config: SimConfig, pv: SolarPv, house: HouseLoad, state: EnergyState) -> Self {
        Self {
            config,
            pv,
            house,
            state,
        }
    }

    /// Executes one timestep: samples both profiles, balances, and records.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidInput`] if the state's battery cap is
    /// invalid.
    pub fn step(&mut self, t: usize) -> Result<StepResult, BalanceError> {
        self.state.reset();
        self.state.pv_power = self.pv.power_w(t);
        self.state.house_consumption = self.house.power_w(t);

        let flows = self.state.balance()?;

        Ok(StepResult {
            timestep: t,
            time_hr: t as f64 * self.config.dt_hours,
            pv_w: self.state.pv_power,
            house_w: self.state.house_consumption,
            battery_w: flows.battery_w,
            grid_w: flows.grid_w,
            grid_direction: flows.direction,
        })
    }

    /// Executes all timesteps and returns the complete step record vector.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BalanceError`] from [`Engine::step`].
    pub fn run(&mut self) -> Result<Vec<StepResult>, BalanceError> {
        let total = self.config.total_steps();
        info!(
            steps = total,
            battery_max_w = self.state.battery_max_power,
            "running balance simulation"
        );
        (0..total).map(|t| self.step(t)).collect()
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns the energy state as left by the last step.
    pub fn state(&self) -> &EnergyState {
        &self.state
    }
}

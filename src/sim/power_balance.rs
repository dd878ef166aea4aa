//! Battery/grid power allocation.

use std::fmt;

use tracing::debug;

use super::types::Field;
use crate::error::BalanceError;

/// Which way power flows across the grid connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDirection {
    /// Surplus left over after charging is sent to the grid.
    Export,
    /// Deficit left over after discharging is drawn from the grid.
    Import,
    /// Nothing crosses the grid connection.
    Idle,
}

impl fmt::Display for GridDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Export => "export",
            Self::Import => "import",
            Self::Idle => "idle",
        })
    }
}

/// Result of one allocation.
///
/// `grid_w` is always a non-negative magnitude; `direction` records whether it
/// is an export or an import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerFlows {
    /// Battery power (W; positive=charge, negative=discharge).
    pub battery_w: f64,
    /// Grid power magnitude (W, >= 0).
    pub grid_w: f64,
    /// Direction of `grid_w`.
    pub direction: GridDirection,
}

impl PowerFlows {
    /// Grid power with the direction folded into the sign: positive=export,
    /// negative=import.
    pub fn signed_grid_w(&self) -> f64 {
        match self.direction {
            GridDirection::Import => -self.grid_w,
            GridDirection::Export | GridDirection::Idle => self.grid_w,
        }
    }
}

/// Splits the PV/house imbalance between the battery and the grid.
///
/// A surplus charges the battery up to `battery_max_w` and the remainder is
/// exported. A deficit (or an exact balance) discharges the battery up to
/// `battery_max_w` and the remainder is imported.
///
/// # Arguments
///
/// * `pv_w` - PV generation (W, >= 0)
/// * `house_w` - House consumption (W, >= 0)
/// * `battery_max_w` - Battery charge/discharge cap (W, >= 0)
///
/// # Errors
///
/// Returns [`BalanceError::InvalidInput`] if any argument is negative or not finite.
///
/// # Examples
///
/// ```
/// use home_energy_balance::sim::power_balance::{GridDirection, allocate};
///
/// let flows = allocate(0.0, 3000.0, 2000.0).unwrap();
/// assert_eq!(flows.battery_w, -2000.0);
/// assert_eq!(flows.grid_w, 1000.0);
/// assert_eq!(flows.direction, GridDirection::Import);
/// ```
pub fn allocate(pv_w: f64, house_w: f64, battery_max_w: f64) -> Result<PowerFlows, BalanceError> {
    check_input(Field::PvPower, pv_w)?;
    check_input(Field::HouseConsumption, house_w)?;
    check_input(Field::BatteryMaxPower, battery_max_w)?;

    let surplus_w = pv_w - house_w;
    let flows = if surplus_w > 0.0 {
        let charge_w = surplus_w.min(battery_max_w);
        let export_w = surplus_w - charge_w;
        PowerFlows {
            battery_w: charge_w,
            grid_w: export_w,
            direction: if export_w > 0.0 {
                GridDirection::Export
            } else {
                GridDirection::Idle
            },
        }
    } else {
        let deficit_w = -surplus_w;
        let discharge_w = deficit_w.min(battery_max_w);
        let import_w = deficit_w - discharge_w;
        PowerFlows {
            // `0.0 - 0.0` keeps the zero positive when there is nothing to discharge
            battery_w: 0.0 - discharge_w,
            grid_w: import_w,
            direction: if import_w > 0.0 {
                GridDirection::Import
            } else {
                GridDirection::Idle
            },
        }
    };

    debug!(
        pv_w,
        house_w,
        battery_max_w,
        battery_w = flows.battery_w,
        grid_w = flows.grid_w,
        direction = %flows.direction,
        "allocated power balance"
    );
    Ok(flows)
}

fn check_input(field: Field, value: f64) -> Result<(), BalanceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BalanceError::InvalidInput { field, value })
    }
}

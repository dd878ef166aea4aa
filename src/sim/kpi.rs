//! Post-hoc energy summary computed from simulation results.

use std::fmt;

use super::power_balance::GridDirection;
use super::types::StepResult;

/// Aggregate energy figures derived from a complete simulation run.
///
/// Computed post-hoc from `Vec<StepResult>` so step data and reported totals
/// cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Total PV generation (Wh).
    pub pv_wh: f64,
    /// Total house consumption (Wh).
    pub house_wh: f64,
    /// Energy exported to the grid (Wh).
    pub exported_wh: f64,
    /// Energy imported from the grid (Wh).
    pub imported_wh: f64,
    /// Energy absorbed by the battery (Wh).
    pub battery_charged_wh: f64,
    /// Energy supplied by the battery (Wh, positive).
    pub battery_discharged_wh: f64,
    /// Peak grid import (W).
    pub peak_import_w: f64,
    /// Peak grid export (W).
    pub peak_export_w: f64,
    /// Share of house consumption not covered by grid import (0.0 to 1.0).
    pub self_sufficiency: f64,
}

impl Summary {
    /// Computes the summary from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `dt_hours` - Timestep duration in hours
    pub fn from_results(results: &[StepResult], dt_hours: f64) -> Self {
        let mut s = Self::default();

        for r in results {
            s.pv_wh += r.pv_w * dt_hours;
            s.house_wh += r.house_w * dt_hours;

            match r.grid_direction {
                GridDirection::Export => {
                    s.exported_wh += r.grid_w * dt_hours;
                    s.peak_export_w = s.peak_export_w.max(r.grid_w);
                }
                GridDirection::Import => {
                    s.imported_wh += r.grid_w * dt_hours;
                    s.peak_import_w = s.peak_import_w.max(r.grid_w);
                }
                GridDirection::Idle => {}
            }

            if r.battery_w > 0.0 {
                s.battery_charged_wh += r.battery_w * dt_hours;
            } else {
                s.battery_discharged_wh -= r.battery_w * dt_hours;
            }
        }

        s.self_sufficiency = if s.house_wh > 0.0 {
            (1.0 - s.imported_wh / s.house_wh).clamp(0.0, 1.0)
        } else {
            0.0
        };
        s
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Summary ---")?;
        writeln!(f, "PV generation:       {:.1} Wh", self.pv_wh)?;
        writeln!(f, "House consumption:   {:.1} Wh", self.house_wh)?;
        writeln!(
            f,
            "Grid export/import:  {:.1} / {:.1} Wh",
            self.exported_wh, self.imported_wh
        )?;
        writeln!(
            f,
            "Battery in/out:      {:.1} / {:.1} Wh",
            self.battery_charged_wh, self.battery_discharged_wh
        )?;
        writeln!(
            f,
            "Peak export/import:  {:.1} / {:.1} W",
            self.peak_export_w, self.peak_import_w
        )?;
        write!(f, "Self-sufficiency:    {:.1}%", self.self_sufficiency * 100.0)
    }
}

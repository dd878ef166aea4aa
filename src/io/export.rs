//! CSV export for simulation step results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Column header for CSV telemetry export.
const HEADER: &str = "timestep,time_hr,pv_w,house_w,battery_w,grid_w,grid_direction";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in results {
        wtr.write_record(&[
            r.timestep.to_string(),
            format!("{:.2}", r.time_hr),
            format!("{:.1}", r.pv_w),
            format!("{:.1}", r.house_w),
            format!("{:.1}", r.battery_w),
            format!("{:.1}", r.grid_w),
            r.grid_direction.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

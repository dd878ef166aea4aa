//! Home energy power balance: battery/grid allocation of PV surplus and deficit.

pub mod config;
/// Synthetic PV and house-load profiles.
pub mod devices;
pub mod error;
pub mod io;
/// Power balance, energy state, engine, and summary.
pub mod sim;
pub mod telemetry;

pub use error::BalanceError;
pub use sim::power_balance::{GridDirection, PowerFlows, allocate};
pub use sim::types::{EnergyState, Field};

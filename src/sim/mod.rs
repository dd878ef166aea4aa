pub mod engine;
/// Energy totals over a completed run.
pub mod kpi;
pub mod power_balance;
pub mod types;

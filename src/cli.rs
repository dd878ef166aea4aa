use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Allocate a single PV/house reading between battery and grid.
    #[clap(name = "balance")]
    Balance(BalanceArgs),

    /// Run a synthetic day (or more) through the balance.
    #[clap(name = "simulate")]
    Simulate(SimulateArgs),
}

/// Where the system ratings and profiles come from.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Built-in system preset: basic, standard or pro.
    #[clap(long, conflicts_with = "config")]
    pub preset: Option<String>,

    /// TOML scenario file.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct BalanceArgs {
    /// PV generation in watts.
    #[clap(long = "pv")]
    pub pv_w: f64,

    /// House consumption in watts.
    #[clap(long = "house")]
    pub house_w: f64,

    /// Override the battery charge/discharge cap in watts.
    #[clap(long = "battery-max")]
    pub battery_max_w: Option<f64>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Override the random seed.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Export step results to CSV.
    #[clap(long = "telemetry-out")]
    pub telemetry_out: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

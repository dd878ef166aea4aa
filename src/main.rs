//! Command-line entry point: single-reading balance and synthetic-day simulation.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

use home_energy_balance::config::ScenarioConfig;
use home_energy_balance::io::export::export_csv;
use home_energy_balance::sim::kpi::Summary;
use home_energy_balance::telemetry::init_tracing;

use crate::cli::{Args, BalanceArgs, Command, SimulateArgs, SourceArgs};

fn main() -> anyhow::Result<()> {
    init_tracing();

    match Args::parse().command {
        Command::Balance(args) => run_balance(&args),
        Command::Simulate(args) => run_simulate(&args),
    }
}

/// Loads the scenario from `--config` or `--preset` (mutually exclusive), else defaults.
fn load_scenario(source: &SourceArgs) -> anyhow::Result<ScenarioConfig> {
    let scenario = if let Some(ref path) = source.config {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = source.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::default()
    };
    Ok(scenario)
}

fn ensure_valid(scenario: &ScenarioConfig) -> anyhow::Result<()> {
    let errors = scenario.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        eprintln!("{e}");
    }
    bail!("{} configuration error(s)", errors.len());
}

fn run_balance(args: &BalanceArgs) -> anyhow::Result<()> {
    let mut scenario = load_scenario(&args.source)?;
    if let Some(cap) = args.battery_max_w {
        scenario.system.battery_max_power_w = cap;
    }
    ensure_valid(&scenario)?;

    let mut state = scenario.energy_state();
    state.pv_power = args.pv_w;
    state.house_consumption = args.house_w;
    let flows = state.balance().context("cannot balance reading")?;

    println!("battery_power: {:.1} W", flows.battery_w);
    println!("grid_power:    {:.1} W ({})", flows.grid_w, flows.direction);
    Ok(())
}

fn run_simulate(args: &SimulateArgs) -> anyhow::Result<()> {
    let mut scenario = load_scenario(&args.source)?;
    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    ensure_valid(&scenario)?;

    let mut engine = scenario.build_engine();
    let results = engine.run().context("simulation failed")?;
    let summary = Summary::from_results(&results, engine.config().dt_hours);

    for r in &results {
        println!("{r}");
    }
    println!("\n{summary}");

    if let Some(ref path) = args.telemetry_out {
        export_csv(&results, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), rows = results.len(), "telemetry written");
    }
    Ok(())
}

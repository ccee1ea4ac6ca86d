//! gasguard: resource-cost and efficiency report for contract simulations
//!
//! Reads simulation results (the JSON returned by a simulation RPC) and reports
//! fees, utilization, efficiency scores, optimization hints and safety-margin
//! violations against a network configuration snapshot.
//!
//! ## Example Usage
//!
//! ```bash
//! # Analyze one simulation against the built-in mainnet snapshot
//! gasguard analyze --sim sim.json
//!
//! # Gate a CI job on the safety margin, using a custom snapshot
//! gasguard analyze --sim sim.json --config testnet.json --fail-on-violation
//!
//! # Analyze several simulations in parallel, as JSON
//! gasguard analyze --sim a.json --sim b.json --json
//!
//! # Validate and print a configuration snapshot
//! gasguard config --config testnet.json
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod gasguard_cli;

use gasguard_cli::{analyze::AnalyzeCmd, config::ConfigCmd};

#[derive(Parser)]
#[command(
    name = "gasguard",
    author,
    version,
    about = "Resource-cost and efficiency scoring for contract simulations",
    long_about = "Estimates fees, scores resource efficiency and flags safety-margin \
                  violations for simulated smart-contract executions."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (per-dimension breakdown and info-level logs)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more simulation results
    Analyze(AnalyzeCmd),

    /// Validate and print a configuration snapshot
    Config(ConfigCmd),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let Cli {
        command,
        json,
        verbose,
    } = Cli::parse();

    init_tracing(verbose);

    match command {
        Commands::Analyze(cmd) => cmd.execute(json, verbose),
        Commands::Config(cmd) => cmd.execute(json),
    }
}

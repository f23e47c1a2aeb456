//! Bondflow CLI - cash-flow schedules, valuation and accrued interest.
//!
//! # Usage
//!
//! ```bash
//! # Value the instrument in a pricing request
//! bondflow price --request request.toml --valuation-date 2024-02-01
//!
//! # Show a coupon schedule
//! bondflow schedule --issue 2023-08-01 --maturity 2026-08-01 --frequency ANNUAL
//!
//! # Compare day counts
//! bondflow daycount --start 2024-01-01 --end 2024-04-01
//!
//! # Inspect the pricing configuration
//! bondflow --config pricing.toml config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let ctx = commands::Context {
        format: cli.format,
        quiet: cli.quiet,
        config: cli.config,
    };

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Daycount(args) => commands::daycount::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so table, JSON and CSV output stay clean on stdout.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "bondflow=error",
        (false, 0) => "bondflow=info",
        (false, 1) => "bondflow=debug",
        (false, _) => "bondflow=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

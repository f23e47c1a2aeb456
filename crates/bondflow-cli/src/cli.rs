//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, DaycountArgs, PriceArgs, ScheduleArgs};

/// Bondflow - fixed and floating rate cash-flow engine
#[derive(Parser)]
#[command(name = "bondflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pricing configuration file (falls back to $BONDFLOW_CONFIG, then defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value the instrument described by a pricing request
    Price(PriceArgs),

    /// Generate and display a coupon schedule
    Schedule(ScheduleArgs),

    /// Year fractions between two dates
    Daycount(DaycountArgs),

    /// Show or validate the pricing configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}

//! Config command implementation.
//!
//! Shows or validates the pricing configuration resolved from `--config`,
//! `$BONDFLOW_CONFIG` or the built-in defaults.

use anyhow::Result;
use clap::{Args, Subcommand};

use bondflow_config::{ConfigLoader, PricingConfig, Validate};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_error, print_header, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Check the configuration file and report every problem
    Validate,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Validate => validate(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let (config, source) = ctx.load_config()?;

    match ctx.format {
        OutputFormat::Json => crate::output::print_json_value(&config)?,
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
        OutputFormat::Table | OutputFormat::Csv => {
            if ctx.decorated() {
                print_header(&format!("Pricing configuration ({source})"));
            }
            print_output(&rows(&config), ctx.format)?;
        }
    }
    Ok(())
}

fn rows(config: &PricingConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("schedule_day_count", config.schedule_day_count.name()),
        KeyValue::new("fixed_accrual_day_count", config.fixed_accrual_day_count.name()),
        KeyValue::new("interpolation", config.interpolation.to_string()),
        KeyValue::new("allow_extrapolation", config.allow_extrapolation.to_string()),
        KeyValue::new("amount_precision", config.amount_precision.to_string()),
    ]
}

fn validate(ctx: &Context) -> Result<()> {
    let loader = ConfigLoader::new().with_path(ctx.config.as_deref());
    let source = loader.resolve();
    let config = match source.path() {
        Some(path) => PricingConfig::from_toml_file(path)?,
        None => PricingConfig::default(),
    };

    let errors = config.validate();
    if errors.is_empty() {
        if !ctx.quiet {
            print_success(&format!("{source} is valid"));
        }
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
    }
    Err(CliError::Config(format!("{} problem(s) in {source}", errors.len())).into())
}

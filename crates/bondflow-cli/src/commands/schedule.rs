//! Schedule command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondflow_bonds::schedule::{generate_schedule, Period};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_day_count, parse_frequency, Context};
use crate::output::{format_fraction, print_header, print_output};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Issue date (YYYY-MM-DD)
    #[arg(short, long)]
    pub issue: String,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Coupon frequency: ANNUAL, SEMI-ANNUAL, QUARTERLY or MONTHLY
    #[arg(long, default_value = "SEMI-ANNUAL")]
    pub frequency: String,

    /// Day count for period fractions. Defaults to the configured schedule day count.
    #[arg(short, long)]
    pub day_count: Option<String>,
}

/// One schedule period.
#[derive(Debug, Serialize, Tabled)]
struct PeriodRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Start")]
    start_date: String,
    #[tabled(rename = "End")]
    end_date: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Fraction")]
    day_count_fraction: String,
}

impl PeriodRow {
    fn new(number: usize, period: &Period) -> Self {
        Self {
            number,
            start_date: period.start_date.to_string(),
            end_date: period.end_date.to_string(),
            days: period.days_between,
            day_count_fraction: format_fraction(period.day_count_fraction, 10),
        }
    }
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let issue = parse_date(&args.issue)?;
    let maturity = parse_date(&args.maturity)?;
    let frequency = parse_frequency(&args.frequency)?;
    let day_count = match args.day_count.as_deref() {
        Some(name) => parse_day_count(name)?,
        None => ctx.load_config()?.0.schedule_day_count,
    };

    let schedule = generate_schedule(issue, maturity, frequency, day_count)?;

    match ctx.format {
        OutputFormat::Json => crate::output::print_json_value(&schedule)?,
        OutputFormat::Minimal => println!("{}", schedule.len()),
        OutputFormat::Table | OutputFormat::Csv => {
            if ctx.decorated() {
                print_header(&format!(
                    "{} schedule, {} periods, {}",
                    frequency,
                    schedule.len(),
                    day_count
                ));
            }
            let rows: Vec<PeriodRow> = schedule
                .iter()
                .enumerate()
                .map(|(i, p)| PeriodRow::new(i + 1, p))
                .collect();
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}

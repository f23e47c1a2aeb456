//! Daycount command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondflow_core::{day_count, DayCountConvention};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, parse_day_count, Context};
use crate::output::{format_fraction, print_header, print_output};

/// Arguments for the daycount command.
#[derive(Args, Debug)]
pub struct DaycountArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// End date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: String,

    /// Convention to use. All conventions are shown when omitted.
    #[arg(long)]
    pub convention: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct DaycountRow {
    #[tabled(rename = "Convention")]
    convention: &'static str,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "Year Fraction")]
    year_fraction: String,
}

/// Execute the daycount command.
pub fn execute(args: DaycountArgs, ctx: &Context) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let conventions = match args.convention.as_deref() {
        Some(name) => vec![parse_day_count(name)?],
        None => DayCountConvention::all().to_vec(),
    };

    let rows = conventions
        .into_iter()
        .map(|convention| {
            Ok(DaycountRow {
                convention: convention.name(),
                days: convention.days(start, end),
                year_fraction: format_fraction(day_count(start, end, convention)?, 10),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if ctx.decorated() {
        print_header(&format!("{start} to {end}"));
    }
    match ctx.format {
        OutputFormat::Minimal => {
            if let Some(row) = rows.first() {
                println!("{}", row.year_fraction);
            }
        }
        _ => print_output(&rows, ctx.format)?,
    }

    Ok(())
}

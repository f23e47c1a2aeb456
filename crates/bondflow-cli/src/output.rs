//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    print_json_value(data)
}

fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the first row only, as compact JSON.
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Rounds an amount half away from zero. `None` for NaN or infinities.
pub fn round_amount(value: f64, precision: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero))
}

/// Formats an amount to `precision` decimal places.
pub fn format_amount(value: f64, precision: u32) -> String {
    match round_amount(value, precision) {
        Some(d) => format!("{d:.prec$}", prec = precision as usize),
        None => value.to_string(),
    }
}

/// Formats a rate as a percentage with four decimals.
pub fn format_percent(rate: f64) -> String {
    match Decimal::from_f64_retain(rate) {
        Some(d) => format!("{:.4}%", (d * dec!(100)).round_dp(4)),
        None => rate.to_string(),
    }
}

/// Formats a year fraction or factor to `places` decimals.
pub fn format_fraction(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a rounded amount.
    pub fn amount(key: impl Into<String>, value: f64, precision: u32) -> Self {
        Self::new(key, format_amount(value, precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_amount() {
        assert_eq!(round_amount(52_500_000.123_456, 2), Some(dec!(52500000.12)));
        assert_eq!(round_amount(-0.5, 0), Some(dec!(-1)));
        assert_eq!(round_amount(f64::NAN, 2), None);
    }

    #[test]
    fn test_format_amount_pads_precision() {
        assert_eq!(format_amount(1_500_000_000.0, 2), "1500000000.00");
        assert_eq!(format_amount(0.125, 1), "0.1");
        assert_eq!(format_amount(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.035), "3.5000%");
        assert_eq!(format_percent(0.041_234_56), "4.1235%");
    }
}

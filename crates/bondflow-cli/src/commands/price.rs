//! Price command implementation.
//!
//! Values the instrument in a pricing request against the curves it
//! describes.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use bondflow_bonds::instruments::InstrumentKind;
use bondflow_bonds::{DiscountedCashFlow, ValuationResult};
use bondflow_config::{PricingRequest, Validate};
use bondflow_core::Date;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::error::CliError;
use crate::output::{
    format_amount, format_fraction, format_percent, print_header, print_output, KeyValue,
};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Pricing request file (TOML)
    #[arg(short, long)]
    pub request: PathBuf,

    /// Valuation date (YYYY-MM-DD). Overrides the request's date.
    #[arg(long)]
    pub valuation_date: Option<String>,
}

/// Machine-readable pricing output.
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    kind: InstrumentKind,
    issue_date: Date,
    maturity_date: Date,
    face_value: f64,
    clean_value: f64,
    #[serde(flatten)]
    valuation: &'a ValuationResult,
}

/// One discounted flow, formatted for display.
#[derive(Debug, Serialize, Tabled)]
struct FlowRow {
    #[tabled(rename = "Payment")]
    payment_date: String,
    #[tabled(rename = "Accrual Start")]
    accrual_start: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Coupon")]
    coupon: String,
    #[tabled(rename = "Redemption")]
    redemption: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "DF")]
    discount_factor: String,
    #[tabled(rename = "PV")]
    present_value: String,
}

impl FlowRow {
    fn new(flow: &DiscountedCashFlow, precision: u32) -> Self {
        let cf = &flow.cash_flow;
        Self {
            payment_date: cf.payment_date.to_string(),
            accrual_start: cf.accrual_start.to_string(),
            rate: format_percent(cf.rate),
            coupon: format_amount(cf.coupon_amount, precision),
            redemption: format_amount(cf.redemption_amount, precision),
            amount: format_amount(cf.amount, precision),
            discount_factor: format_fraction(flow.discount_factor, 8),
            present_value: format_amount(flow.discounted_amount, precision),
        }
    }
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let (config, source) = ctx.load_config()?;
    let request = PricingRequest::from_toml_file(&args.request)
        .with_context(|| format!("loading {}", args.request.display()))?;
    request
        .validate_or_error()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let valuation_date = match args.valuation_date.as_deref() {
        Some(s) => Some(parse_date(s)?),
        None => request.valuation_date()?,
    };

    let instrument = request.instrument(&config)?;
    let discount_curve = request.discount_curve(&config)?;
    let forward_curve = request.forward_curve(&config)?;

    let result = instrument.value(
        discount_curve.as_ref(),
        forward_curve.as_deref(),
        valuation_date,
    )?;
    info!(
        kind = %instrument.kind(),
        anchor = %result.anchor_date,
        npv = result.npv,
        config = %source,
        "priced instrument"
    );

    let precision = config.amount_precision;
    match ctx.format {
        OutputFormat::Table => {
            let summary = vec![
                KeyValue::new("Instrument", instrument.kind().to_string()),
                KeyValue::new("Issue Date", instrument.issue_date().to_string()),
                KeyValue::new("Maturity Date", instrument.maturity_date().to_string()),
                KeyValue::amount("Face Value", instrument.face_value(), precision),
                KeyValue::new("Anchor Date", result.anchor_date.to_string()),
                KeyValue::amount("NPV", result.npv, precision),
                KeyValue::amount("Accrued Interest", result.accrued_interest, precision),
                KeyValue::amount("Clean Value", result.clean_value(), precision),
                KeyValue::new("Duration", format_fraction(result.duration, 6)),
            ];
            if !ctx.quiet {
                print_header("Valuation");
            }
            print_output(&summary, ctx.format)?;
            if !ctx.quiet {
                print_header("Cash Flows");
            }
            print_output(&flow_rows(&result, precision), ctx.format)?;
        }
        OutputFormat::Json => {
            let report = PriceReport {
                kind: instrument.kind(),
                issue_date: instrument.issue_date(),
                maturity_date: instrument.maturity_date(),
                face_value: instrument.face_value(),
                clean_value: result.clean_value(),
                valuation: &result,
            };
            crate::output::print_json_value(&report)?;
        }
        OutputFormat::Csv => print_output(&flow_rows(&result, precision), ctx.format)?,
        OutputFormat::Minimal => println!("{}", format_amount(result.npv, precision)),
    }

    Ok(())
}

fn flow_rows(result: &ValuationResult, precision: u32) -> Vec<FlowRow> {
    result
        .cash_flows
        .iter()
        .map(|flow| FlowRow::new(flow, precision))
        .collect()
}

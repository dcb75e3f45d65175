use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use debt_planner_core::analysis::{self, PortfolioInput};
use debt_planner_core::projection::{scenarios, InterestSavingsInput};

use crate::config::{decimal_value, override_key, CliConfig};
use crate::input;

/// Arguments shared by the portfolio-level commands
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly leftover income (overrides input and config)
    #[arg(long)]
    pub leftover: Option<Decimal>,

    /// Average weekly extra payment (overrides input and config)
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Start date for payoff date estimates (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Arguments for interest savings estimation
#[derive(Args)]
pub struct SavingsArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

fn portfolio_input(
    args: &PortfolioArgs,
    config: &CliConfig,
    what: &str,
) -> Result<PortfolioInput, Box<dyn std::error::Error>> {
    let mut data = input::read_input(args.input.as_deref(), what)?;
    // A bare array is shorthand for `{"debts": [...]}`.
    if data.is_array() {
        data = serde_json::json!({ "debts": data });
    }
    override_key(&mut data, "monthlyLeftover", args.leftover.map(decimal_value));
    override_key(&mut data, "averageExtraPayment", args.extra.map(decimal_value));
    override_key(
        &mut data,
        "asOf",
        args.as_of.map(|d| Value::String(d.to_string())),
    );
    config.fill_portfolio_defaults(&mut data);
    Ok(serde_json::from_value(data)?)
}

pub fn run_project(
    args: PortfolioArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let req = portfolio_input(&args, config, "payoff projection")?;
    let result = scenarios::project_payoff(
        &req.debts,
        req.monthly_leftover,
        req.average_extra_payment,
        req.as_of,
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyze(
    args: PortfolioArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let req = portfolio_input(&args, config, "portfolio analysis")?;
    let result = analysis::analyze_portfolio(&req);
    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::read_input(args.input.as_deref(), "interest savings")?;
    let req: InterestSavingsInput = serde_json::from_value(data)?;
    Ok(serde_json::to_value(req.savings())?)
}

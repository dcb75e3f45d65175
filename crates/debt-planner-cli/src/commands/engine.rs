use clap::Args;
use serde_json::Value;

use debt_planner_core::engine::{self, DebtRecord, StoredDebt};

use crate::input;

/// Arguments for per-debt payoff computation
#[derive(Args)]
pub struct ComputeArgs {
    /// Path to JSON input file (an array of debts)
    #[arg(long)]
    pub input: Option<String>,

    /// Read records in the app's stored format (`type`, `balance`, ...)
    #[arg(long)]
    pub stored: bool,
}

pub fn run_compute(args: ComputeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::read_input(args.input.as_deref(), "debt computation")?;
    let debts: Vec<DebtRecord> = if args.stored {
        let stored: Vec<StoredDebt> = serde_json::from_value(data)?;
        engine::from_stored(&stored)?
    } else {
        serde_json::from_value(data)?
    };
    log::info!("computing {} debts", debts.len());
    let computed = engine::compute_all(&debts);
    Ok(serde_json::to_value(computed)?)
}

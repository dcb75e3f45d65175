use napi::Result as NapiResult;
use napi_derive::napi;

use debt_planner_core::analysis::PortfolioInput;
use debt_planner_core::engine::{DebtRecord, StoredDebt};
use debt_planner_core::projection::InterestSavingsInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_debts(input_json: String) -> NapiResult<String> {
    let debts: Vec<DebtRecord> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = debt_planner_core::engine::compute_all(&debts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_stored_debts(input_json: String) -> NapiResult<String> {
    let stored: Vec<StoredDebt> = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let debts = debt_planner_core::engine::from_stored(&stored).map_err(to_napi_error)?;
    let output = debt_planner_core::engine::compute_all(&debts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_payoff(input_json: String) -> NapiResult<String> {
    let input: PortfolioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = debt_planner_core::projection::project_payoff(
        &input.debts,
        input.monthly_leftover,
        input.average_extra_payment,
        input.as_of,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn interest_savings(input_json: String) -> NapiResult<String> {
    let input: InterestSavingsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&input.savings()).map_err(to_napi_error)
}

#[napi]
pub fn analyze_portfolio(input_json: String) -> NapiResult<String> {
    let input: PortfolioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = debt_planner_core::analysis::analyze_portfolio(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

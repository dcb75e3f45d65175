use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::engine::{compute_all, ComputedDebt, DebtRecord};
use crate::projection::savings::savings_for_computed;
use crate::projection::scenarios::project_computed;
use crate::projection::{summarize, InterestSavings, PayoffProjection, PortfolioTotals, WEEKS_PER_MONTH};
use crate::time_value::ceil_periods;
use crate::types::{with_metadata, ComputationOutput, Money, Payoff};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInput {
    pub debts: Vec<DebtRecord>,
    /// Monthly disposable income after minimum payments.
    #[serde(default)]
    pub monthly_leftover: Money,
    /// Average weekly extra payment from check-in history.
    #[serde(default)]
    pub average_extra_payment: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// Display label only; no conversion is performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub debts: Vec<ComputedDebt>,
    pub totals: PortfolioTotals,
    pub projection: PayoffProjection,
    /// Current pace against best case. Absent when either timeline is
    /// indefinite.
    pub interest_savings: Option<InterestSavings>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Assumptions<'a> {
    weeks_per_month: Decimal,
    monthly_leftover: Money,
    average_extra_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_of: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    interest_model: &'static str,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute every debt, total them, project the three payoff scenarios and
/// estimate the interest saved by the best case.
pub fn analyze_portfolio(input: &PortfolioInput) -> ComputationOutput<PortfolioAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let debts = compute_all(&input.debts);
    let totals = summarize(&debts);
    let projection = project_computed(
        &debts,
        input.monthly_leftover,
        input.average_extra_payment,
        input.as_of,
    );

    for debt in debts.iter().filter(|d| !d.pays_off()) {
        warnings.push(format!(
            "{} ({}): cannot pay off at current rate",
            debt.name(),
            debt.id()
        ));
    }
    if !projection.current_pace.weeks_remaining.is_finite() {
        warnings.push("Payoff timeline at current pace is indefinite".to_string());
    }

    let interest_savings = match (
        weeks_to_months(projection.current_pace.weeks_remaining),
        weeks_to_months(projection.best_case.weeks_remaining),
    ) {
        (Some(current), Some(best)) => Some(savings_for_computed(
            &debts,
            current,
            best,
            input.monthly_leftover,
        )),
        _ => {
            warnings.push("Interest savings unavailable: timeline is indefinite".to_string());
            None
        }
    };

    let assumptions = Assumptions {
        weeks_per_month: WEEKS_PER_MONTH,
        monthly_leftover: input.monthly_leftover.max(Decimal::ZERO),
        average_extra_payment: input.average_extra_payment.max(Decimal::ZERO),
        as_of: input.as_of,
        currency: input.currency.as_deref(),
        interest_model: "approximate: balance / 2 x monthly rate x months",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    log::info!(
        "analyzed {} debts in {}us ({} warnings)",
        debts.len(),
        elapsed,
        warnings.len()
    );

    with_metadata(
        "Closed-form payoff per debt; portfolio projection at 4.33 weeks/month",
        &assumptions,
        warnings,
        elapsed,
        PortfolioAnalysis {
            debts,
            totals,
            projection,
            interest_savings,
        },
    )
}

fn weeks_to_months(weeks: Payoff<u32>) -> Option<u32> {
    let weeks = weeks.finite()?;
    ceil_periods(Decimal::from(weeks) / WEEKS_PER_MONTH).finite()
}

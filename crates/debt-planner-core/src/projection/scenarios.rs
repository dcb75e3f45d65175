use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WEEKS_PER_MONTH;
use crate::engine::{compute_all, ComputedDebt, DebtRecord};
use crate::time_value::{ceil_periods, round_cents};
use crate::types::{Money, Payoff};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One hypothetical payoff path, in weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionScenario {
    pub weeks_remaining: Payoff<u32>,
    pub weekly_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_estimate: Option<NaiveDate>,
    /// Weeks ahead of the current pace. Never negative.
    pub weeks_saved: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffProjection {
    pub current_pace: ProjectionScenario,
    pub with_extra_payments: ProjectionScenario,
    pub best_case: ProjectionScenario,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the debt-free date under three payment assumptions.
///
/// `monthly_leftover` is the user's monthly disposable income.
/// `average_extra_payment` is the average weekly extra payment seen in
/// check-in history. Both are clamped at zero. Dates are only estimated when
/// `as_of` is given.
pub fn project_payoff(
    debts: &[DebtRecord],
    monthly_leftover: Money,
    average_extra_payment: Money,
    as_of: Option<NaiveDate>,
) -> PayoffProjection {
    project_computed(
        &compute_all(debts),
        monthly_leftover,
        average_extra_payment,
        as_of,
    )
}

/// Same as [`project_payoff`] over debts that are already computed.
pub fn project_computed(
    computed: &[ComputedDebt],
    monthly_leftover: Money,
    average_extra_payment: Money,
    as_of: Option<NaiveDate>,
) -> PayoffProjection {
    let total_balance: Money = computed.iter().map(|d| d.outstanding()).sum();
    // One debt that never pays off leaves the whole portfolio open.
    let stuck = computed.iter().filter(|d| !d.pays_off()).count();
    let monthly_minimum: Money = computed.iter().map(|d| d.monthly_payment).sum();
    let weekly_minimum = monthly_minimum / WEEKS_PER_MONTH;

    let leftover = monthly_leftover.max(Decimal::ZERO);
    let extra = average_extra_payment.max(Decimal::ZERO);

    let current_weeks = if stuck > 0 {
        Payoff::Never
    } else {
        weeks_to_clear(total_balance, weekly_minimum)
    };

    let scenario = |weekly: Money| -> ProjectionScenario {
        let weeks = if total_balance <= Decimal::ZERO {
            Payoff::Finite(0)
        } else if stuck > 0 || weekly <= Decimal::ZERO {
            current_weeks
        } else {
            weeks_to_clear(total_balance, weekly)
        };
        let weeks_saved = match (current_weeks, weeks) {
            (Payoff::Finite(c), Payoff::Finite(s)) => c.saturating_sub(s),
            _ => 0,
        };
        ProjectionScenario {
            weeks_remaining: weeks,
            weekly_payment: round_cents(weekly),
            date_estimate: estimate_date(as_of, weeks),
            weeks_saved,
        }
    };

    let projection = PayoffProjection {
        current_pace: scenario(weekly_minimum),
        with_extra_payments: scenario(weekly_minimum + extra),
        best_case: scenario(weekly_minimum + leftover / WEEKS_PER_MONTH),
    };

    if stuck > 0 {
        log::debug!("{stuck} debt(s) never pay off; every scenario is indefinite");
    } else if !projection.current_pace.weeks_remaining.is_finite() {
        log::debug!(
            "current pace never clears balance {} (weekly minimum {})",
            total_balance,
            round_cents(weekly_minimum)
        );
    }

    projection
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn weeks_to_clear(balance: Money, weekly: Money) -> Payoff<u32> {
    if balance <= Decimal::ZERO {
        return Payoff::Finite(0);
    }
    if weekly <= Decimal::ZERO {
        return Payoff::Never;
    }
    ceil_periods(balance / weekly)
}

fn estimate_date(as_of: Option<NaiveDate>, weeks: Payoff<u32>) -> Option<NaiveDate> {
    let start = as_of?;
    let weeks = weeks.finite()?;
    start.checked_add_days(Days::new(u64::from(weeks) * 7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimpleDebt;
    use rust_decimal_macros::dec;

    fn loan(balance: Money, payment: Money) -> DebtRecord {
        DebtRecord::StudentLoan(SimpleDebt::new("s", "Student", balance, dec!(4), payment))
    }

    #[test]
    fn test_weeks_at_current_pace() {
        // 433 a month is 100 a week
        let projection = project_payoff(&[loan(dec!(1000), dec!(433))], dec!(0), dec!(0), None);
        assert_eq!(projection.current_pace.weeks_remaining, Payoff::Finite(10));
        assert_eq!(projection.current_pace.weekly_payment, dec!(100));
        assert_eq!(projection.current_pace.weeks_saved, 0);
    }

    #[test]
    fn test_extra_and_best_case_save_weeks() {
        let projection =
            project_payoff(&[loan(dec!(1000), dec!(433))], dec!(433), dec!(25), None);
        // 1000 / 125 = 8 weeks; 1000 / 200 = 5 weeks
        assert_eq!(projection.with_extra_payments.weeks_remaining, Payoff::Finite(8));
        assert_eq!(projection.with_extra_payments.weeks_saved, 2);
        assert_eq!(projection.best_case.weeks_remaining, Payoff::Finite(5));
        assert_eq!(projection.best_case.weeks_saved, 5);
    }

    #[test]
    fn test_zero_payment_falls_back_to_current_pace() {
        let projection = project_payoff(&[loan(dec!(1000), dec!(0))], dec!(0), dec!(0), None);
        assert_eq!(projection.current_pace.weeks_remaining, Payoff::Never);
        assert_eq!(projection.with_extra_payments.weeks_remaining, Payoff::Never);
        assert_eq!(projection.best_case.weeks_saved, 0);
    }

    #[test]
    fn test_leftover_does_not_rescue_a_stuck_debt() {
        let projection = project_payoff(&[loan(dec!(1000), dec!(0))], dec!(433), dec!(50), None);
        assert_eq!(projection.current_pace.weeks_remaining, Payoff::Never);
        assert_eq!(projection.best_case.weeks_remaining, Payoff::Never);
        assert_eq!(projection.best_case.weekly_payment, dec!(100));
        assert_eq!(projection.best_case.weeks_saved, 0);
    }

    #[test]
    fn test_stuck_debt_makes_every_scenario_indefinite() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let debts = [
            loan(dec!(1000), dec!(433)),
            DebtRecord::CreditCard(SimpleDebt::new("c", "Card", dec!(5000), dec!(24), dec!(50))),
        ];
        let projection = project_payoff(&debts, dec!(433), dec!(25), Some(as_of));
        for scenario in [
            &projection.current_pace,
            &projection.with_extra_payments,
            &projection.best_case,
        ] {
            assert_eq!(scenario.weeks_remaining, Payoff::Never);
            assert_eq!(scenario.date_estimate, None);
            assert_eq!(scenario.weeks_saved, 0);
        }
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let projection =
            project_payoff(&[loan(dec!(1000), dec!(433))], dec!(-500), dec!(-50), None);
        assert_eq!(projection.best_case, projection.current_pace);
        assert_eq!(projection.with_extra_payments, projection.current_pace);
    }

    #[test]
    fn test_date_estimate() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let projection =
            project_payoff(&[loan(dec!(1000), dec!(433))], dec!(0), dec!(0), Some(as_of));
        assert_eq!(
            projection.current_pace.date_estimate,
            NaiveDate::from_ymd_opt(2026, 3, 12)
        );
    }
}

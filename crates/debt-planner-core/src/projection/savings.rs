use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::{compute_all, ComputedDebt, DebtRecord};
use crate::time_value::{ceil_periods, round_cents};
use crate::types::{Money, Payoff};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestSavingsInput {
    pub debts: Vec<DebtRecord>,
    pub current_months: u32,
    pub strategy_months: u32,
    #[serde(default)]
    pub strategy_extra_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestSavings {
    pub current_interest: Money,
    pub strategy_interest: Money,
    /// Never negative.
    pub interest_saved: Money,
}

/// Approximate the interest saved by paying `strategy_extra_payment` more
/// each month.
///
/// This is an estimate, not an amortization: each debt accrues
/// `(balance / 2) * monthly_rate * months`, assuming the balance falls
/// linearly. A debt's months are capped by the timeline passed in and by its
/// own linear paydown time at the payment being modelled.
pub fn calculate_interest_savings(
    debts: &[DebtRecord],
    current_months: u32,
    strategy_months: u32,
    strategy_extra_payment: Money,
) -> InterestSavings {
    savings_for_computed(
        &compute_all(debts),
        current_months,
        strategy_months,
        strategy_extra_payment,
    )
}

impl InterestSavingsInput {
    pub fn savings(&self) -> InterestSavings {
        calculate_interest_savings(
            &self.debts,
            self.current_months,
            self.strategy_months,
            self.strategy_extra_payment,
        )
    }
}

/// Same as [`calculate_interest_savings`] over debts that are already computed.
pub fn savings_for_computed(
    computed: &[ComputedDebt],
    current_months: u32,
    strategy_months: u32,
    strategy_extra_payment: Money,
) -> InterestSavings {
    let extra = strategy_extra_payment.max(Decimal::ZERO);
    let total_minimum: Money = computed.iter().map(|d| d.monthly_payment).sum();
    let even_share = if computed.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::ONE / Decimal::from(computed.len())
    };

    let mut current = Decimal::ZERO;
    let mut strategy = Decimal::ZERO;

    for debt in computed {
        let balance = debt.outstanding();
        let rate = debt.debt.monthly_rate();
        let payment = debt.monthly_payment;

        // Extra is split by share of the minimum payment.
        let share = if total_minimum > Decimal::ZERO {
            payment / total_minimum
        } else {
            even_share
        };
        let adjusted = payment + extra * share;

        let current_span = accrual_months(balance, payment, current_months);
        let strategy_span = accrual_months(balance, adjusted, strategy_months);
        current += approximate_interest(balance, rate, current_span);
        strategy += approximate_interest(balance, rate, strategy_span);
    }

    let current_interest = round_cents(current);
    let strategy_interest = round_cents(strategy);
    InterestSavings {
        current_interest,
        strategy_interest,
        interest_saved: (current_interest - strategy_interest).max(Decimal::ZERO),
    }
}

fn approximate_interest(balance: Money, rate: Decimal, months: u32) -> Money {
    balance / dec!(2) * rate * Decimal::from(months)
}

/// Months a debt accrues interest within `timeline` when paid down linearly.
fn accrual_months(balance: Money, payment: Money, timeline: u32) -> u32 {
    if payment <= Decimal::ZERO {
        return timeline;
    }
    match ceil_periods(balance / payment) {
        Payoff::Finite(n) => n.min(timeline),
        Payoff::Never => timeline,
    }
}

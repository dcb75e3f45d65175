use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::ComputedDebt;
use crate::time_value::round_cents;
use crate::types::{Money, Payoff};

/// Dashboard totals across every computed debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub debt_count: usize,
    pub total_balance: Money,
    pub total_monthly_payment: Money,
    /// Sum over debts that pay off; `Never` debts are left out.
    pub total_interest: Money,
    /// Sum over debts that pay off; `Never` debts are left out.
    pub total_paid: Money,
    pub debts_never_paying_off: Vec<String>,
    /// `Never` as soon as one debt never pays off.
    pub longest_payoff_months: Payoff<u32>,
}

impl PortfolioTotals {
    pub fn is_indefinite(&self) -> bool {
        !self.longest_payoff_months.is_finite()
    }
}

pub fn summarize(computed: &[ComputedDebt]) -> PortfolioTotals {
    let mut total_balance = Decimal::ZERO;
    let mut total_monthly_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut never = Vec::new();
    let mut longest = Payoff::Finite(0u32);

    for debt in computed {
        total_balance += debt.outstanding();
        total_monthly_payment += debt.monthly_payment;

        match (debt.total_interest, debt.total_paid) {
            (Payoff::Finite(interest), Payoff::Finite(paid)) => {
                total_interest += interest;
                total_paid += paid;
            }
            _ => never.push(debt.id().to_string()),
        }

        longest = match (longest, debt.months_to_payoff) {
            (Payoff::Finite(a), Payoff::Finite(b)) => Payoff::Finite(a.max(b)),
            _ => Payoff::Never,
        };
    }

    PortfolioTotals {
        debt_count: computed.len(),
        total_balance: round_cents(total_balance),
        total_monthly_payment: round_cents(total_monthly_payment),
        total_interest: round_cents(total_interest),
        total_paid: round_cents(total_paid),
        debts_never_paying_off: never,
        longest_payoff_months: longest,
    }
}

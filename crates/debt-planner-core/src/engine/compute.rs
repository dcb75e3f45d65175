use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::debt::{sanitize, DebtKind, DebtRecord, MortgageDebt, RepaymentStyle, SimpleDebt};
use crate::time_value::{self, ceil_periods, log_ratio, round_cents};
use crate::types::{Money, Payoff, Rate};

// ---------------------------------------------------------------------------
// Output type
// ---------------------------------------------------------------------------

/// A debt together with its derived payoff schedule summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedDebt {
    /// The sanitized input record.
    pub debt: DebtRecord,
    pub monthly_payment: Money,
    pub months_to_payoff: Payoff<u32>,
    pub total_paid: Payoff<Money>,
    pub total_interest: Payoff<Money>,
}

impl ComputedDebt {
    pub fn id(&self) -> &str {
        self.debt.id()
    }

    pub fn name(&self) -> &str {
        self.debt.name()
    }

    pub fn kind(&self) -> DebtKind {
        self.debt.kind()
    }

    pub fn outstanding(&self) -> Money {
        self.debt.outstanding()
    }

    pub fn pays_off(&self) -> bool {
        self.months_to_payoff.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the payoff summary for one debt.
///
/// Never fails. Negative inputs are clamped first, and a payment that cannot
/// outpace interest yields `Payoff::Never` for months, total paid and total
/// interest.
pub fn compute(debt: &DebtRecord) -> ComputedDebt {
    let debt = sanitize(debt);
    let computed = match (&debt, debt.kind().repayment_style()) {
        (DebtRecord::Mortgage(m), _) => compute_mortgage(m),
        (
            DebtRecord::CreditCard(d)
            | DebtRecord::PersonalLoan(d)
            | DebtRecord::CarLoan(d)
            | DebtRecord::StudentLoan(d),
            style,
        ) => compute_simple(d, style),
    };

    if !computed.months.is_finite() {
        log::debug!(
            "debt {} ({}) never pays off at payment {}",
            debt.id(),
            debt.kind(),
            computed.payment
        );
    }
    log::trace!(
        "debt {}: payment={} months={} interest={}",
        debt.id(),
        computed.payment,
        computed.months,
        computed.interest
    );

    ComputedDebt {
        debt,
        monthly_payment: computed.payment,
        months_to_payoff: computed.months,
        total_paid: computed.paid,
        total_interest: computed.interest,
    }
}

/// Compute every debt independently, preserving order.
pub fn compute_all(debts: &[DebtRecord]) -> Vec<ComputedDebt> {
    debts.iter().map(compute).collect()
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

struct Schedule {
    payment: Money,
    months: Payoff<u32>,
    paid: Payoff<Money>,
    interest: Payoff<Money>,
}

impl Schedule {
    fn never(payment: Money) -> Self {
        Schedule {
            payment,
            months: Payoff::Never,
            paid: Payoff::Never,
            interest: Payoff::Never,
        }
    }

    fn settled(payment: Money) -> Self {
        Schedule {
            payment,
            months: Payoff::Finite(0),
            paid: Payoff::Finite(Decimal::ZERO),
            interest: Payoff::Finite(Decimal::ZERO),
        }
    }
}

fn compute_mortgage(m: &MortgageDebt) -> Schedule {
    let term = m.term_months();
    let rate = time_value::monthly_rate(m.interest_rate);

    let payment = match (m.custom_monthly_payment, term) {
        (Some(custom), _) if custom > Decimal::ZERO => round_cents(custom),
        (_, Payoff::Finite(n)) => round_cents(time_value::level_payment(m.principal, rate, n)),
        // Limit of the annuity payment as the term grows without bound.
        (_, Payoff::Never) => round_cents(m.principal.checked_mul(rate).unwrap_or(Decimal::MAX)),
    };

    let n = match term {
        Payoff::Finite(n) if n > 0 => n,
        // No term to amortize over, or one that cannot be counted.
        _ => {
            return if m.principal.is_zero() {
                Schedule::settled(payment)
            } else {
                Schedule::never(payment)
            };
        }
    };

    // Mortgages run the full contractual term regardless of overpayment.
    let paid = total_for(payment, n);
    Schedule {
        payment,
        months: Payoff::Finite(n),
        paid: Payoff::Finite(paid),
        // A payment rounded down to whole cents can total less than the principal.
        interest: Payoff::Finite(round_cents(paid - m.principal).max(Decimal::ZERO)),
    }
}

fn compute_simple(d: &SimpleDebt, style: RepaymentStyle) -> Schedule {
    let payment = round_cents(d.monthly_payment);
    let balance = d.balance;
    let rate = time_value::monthly_rate(d.interest_rate);

    if balance <= Decimal::ZERO {
        return Schedule::settled(payment);
    }
    // Checked before any logarithm is taken.
    if payment.is_zero() {
        return Schedule::never(payment);
    }

    let months = if rate.is_zero() {
        balance
            .checked_div(payment)
            .map_or(Payoff::Never, ceil_periods)
    } else if balance.checked_mul(rate).map_or(true, |interest| payment <= interest) {
        Payoff::Never
    } else {
        match style {
            RepaymentStyle::Revolving => revolving_months(balance, rate, payment),
            RepaymentStyle::Installment | RepaymentStyle::Amortizing => {
                installment_months(balance, rate, payment)
            }
        }
    };

    match months {
        Payoff::Finite(n) => {
            let paid = total_for(payment, n);
            Schedule {
                payment,
                months,
                paid: Payoff::Finite(paid),
                interest: Payoff::Finite(round_cents(paid - balance)),
            }
        }
        Payoff::Never => Schedule::never(payment),
    }
}

/// `payment * months` in cents, saturating at `Decimal::MAX`.
fn total_for(payment: Money, months: u32) -> Money {
    payment
        .checked_mul(Decimal::from(months))
        .map_or(Decimal::MAX, round_cents)
}

/// months = ceil(-ln(1 - B*r/P) / ln(1 + r)). Requires P > B*r and r > 0.
fn revolving_months(balance: Money, rate: Rate, payment: Money) -> Payoff<u32> {
    let remaining_share = Decimal::ONE - balance * rate / payment;
    match log_ratio(remaining_share, rate) {
        Some(n) => ceil_periods(-n),
        None => Payoff::Never,
    }
}

/// n = ceil(ln(P / (P - B*r)) / ln(1 + r)). Requires P > B*r and r > 0.
fn installment_months(principal: Money, rate: Rate, payment: Money) -> Payoff<u32> {
    let net = payment - principal * rate;
    if net <= Decimal::ZERO {
        return Payoff::Never;
    }
    let Some(ratio) = payment.checked_div(net) else {
        return Payoff::Never;
    };
    match log_ratio(ratio, rate) {
        Some(n) => ceil_periods(n),
        None => Payoff::Never,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card(balance: Money, apr: Decimal, payment: Money) -> DebtRecord {
        DebtRecord::CreditCard(SimpleDebt::new("cc", "Card", balance, apr, payment))
    }

    fn loan(balance: Money, apr: Decimal, payment: Money) -> DebtRecord {
        DebtRecord::PersonalLoan(SimpleDebt::new("pl", "Loan", balance, apr, payment))
    }

    #[test]
    fn test_credit_card_reference_case() {
        let result = compute(&card(dec!(1000), dec!(20), dec!(50)));
        // -ln(1 - 1000 * 0.016667 / 50) / ln(1.016667) ≈ 24.53
        assert_eq!(result.months_to_payoff, Payoff::Finite(25));
        assert_eq!(result.total_paid, Payoff::Finite(dec!(1250.00)));
        assert_eq!(result.total_interest, Payoff::Finite(dec!(250.00)));
    }

    #[test]
    fn test_zero_balance_pays_off_immediately() {
        let result = compute(&card(Decimal::ZERO, dec!(20), Decimal::ZERO));
        assert_eq!(result.months_to_payoff, Payoff::Finite(0));
        assert_eq!(result.total_interest, Payoff::Finite(Decimal::ZERO));
    }

    #[test]
    fn test_zero_payment_never_pays_off() {
        let result = compute(&loan(dec!(5000), Decimal::ZERO, Decimal::ZERO));
        assert_eq!(result.months_to_payoff, Payoff::Never);
        assert_eq!(result.total_paid, Payoff::Never);
        assert_eq!(result.total_interest, Payoff::Never);
    }

    #[test]
    fn test_payment_equal_to_interest_never_pays_off() {
        // 1% monthly on 10k is exactly 100
        let result = compute(&card(dec!(10_000), dec!(12), dec!(100)));
        assert_eq!(result.months_to_payoff, Payoff::Never);
        assert!(!result.pays_off());
    }

    #[test]
    fn test_zero_rate_is_exact_division() {
        let result = compute(&loan(dec!(1000), Decimal::ZERO, dec!(300)));
        assert_eq!(result.months_to_payoff, Payoff::Finite(4));
        assert_eq!(result.total_paid, Payoff::Finite(dec!(1200.00)));
        assert_eq!(result.total_interest, Payoff::Finite(dec!(200.00)));
    }

    #[test]
    fn test_installment_and_revolving_agree() {
        // Both closed forms solve the same annuity identity.
        let l = compute(&loan(dec!(8_000), dec!(9.5), dec!(250)));
        let c = compute(&card(dec!(8_000), dec!(9.5), dec!(250)));
        assert_eq!(l.months_to_payoff, c.months_to_payoff);
    }

    #[test]
    fn test_mortgage_reference_case() {
        let debt = DebtRecord::Mortgage(MortgageDebt::new(
            "m",
            "Home",
            dec!(200_000),
            dec!(4.8),
            dec!(25),
        ));
        let result = compute(&debt);
        assert_eq!(result.monthly_payment, dec!(1145.99));
        assert_eq!(result.months_to_payoff, Payoff::Finite(300));
        assert_eq!(result.total_paid, Payoff::Finite(dec!(343_797.00)));
        assert_eq!(result.total_interest, Payoff::Finite(dec!(143_797.00)));
    }

    #[test]
    fn test_mortgage_custom_payment_keeps_term() {
        let debt = DebtRecord::Mortgage(
            MortgageDebt::new("m", "Home", dec!(100_000), dec!(3), dec!(10))
                .with_custom_payment(dec!(2_000)),
        );
        let result = compute(&debt);
        assert_eq!(result.monthly_payment, dec!(2000));
        assert_eq!(result.months_to_payoff, Payoff::Finite(120));
        assert_eq!(result.total_paid, Payoff::Finite(dec!(240_000)));
    }

    #[test]
    fn test_mortgage_zero_rate() {
        let debt = DebtRecord::Mortgage(MortgageDebt::new(
            "m",
            "Family loan",
            dec!(120_000),
            Decimal::ZERO,
            dec!(10),
        ));
        let result = compute(&debt);
        assert_eq!(result.monthly_payment, dec!(1000));
        assert_eq!(result.total_interest, Payoff::Finite(Decimal::ZERO));
    }

    #[test]
    fn test_mortgage_zero_term() {
        let open = DebtRecord::Mortgage(MortgageDebt::new("m", "H", dec!(1), dec!(4), dec!(0)));
        assert_eq!(compute(&open).months_to_payoff, Payoff::Never);

        let settled = DebtRecord::Mortgage(MortgageDebt::new("m", "H", dec!(0), dec!(4), dec!(0)));
        assert_eq!(compute(&settled).months_to_payoff, Payoff::Finite(0));
    }

    #[test]
    fn test_mortgage_interest_floored_when_payment_rounds_to_zero() {
        // 1 over 360 months is 0.0028 a month, which rounds to 0.00
        let debt = DebtRecord::Mortgage(MortgageDebt::new("m", "H", dec!(1), Decimal::ZERO, dec!(30)));
        let result = compute(&debt);
        assert_eq!(result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.total_paid, Payoff::Finite(Decimal::ZERO));
        assert_eq!(result.total_interest, Payoff::Finite(Decimal::ZERO));
    }

    #[test]
    fn test_mortgage_term_too_long_to_count() {
        let open = DebtRecord::Mortgage(MortgageDebt::new(
            "m",
            "H",
            dec!(200_000),
            dec!(4.8),
            Decimal::MAX,
        ));
        let result = compute(&open);
        assert_eq!(result.months_to_payoff, Payoff::Never);
        // Interest-only limit: 200000 * 0.004
        assert_eq!(result.monthly_payment, dec!(800));

        let settled = DebtRecord::Mortgage(MortgageDebt::new("m", "H", dec!(0), dec!(4.8), Decimal::MAX));
        assert_eq!(compute(&settled).months_to_payoff, Payoff::Finite(0));
    }

    #[test]
    fn test_compute_stores_sanitized_record() {
        let result = compute(&card(dec!(-10), dec!(15), dec!(25)));
        assert_eq!(result.outstanding(), Decimal::ZERO);
        assert_eq!(result.months_to_payoff, Payoff::Finite(0));
    }

    #[test]
    fn test_compute_all_preserves_order() {
        let debts = vec![
            card(dec!(1000), dec!(20), dec!(50)),
            loan(dec!(1000), Decimal::ZERO, dec!(100)),
        ];
        let results = compute_all(&debts);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].kind(), DebtKind::CreditCard);
        assert_eq!(results[1].months_to_payoff, Payoff::Finite(10));
    }
}

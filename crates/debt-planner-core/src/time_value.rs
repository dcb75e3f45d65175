use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Payoff, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Periods compounded one multiplication at a time. Longer horizons switch to
/// exponentiation by squaring.
const ITERATIVE_PERIODS: u32 = 1_200;

/// Convert an APR entered as a percentage (19.9 for 19.9%) to a monthly rate.
pub fn monthly_rate(apr_percent: Decimal) -> Rate {
    apr_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Round a monetary amount to cents, half away from zero.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
/// Returns `None` when the factor does not fit in a `Decimal`.
pub fn compound(rate: Rate, n: u32) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(rate)?;
    if n > ITERATIVE_PERIODS {
        return factor.checked_powu(u64::from(n));
    }
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(factor)?;
    }
    Some(result)
}

/// Level (annuity) payment that retires `principal` over `periods` months.
/// PMT = P * r * (1+r)^n / ((1+r)^n - 1), or P / n at a zero rate.
///
/// When (1+r)^n overflows, the payment is its limit `P * r`. A payment too
/// large for a `Decimal` saturates at `Decimal::MAX`.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> Money {
    if principal <= Decimal::ZERO || periods == 0 {
        return Decimal::ZERO;
    }
    if rate.is_zero() {
        return principal / Decimal::from(periods);
    }

    let interest_only = principal.checked_mul(rate);
    let Some(factor) = compound(rate, periods) else {
        return interest_only.unwrap_or(Decimal::MAX);
    };
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return principal / Decimal::from(periods);
    }

    interest_only
        .zip(factor.checked_div(denom))
        .and_then(|(pr, ratio)| pr.checked_mul(ratio))
        .unwrap_or(Decimal::MAX)
}

/// ln(numerator) / ln(1 + rate), or `None` when either logarithm is undefined.
pub fn log_ratio(numerator: Decimal, rate: Rate) -> Option<Decimal> {
    let ln_growth = (Decimal::ONE + rate).checked_ln()?;
    if ln_growth <= Decimal::ZERO {
        return None;
    }
    let ln_num = numerator.checked_ln()?;
    ln_num.checked_div(ln_growth)
}

/// Round a fractional period count (months or weeks) up to whole periods.
///
/// Counts that do not fit in a `u32` can never be reached in practice and
/// are reported as `Never`.
pub fn ceil_periods(periods: Decimal) -> Payoff<u32> {
    if periods <= Decimal::ZERO {
        return Payoff::Finite(0);
    }
    match periods.ceil().to_u32() {
        Some(n) => Payoff::Finite(n),
        None => Payoff::Never,
    }
}

//! Debt computation engine: one debt record in, one payoff summary out.

pub mod compute;
pub mod debt;
pub mod stored;

pub use compute::{compute, compute_all, ComputedDebt};
pub use debt::{sanitize, DebtKind, DebtRecord, MortgageDebt, RepaymentStyle, SimpleDebt};
pub use stored::{from_stored, StoredDebt};

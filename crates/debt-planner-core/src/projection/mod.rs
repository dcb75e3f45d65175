//! Portfolio projection layer: totals, week-granular payoff scenarios, and
//! approximate interest savings between payment strategies.

pub mod portfolio;
pub mod savings;
pub mod scenarios;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Average weeks per month used for every monthly/weekly conversion.
/// Deliberately approximate rather than calendar exact.
pub const WEEKS_PER_MONTH: Decimal = dec!(4.33);

pub use portfolio::{summarize, PortfolioTotals};
pub use savings::{calculate_interest_savings, InterestSavings, InterestSavingsInput};
pub use scenarios::{project_payoff, PayoffProjection, ProjectionScenario};

pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "engine")]
pub mod engine;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "projection")]
pub mod analysis;

pub use error::DebtPlannerError;
pub use types::*;

/// Standard result type for all debt-planner operations
pub type DebtPlannerResult<T> = Result<T, DebtPlannerError>;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Monthly rates expressed as decimals (0.0125 = 1.25% per month).
/// APR inputs stay in percent until converted by `time_value::monthly_rate`.
pub type Rate = Decimal;

/// A payoff quantity that may never be reached.
///
/// A debt whose payment does not cover its accruing interest has no finite
/// payoff month, so every quantity derived from that month (total paid,
/// total interest, a portfolio timeline) is `Never` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payoff<T> {
    Finite(T),
    Never,
}

impl<T> Payoff<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Payoff::Finite(_))
    }

    pub fn finite(self) -> Option<T> {
        match self {
            Payoff::Finite(v) => Some(v),
            Payoff::Never => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Payoff<U> {
        match self {
            Payoff::Finite(v) => Payoff::Finite(f(v)),
            Payoff::Never => Payoff::Never,
        }
    }

    pub fn as_ref(&self) -> Payoff<&T> {
        match self {
            Payoff::Finite(v) => Payoff::Finite(v),
            Payoff::Never => Payoff::Never,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Payoff<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payoff::Finite(v) => write!(f, "{v}"),
            Payoff::Never => f.write_str("never"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit_cents".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payoff_serializes_snake_case() {
        let finite: Payoff<u32> = Payoff::Finite(12);
        assert_eq!(serde_json::to_string(&finite).unwrap(), r#"{"finite":12}"#);
        let never: Payoff<u32> = Payoff::Never;
        assert_eq!(serde_json::to_string(&never).unwrap(), r#""never""#);
    }

    #[test]
    fn test_payoff_display() {
        assert_eq!(Payoff::Finite(dec!(10.50)).to_string(), "10.50");
        assert_eq!(Payoff::<Money>::Never.to_string(), "never");
    }

    #[test]
    fn test_payoff_map_keeps_never() {
        let never: Payoff<u32> = Payoff::Never;
        assert_eq!(never.map(|m| m * 2), Payoff::Never);
        assert_eq!(Payoff::Finite(3u32).map(|m| m * 2), Payoff::Finite(6));
    }
}

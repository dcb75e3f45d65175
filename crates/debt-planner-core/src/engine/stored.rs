use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::debt::{DebtKind, DebtRecord, MortgageDebt, SimpleDebt};
use crate::error::DebtPlannerError;
use crate::types::Money;
use crate::DebtPlannerResult;

/// A debt as kept by the app's local key-value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDebt {
    pub id: String,
    #[serde(rename = "type")]
    pub debt_type: String,
    pub name: String,
    pub balance: Money,
    pub interest_rate: Decimal,
    pub monthly_payment: Money,
    /// Only meaningful for mortgages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<Decimal>,
}

impl TryFrom<StoredDebt> for DebtRecord {
    type Error = DebtPlannerError;

    fn try_from(stored: StoredDebt) -> Result<Self, Self::Error> {
        let kind = DebtKind::parse(&stored.debt_type)
            .ok_or_else(|| DebtPlannerError::UnknownDebtType(stored.debt_type.clone()))?;

        if kind == DebtKind::Mortgage {
            let term_years = stored.term_years.ok_or_else(|| DebtPlannerError::InvalidInput {
                field: "termYears".into(),
                reason: format!("mortgage record '{}' has no term", stored.id),
            })?;
            let mut mortgage = MortgageDebt::new(
                stored.id,
                stored.name,
                stored.balance,
                stored.interest_rate,
                term_years,
            );
            if stored.monthly_payment > Decimal::ZERO {
                mortgage = mortgage.with_custom_payment(stored.monthly_payment);
            }
            return Ok(DebtRecord::Mortgage(mortgage));
        }

        let simple = SimpleDebt::new(
            stored.id,
            stored.name,
            stored.balance,
            stored.interest_rate,
            stored.monthly_payment,
        );
        DebtRecord::simple(kind, simple).ok_or_else(|| {
            DebtPlannerError::UnknownDebtType(kind.as_str().to_string())
        })
    }
}

/// Convert a stored debt list, stopping at the first bad record.
pub fn from_stored(stored: &[StoredDebt]) -> DebtPlannerResult<Vec<DebtRecord>> {
    stored
        .iter()
        .cloned()
        .map(DebtRecord::try_from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stored(debt_type: &str) -> StoredDebt {
        StoredDebt {
            id: "d1".into(),
            debt_type: debt_type.into(),
            name: "Debt".into(),
            balance: dec!(2_500),
            interest_rate: dec!(6.5),
            monthly_payment: dec!(150),
            term_years: None,
        }
    }

    #[test]
    fn test_simple_types_convert() {
        for name in ["credit_card", "personal_loan", "car_loan", "student_loan"] {
            let debt = DebtRecord::try_from(stored(name)).unwrap();
            assert_eq!(debt.kind().as_str(), name);
            assert_eq!(debt.outstanding(), dec!(2_500));
        }
    }

    #[test]
    fn test_mortgage_requires_term() {
        let err = DebtRecord::try_from(stored("mortgage")).unwrap_err();
        match err {
            DebtPlannerError::InvalidInput { field, .. } => assert_eq!(field, "termYears"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mortgage_maps_payment_to_custom() {
        let mut record = stored("mortgage");
        record.term_years = Some(dec!(15));
        match DebtRecord::try_from(record).unwrap() {
            DebtRecord::Mortgage(m) => {
                assert_eq!(m.principal, dec!(2_500));
                assert_eq!(m.custom_monthly_payment, Some(dec!(150)));
            }
            other => panic!("expected mortgage, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = DebtRecord::try_from(stored("payday")).unwrap_err();
        assert!(matches!(err, DebtPlannerError::UnknownDebtType(t) if t == "payday"));
    }

    #[test]
    fn test_from_stored_reads_persisted_json() {
        let json = r#"[
            {"id": "a", "type": "credit_card", "name": "Visa", "balance": 1200,
             "interestRate": 22.9, "monthlyPayment": 60},
            {"id": "b", "type": "mortgage", "name": "Home", "balance": 180000,
             "interestRate": 5, "monthlyPayment": 0, "termYears": 30}
        ]"#;
        let records: Vec<StoredDebt> = serde_json::from_str(json).unwrap();
        let debts = from_stored(&records).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[1].kind(), DebtKind::Mortgage);
        match &debts[1] {
            DebtRecord::Mortgage(m) => assert_eq!(m.custom_monthly_payment, None),
            other => panic!("expected mortgage, got {other:?}"),
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Payoff, Rate};
use crate::time_value;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A revolving or installment debt where the borrower chooses the payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleDebt {
    pub id: String,
    pub name: String,
    pub balance: Money,
    /// APR in percent (19.9 = 19.9%).
    pub interest_rate: Decimal,
    pub monthly_payment: Money,
}

/// A fixed-rate mortgage that runs its contractual term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageDebt {
    pub id: String,
    pub name: String,
    pub principal: Money,
    /// APR in percent.
    pub interest_rate: Decimal,
    pub term_years: Decimal,
    /// Overrides the annuity payment when positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_monthly_payment: Option<Money>,
}

/// One debt as entered by the user, tagged by `debtType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "debtType", rename_all = "snake_case")]
pub enum DebtRecord {
    CreditCard(SimpleDebt),
    PersonalLoan(SimpleDebt),
    CarLoan(SimpleDebt),
    StudentLoan(SimpleDebt),
    Mortgage(MortgageDebt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    CreditCard,
    PersonalLoan,
    CarLoan,
    StudentLoan,
    Mortgage,
}

/// Which payoff formula a debt kind uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentStyle {
    /// Interest accrues on the remaining balance; the payment is fixed.
    Revolving,
    /// Caller supplies the payment; the term is solved for.
    Installment,
    /// Level payment over a contractual term.
    Amortizing,
}

impl DebtKind {
    pub const ALL: [DebtKind; 5] = [
        DebtKind::CreditCard,
        DebtKind::PersonalLoan,
        DebtKind::CarLoan,
        DebtKind::StudentLoan,
        DebtKind::Mortgage,
    ];

    pub fn repayment_style(self) -> RepaymentStyle {
        match self {
            DebtKind::CreditCard => RepaymentStyle::Revolving,
            DebtKind::PersonalLoan | DebtKind::CarLoan | DebtKind::StudentLoan => {
                RepaymentStyle::Installment
            }
            DebtKind::Mortgage => RepaymentStyle::Amortizing,
        }
    }

    /// The persisted `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            DebtKind::CreditCard => "credit_card",
            DebtKind::PersonalLoan => "personal_loan",
            DebtKind::CarLoan => "car_loan",
            DebtKind::StudentLoan => "student_loan",
            DebtKind::Mortgage => "mortgage",
        }
    }

    pub fn parse(s: &str) -> Option<DebtKind> {
        DebtKind::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for DebtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Constructors and accessors
// ---------------------------------------------------------------------------

impl SimpleDebt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: Money,
        interest_rate: Decimal,
        monthly_payment: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            interest_rate,
            monthly_payment,
        }
    }

    fn sanitized(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            balance: clamp(self.balance),
            interest_rate: clamp(self.interest_rate),
            monthly_payment: clamp(self.monthly_payment),
        }
    }
}

impl MortgageDebt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        principal: Money,
        interest_rate: Decimal,
        term_years: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            principal,
            interest_rate,
            term_years,
            custom_monthly_payment: None,
        }
    }

    pub fn with_custom_payment(mut self, payment: Money) -> Self {
        self.custom_monthly_payment = Some(payment);
        self
    }

    /// Whole months in the contractual term. `Never` when the term is too long
    /// to count in months.
    pub fn term_months(&self) -> Payoff<u32> {
        use rust_decimal::prelude::ToPrimitive;
        match clamp(self.term_years)
            .checked_mul(Decimal::from(12))
            .and_then(|months| months.round().to_u32())
        {
            Some(n) => Payoff::Finite(n),
            None => Payoff::Never,
        }
    }

    fn sanitized(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            principal: clamp(self.principal),
            interest_rate: clamp(self.interest_rate),
            term_years: clamp(self.term_years),
            custom_monthly_payment: self
                .custom_monthly_payment
                .filter(|p| *p > Decimal::ZERO),
        }
    }
}

impl DebtRecord {
    pub fn kind(&self) -> DebtKind {
        match self {
            DebtRecord::CreditCard(_) => DebtKind::CreditCard,
            DebtRecord::PersonalLoan(_) => DebtKind::PersonalLoan,
            DebtRecord::CarLoan(_) => DebtKind::CarLoan,
            DebtRecord::StudentLoan(_) => DebtKind::StudentLoan,
            DebtRecord::Mortgage(_) => DebtKind::Mortgage,
        }
    }

    /// Build a simple debt of the given kind. Returns `None` for mortgages,
    /// which need a term rather than a payment.
    pub fn simple(kind: DebtKind, debt: SimpleDebt) -> Option<DebtRecord> {
        match kind {
            DebtKind::CreditCard => Some(DebtRecord::CreditCard(debt)),
            DebtKind::PersonalLoan => Some(DebtRecord::PersonalLoan(debt)),
            DebtKind::CarLoan => Some(DebtRecord::CarLoan(debt)),
            DebtKind::StudentLoan => Some(DebtRecord::StudentLoan(debt)),
            DebtKind::Mortgage => None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            DebtRecord::Mortgage(m) => &m.id,
            DebtRecord::CreditCard(d)
            | DebtRecord::PersonalLoan(d)
            | DebtRecord::CarLoan(d)
            | DebtRecord::StudentLoan(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DebtRecord::Mortgage(m) => &m.name,
            DebtRecord::CreditCard(d)
            | DebtRecord::PersonalLoan(d)
            | DebtRecord::CarLoan(d)
            | DebtRecord::StudentLoan(d) => &d.name,
        }
    }

    /// Outstanding balance, or principal for a mortgage.
    pub fn outstanding(&self) -> Money {
        match self {
            DebtRecord::Mortgage(m) => m.principal,
            DebtRecord::CreditCard(d)
            | DebtRecord::PersonalLoan(d)
            | DebtRecord::CarLoan(d)
            | DebtRecord::StudentLoan(d) => d.balance,
        }
    }

    /// APR in percent.
    pub fn interest_rate(&self) -> Decimal {
        match self {
            DebtRecord::Mortgage(m) => m.interest_rate,
            DebtRecord::CreditCard(d)
            | DebtRecord::PersonalLoan(d)
            | DebtRecord::CarLoan(d)
            | DebtRecord::StudentLoan(d) => d.interest_rate,
        }
    }

    pub fn monthly_rate(&self) -> Rate {
        time_value::monthly_rate(self.interest_rate())
    }
}

// ---------------------------------------------------------------------------
// Sanitizing
// ---------------------------------------------------------------------------

fn clamp(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp every negative numeric field to zero.
///
/// Invalid input is never rejected: a negative balance is treated as paid
/// off, a negative rate as interest free, and a non-positive custom mortgage
/// payment as absent.
pub fn sanitize(debt: &DebtRecord) -> DebtRecord {
    match debt {
        DebtRecord::CreditCard(d) => DebtRecord::CreditCard(d.sanitized()),
        DebtRecord::PersonalLoan(d) => DebtRecord::PersonalLoan(d.sanitized()),
        DebtRecord::CarLoan(d) => DebtRecord::CarLoan(d.sanitized()),
        DebtRecord::StudentLoan(d) => DebtRecord::StudentLoan(d.sanitized()),
        DebtRecord::Mortgage(m) => DebtRecord::Mortgage(m.sanitized()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sanitize_clamps_negatives() {
        let debt = DebtRecord::CarLoan(SimpleDebt::new(
            "c1",
            "Car",
            dec!(-500),
            dec!(-3),
            dec!(-20),
        ));
        let clean = sanitize(&debt);
        assert_eq!(clean.outstanding(), Decimal::ZERO);
        assert_eq!(clean.interest_rate(), Decimal::ZERO);
        match clean {
            DebtRecord::CarLoan(d) => assert_eq!(d.monthly_payment, Decimal::ZERO),
            other => panic!("kind changed: {other:?}"),
        }
    }

    #[test]
    fn test_sanitize_drops_non_positive_custom_payment() {
        let debt = DebtRecord::Mortgage(
            MortgageDebt::new("m1", "Home", dec!(100_000), dec!(5), dec!(-30))
                .with_custom_payment(dec!(-1)),
        );
        match sanitize(&debt) {
            DebtRecord::Mortgage(m) => {
                assert_eq!(m.term_years, Decimal::ZERO);
                assert_eq!(m.custom_monthly_payment, None);
            }
            other => panic!("kind changed: {other:?}"),
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let debt = DebtRecord::CreditCard(SimpleDebt::new(
            "cc",
            "Visa",
            dec!(-1),
            dec!(19.9),
            dec!(40),
        ));
        let once = sanitize(&debt);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_repayment_styles() {
        assert_eq!(DebtKind::CreditCard.repayment_style(), RepaymentStyle::Revolving);
        assert_eq!(DebtKind::StudentLoan.repayment_style(), RepaymentStyle::Installment);
        assert_eq!(DebtKind::Mortgage.repayment_style(), RepaymentStyle::Amortizing);
    }

    #[test]
    fn test_kind_string_round_trip() {
        for kind in DebtKind::ALL {
            assert_eq!(DebtKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(DebtKind::parse("payday_loan"), None);
    }

    #[test]
    fn test_deserialize_tagged_record() {
        let json = r#"{
            "debtType": "credit_card",
            "id": "1",
            "name": "Visa",
            "balance": 1000,
            "interestRate": 20,
            "monthlyPayment": 50
        }"#;
        let debt: DebtRecord = serde_json::from_str(json).unwrap();
        assert_eq!(debt.kind(), DebtKind::CreditCard);
        assert_eq!(debt.outstanding(), dec!(1000));
    }

    #[test]
    fn test_deserialize_mortgage_without_custom_payment() {
        let json = r#"{
            "debtType": "mortgage",
            "id": "m",
            "name": "Home",
            "principal": 200000,
            "interestRate": 4.8,
            "termYears": 25
        }"#;
        let debt: DebtRecord = serde_json::from_str(json).unwrap();
        match debt {
            DebtRecord::Mortgage(m) => {
                assert_eq!(m.term_months(), Payoff::Finite(300));
                assert_eq!(m.custom_monthly_payment, None);
            }
            other => panic!("expected mortgage, got {other:?}"),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DebtPlannerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown debt type: {0}")]
    UnknownDebtType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DebtPlannerError {
    fn from(e: serde_json::Error) -> Self {
        DebtPlannerError::SerializationError(e.to_string())
    }
}

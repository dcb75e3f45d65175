use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;

use debt_planner_core::DebtPlannerError;

use crate::OutputFormat;

/// Defaults loaded from `--config <file.yaml>`.
///
/// Each value only fills a gap: flags beat the input JSON, and the input JSON
/// beats the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub output: Option<OutputFormat>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub monthly_leftover: Option<Decimal>,
    #[serde(default)]
    pub average_extra_payment: Option<Decimal>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl CliConfig {
    pub fn load(path: Option<&str>) -> Result<CliConfig, DebtPlannerError> {
        let Some(path) = path else {
            return Ok(CliConfig::default());
        };
        let contents = fs::read_to_string(path)
            .map_err(|e| DebtPlannerError::Config(format!("failed to read '{path}': {e}")))?;
        let config = Self::parse(&contents)
            .map_err(|e| DebtPlannerError::Config(format!("failed to parse '{path}': {e}")))?;
        log::info!("loaded config from {path}");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<CliConfig, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(CliConfig::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Insert portfolio defaults into a JSON input object where the key is
    /// missing.
    pub fn fill_portfolio_defaults(&self, input: &mut Value) {
        let Value::Object(map) = input else {
            return;
        };
        insert_missing(map, "monthlyLeftover", self.monthly_leftover.map(decimal_value));
        insert_missing(map, "averageExtraPayment", self.average_extra_payment.map(decimal_value));
        insert_missing(map, "asOf", self.as_of.map(|d| Value::String(d.to_string())));
        insert_missing(map, "currency", self.currency.clone().map(Value::String));
    }
}

/// Overwrite a key unconditionally when a flag was given.
pub fn override_key(input: &mut Value, key: &str, value: Option<Value>) {
    if let (Value::Object(map), Some(value)) = (input, value) {
        map.insert(key.to_string(), value);
    }
}

pub fn decimal_value(d: Decimal) -> Value {
    Value::String(d.to_string())
}

fn insert_missing(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.entry(key.to_string()).or_insert(value);
    }
}

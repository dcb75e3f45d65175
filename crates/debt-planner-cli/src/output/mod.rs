pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => log::error!("JSON serialization error: {e}"),
    }
}

/// A serialized `Payoff::Finite(x)` is `{"finite": x}`.
fn as_payoff(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) if map.len() == 1 => map.get("finite"),
        _ => None,
    }
}

/// Render a leaf for people: payoff wrappers are unwrapped and `never`
/// stays as the word.
pub fn display_value(value: &Value) -> String {
    if let Some(inner) = as_payoff(value) {
        return display_value(inner);
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(display_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into dotted keys. Payoff values and arrays are
/// kept as leaves.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    if let Value::Object(map) = value {
        flatten_into(map, "", &mut rows);
    }
    rows
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) if as_payoff(val).is_none() => flatten_into(inner, &path, rows),
            _ => rows.push((path, val.clone())),
        }
    }
}

/// Unwrap the `ComputationOutput` envelope when present.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .filter(|m| m.contains_key("metadata"))
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

use serde_json::Value;

use super::{display_value, flatten, result_of};

/// Headline fields, most specific first.
const PRIORITY_PATHS: [&str; 5] = [
    "interestSaved",
    "currentPace.weeksRemaining",
    "projection.currentPace.weeksRemaining",
    "interestSavings.interestSaved",
    "monthsToPayoff",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{line}");
    }
}

pub fn minimal_lines(value: &Value) -> Vec<String> {
    let result = result_of(value);

    // One line per computed debt: `name: months`.
    if let Value::Array(rows) = result {
        return rows
            .iter()
            .map(|row| {
                let name = row
                    .pointer("/debt/name")
                    .map(display_value)
                    .unwrap_or_default();
                let months = row
                    .get("monthsToPayoff")
                    .map(display_value)
                    .unwrap_or_default();
                format!("{name}: {months}")
            })
            .collect();
    }

    let flat = flatten(result);
    for path in PRIORITY_PATHS {
        if let Some((_, val)) = flat.iter().find(|(k, v)| k == path && !v.is_null()) {
            return vec![display_value(val)];
        }
    }

    match flat.first() {
        Some((key, val)) => vec![format!("{key}: {}", display_value(val))],
        None => vec![display_value(result)],
    }
}

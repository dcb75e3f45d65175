use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{display_value, flatten, result_of};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    let mut sections: Vec<String> = Vec::new();

    match result_of(value) {
        Value::Array(rows) => sections.push(rows_table(rows)),
        Value::Object(map) => {
            let mut fields = Builder::default();
            fields.push_record(["Field", "Value"]);
            let mut has_fields = false;

            for (key, val) in map {
                match val {
                    Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                        sections.push(format!("{key}:\n{}", rows_table(rows)));
                    }
                    _ => {
                        let mut single = serde_json::Map::new();
                        single.insert(key.clone(), val.clone());
                        for (path, leaf) in flatten(&Value::Object(single)) {
                            fields.push_record([path, display_value(&leaf)]);
                            has_fields = true;
                        }
                    }
                }
            }
            if has_fields {
                sections.insert(0, Table::from(fields).to_string());
            }
        }
        other => sections.push(display_value(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            let lines: String = warnings
                .iter()
                .map(|w| format!("\n  - {}", display_value(w)))
                .collect();
            sections.push(format!("Warnings:{lines}"));
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        sections.push(format!("Methodology: {meth}"));
    }

    sections.join("\n\n")
}

/// One row per element, columns from the union of flattened keys in
/// first-seen order. Mixed debt kinds carry different fields.
fn rows_table(rows: &[Value]) -> String {
    if rows.is_empty() {
        return "(empty)".to_string();
    }

    let flat: Vec<Vec<(String, Value)>> = rows.iter().map(flatten).collect();
    let mut headers: Vec<String> = Vec::new();
    for row in &flat {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return rows.iter().map(display_value).collect::<Vec<_>>().join("\n");
    }

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| header_label(h)));
    for row in &flat {
        builder.push_record(headers.iter().map(|h| {
            row.iter()
                .find(|(k, _)| k == h)
                .map(|(_, v)| display_value(v))
                .unwrap_or_default()
        }));
    }
    Table::from(builder).to_string()
}

/// Drop the `debt.` prefix that every computed debt row shares.
fn header_label(path: &str) -> String {
    path.strip_prefix("debt.").unwrap_or(path).to_string()
}

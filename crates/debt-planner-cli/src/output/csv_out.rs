use serde_json::Value;
use std::io::{self, Write};

use super::{display_value, flatten, result_of};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(value, stdout.lock()) {
        log::error!("CSV output failed: {e}");
    }
}

/// Arrays become one row per element with flattened columns; objects become
/// two-column `field,value` rows.
pub fn write_csv<W: Write>(value: &Value, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    match result_of(value) {
        Value::Array(rows) => {
            let flat: Vec<Vec<(String, Value)>> = rows.iter().map(flatten).collect();
            let mut headers: Vec<String> = Vec::new();
            for row in &flat {
                for (key, _) in row {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            if !headers.is_empty() {
                wtr.write_record(&headers)?;
            }
            for row in &flat {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        row.iter()
                            .find(|(k, _)| k == h)
                            .map(|(_, v)| display_value(v))
                            .unwrap_or_default()
                    })
                    .collect();
                wtr.write_record(&record)?;
            }
        }
        other @ Value::Object(_) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in flatten(other) {
                let cell = match &val {
                    // Nested row sets are kept as JSON in a single cell.
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        serde_json::to_string(&val).unwrap_or_default()
                    }
                    _ => display_value(&val),
                };
                wtr.write_record([key, cell])?;
            }
        }
        other => wtr.write_record([display_value(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

use serde_json::Value;

use super::format_cell;

/// Print just the key answer value from the output.
///
/// Looks for the verdict or headline statistic first, then falls back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["lead_digit", "conforms", "p_value", "chi_square"];

    if let Value::Object(map) = result_obj {
        if let Some(val) = priority_keys
            .iter()
            .filter_map(|k| map.get(*k))
            .find(|v| !v.is_null())
        {
            println!("{}", format_cell(val));
            return;
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_cell(val));
            return;
        }
    }

    // Row listings such as the PDF print one line per row.
    if let Value::Array(rows) = result_obj {
        for row in rows {
            println!("{}", format_cell(row));
        }
        return;
    }

    println!("{}", format_cell(result_obj));
}

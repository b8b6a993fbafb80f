use chrono::{DateTime, Utc};
use serde_json::Value;

/// Microseconds between the Unix epoch and `instant`.
pub fn datetime_to_microseconds(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp_micros()
}

/// Current Unix time in milliseconds, as a decimal string.
pub fn current_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Boolean rendering the server expects in query strings.
pub fn wire_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Placeholder that stands in for a list of items in logs.
pub fn item_placeholder(count: usize, label: &str) -> String {
    format!("<{} {}>", count, label)
}

/// Reads a string field, or an empty string when absent.
pub fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Joins a JSON array of strings, skipping anything that is not a string.
pub fn join_str_array(value: Option<&Value>, separator: &str) -> String {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(separator)
        })
        .unwrap_or_default()
}

/// Shortens text for table output.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

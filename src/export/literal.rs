//! SQL literal rendering for backup values.

use crate::models::BackupValue;
use serde_json::Value;

/// The SQL null literal
pub const NULL_LITERAL: &str = "NULL";

/// Render a looked-up value as SQL literal text.
///
/// A missing field renders the same as an explicit null.
///
/// # Example
///
/// ```rust
/// use backup_seed_sdk::export::literal::format_value;
/// use backup_seed_sdk::models::BackupValue;
///
/// assert_eq!(format_value(None), "NULL");
/// assert_eq!(format_value(Some(&BackupValue::Bool(true))), "TRUE");
/// assert_eq!(format_value(Some(&BackupValue::text("O'Brien"))), "'O''Brien'");
/// ```
pub fn format_value(value: Option<&BackupValue>) -> String {
    match value {
        None => NULL_LITERAL.to_string(),
        Some(v) => to_sql_literal(v),
    }
}

/// Render a value as SQL literal text.
pub fn to_sql_literal(value: &BackupValue) -> String {
    match value {
        BackupValue::Null => NULL_LITERAL.to_string(),
        BackupValue::Bool(true) => "TRUE".to_string(),
        BackupValue::Bool(false) => "FALSE".to_string(),
        BackupValue::Number(n) => n.to_string(),
        BackupValue::Text(s) if s.is_empty() => NULL_LITERAL.to_string(),
        BackupValue::Text(s) => quote(s),
        BackupValue::Json(v) if is_empty_composite(v) => NULL_LITERAL.to_string(),
        BackupValue::Json(v) => quote(&v.to_string()),
    }
}

/// Wrap text in single quotes, doubling any embedded single quote.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn is_empty_composite(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

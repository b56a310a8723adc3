//! Backup values and records
//!
//! Every JSON value read from a backup file is tagged once, at ingestion time,
//! as one of the [`BackupValue`] variants. Formatting and rule evaluation then
//! match over this closed set instead of probing the raw JSON repeatedly.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// A loosely-typed backup value, tagged at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum BackupValue {
    /// Explicit JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number (integer or real), kept in its original textual form
    Number(Number),
    /// JSON string
    Text(String),
    /// JSON array or object, stored for a JSON/text column
    Json(Value),
}

impl BackupValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        BackupValue::Text(value.into())
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BackupValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Null`, empty text and an empty array or object.
    ///
    /// Blank values are rendered as `NULL` and fail required-field checks.
    /// `false` and `0` are values, not blanks.
    pub fn is_blank(&self) -> bool {
        match self {
            BackupValue::Null => true,
            BackupValue::Text(s) => s.is_empty(),
            BackupValue::Json(Value::Array(items)) => items.is_empty(),
            BackupValue::Json(Value::Object(fields)) => fields.is_empty(),
            _ => false,
        }
    }

    /// Short type label used in log events and report entries.
    pub fn kind(&self) -> &'static str {
        match self {
            BackupValue::Null => "null",
            BackupValue::Bool(_) => "boolean",
            BackupValue::Number(_) => "number",
            BackupValue::Text(_) => "text",
            BackupValue::Json(_) => "json",
        }
    }
}

impl From<Value> for BackupValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => BackupValue::Null,
            Value::Bool(b) => BackupValue::Bool(b),
            Value::Number(n) => BackupValue::Number(n),
            Value::String(s) => BackupValue::Text(s),
            composite @ (Value::Array(_) | Value::Object(_)) => BackupValue::Json(composite),
        }
    }
}

impl From<BackupValue> for Value {
    fn from(value: BackupValue) -> Self {
        match value {
            BackupValue::Null => Value::Null,
            BackupValue::Bool(b) => Value::Bool(b),
            BackupValue::Number(n) => Value::Number(n),
            BackupValue::Text(s) => Value::String(s),
            BackupValue::Json(v) => v,
        }
    }
}

impl std::fmt::Display for BackupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupValue::Null => write!(f, "null"),
            BackupValue::Bool(b) => write!(f, "{}", b),
            BackupValue::Number(n) => write!(f, "{}", n),
            BackupValue::Text(s) => write!(f, "{}", s),
            BackupValue::Json(v) => write!(f, "{}", v),
        }
    }
}

/// One exported row: source field name to value.
///
/// Records are read once and never mutated. A field that is not present at
/// all is *missing*, which is distinct from a field holding an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackupRecord {
    fields: HashMap<String, BackupValue>,
}

impl BackupRecord {
    /// Build a record from `(field, value)` pairs.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, BackupValue)>,
        K: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a source field. `None` means the field is missing.
    pub fn get(&self, field: &str) -> Option<&BackupValue> {
        self.fields.get(field)
    }

    /// Whether the source field is present (even if null).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for BackupRecord {
    type Error = Value;

    /// Converts a JSON object into a record; any other JSON shape is returned as the error.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, BackupValue::from(v)))
                    .collect(),
            }),
            other => Err(other),
        }
    }
}

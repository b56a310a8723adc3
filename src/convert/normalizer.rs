//! Row normalization
//!
//! One engine evaluates the declarative [`ColumnRule`]s of a table against a
//! backup record. The outcome is either a complete [`NormalizedRow`] or a
//! [`RowValidationError`] that drops the record; there are no partial rows.
//!
//! Defaulting and enum fallbacks keep the row and are recorded as
//! [`Substitution`]s, so a corrected value is never confused with a dropped
//! record.

use super::mapper::SchemaMapper;
use crate::export::literal::format_value;
use crate::models::{BackupRecord, BackupValue, ColumnRule, ColumnSpec, TableSpec};
use crate::validation::RowValidationError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// How a column value was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionKind {
    /// The field was missing (or blank) and a default was used
    Defaulted,
    /// The value was outside its enum domain and the fallback was used
    EnumFallback,
}

/// A value replaced during normalization. The row is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub column: String,
    pub kind: SubstitutionKind,
    /// Original value, if one was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    pub replacement: String,
}

/// Rendered SQL literals in table column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Zero-based index of the source record
    pub source_index: usize,
    pub values: Vec<String>,
    pub substitutions: Vec<Substitution>,
}

impl NormalizedRow {
    /// The row as it appears in a `VALUES` list, without terminator.
    pub fn to_tuple(&self) -> String {
        format!("({})", self.values.join(", "))
    }
}

/// Applies a table's column rules to backup records.
#[derive(Debug, Clone, Copy)]
pub struct RowNormalizer<'a> {
    table: &'a TableSpec,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(table: &'a TableSpec) -> Self {
        Self { table }
    }

    /// Normalize one record.
    ///
    /// # Example
    ///
    /// ```rust
    /// use backup_seed_sdk::convert::normalizer::RowNormalizer;
    /// use backup_seed_sdk::models::{BackupRecord, BackupValue, SeedSchema};
    ///
    /// let schema = SeedSchema::standard();
    /// let songs = schema.table("songs").unwrap();
    /// let record = BackupRecord::from_pairs([("title", BackupValue::text("Wonderwall"))]);
    ///
    /// let row = RowNormalizer::new(songs).normalize(0, &record).unwrap();
    /// assert_eq!(row.values[0], "'Wonderwall'");
    /// assert_eq!(row.values[1], "'Unknown'");
    /// ```
    pub fn normalize(
        &self,
        index: usize,
        record: &BackupRecord,
    ) -> Result<NormalizedRow, RowValidationError> {
        let mut values = Vec::with_capacity(self.table.columns.len());
        let mut substitutions = Vec::new();

        for column in &self.table.columns {
            let found = SchemaMapper::lookup(column, record);
            let resolved = self.apply_rule(index, column, found, &mut substitutions)?;
            values.push(format_value(resolved.as_deref()));
        }

        for s in &substitutions {
            debug!(
                table = self.table.name,
                row = index,
                column = %s.column,
                replacement = %s.replacement,
                "substituted value"
            );
        }

        Ok(NormalizedRow {
            source_index: index,
            values,
            substitutions,
        })
    }

    fn apply_rule<'r>(
        &self,
        index: usize,
        column: &ColumnSpec,
        found: Option<&'r BackupValue>,
        substitutions: &mut Vec<Substitution>,
    ) -> Result<Option<Cow<'r, BackupValue>>, RowValidationError> {
        let resolved = match &column.rule {
            ColumnRule::Identity => found.map(Cow::Borrowed),
            ColumnRule::Required => match found {
                Some(v) if !v.is_blank() => Some(Cow::Borrowed(v)),
                _ => {
                    return Err(RowValidationError::missing_required(
                        self.table.name,
                        column.name,
                        index,
                    ));
                }
            },
            ColumnRule::DefaultIfMissing(default) => match found {
                Some(v) => Some(Cow::Borrowed(v)),
                None => {
                    substitutions.push(substitution(column, SubstitutionKind::Defaulted, None, default));
                    Some(Cow::Owned(default.clone()))
                }
            },
            ColumnRule::DefaultIfBlank(default) => match found {
                Some(v) if !v.is_blank() => Some(Cow::Borrowed(v)),
                _ => {
                    let default = BackupValue::text(*default);
                    substitutions.push(substitution(column, SubstitutionKind::Defaulted, found, &default));
                    Some(Cow::Owned(default))
                }
            },
            ColumnRule::Enum { domain, fold_case } => {
                let candidate = found.and_then(BackupValue::as_text).map(|text| {
                    if *fold_case {
                        Cow::Owned(text.to_lowercase())
                    } else {
                        Cow::Borrowed(text)
                    }
                });
                match candidate {
                    Some(text) if domain.contains(&text) => {
                        Some(Cow::Owned(BackupValue::text(text.into_owned())))
                    }
                    _ => {
                        let fallback = BackupValue::text(domain.fallback);
                        let kind = match found {
                            Some(v) if !v.is_blank() => SubstitutionKind::EnumFallback,
                            _ => SubstitutionKind::Defaulted,
                        };
                        substitutions.push(substitution(column, kind, found, &fallback));
                        Some(Cow::Owned(fallback))
                    }
                }
            }
            ColumnRule::NullIfMissing => found.filter(|v| !v.is_blank()).map(Cow::Borrowed),
        };
        Ok(resolved)
    }
}

fn substitution(
    column: &ColumnSpec,
    kind: SubstitutionKind,
    original: Option<&BackupValue>,
    replacement: &BackupValue,
) -> Substitution {
    Substitution {
        column: column.name.to_string(),
        kind,
        original: original.map(|v| v.to_string()),
        replacement: replacement.to_string(),
    }
}

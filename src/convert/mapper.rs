//! Canonical column to source field resolution.

use crate::models::{BackupRecord, BackupValue, ColumnSpec, TableSpec};

/// Resolves canonical columns of one table against backup records.
#[derive(Debug, Clone, Copy)]
pub struct SchemaMapper<'a> {
    table: &'a TableSpec,
}

impl<'a> SchemaMapper<'a> {
    pub fn new(table: &'a TableSpec) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TableSpec {
        self.table
    }

    /// Source field names tried for a column, in priority order.
    ///
    /// A renamed column is read from its source name first and from the
    /// canonical name second, so backups exported with either casing work.
    pub fn source_names(column: &ColumnSpec) -> impl Iterator<Item = &'static str> {
        column
            .source
            .into_iter()
            .chain(std::iter::once(column.name))
    }

    /// Look up a column in a record.
    ///
    /// Returns `None` when no candidate field is present (the field is
    /// missing), and `Some(BackupValue::Null)` for an explicit null.
    ///
    /// Columns with `skip_blank_sources` take the first non-blank candidate and
    /// only fall back to a blank one when every candidate is blank.
    pub fn lookup<'r>(column: &ColumnSpec, record: &'r BackupRecord) -> Option<&'r BackupValue> {
        let mut present = Self::source_names(column).filter_map(|name| record.get(name));
        if !column.skip_blank_sources {
            return present.next();
        }
        let first = present.next()?;
        if !first.is_blank() {
            return Some(first);
        }
        Some(present.find(|v| !v.is_blank()).unwrap_or(first))
    }

    /// Look up a column by canonical name.
    pub fn lookup_column<'r>(&self, name: &str, record: &'r BackupRecord) -> Option<&'r BackupValue> {
        self.table
            .column(name)
            .and_then(|column| Self::lookup(column, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeedSchema;
    use serde_json::json;

    fn record(v: serde_json::Value) -> BackupRecord {
        BackupRecord::try_from(v).unwrap()
    }

    #[test]
    fn renamed_columns_prefer_source_name() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("profiles").unwrap());
        let r = record(json!({"firstName": "Ann", "firstname": "ann"}));
        assert_eq!(
            mapper.lookup_column("firstname", &r),
            Some(&BackupValue::text("Ann"))
        );
    }

    #[test]
    fn renamed_columns_fall_back_to_canonical_name() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("profiles").unwrap());
        let r = record(json!({"lastname": "Lee", "isadmin": true}));
        assert_eq!(mapper.lookup_column("lastname", &r), Some(&BackupValue::text("Lee")));
        assert_eq!(mapper.lookup_column("isadmin", &r), Some(&BackupValue::Bool(true)));
    }

    #[test]
    fn blank_camel_case_names_fall_through() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("profiles").unwrap());
        let r = record(json!({
            "firstName": null,
            "firstname": "Ann",
            "lastName": "",
            "lastname": "Lee"
        }));
        assert_eq!(mapper.lookup_column("firstname", &r), Some(&BackupValue::text("Ann")));
        assert_eq!(mapper.lookup_column("lastname", &r), Some(&BackupValue::text("Lee")));

        let all_blank = record(json!({"firstName": "", "firstname": null}));
        assert_eq!(
            mapper.lookup_column("firstname", &all_blank),
            Some(&BackupValue::text(""))
        );
    }

    #[test]
    fn flags_keep_first_present_name() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("profiles").unwrap());
        let r = record(json!({"isAdmin": null, "isadmin": true}));
        assert_eq!(mapper.lookup_column("isadmin", &r), Some(&BackupValue::Null));
    }

    #[test]
    fn cross_table_rename_for_learning_status() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("lesson_songs").unwrap());
        let r = record(json!({"song_status": "started"}));
        assert_eq!(
            mapper.lookup_column("learning_status", &r),
            Some(&BackupValue::text("started"))
        );
    }

    #[test]
    fn missing_is_distinct_from_null() {
        let schema = SeedSchema::standard();
        let mapper = SchemaMapper::new(schema.table("songs").unwrap());
        let r = record(json!({"author": null}));
        assert_eq!(mapper.lookup_column("author", &r), Some(&BackupValue::Null));
        assert_eq!(mapper.lookup_column("level", &r), None);
    }
}

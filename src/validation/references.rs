//! Cross-table reference checks
//!
//! Reports rows whose profile references point at a `user_id` that is not
//! present in the profiles backup. These are warnings for the migration
//! report; the rows are still emitted.

use crate::convert::mapper::SchemaMapper;
use crate::models::{BackupRecord, BackupValue, TableSpec};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A declared reference from one table column to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRule {
    pub table: &'static str,
    pub column: &'static str,
    pub target_table: &'static str,
    pub target_column: &'static str,
}

/// Profile references checked by default.
pub const PROFILE_REFERENCES: &[ReferenceRule] = &[
    ReferenceRule {
        table: "lessons",
        column: "student_id",
        target_table: "profiles",
        target_column: "user_id",
    },
    ReferenceRule {
        table: "lessons",
        column: "teacher_id",
        target_table: "profiles",
        target_column: "user_id",
    },
    ReferenceRule {
        table: "lesson_songs",
        column: "student_id",
        target_table: "profiles",
        target_column: "user_id",
    },
];

/// A reference whose target value was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    pub table: String,
    pub column: String,
    /// Zero-based index of the record in the backup file
    pub row: usize,
    pub value: String,
    pub target: String,
}

/// Collects target keys as tables are processed and checks later tables against them.
#[derive(Debug, Default)]
pub struct ReferenceChecker {
    rules: Vec<ReferenceRule>,
    known: HashMap<(&'static str, &'static str), HashSet<String>>,
}

impl ReferenceChecker {
    pub fn new(rules: &[ReferenceRule]) -> Self {
        Self {
            rules: rules.to_vec(),
            known: HashMap::new(),
        }
    }

    /// Record the target keys found in an emitted record.
    pub fn register(&mut self, table: &TableSpec, record: &BackupRecord) {
        for rule in self.rules.iter().filter(|r| r.target_table == table.name) {
            let entry = self
                .known
                .entry((rule.target_table, rule.target_column))
                .or_default();
            if let Some(key) = SchemaMapper::new(table)
                .lookup_column(rule.target_column, record)
                .and_then(reference_key)
            {
                entry.insert(key);
            }
        }
    }

    /// Check an emitted record's references.
    ///
    /// Targets that were never registered (e.g. the profiles backup is missing)
    /// are not checked, since the referenced rows may already exist.
    pub fn check(&self, table: &TableSpec, row: usize, record: &BackupRecord) -> Vec<DanglingReference> {
        let mapper = SchemaMapper::new(table);
        self.rules
            .iter()
            .filter(|r| r.table == table.name)
            .filter_map(|rule| {
                let known = self.known.get(&(rule.target_table, rule.target_column))?;
                let value = mapper.lookup_column(rule.column, record).and_then(reference_key)?;
                (!known.contains(&value)).then(|| DanglingReference {
                    table: table.name.to_string(),
                    column: rule.column.to_string(),
                    row,
                    value,
                    target: format!("{}.{}", rule.target_table, rule.target_column),
                })
            })
            .collect()
    }
}

fn reference_key(value: &BackupValue) -> Option<String> {
    match value {
        BackupValue::Text(s) if !s.is_empty() => Some(s.clone()),
        BackupValue::Number(n) => Some(n.to_string()),
        _ => None,
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
    fn reports_unknown_student() {
        let schema = SeedSchema::standard();
        let mut checker = ReferenceChecker::new(PROFILE_REFERENCES);
        checker.register(schema.table("profiles").unwrap(), &record(json!({"user_id": "t1"})));
        checker.register(schema.table("profiles").unwrap(), &record(json!({"user_id": "s1"})));

        let lessons = schema.table("lessons").unwrap();
        assert!(checker
            .check(lessons, 0, &record(json!({"student_id": "s1", "teacher_id": "t1"})))
            .is_empty());

        let dangling = checker.check(lessons, 1, &record(json!({"student_id": "s9", "teacher_id": "t1"})));
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].column, "student_id");
        assert_eq!(dangling[0].value, "s9");
        assert_eq!(dangling[0].target, "profiles.user_id");
    }

    #[test]
    fn null_references_are_not_dangling() {
        let schema = SeedSchema::standard();
        let mut checker = ReferenceChecker::new(PROFILE_REFERENCES);
        checker.register(schema.table("profiles").unwrap(), &record(json!({"user_id": "s1"})));
        let lesson_songs = schema.table("lesson_songs").unwrap();
        assert!(checker.check(lesson_songs, 0, &record(json!({"student_id": null}))).is_empty());
    }

    #[test]
    fn unregistered_target_is_not_checked() {
        let schema = SeedSchema::standard();
        let checker = ReferenceChecker::new(PROFILE_REFERENCES);
        let lessons = schema.table("lessons").unwrap();
        assert!(checker.check(lessons, 0, &record(json!({"student_id": "x"}))).is_empty());
    }
}

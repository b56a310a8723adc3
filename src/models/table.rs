//! Table descriptors for the seed schema
//!
//! A [`SeedSchema`] is an immutable configuration value: the ordered table
//! specs, the foreign-key constraint that is toggled around the run, and the
//! target schema qualifier. It is built once and passed by reference to the
//! mapper, normalizer and script assembler.

use super::enums::{EnumDomain, LEARNING_STATUS, LESSON_STATUS, SONG_KEY, SONG_LEVEL};
use super::value::BackupValue;
use serde::Serialize;

/// Default target schema for generated statements
pub const DEFAULT_TARGET_SCHEMA: &str = "public";

/// Placeholder used when a song has no Ultimate Guitar link
pub const PLACEHOLDER_LINK: &str = "https://example.com/";

/// Author used when a song has none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Normalization rule for a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRule {
    /// Pass the looked-up value through unchanged
    Identity,
    /// Use the given value when the field is missing (an explicit null is kept)
    DefaultIfMissing(BackupValue),
    /// Use the given text when the field is missing, null or empty
    DefaultIfBlank(&'static str),
    /// Validate against a domain; non-members and non-text become the fallback
    Enum {
        domain: EnumDomain,
        /// Lower-case text before checking membership
        fold_case: bool,
    },
    /// Drop the whole record when the field is missing, null or empty
    Required,
    /// Emit an explicit `NULL` when the field is missing or blank, never drop
    NullIfMissing,
}

/// A canonical output column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Canonical (lower-case, DB-facing) column name
    pub name: &'static str,
    /// Source field name when it differs from the canonical name
    pub source: Option<&'static str>,
    /// Move past a null or empty source field to the next candidate
    pub skip_blank_sources: bool,
    pub rule: ColumnRule,
}

impl ColumnSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            source: None,
            skip_blank_sources: false,
            rule: ColumnRule::Identity,
        }
    }

    /// Read this column from a differently named source field.
    pub fn renamed(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    /// Read the first candidate that holds a non-blank value.
    pub fn skipping_blank_sources(mut self) -> Self {
        self.skip_blank_sources = true;
        self
    }

    pub fn with_rule(mut self, rule: ColumnRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Static descriptor for one seeded table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: Vec<ColumnSpec>,
    /// Tables whose rows must be seeded before this one
    pub depends_on: Vec<&'static str>,
}

impl TableSpec {
    pub fn new(name: &'static str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name,
            columns,
            depends_on: Vec::new(),
        }
    }

    pub fn depends_on(mut self, tables: &[&'static str]) -> Self {
        self.depends_on = tables.to_vec();
        self
    }

    /// Canonical column names in output order.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Backup file name for this table (`<table>.json`).
    pub fn backup_file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    /// Per-table seed script file name (`seed_<table>.sql`).
    pub fn seed_file_name(&self) -> String {
        format!("seed_{}.sql", self.name)
    }
}

/// Foreign-key constraint dropped before seeding and re-added afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintToggle {
    pub table: &'static str,
    pub constraint: &'static str,
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
    pub on_delete: &'static str,
}

impl ConstraintToggle {
    /// Statement removing the constraint.
    pub fn drop_sql(&self, schema: &str) -> String {
        format!(
            "ALTER TABLE {}.{} DROP CONSTRAINT IF EXISTS {};",
            schema, self.table, self.constraint
        )
    }

    /// Statement re-adding the constraint, one clause per line.
    pub fn add_sql(&self, schema: &str) -> String {
        format!(
            "ALTER TABLE {}.{}\n  ADD CONSTRAINT {}\n  FOREIGN KEY ({})\n  REFERENCES {}({})\n  ON DELETE {};",
            schema,
            self.table,
            self.constraint,
            self.column,
            self.references_table,
            self.references_column,
            self.on_delete
        )
    }
}

/// The full, immutable description of what gets seeded and in which order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSchema {
    /// Tables in processing order
    pub tables: Vec<TableSpec>,
    pub constraint_toggle: ConstraintToggle,
    /// Schema qualifier for generated statements (e.g. `public`)
    pub target_schema: String,
}

impl SeedSchema {
    /// The five-table schema: profiles, songs, lessons, lesson_songs, task_management.
    pub fn standard() -> Self {
        Self {
            tables: vec![
                profiles_spec(),
                songs_spec(),
                lessons_spec(),
                lesson_songs_spec(),
                task_management_spec(),
            ],
            constraint_toggle: ConstraintToggle {
                table: "profiles",
                constraint: "profiles_user_id_fkey",
                column: "user_id",
                references_table: "auth.users",
                references_column: "id",
                on_delete: "CASCADE",
            },
            target_schema: DEFAULT_TARGET_SCHEMA.to_string(),
        }
    }

    pub fn with_target_schema(mut self, schema: impl Into<String>) -> Self {
        self.target_schema = schema.into();
        self
    }

    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|t| t.name).collect()
    }

    /// Schema-qualified table name used in statements.
    pub fn qualified(&self, table: &str) -> String {
        format!("{}.{}", self.target_schema, table)
    }
}

impl Default for SeedSchema {
    fn default() -> Self {
        Self::standard()
    }
}

fn timestamps() -> [ColumnSpec; 2] {
    [ColumnSpec::new("created_at"), ColumnSpec::new("updated_at")]
}

fn flag(name: &'static str, source: &'static str, default: bool) -> ColumnSpec {
    ColumnSpec::new(name)
        .renamed(source)
        .with_rule(ColumnRule::DefaultIfMissing(BackupValue::Bool(default)))
}

fn profiles_spec() -> TableSpec {
    let mut columns = vec![
        ColumnSpec::new("user_id"),
        ColumnSpec::new("username"),
        ColumnSpec::new("email"),
        ColumnSpec::new("firstname")
            .renamed("firstName")
            .skipping_blank_sources(),
        ColumnSpec::new("lastname")
            .renamed("lastName")
            .skipping_blank_sources(),
        ColumnSpec::new("bio"),
        flag("isadmin", "isAdmin", false),
        flag("isteacher", "isTeacher", false),
        flag("isstudent", "isStudent", true),
        flag("isactive", "isActive", true),
        flag("istest", "isTest", false),
    ];
    columns.extend(timestamps());
    TableSpec::new("profiles", columns)
}

fn songs_spec() -> TableSpec {
    let mut columns = vec![
        ColumnSpec::new("title").with_rule(ColumnRule::Required),
        ColumnSpec::new("author").with_rule(ColumnRule::DefaultIfBlank(UNKNOWN_AUTHOR)),
        ColumnSpec::new("level").with_rule(ColumnRule::Enum {
            domain: SONG_LEVEL,
            fold_case: false,
        }),
        ColumnSpec::new("key").with_rule(ColumnRule::Enum {
            domain: SONG_KEY,
            fold_case: false,
        }),
        ColumnSpec::new("chords"),
        ColumnSpec::new("audio_files"),
        ColumnSpec::new("ultimate_guitar_link")
            .with_rule(ColumnRule::DefaultIfBlank(PLACEHOLDER_LINK)),
        ColumnSpec::new("short_title"),
    ];
    columns.extend(timestamps());
    TableSpec::new("songs", columns)
}

fn lessons_spec() -> TableSpec {
    let mut columns = vec![
        ColumnSpec::new("student_id"),
        ColumnSpec::new("teacher_id"),
        ColumnSpec::new("date"),
        ColumnSpec::new("status").with_rule(ColumnRule::Enum {
            domain: LESSON_STATUS,
            fold_case: true,
        }),
    ];
    columns.extend(timestamps());
    TableSpec::new("lessons", columns).depends_on(&["profiles", "songs"])
}

fn lesson_songs_spec() -> TableSpec {
    let mut columns = vec![
        ColumnSpec::new("lesson_id"),
        ColumnSpec::new("song_id"),
        ColumnSpec::new("student_id").with_rule(ColumnRule::NullIfMissing),
        ColumnSpec::new("learning_status")
            .renamed("song_status")
            .with_rule(ColumnRule::Enum {
                domain: LEARNING_STATUS,
                fold_case: true,
            }),
    ];
    columns.extend(timestamps());
    TableSpec::new("lesson_songs", columns).depends_on(&["lessons", "songs", "profiles"])
}

fn task_management_spec() -> TableSpec {
    let mut columns = vec![
        ColumnSpec::new("user_id"),
        ColumnSpec::new("title"),
        ColumnSpec::new("description"),
        ColumnSpec::new("status"),
        ColumnSpec::new("priority"),
        ColumnSpec::new("due_date"),
        ColumnSpec::new("created_by_user_id"),
        ColumnSpec::new("assigned_to_user_id"),
    ];
    columns.extend(timestamps());
    TableSpec::new("task_management", columns).depends_on(&["profiles"])
}

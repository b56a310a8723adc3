//! Models module for the SDK
//!
//! Defines the backup value model, the enum domains and the static table
//! descriptors that drive the migration.

pub mod enums;
pub mod table;
pub mod value;

pub use enums::{EnumDomain, LEARNING_STATUS, LESSON_STATUS, SONG_KEY, SONG_LEVEL};
pub use table::{ColumnRule, ColumnSpec, ConstraintToggle, SeedSchema, TableSpec};
pub use value::{BackupRecord, BackupValue};

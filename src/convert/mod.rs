//! Backup-to-row conversion
//!
//! Maps backup field names onto canonical columns and applies each column's
//! normalization rule.

pub mod mapper;
pub mod normalizer;

pub use mapper::SchemaMapper;
pub use normalizer::{NormalizedRow, RowNormalizer, Substitution, SubstitutionKind};

//! Validation functionality
//!
//! Provides validation logic for:
//! - Row rejection (required fields)
//! - Table processing order (declared dependencies, cycles)
//! - Cross-table references (profile ids referenced by later tables)

pub mod ordering;
pub mod references;
pub mod rows;

pub use ordering::{OrderValidationError, OrderValidator};
pub use references::{DanglingReference, PROFILE_REFERENCES, ReferenceChecker, ReferenceRule};
pub use rows::RowValidationError;

//! CLI tests module

#[cfg(feature = "cli")]
pub mod check_tests;
#[cfg(feature = "cli")]
pub mod generate_tests;

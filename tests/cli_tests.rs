//! CLI handler tests

mod cli;

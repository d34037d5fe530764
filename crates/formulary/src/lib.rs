//! formulary CLI library.
//!
//! The binary in `main.rs` wires these modules together: `cli` owns
//! argument parsing, error classes and exit codes, `commands` the
//! per-subcommand executors, and `tracing` the logging setup.

pub mod cli;
pub mod commands;
pub mod tracing;

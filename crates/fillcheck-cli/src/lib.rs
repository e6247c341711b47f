//! The `fillcheck` command-line linter.
//!
//! - `args` - command-line flags
//! - `config` - `fillcheck.json` loading, validation and per-file rule settings
//! - `driver` - file discovery and parallel linting
//! - `reporter` - tsc-style and JSON output
//! - `tracing_config` - opt-in `tracing` subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;

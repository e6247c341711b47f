//! Common types and utilities for the fillcheck linter.
//!
//! This crate provides foundational types used across all fillcheck crates:
//! - Diagnostics and their message templates
//! - Analysis limits and thresholds
//! - Position/line-map types for reporting source locations

// Diagnostics - message table, categories, formatting
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Centralized limits and thresholds
pub mod limits;

// Position/line-map types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;

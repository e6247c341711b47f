//! Lint rules for the fillcheck linter.
//!
//! This crate provides:
//! - `Rule` / `RuleContext` - the rule interface and per-file context
//! - `Severity` - `off` / `warn` / `error`
//! - `RuleRegistry` - rules by configuration name
//! - `NoArrayFillWithReferenceType` - reports `Array.fill` with a shared reference

pub mod rule;
pub use rule::{Rule, RuleContext, Severity};

pub mod registry;
pub use registry::{RuleRegistry, builtin_rules};

pub mod no_array_fill_with_reference_type;
pub use no_array_fill_with_reference_type::{
    ArrayProducer, FillCall, NoArrayFillWithReferenceType, find_fill_calls,
};

#[cfg(test)]
#[path = "tests/no_array_fill_tests.rs"]
mod no_array_fill_tests;
#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod registry_tests;

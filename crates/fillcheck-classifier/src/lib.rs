//! Reference/value type classifier for the fillcheck linter.
//!
//! This crate provides:
//! - `TypeClassifier` - decides whether an expression yields a shared reference
//! - `Verdict` - the decision plus a display label for diagnostics
//! - `ClassifierOptions` - the `canFillWithFunction` / `canFillWithRegexp` toggles
//! - `BindingResolver` - the identifier-resolution seam, implemented for the binder
//! - `ClassifierTracer` - injected observability for classification decisions
//! - `RecursionGuard` - cycle and depth bounds for following bindings

pub mod classifier;
pub use classifier::TypeClassifier;

pub mod labels;
pub use labels::type_label;

pub mod options;
pub use options::ClassifierOptions;

pub mod recursion;
pub use recursion::{RecursionGuard, RecursionResult};

pub mod resolver;
pub use resolver::BindingResolver;

pub mod tracer;
pub use tracer::{ClassifierTracer, LogTracer, NoopTracer, TraceEvent};

pub mod verdict;
pub use verdict::Verdict;

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod classifier_tests;
#[cfg(test)]
#[path = "tests/labels_tests.rs"]
mod labels_tests;
#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;

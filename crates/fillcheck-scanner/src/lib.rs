//! JavaScript scanner/tokenizer for the fillcheck linter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - Token classification helpers

pub mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner_impl;
pub use scanner_impl::{
    ScannerError, ScannerSnapshot, ScannerState, TokenFlags, first_token_text,
    is_identifier_part, is_identifier_start,
};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "tests/scanner_impl_tests.rs"]
mod scanner_impl_tests;

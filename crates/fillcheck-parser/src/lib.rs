//! JavaScript parser and AST types for the fillcheck linter.
//!
//! This crate provides:
//! - `NodeArena` / `NodeIndex` - arena-allocated syntax tree
//! - `NodeData` - one tagged variant per syntax kind
//! - `ParserState` - recursive-descent parser producing the arena

pub mod parser;
pub use parser::{NodeIndex, NodeList, ParserState};

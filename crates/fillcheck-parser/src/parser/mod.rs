//! Parser module: AST nodes, arena, and the recursive-descent parser.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
pub use node::*;

mod node_access;
mod node_arena;
mod node_children;

pub mod state;
pub use state::ParserState;
mod state_expressions;
mod state_statements;

/// Flags stored on `VariableDeclarationList` nodes.
pub mod node_flags {
    pub const NONE: u16 = 0;
    pub const LET: u16 = 1;
    pub const CONST: u16 = 2;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
}

#[cfg(test)]
#[path = "tests/node_arena_tests.rs"]
mod node_arena_tests;
#[cfg(test)]
#[path = "tests/state_expression_tests.rs"]
mod state_expression_tests;
#[cfg(test)]
#[path = "tests/state_statement_tests.rs"]
mod state_statement_tests;

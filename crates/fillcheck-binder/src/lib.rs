//! Name binder for the fillcheck linter.
//!
//! Builds persistent lexical scopes and a symbol arena over a parsed
//! `NodeArena`, then answers "which declaration does this identifier refer
//! to" queries after binding has finished.

pub mod symbols;
pub use symbols::{Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolTable};

pub mod scopes;
pub use scopes::{ContainerKind, Scope, ScopeId};

pub mod state;
pub use state::BinderState;
mod state_binding;
mod state_node_binding;

pub mod resolver;
pub use resolver::{ArenaResolver, Binding, DeclarationKind, ResolveError};

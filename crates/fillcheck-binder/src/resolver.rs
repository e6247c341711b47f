//! Identifier-to-declaration lookups over a bound file.

use crate::state::BinderState;
use crate::symbols::{SymbolFlags, SymbolId};
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::NodeArena;
use std::fmt;

/// Whether a binding may be assigned again after its declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `const`, function and class declarations, imports.
    Fixed,
    /// `let`, `var`, parameters and catch variables.
    Reassignable,
}

impl DeclarationKind {
    pub fn from_flags(flags: SymbolFlags) -> Self {
        if flags.intersects(SymbolFlags::REASSIGNABLE) {
            DeclarationKind::Reassignable
        } else {
            DeclarationKind::Fixed
        }
    }
}

/// The declaration an identifier resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub symbol: SymbolId,
    pub kind: DeclarationKind,
    /// `NodeIndex::NONE` when the declaration has no initializer of its own.
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The index does not name a node of the arena.
    NodeNotFound(NodeIndex),
    /// The node exists but is not an identifier.
    NotAnIdentifier { node: NodeIndex, kind: &'static str },
    /// `bind_source_file` has not run for this binder.
    Unbound,
    /// A scope table points at a symbol the arena does not hold.
    DanglingSymbol(SymbolId),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NodeNotFound(node) => write!(f, "node {} is not in the arena", node.0),
            ResolveError::NotAnIdentifier { node, kind } => {
                write!(f, "node {} is a {kind}, not an identifier", node.0)
            }
            ResolveError::Unbound => write!(f, "source file has not been bound"),
            ResolveError::DanglingSymbol(symbol) => {
                write!(f, "symbol {} is not in the symbol arena", symbol.0)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves identifiers of one arena against the binder that bound it.
#[derive(Clone, Copy)]
pub struct ArenaResolver<'a> {
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
}

impl<'a> ArenaResolver<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> Self {
        ArenaResolver { arena, binder }
    }

    /// Resolve `ident` to its innermost visible declaration.
    ///
    /// `Ok(None)` means the name is not declared in the file.
    pub fn resolve(&self, ident: NodeIndex) -> Result<Option<Binding>, ResolveError> {
        let node = self
            .arena
            .get(ident)
            .ok_or(ResolveError::NodeNotFound(ident))?;
        let Some(data) = self.arena.get_identifier(node) else {
            return Err(ResolveError::NotAnIdentifier {
                node: ident,
                kind: node.data.kind_name(),
            });
        };
        if self.binder.scopes.is_empty() {
            return Err(ResolveError::Unbound);
        }

        let Some(symbol_id) = self
            .binder
            .resolve_name(self.arena, ident, &data.escaped_text)
        else {
            return Ok(None);
        };
        let symbol = self
            .binder
            .get_symbol(symbol_id)
            .ok_or(ResolveError::DanglingSymbol(symbol_id))?;

        Ok(Some(Binding {
            symbol: symbol_id,
            kind: DeclarationKind::from_flags(symbol.flags),
            initializer: symbol.initializer,
        }))
    }
}

//! Persistent lexical scopes.
//!
//! Scopes outlive the binding pass so identifiers can be resolved in any
//! order afterwards: each scope records its parent and the node that opened
//! it, and `BinderState::node_scope_ids` maps container nodes back to scopes.

use crate::symbols::SymbolTable;
use fillcheck_parser::NodeIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// The construct that opened a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    SourceFile,
    /// Function declarations and expressions, arrows, methods, accessors,
    /// constructors and class static blocks.
    Function,
    /// Blocks, loop heads and switch case blocks.
    Block,
    Class,
    Catch,
}

impl ContainerKind {
    /// `var` declarations hoist to the nearest scope of this kind.
    #[inline]
    pub fn is_var_scope(self) -> bool {
        matches!(self, ContainerKind::SourceFile | ContainerKind::Function)
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: ScopeId,
    pub kind: ContainerKind,
    pub container_node: NodeIndex,
    pub table: SymbolTable,
}

impl Scope {
    pub fn new(parent: ScopeId, kind: ContainerKind, container_node: NodeIndex) -> Self {
        Scope {
            parent,
            kind,
            container_node,
            table: SymbolTable::new(),
        }
    }
}

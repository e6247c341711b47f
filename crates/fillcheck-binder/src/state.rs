//! Binder state: scope management, symbol declaration and resolution.

use crate::scopes::{ContainerKind, Scope, ScopeId};
use crate::symbols::{Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolTable};
use fillcheck_common::limits::{MAX_SCOPE_WALK_ITERATIONS, MAX_TREE_WALK_ITERATIONS};
use fillcheck_parser::parser::NodeArena;
use fillcheck_parser::NodeIndex;
use rustc_hash::FxHashMap;
use tracing::{Level, debug, span, trace};

/// Binder state for one source file.
///
/// ```ignore
/// let mut binder = BinderState::new();
/// binder.bind_source_file(&arena, root);
/// let symbol = binder.resolve_identifier(&arena, ident);
/// ```
#[derive(Debug)]
pub struct BinderState {
    /// Arena for symbol storage
    pub symbols: SymbolArena,
    /// Persistent scopes; `ScopeId(0)` is the source file scope.
    pub scopes: Vec<Scope>,
    /// Map from a scope-creating node to its scope
    pub node_scope_ids: FxHashMap<u32, ScopeId>,
    /// Map from declaration nodes (and their name identifiers) to symbols
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// Scope currently being populated
    pub(crate) current_scope_id: ScopeId,
    /// Current `bind_node` nesting
    pub(crate) depth: u32,
    /// Set once a subtree was skipped for exceeding `MAX_AST_DEPTH`
    pub(crate) depth_exceeded: bool,
}

impl BinderState {
    pub fn new() -> Self {
        BinderState {
            symbols: SymbolArena::new(),
            scopes: Vec::new(),
            node_scope_ids: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            current_scope_id: ScopeId::NONE,
            depth: 0,
            depth_exceeded: false,
        }
    }

    /// Clear all binding results.
    pub fn reset(&mut self) {
        self.symbols.clear();
        self.scopes.clear();
        self.node_scope_ids.clear();
        self.node_symbols.clear();
        self.current_scope_id = ScopeId::NONE;
        self.depth = 0;
        self.depth_exceeded = false;
    }

    /// Bind a parsed source file. Any previous binding is discarded.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let _span = span!(Level::DEBUG, "bind_source_file", root = root.0).entered();
        self.reset();

        self.enter_scope(ContainerKind::SourceFile, root);
        if let Some(node) = arena.get(root)
            && let Some(sf) = arena.get_source_file(node)
        {
            for &stmt_idx in &sf.statements.nodes {
                self.bind_node(arena, stmt_idx);
            }
        }
        self.exit_scope();

        debug!(
            symbols = self.symbols.len(),
            scopes = self.scopes.len(),
            "bound source file"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether part of the last bound file was too deep to bind.
    #[inline]
    pub fn depth_exceeded(&self) -> bool {
        self.depth_exceeded
    }

    #[inline]
    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn get_node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// Names declared at the top level of the file.
    pub fn file_locals(&self) -> Option<&SymbolTable> {
        self.scopes.first().map(|scope| &scope.table)
    }

    /// Resolve an identifier reference to the innermost visible declaration.
    ///
    /// Returns `None` for non-identifiers and for names with no declaration
    /// in the file (globals such as `Array` or `undefined`).
    pub fn resolve_identifier(&self, arena: &NodeArena, node_idx: NodeIndex) -> Option<SymbolId> {
        let node = arena.get(node_idx)?;
        let name = &arena.get_identifier(node)?.escaped_text;
        self.resolve_name(arena, node_idx, name)
    }

    /// Resolve `name` as if it were referenced at `location`.
    pub fn resolve_name(&self, arena: &NodeArena, location: NodeIndex, name: &str) -> Option<SymbolId> {
        let mut scope_id = self.find_enclosing_scope(arena, location)?;
        let mut depth = 0;
        while !scope_id.is_none() && depth < MAX_SCOPE_WALK_ITERATIONS {
            let scope = self.scopes.get(scope_id.0 as usize)?;
            if let Some(sym_id) = scope.table.get(name) {
                trace!(name, depth, sym_id = sym_id.0, "resolved");
                return Some(sym_id);
            }
            scope_id = scope.parent;
            depth += 1;
        }
        trace!(name, "not found");
        None
    }

    /// Find the scope of the nearest scope-creating ancestor of `node_idx`
    /// (the node itself included). Falls back to the file scope.
    pub fn find_enclosing_scope(&self, arena: &NodeArena, node_idx: NodeIndex) -> Option<ScopeId> {
        let mut current = node_idx;
        let mut steps = 0;
        while current.is_some() && steps < MAX_TREE_WALK_ITERATIONS {
            if let Some(&scope_id) = self.node_scope_ids.get(&current.0) {
                return Some(scope_id);
            }
            current = arena.parent_of(current);
            steps += 1;
        }

        if self.scopes.is_empty() {
            None
        } else {
            Some(ScopeId(0))
        }
    }

    // =========================================================================
    // Scope management
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ContainerKind, node: NodeIndex) {
        let new_scope_id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(self.current_scope_id, kind, node));
        if node.is_some() {
            self.node_scope_ids.insert(node.0, new_scope_id);
        }
        self.current_scope_id = new_scope_id;
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.get(self.current_scope_id.0 as usize) {
            self.current_scope_id = scope.parent;
        }
    }

    /// Make `node` resolve into the current scope as well.
    pub(crate) fn map_node_to_current_scope(&mut self, node: NodeIndex) {
        if node.is_some() && !self.current_scope_id.is_none() {
            self.node_scope_ids.insert(node.0, self.current_scope_id);
        }
    }

    /// Nearest enclosing function or file scope, where `var` lands.
    pub(crate) fn var_scope_id(&self) -> ScopeId {
        let mut scope_id = self.current_scope_id;
        while let Some(scope) = self.scopes.get(scope_id.0 as usize) {
            if scope.kind.is_var_scope() {
                return scope_id;
            }
            scope_id = scope.parent;
        }
        self.current_scope_id
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declare a symbol in the current scope.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        flags: SymbolFlags,
        declaration: NodeIndex,
        initializer: NodeIndex,
    ) -> SymbolId {
        self.declare_symbol_in(self.current_scope_id, name, flags, declaration, initializer)
    }

    /// Declare a symbol in `scope_id`, merging with an existing symbol of the
    /// same name. The first declaration keeps its initializer.
    pub(crate) fn declare_symbol_in(
        &mut self,
        scope_id: ScopeId,
        name: &str,
        flags: SymbolFlags,
        declaration: NodeIndex,
        initializer: NodeIndex,
    ) -> SymbolId {
        let existing = self
            .scopes
            .get(scope_id.0 as usize)
            .and_then(|scope| scope.table.get(name));

        if let Some(existing_id) = existing {
            if let Some(sym) = self.symbols.get_mut(existing_id) {
                debug!(name, sym_id = existing_id.0, ?flags, "merging declaration");
                sym.flags |= flags;
                if declaration.is_some() && !sym.declarations.contains(&declaration) {
                    sym.declarations.push(declaration);
                }
            }
            if declaration.is_some() {
                self.node_symbols.insert(declaration.0, existing_id);
            }
            return existing_id;
        }

        let sym_id = self.symbols.alloc(flags, name.to_string());
        if let Some(sym) = self.symbols.get_mut(sym_id) {
            if declaration.is_some() {
                sym.declarations.push(declaration);
            }
            sym.value_declaration = declaration;
            sym.initializer = initializer;
        }
        if let Some(scope) = self.scopes.get_mut(scope_id.0 as usize) {
            scope.table.set(name.to_string(), sym_id);
        }
        if declaration.is_some() {
            self.node_symbols.insert(declaration.0, sym_id);
        }
        trace!(name, sym_id = sym_id.0, ?flags, "declared");
        sym_id
    }
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

//! Declaration binding: variables, functions, classes, catch clauses and
//! module declarations.

use crate::scopes::{ContainerKind, ScopeId};
use crate::state::BinderState;
use crate::symbols::SymbolFlags;
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::{ClassData, FunctionData, Node, NodeArena, NodeData, node_flags};
use tracing::debug;

impl BinderState {
    pub(crate) fn bind_variable_declaration(
        &mut self,
        arena: &NodeArena,
        node: &Node,
        idx: NodeIndex,
    ) {
        let Some(decl) = arena.get_variable_declaration(node) else {
            return;
        };

        // `let`/`const` live on the enclosing declaration list
        let list_flags = arena
            .get(arena.parent_of(idx))
            .filter(|parent| matches!(parent.data, NodeData::VariableDeclarationList(_)))
            .map(|parent| parent.flags)
            .unwrap_or(node_flags::NONE);
        let (flags, scope_id) = if list_flags & node_flags::CONST != 0 {
            (SymbolFlags::CONST, self.current_scope_id)
        } else if list_flags & node_flags::LET != 0 {
            (SymbolFlags::BLOCK_SCOPED_VARIABLE, self.current_scope_id)
        } else {
            (SymbolFlags::FUNCTION_SCOPED_VARIABLE, self.var_scope_id())
        };

        if let Some(name) = Self::get_identifier_name(arena, decl.name) {
            let sym_id = self.declare_symbol_in(scope_id, name, flags, idx, decl.initializer);
            self.node_symbols.insert(decl.name.0, sym_id);
        } else {
            // Destructured names have no initializer of their own
            self.declare_binding_names(arena, scope_id, decl.name, flags);
            self.bind_node(arena, decl.name);
        }

        self.bind_node(arena, decl.initializer);
    }

    /// Declare every identifier of a destructuring pattern.
    fn declare_binding_names(
        &mut self,
        arena: &NodeArena,
        scope_id: ScopeId,
        name: NodeIndex,
        flags: SymbolFlags,
    ) {
        let mut names = Vec::new();
        Self::collect_binding_identifiers(arena, name, &mut names);
        for ident_idx in names {
            if let Some(ident) = Self::get_identifier_name(arena, ident_idx) {
                self.declare_symbol_in(scope_id, ident, flags, ident_idx, NodeIndex::NONE);
            }
        }
    }

    pub(crate) fn bind_function_declaration(
        &mut self,
        arena: &NodeArena,
        func: &FunctionData,
        idx: NodeIndex,
    ) {
        if let Some(name) = Self::get_identifier_name(arena, func.name) {
            let sym_id = self.declare_symbol(name, SymbolFlags::FUNCTION, idx, NodeIndex::NONE);
            self.node_symbols.insert(func.name.0, sym_id);
        }
        self.bind_function_like(arena, func, idx, false, true);
    }

    /// Bind parameters and body of any function-like node in a new scope.
    ///
    /// `declare_own_name` binds a function expression's name inside its own
    /// scope; `has_arguments` is false for arrows.
    pub(crate) fn bind_function_like(
        &mut self,
        arena: &NodeArena,
        func: &FunctionData,
        idx: NodeIndex,
        declare_own_name: bool,
        has_arguments: bool,
    ) {
        self.enter_scope(ContainerKind::Function, idx);
        if has_arguments {
            self.declare_arguments_symbol();
        }
        if declare_own_name && let Some(name) = Self::get_identifier_name(arena, func.name) {
            let sym_id = self.declare_symbol(name, SymbolFlags::FUNCTION, idx, NodeIndex::NONE);
            self.node_symbols.insert(func.name.0, sym_id);
        }

        for param_idx in func.parameters.iter() {
            self.bind_parameter(arena, param_idx);
        }

        // A block body shares the function scope with the parameters
        match arena.get(func.body).map(|body| &body.data) {
            Some(NodeData::Block(block)) => self.bind_statements(arena, &block.statements.nodes),
            _ => self.bind_node(arena, func.body),
        }

        self.exit_scope();
    }

    pub(crate) fn bind_parameter(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(param) = arena.get(idx).and_then(|node| arena.get_parameter(node)) else {
            return;
        };

        if let Some(name) = Self::get_identifier_name(arena, param.name) {
            debug!(param_name = %name, param_idx = idx.0, "binding parameter");
            let sym_id = self.declare_symbol(name, SymbolFlags::PARAMETER, idx, NodeIndex::NONE);
            self.node_symbols.insert(param.name.0, sym_id);
        } else {
            self.declare_binding_names(arena, self.current_scope_id, param.name, SymbolFlags::PARAMETER);
            self.bind_node(arena, param.name);
        }

        self.bind_node(arena, param.initializer);
    }

    pub(crate) fn declare_arguments_symbol(&mut self) {
        self.declare_symbol(
            "arguments",
            SymbolFlags::FUNCTION_SCOPED_VARIABLE,
            NodeIndex::NONE,
            NodeIndex::NONE,
        );
    }

    pub(crate) fn bind_class_declaration(
        &mut self,
        arena: &NodeArena,
        class: &ClassData,
        idx: NodeIndex,
    ) {
        if let Some(name) = Self::get_identifier_name(arena, class.name) {
            let sym_id = self.declare_symbol(name, SymbolFlags::CLASS, idx, NodeIndex::NONE);
            self.node_symbols.insert(class.name.0, sym_id);
        }
        self.bind_class(arena, class, idx, false);
    }

    /// Bind the heritage clause and members of a class.
    ///
    /// Members are not lexical bindings: a field `x` is not visible as `x`
    /// inside methods, so the class scope only ever holds a class
    /// expression's own name.
    pub(crate) fn bind_class(
        &mut self,
        arena: &NodeArena,
        class: &ClassData,
        idx: NodeIndex,
        is_expression: bool,
    ) {
        self.bind_node(arena, class.heritage);

        self.enter_scope(ContainerKind::Class, idx);
        if is_expression && let Some(name) = Self::get_identifier_name(arena, class.name) {
            let sym_id = self.declare_symbol(name, SymbolFlags::CLASS, idx, NodeIndex::NONE);
            self.node_symbols.insert(class.name.0, sym_id);
        }
        for member_idx in class.members.iter() {
            self.bind_node(arena, member_idx);
        }
        self.exit_scope();
    }

    /// All case clauses of a switch share one block scope; the discriminant
    /// stays outside it.
    pub(crate) fn bind_switch_statement(&mut self, arena: &NodeArena, node: &Node) {
        let Some(switch) = arena.get_switch(node) else {
            return;
        };
        self.bind_node(arena, switch.expression);

        let Some(first_clause) = switch.clauses.first() else {
            return;
        };
        self.enter_scope(ContainerKind::Block, first_clause);
        for clause_idx in switch.clauses.iter() {
            self.map_node_to_current_scope(clause_idx);
            if let Some(clause) = arena.get(clause_idx).and_then(|n| arena.get_case_clause(n)) {
                self.bind_node(arena, clause.expression);
                self.bind_statements(arena, &clause.statements.nodes);
            }
        }
        self.exit_scope();
    }

    pub(crate) fn bind_catch_clause(&mut self, arena: &NodeArena, node: &Node, idx: NodeIndex) {
        let Some(catch) = arena.get_catch_clause(node) else {
            return;
        };

        self.enter_scope(ContainerKind::Catch, idx);
        let binding = catch.variable_declaration;
        if let Some(name) = Self::get_identifier_name(arena, binding) {
            self.declare_symbol(name, SymbolFlags::CATCH_VARIABLE, binding, NodeIndex::NONE);
        } else if binding.is_some() {
            self.declare_binding_names(arena, self.current_scope_id, binding, SymbolFlags::CATCH_VARIABLE);
            self.bind_node(arena, binding);
        }
        self.bind_node(arena, catch.block);
        self.exit_scope();
    }

    pub(crate) fn bind_import_declaration(&mut self, arena: &NodeArena, node: &Node) {
        let Some(import) = arena.get_import_decl(node) else {
            return;
        };
        for spec_idx in import.specifiers.iter() {
            let Some(spec) = arena.get(spec_idx).and_then(|n| arena.get_specifier(n)) else {
                continue;
            };
            if let Some(name) = Self::get_identifier_name(arena, spec.name) {
                let sym_id = self.declare_symbol(name, SymbolFlags::IMPORT, spec_idx, NodeIndex::NONE);
                self.node_symbols.insert(spec.name.0, sym_id);
            }
        }
    }

    /// `export <declaration>` declares into the current scope; specifier
    /// lists only name existing bindings.
    pub(crate) fn bind_export_declaration(&mut self, arena: &NodeArena, node: &Node) {
        if let Some(export) = arena.get_export_decl(node) {
            self.bind_node(arena, export.declaration);
        }
    }
}

//! Node dispatch for the binder and binding-name helpers.

use crate::scopes::ContainerKind;
use crate::state::BinderState;
use fillcheck_common::limits::MAX_AST_DEPTH;
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::{Node, NodeArena, NodeData};
use tracing::warn;

impl BinderState {
    /// Bind a node and its children.
    ///
    /// Subtrees deeper than `MAX_AST_DEPTH` are skipped.
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        if idx.is_none() {
            return;
        }
        let Some(node) = arena.get(idx) else {
            return;
        };

        if self.depth >= MAX_AST_DEPTH {
            if !self.depth_exceeded {
                warn!(node = idx.0, pos = node.pos, limit = MAX_AST_DEPTH, "tree too deep, skipping subtree");
                self.depth_exceeded = true;
            }
            return;
        }
        self.depth += 1;
        self.bind_node_data(arena, node, idx);
        self.depth -= 1;
    }

    fn bind_node_data(&mut self, arena: &NodeArena, node: &Node, idx: NodeIndex) {
        match &node.data {
            NodeData::VariableDeclaration(_) => self.bind_variable_declaration(arena, node, idx),

            NodeData::FunctionDeclaration(func) => {
                self.bind_function_declaration(arena, func, idx);
            }
            NodeData::FunctionExpression(func) => {
                self.bind_function_like(arena, func, idx, true, true);
            }
            NodeData::ArrowFunction(func) => {
                self.bind_function_like(arena, func, idx, false, false);
            }
            NodeData::MethodDeclaration(func)
            | NodeData::GetAccessor(func)
            | NodeData::SetAccessor(func)
            | NodeData::Constructor(func) => {
                // Computed names are evaluated in the enclosing scope
                self.bind_node(arena, func.name);
                self.bind_function_like(arena, func, idx, false, true);
            }

            NodeData::ClassDeclaration(class) => {
                self.bind_class_declaration(arena, class, idx);
            }
            NodeData::ClassExpression(class) => self.bind_class(arena, class, idx, true),
            NodeData::ClassStaticBlock(block) => {
                self.enter_scope(ContainerKind::Function, idx);
                self.bind_statements(arena, &block.statements.nodes);
                self.exit_scope();
            }

            NodeData::Block(block) => {
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_statements(arena, &block.statements.nodes);
                self.exit_scope();
            }
            // `for (let i ...)` scopes `i` to the loop
            NodeData::ForStatement(_) | NodeData::ForInStatement(_) | NodeData::ForOfStatement(_) => {
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_children(arena, node);
                self.exit_scope();
            }
            NodeData::SwitchStatement(_) => self.bind_switch_statement(arena, node),
            NodeData::CatchClause(_) => self.bind_catch_clause(arena, node, idx),

            NodeData::ImportDeclaration(_) => self.bind_import_declaration(arena, node),
            NodeData::ExportDeclaration(_) => self.bind_export_declaration(arena, node),

            // Identifiers are references here, not declarations
            _ => self.bind_children(arena, node),
        }
    }

    pub(crate) fn bind_statements(&mut self, arena: &NodeArena, statements: &[NodeIndex]) {
        for &stmt_idx in statements {
            self.bind_node(arena, stmt_idx);
        }
    }

    pub(crate) fn bind_children(&mut self, arena: &NodeArena, node: &Node) {
        node.data.for_each_child(|child| self.bind_node(arena, child));
    }

    /// Get identifier name from a node index.
    pub(crate) fn get_identifier_name(arena: &NodeArena, idx: NodeIndex) -> Option<&str> {
        arena.identifier_text(idx)
    }

    /// Collect every identifier introduced by a binding name: the name itself,
    /// or the leaves of an object/array destructuring pattern.
    pub(crate) fn collect_binding_identifiers(
        arena: &NodeArena,
        idx: NodeIndex,
        out: &mut Vec<NodeIndex>,
    ) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match &node.data {
            NodeData::Identifier(_) => out.push(idx),
            NodeData::BindingElement(element) => {
                Self::collect_binding_identifiers(arena, element.name, out);
            }
            NodeData::ObjectBindingPattern(pattern) | NodeData::ArrayBindingPattern(pattern) => {
                for elem in pattern.elements.iter() {
                    Self::collect_binding_identifiers(arena, elem, out);
                }
            }
            _ => {}
        }
    }
}

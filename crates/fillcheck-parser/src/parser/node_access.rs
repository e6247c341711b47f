//! NodeArena access methods.
//!
//! Typed getters return `None` when the node is of a different kind, so
//! callers can chain them with `?`.

use super::base::NodeIndex;
use super::node::*;
use fillcheck_common::limits::MAX_TREE_WALK_ITERATIONS;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, or `NodeIndex::NONE` for the source file.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Walk the parent chain (excluding `index` itself) until `predicate`
    /// matches.
    pub fn find_ancestor(
        &self,
        index: NodeIndex,
        mut predicate: impl FnMut(&Node) -> bool,
    ) -> Option<NodeIndex> {
        let mut current = self.parent_of(index);
        let mut iterations = 0;
        while current.is_some() {
            iterations += 1;
            if iterations > MAX_TREE_WALK_ITERATIONS {
                return None;
            }
            let node = self.get(current)?;
            if predicate(node) {
                return Some(current);
            }
            current = self.parent_of(current);
        }
        None
    }

    /// Source text covered by a node.
    pub fn node_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.source_text
            .get(node.pos as usize..node.end as usize)
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        let mut iterations = 0;
        while let Some(paren) = self.get(index).and_then(|n| self.get_parenthesized(n)) {
            iterations += 1;
            if iterations > MAX_TREE_WALK_ITERATIONS {
                break;
            }
            index = paren.expression;
        }
        index
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    #[inline]
    pub fn get_identifier<'n>(&self, node: &'n Node) -> Option<&'n IdentifierData> {
        match &node.data {
            NodeData::Identifier(d) | NodeData::PrivateIdentifier(d) => Some(d),
            _ => None,
        }
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        match &node.data {
            NodeData::Identifier(d) => Some(d.escaped_text.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn get_literal<'n>(&self, node: &'n Node) -> Option<&'n LiteralData> {
        match &node.data {
            NodeData::Literal(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_template_literal<'n>(&self, node: &'n Node) -> Option<&'n TemplateLiteralData> {
        match &node.data {
            NodeData::TemplateLiteral(d) => Some(d),
            _ => None,
        }
    }

    /// Call data for `CallExpression` nodes only.
    #[inline]
    pub fn get_call_expr<'n>(&self, node: &'n Node) -> Option<&'n CallExprData> {
        match &node.data {
            NodeData::CallExpression(d) => Some(d),
            _ => None,
        }
    }

    /// Call data for `NewExpression` nodes only.
    #[inline]
    pub fn get_new_expr<'n>(&self, node: &'n Node) -> Option<&'n CallExprData> {
        match &node.data {
            NodeData::NewExpression(d) => Some(d),
            _ => None,
        }
    }

    /// Access data for `PropertyAccess` nodes only.
    #[inline]
    pub fn get_property_access<'n>(&self, node: &'n Node) -> Option<&'n AccessExprData> {
        match &node.data {
            NodeData::PropertyAccess(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_element_access<'n>(&self, node: &'n Node) -> Option<&'n AccessExprData> {
        match &node.data {
            NodeData::ElementAccess(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_parenthesized<'n>(&self, node: &'n Node) -> Option<&'n ParenthesizedData> {
        match &node.data {
            NodeData::Parenthesized(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_binary_expr<'n>(&self, node: &'n Node) -> Option<&'n BinaryExprData> {
        match &node.data {
            NodeData::Binary(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_unary_expr<'n>(&self, node: &'n Node) -> Option<&'n UnaryExprData> {
        match &node.data {
            NodeData::PrefixUnary(d) | NodeData::PostfixUnary(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_conditional_expr<'n>(&self, node: &'n Node) -> Option<&'n ConditionalExprData> {
        match &node.data {
            NodeData::Conditional(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_object_literal<'n>(&self, node: &'n Node) -> Option<&'n ObjectLiteralData> {
        match &node.data {
            NodeData::ObjectLiteral(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_array_literal<'n>(&self, node: &'n Node) -> Option<&'n ArrayLiteralData> {
        match &node.data {
            NodeData::ArrayLiteral(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_property_assignment<'n>(&self, node: &'n Node) -> Option<&'n PropertyAssignmentData> {
        match &node.data {
            NodeData::PropertyAssignment(d) => Some(d),
            _ => None,
        }
    }

    /// Function data for every function-like node.
    #[inline]
    pub fn get_function<'n>(&self, node: &'n Node) -> Option<&'n FunctionData> {
        match &node.data {
            NodeData::FunctionDeclaration(d)
            | NodeData::FunctionExpression(d)
            | NodeData::ArrowFunction(d)
            | NodeData::MethodDeclaration(d)
            | NodeData::GetAccessor(d)
            | NodeData::SetAccessor(d)
            | NodeData::Constructor(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_class<'n>(&self, node: &'n Node) -> Option<&'n ClassData> {
        match &node.data {
            NodeData::ClassDeclaration(d) | NodeData::ClassExpression(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_parameter<'n>(&self, node: &'n Node) -> Option<&'n ParameterData> {
        match &node.data {
            NodeData::Parameter(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_source_file<'n>(&self, node: &'n Node) -> Option<&'n SourceFileData> {
        match &node.data {
            NodeData::SourceFile(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_block<'n>(&self, node: &'n Node) -> Option<&'n BlockData> {
        match &node.data {
            NodeData::Block(d) | NodeData::ClassStaticBlock(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_statement<'n>(&self, node: &'n Node) -> Option<&'n VariableStatementData> {
        match &node.data {
            NodeData::VariableStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_declaration_list<'n>(
        &self,
        node: &'n Node,
    ) -> Option<&'n VariableDeclarationListData> {
        match &node.data {
            NodeData::VariableDeclarationList(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_declaration<'n>(&self, node: &'n Node) -> Option<&'n VariableDeclarationData> {
        match &node.data {
            NodeData::VariableDeclaration(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_expression_statement<'n>(&self, node: &'n Node) -> Option<&'n ExpressionStatementData> {
        match &node.data {
            NodeData::ExpressionStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_binding_pattern<'n>(&self, node: &'n Node) -> Option<&'n BindingPatternData> {
        match &node.data {
            NodeData::ObjectBindingPattern(d) | NodeData::ArrayBindingPattern(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_binding_element<'n>(&self, node: &'n Node) -> Option<&'n BindingElementData> {
        match &node.data {
            NodeData::BindingElement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_catch_clause<'n>(&self, node: &'n Node) -> Option<&'n CatchClauseData> {
        match &node.data {
            NodeData::CatchClause(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_import_decl<'n>(&self, node: &'n Node) -> Option<&'n ImportDeclData> {
        match &node.data {
            NodeData::ImportDeclaration(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_specifier<'n>(&self, node: &'n Node) -> Option<&'n SpecifierData> {
        match &node.data {
            NodeData::ImportSpecifier(d) | NodeData::ExportSpecifier(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_export_decl<'n>(&self, node: &'n Node) -> Option<&'n ExportDeclData> {
        match &node.data {
            NodeData::ExportDeclaration(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_if_statement<'n>(&self, node: &'n Node) -> Option<&'n IfStatementData> {
        match &node.data {
            NodeData::IfStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_loop<'n>(&self, node: &'n Node) -> Option<&'n LoopData> {
        match &node.data {
            NodeData::ForStatement(d) | NodeData::WhileStatement(d) | NodeData::DoStatement(d) => {
                Some(d)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn get_for_in_of<'n>(&self, node: &'n Node) -> Option<&'n ForInOfData> {
        match &node.data {
            NodeData::ForInStatement(d) | NodeData::ForOfStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_try<'n>(&self, node: &'n Node) -> Option<&'n TryData> {
        match &node.data {
            NodeData::TryStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_switch<'n>(&self, node: &'n Node) -> Option<&'n SwitchData> {
        match &node.data {
            NodeData::SwitchStatement(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    pub fn get_case_clause<'n>(&self, node: &'n Node) -> Option<&'n CaseClauseData> {
        match &node.data {
            NodeData::CaseClause(d) => Some(d),
            _ => None,
        }
    }
}

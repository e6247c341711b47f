//! Child enumeration for AST nodes.
//!
//! Children are visited in source order. Absent children (`NodeIndex::NONE`)
//! are skipped.

use super::base::{NodeIndex, NodeList};
use super::node::*;

#[inline]
fn visit(index: NodeIndex, f: &mut impl FnMut(NodeIndex)) {
    if index.is_some() {
        f(index);
    }
}

#[inline]
fn visit_list(list: &NodeList, f: &mut impl FnMut(NodeIndex)) {
    for index in list.iter() {
        visit(index, f);
    }
}

fn visit_function(data: &FunctionData, f: &mut impl FnMut(NodeIndex)) {
    visit(data.name, f);
    visit_list(&data.parameters, f);
    visit(data.body, f);
}

impl NodeData {
    /// Call `f` with every direct child of this node, in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeIndex)) {
        let f = &mut f;
        match self {
            NodeData::SourceFile(d) => visit_list(&d.statements, f),
            NodeData::VariableStatement(d) => visit(d.declaration_list, f),
            NodeData::VariableDeclarationList(d) => visit_list(&d.declarations, f),
            NodeData::VariableDeclaration(d) => {
                visit(d.name, f);
                visit(d.initializer, f);
            }
            NodeData::FunctionDeclaration(d)
            | NodeData::FunctionExpression(d)
            | NodeData::ArrowFunction(d)
            | NodeData::MethodDeclaration(d)
            | NodeData::GetAccessor(d)
            | NodeData::SetAccessor(d)
            | NodeData::Constructor(d) => visit_function(d, f),
            NodeData::ClassDeclaration(d) | NodeData::ClassExpression(d) => {
                visit(d.name, f);
                visit(d.heritage, f);
                visit_list(&d.members, f);
            }
            NodeData::Block(d) | NodeData::ClassStaticBlock(d) => visit_list(&d.statements, f),
            NodeData::ExpressionStatement(d) => visit(d.expression, f),
            NodeData::IfStatement(d) => {
                visit(d.expression, f);
                visit(d.then_statement, f);
                visit(d.else_statement, f);
            }
            NodeData::ForStatement(d) | NodeData::WhileStatement(d) => {
                visit(d.initializer, f);
                visit(d.condition, f);
                visit(d.incrementor, f);
                visit(d.statement, f);
            }
            NodeData::DoStatement(d) => {
                visit(d.statement, f);
                visit(d.condition, f);
            }
            NodeData::ForInStatement(d) | NodeData::ForOfStatement(d) => {
                visit(d.initializer, f);
                visit(d.expression, f);
                visit(d.statement, f);
            }
            NodeData::ReturnStatement(d) | NodeData::ThrowStatement(d) => visit(d.expression, f),
            NodeData::TryStatement(d) => {
                visit(d.try_block, f);
                visit(d.catch_clause, f);
                visit(d.finally_block, f);
            }
            NodeData::CatchClause(d) => {
                visit(d.variable_declaration, f);
                visit(d.block, f);
            }
            NodeData::SwitchStatement(d) => {
                visit(d.expression, f);
                visit_list(&d.clauses, f);
            }
            NodeData::CaseClause(d) => {
                visit(d.expression, f);
                visit_list(&d.statements, f);
            }
            NodeData::BreakStatement(d) | NodeData::ContinueStatement(d) => visit(d.label, f),
            NodeData::LabeledStatement(d) => {
                visit(d.label, f);
                visit(d.statement, f);
            }
            NodeData::ImportDeclaration(d) => {
                visit_list(&d.specifiers, f);
                visit(d.module_specifier, f);
            }
            NodeData::ImportSpecifier(d) | NodeData::ExportSpecifier(d) => {
                visit(d.property_name, f);
                visit(d.name, f);
            }
            NodeData::ExportDeclaration(d) => {
                visit(d.declaration, f);
                visit_list(&d.specifiers, f);
                visit(d.module_specifier, f);
            }
            NodeData::ExportAssignment(d) => visit(d.expression, f),
            NodeData::TemplateLiteral(d) => visit_list(&d.expressions, f),
            NodeData::TaggedTemplate(d) => {
                visit(d.tag, f);
                visit(d.template, f);
            }
            NodeData::MetaProperty(d) => visit(d.name, f),
            NodeData::ObjectLiteral(d) => visit_list(&d.properties, f),
            NodeData::ArrayLiteral(d) => visit_list(&d.elements, f),
            NodeData::PropertyAssignment(d) => {
                visit(d.name, f);
                visit(d.initializer, f);
            }
            NodeData::ShorthandPropertyAssignment(d) => {
                visit(d.name, f);
                visit(d.default_value, f);
            }
            NodeData::ComputedPropertyName(d) => visit(d.expression, f),
            NodeData::SpreadElement(d) => visit(d.expression, f),
            NodeData::CallExpression(d) | NodeData::NewExpression(d) => {
                visit(d.expression, f);
                if let Some(arguments) = &d.arguments {
                    visit_list(arguments, f);
                }
            }
            NodeData::PropertyAccess(d) | NodeData::ElementAccess(d) => {
                visit(d.expression, f);
                visit(d.name_or_argument, f);
            }
            NodeData::Parenthesized(d) => visit(d.expression, f),
            NodeData::Binary(d) => {
                visit(d.left, f);
                visit(d.right, f);
            }
            NodeData::PrefixUnary(d) | NodeData::PostfixUnary(d) => visit(d.operand, f),
            NodeData::Conditional(d) => {
                visit(d.condition, f);
                visit(d.when_true, f);
                visit(d.when_false, f);
            }
            NodeData::Yield(d) => visit(d.expression, f),
            NodeData::Parameter(d) => {
                visit(d.name, f);
                visit(d.initializer, f);
            }
            NodeData::PropertyDeclaration(d) => {
                visit(d.name, f);
                visit(d.initializer, f);
            }
            NodeData::ObjectBindingPattern(d) | NodeData::ArrayBindingPattern(d) => {
                visit_list(&d.elements, f);
            }
            NodeData::BindingElement(d) => {
                visit(d.property_name, f);
                visit(d.name, f);
                visit(d.initializer, f);
            }
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::PrivateIdentifier(_)
            | NodeData::Literal(_)
            | NodeData::Keyword(_)
            | NodeData::OmittedExpression
            | NodeData::Missing => {}
        }
    }
}

impl NodeArena {
    /// Call `f` with every direct child of `index`, in source order.
    pub fn for_each_child(&self, index: NodeIndex, f: impl FnMut(NodeIndex)) {
        if let Some(node) = self.get(index) {
            node.data.for_each_child(f);
        }
    }

    /// Direct children of `index`, in source order.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        self.for_each_child(index, |child| children.push(child));
        children
    }
}

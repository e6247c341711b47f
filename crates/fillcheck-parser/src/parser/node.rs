//! AST node types.
//!
//! Every node is a `Node` header (span, flags) plus a `NodeData` payload.
//! Children are referenced by `NodeIndex` into the owning `NodeArena`.

use super::base::{NodeIndex, NodeList};
use fillcheck_scanner::SyntaxKind;
use std::sync::Arc;

/// A syntax node stored in a `NodeArena`.
#[derive(Clone, Debug)]
pub struct Node {
    /// Start offset of the node's first token (trivia excluded).
    pub pos: u32,
    /// End offset (exclusive).
    pub end: u32,
    /// `node_flags` bits.
    pub flags: u16,
    pub data: NodeData,
}

impl Node {
    #[inline]
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }
}

/// Side table entry for a node.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

/// Arena owning every node of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub(crate) source_text: Arc<str>,
}

// =============================================================================
// Literals
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Numeric,
    BigInt,
    Boolean,
    Null,
    RegularExpression,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub kind: LiteralKind,
    /// Cooked value for strings, source text for everything else.
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// `` `a${x}b` `` is stored as quasis `["a", "b"]` and expressions `[x]`.
#[derive(Clone, Debug)]
pub struct TemplateLiteralData {
    pub quasis: Vec<String>,
    pub expressions: NodeList,
}

#[derive(Clone, Debug)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug)]
pub struct KeywordData {
    /// `this`, `super` or `import`.
    pub kind: SyntaxKind,
}

#[derive(Clone, Debug)]
pub struct MetaPropertyData {
    /// `new` or `import`.
    pub keyword: SyntaxKind,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ObjectLiteralData {
    pub properties: NodeList,
}

#[derive(Clone, Debug)]
pub struct ArrayLiteralData {
    /// Holes are `OmittedExpression` nodes.
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// `{ a }` or, as a destructuring target, `{ a = 1 }`.
#[derive(Clone, Debug)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
    pub default_value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ComputedPropertyData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SpreadData {
    pub expression: NodeIndex,
}

/// Shared by `CallExpression` and `NewExpression`.
#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    /// `None` for `new Foo` without an argument list.
    pub arguments: Option<NodeList>,
    pub question_dot: bool,
}

/// Shared by `PropertyAccess` and `ElementAccess`.
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    /// Name identifier for property access, argument expression for element access.
    pub name_or_argument: NodeIndex,
    pub question_dot: bool,
}

#[derive(Clone, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

/// Prefix and postfix operators, including `typeof`, `void`, `delete` and `await`.
#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct YieldData {
    pub expression: NodeIndex,
    pub asterisk: bool,
}

// =============================================================================
// Functions and classes
// =============================================================================

/// Shared by function declarations and expressions, arrows, methods,
/// accessors and constructors.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    /// A `Block`, or an expression for concise arrow bodies.
    pub body: NodeIndex,
    pub is_async: bool,
    pub asterisk: bool,
    pub is_static: bool,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub dot_dot_dot: bool,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: NodeIndex,
    /// `extends` expression.
    pub heritage: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct PropertyDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub is_static: bool,
}

// =============================================================================
// Binding patterns
// =============================================================================

#[derive(Clone, Debug)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct BindingElementData {
    /// `a` in `{ a: b }`; `NONE` for shorthand and array elements.
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub dot_dot_dot: bool,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub declaration_list: NodeIndex,
}

/// Node flags carry `node_flags::LET` / `node_flags::CONST`.
#[derive(Clone, Debug)]
pub struct VariableDeclarationListData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    /// Identifier or binding pattern.
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `for (init; cond; incr)`, `while (cond)` and `do ... while (cond)`.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// `return` and `throw`.
#[derive(Clone, Debug)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

/// `case expr:` or, with `expression == NONE`, `default:`.
#[derive(Clone, Debug)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

/// `break` and `continue`.
#[derive(Clone, Debug)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

// =============================================================================
// Modules
// =============================================================================

#[derive(Clone, Debug)]
pub struct ImportDeclData {
    /// `ImportSpecifier` nodes, one per local binding.
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
}

/// Covers default, namespace and named imports/exports.
#[derive(Clone, Debug)]
pub struct SpecifierData {
    /// Imported or exported name; `NONE` when it equals `name`.
    pub property_name: NodeIndex,
    /// Local name.
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportDeclData {
    /// Exported declaration, for `export const x = ...` and friends.
    pub declaration: NodeIndex,
    pub specifiers: NodeList,
    pub module_specifier: NodeIndex,
    pub is_default: bool,
}

#[derive(Clone, Debug)]
pub struct ExportAssignmentData {
    pub expression: NodeIndex,
}

// =============================================================================
// NodeData
// =============================================================================

/// Payload of a node; one variant per syntax kind.
#[derive(Clone, Debug)]
pub enum NodeData {
    SourceFile(SourceFileData),

    // Statements
    VariableStatement(VariableStatementData),
    VariableDeclarationList(VariableDeclarationListData),
    VariableDeclaration(VariableDeclarationData),
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    Block(BlockData),
    EmptyStatement,
    ExpressionStatement(ExpressionStatementData),
    IfStatement(IfStatementData),
    ForStatement(LoopData),
    ForInStatement(ForInOfData),
    ForOfStatement(ForInOfData),
    WhileStatement(LoopData),
    DoStatement(LoopData),
    ReturnStatement(ReturnData),
    ThrowStatement(ReturnData),
    TryStatement(TryData),
    CatchClause(CatchClauseData),
    SwitchStatement(SwitchData),
    CaseClause(CaseClauseData),
    BreakStatement(JumpData),
    ContinueStatement(JumpData),
    LabeledStatement(LabeledData),
    DebuggerStatement,
    ImportDeclaration(ImportDeclData),
    ImportSpecifier(SpecifierData),
    ExportDeclaration(ExportDeclData),
    ExportSpecifier(SpecifierData),
    ExportAssignment(ExportAssignmentData),

    // Expressions
    Identifier(IdentifierData),
    PrivateIdentifier(IdentifierData),
    Literal(LiteralData),
    TemplateLiteral(TemplateLiteralData),
    TaggedTemplate(TaggedTemplateData),
    Keyword(KeywordData),
    MetaProperty(MetaPropertyData),
    ObjectLiteral(ObjectLiteralData),
    ArrayLiteral(ArrayLiteralData),
    PropertyAssignment(PropertyAssignmentData),
    ShorthandPropertyAssignment(ShorthandPropertyData),
    ComputedPropertyName(ComputedPropertyData),
    SpreadElement(SpreadData),
    OmittedExpression,
    CallExpression(CallExprData),
    NewExpression(CallExprData),
    PropertyAccess(AccessExprData),
    ElementAccess(AccessExprData),
    FunctionExpression(FunctionData),
    ArrowFunction(FunctionData),
    ClassExpression(ClassData),
    Parenthesized(ParenthesizedData),
    Binary(BinaryExprData),
    PrefixUnary(UnaryExprData),
    PostfixUnary(UnaryExprData),
    Conditional(ConditionalExprData),
    Yield(YieldData),

    // Functions and classes
    Parameter(ParameterData),
    MethodDeclaration(FunctionData),
    GetAccessor(FunctionData),
    SetAccessor(FunctionData),
    Constructor(FunctionData),
    PropertyDeclaration(PropertyDeclarationData),
    ClassStaticBlock(BlockData),

    // Binding patterns
    ObjectBindingPattern(BindingPatternData),
    ArrayBindingPattern(BindingPatternData),
    BindingElement(BindingElementData),

    /// Placeholder produced by error recovery.
    Missing,
}

impl NodeData {
    /// Short kind name used in traces and test failure messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeData::SourceFile(_) => "SourceFile",
            NodeData::VariableStatement(_) => "VariableStatement",
            NodeData::VariableDeclarationList(_) => "VariableDeclarationList",
            NodeData::VariableDeclaration(_) => "VariableDeclaration",
            NodeData::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeData::ClassDeclaration(_) => "ClassDeclaration",
            NodeData::Block(_) => "Block",
            NodeData::EmptyStatement => "EmptyStatement",
            NodeData::ExpressionStatement(_) => "ExpressionStatement",
            NodeData::IfStatement(_) => "IfStatement",
            NodeData::ForStatement(_) => "ForStatement",
            NodeData::ForInStatement(_) => "ForInStatement",
            NodeData::ForOfStatement(_) => "ForOfStatement",
            NodeData::WhileStatement(_) => "WhileStatement",
            NodeData::DoStatement(_) => "DoStatement",
            NodeData::ReturnStatement(_) => "ReturnStatement",
            NodeData::ThrowStatement(_) => "ThrowStatement",
            NodeData::TryStatement(_) => "TryStatement",
            NodeData::CatchClause(_) => "CatchClause",
            NodeData::SwitchStatement(_) => "SwitchStatement",
            NodeData::CaseClause(_) => "CaseClause",
            NodeData::BreakStatement(_) => "BreakStatement",
            NodeData::ContinueStatement(_) => "ContinueStatement",
            NodeData::LabeledStatement(_) => "LabeledStatement",
            NodeData::DebuggerStatement => "DebuggerStatement",
            NodeData::ImportDeclaration(_) => "ImportDeclaration",
            NodeData::ImportSpecifier(_) => "ImportSpecifier",
            NodeData::ExportDeclaration(_) => "ExportDeclaration",
            NodeData::ExportSpecifier(_) => "ExportSpecifier",
            NodeData::ExportAssignment(_) => "ExportAssignment",
            NodeData::Identifier(_) => "Identifier",
            NodeData::PrivateIdentifier(_) => "PrivateIdentifier",
            NodeData::Literal(_) => "Literal",
            NodeData::TemplateLiteral(_) => "TemplateLiteral",
            NodeData::TaggedTemplate(_) => "TaggedTemplate",
            NodeData::Keyword(_) => "Keyword",
            NodeData::MetaProperty(_) => "MetaProperty",
            NodeData::ObjectLiteral(_) => "ObjectLiteral",
            NodeData::ArrayLiteral(_) => "ArrayLiteral",
            NodeData::PropertyAssignment(_) => "PropertyAssignment",
            NodeData::ShorthandPropertyAssignment(_) => "ShorthandPropertyAssignment",
            NodeData::ComputedPropertyName(_) => "ComputedPropertyName",
            NodeData::SpreadElement(_) => "SpreadElement",
            NodeData::OmittedExpression => "OmittedExpression",
            NodeData::CallExpression(_) => "CallExpression",
            NodeData::NewExpression(_) => "NewExpression",
            NodeData::PropertyAccess(_) => "PropertyAccess",
            NodeData::ElementAccess(_) => "ElementAccess",
            NodeData::FunctionExpression(_) => "FunctionExpression",
            NodeData::ArrowFunction(_) => "ArrowFunction",
            NodeData::ClassExpression(_) => "ClassExpression",
            NodeData::Parenthesized(_) => "Parenthesized",
            NodeData::Binary(_) => "Binary",
            NodeData::PrefixUnary(_) => "PrefixUnary",
            NodeData::PostfixUnary(_) => "PostfixUnary",
            NodeData::Conditional(_) => "Conditional",
            NodeData::Yield(_) => "Yield",
            NodeData::Parameter(_) => "Parameter",
            NodeData::MethodDeclaration(_) => "MethodDeclaration",
            NodeData::GetAccessor(_) => "GetAccessor",
            NodeData::SetAccessor(_) => "SetAccessor",
            NodeData::Constructor(_) => "Constructor",
            NodeData::PropertyDeclaration(_) => "PropertyDeclaration",
            NodeData::ClassStaticBlock(_) => "ClassStaticBlock",
            NodeData::ObjectBindingPattern(_) => "ObjectBindingPattern",
            NodeData::ArrayBindingPattern(_) => "ArrayBindingPattern",
            NodeData::BindingElement(_) => "BindingElement",
            NodeData::Missing => "Missing",
        }
    }

    /// True for nodes that introduce a function scope.
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            NodeData::FunctionDeclaration(_)
                | NodeData::FunctionExpression(_)
                | NodeData::ArrowFunction(_)
                | NodeData::MethodDeclaration(_)
                | NodeData::GetAccessor(_)
                | NodeData::SetAccessor(_)
                | NodeData::Constructor(_)
        )
    }
}

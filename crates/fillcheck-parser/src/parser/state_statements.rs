//! Parser state - statement and declaration parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_flags;
use super::state::{CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState};
use fillcheck_scanner::{SyntaxKind, token_is_identifier_or_keyword};

/// Modifiers that may precede a method name in classes and object literals.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MethodModifiers {
    pub is_async: bool,
    pub asterisk: bool,
    /// `GetKeyword` or `SetKeyword` for accessors.
    pub accessor: Option<SyntaxKind>,
}

impl ParserState {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Parse statements until `is_terminator` matches or the file ends.
    pub(crate) fn parse_statement_list(
        &mut self,
        is_terminator: impl Fn(SyntaxKind) -> bool,
    ) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) && !is_terminator(self.token()) {
            let pos_before = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            // Skip a token that no statement can start with
            if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_statement_expected();
                self.next_token();
            }
        }
        self.make_node_list(statements)
    }

    /// Parse a statement
    pub fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_node();
        }
        let statement = self.parse_statement_worker();
        self.leave_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.look_ahead_is_let_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => {
                let start = self.token_pos();
                self.parse_function_declaration(start, false)
            }
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                let start = self.token_pos();
                self.next_token();
                self.parse_function_declaration(start, true)
            }
            SyntaxKind::ClassKeyword => {
                let start = self.token_pos();
                self.parse_class(start, false)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => self.parse_jump_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::ImportKeyword if self.look_ahead_is_import_declaration() => {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            _ if self.is_identifier() && self.look_ahead_is_labeled_statement() => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    // =========================================================================
    // Look-ahead helpers
    // =========================================================================

    /// `let` starts a declaration when followed by a binding name or pattern.
    fn look_ahead_is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
            ) || p.is_identifier()
        })
    }

    /// `async function` with no line break in between.
    pub(crate) fn look_ahead_is_async_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::FunctionKeyword) && !p.has_preceding_line_break()
        })
    }

    /// `import x ...` as opposed to `import(...)` or `import.meta`.
    fn look_ahead_is_import_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !matches!(
                p.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::DotToken
            )
        })
    }

    fn look_ahead_is_labeled_statement(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(|token| token == SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::Block(BlockData { statements }))
    }

    fn parse_empty_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.finish_node(start, NodeData::EmptyStatement)
    }

    fn parse_debugger_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_semicolon();
        self.finish_node(start, NodeData::DebuggerStatement)
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ExpressionStatement(ExpressionStatementData { expression }),
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::LabeledStatement(LabeledData { label, statement }),
        )
    }

    fn parse_jump_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_break = self.is_token(SyntaxKind::BreakKeyword);
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let data = JumpData { label };
        if is_break {
            self.finish_node(start, NodeData::BreakStatement(data))
        } else {
            self.finish_node(start, NodeData::ContinueStatement(data))
        }
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.finish_node(start, NodeData::ReturnStatement(ReturnData { expression }))
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.finish_node(start, NodeData::ThrowStatement(ReturnData { expression }))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// `( expression )` in `if`, `while`, `switch` and friends.
    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::IfStatement(IfStatementData {
                expression,
                then_statement,
                else_statement,
            }),
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::WhileStatement(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        // `do ... while (x)` allows ASI even without a line break
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(
            start,
            NodeData::DoStatement(LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            }),
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let await_modifier = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let flags = self.context_flags | CONTEXT_FLAG_DISALLOW_IN;
        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_token(SyntaxKind::VarKeyword)
            || self.is_token(SyntaxKind::ConstKeyword)
            || (self.is_token(SyntaxKind::LetKeyword) && self.look_ahead_is_let_declaration())
        {
            self.with_context(flags, |p| p.parse_variable_declaration_list())
        } else {
            self.with_context(flags, |p| p.parse_expression())
        };

        if self.is_token(SyntaxKind::OfKeyword) || self.is_token(SyntaxKind::InKeyword) {
            let is_of = self.is_token(SyntaxKind::OfKeyword);
            self.next_token();
            let expression = if is_of {
                self.allow_in(|p| p.parse_assignment_expression())
            } else {
                self.allow_in(|p| p.parse_expression())
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            let data = ForInOfData {
                await_modifier,
                initializer,
                expression,
                statement,
            };
            return if is_of {
                self.finish_node(start, NodeData::ForOfStatement(data))
            } else {
                self.finish_node(start, NodeData::ForInStatement(data))
            };
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::ForStatement(LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            }),
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_start = self.token_pos();
            let expression = if self.parse_optional(SyntaxKind::CaseKeyword) {
                self.allow_in(|p| p.parse_expression())
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                NodeIndex::NONE
            } else {
                self.error_token_expected("case");
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_statement_list(|token| {
                matches!(
                    token,
                    SyntaxKind::CaseKeyword
                        | SyntaxKind::DefaultKeyword
                        | SyntaxKind::CloseBraceToken
                )
            });
            clauses.push(self.finish_node(
                clause_start,
                NodeData::CaseClause(CaseClauseData {
                    expression,
                    statements,
                }),
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let clauses = self.make_node_list(clauses);
        self.finish_node(
            start,
            NodeData::SwitchStatement(SwitchData {
                expression,
                clauses,
            }),
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let name = self.parse_binding_name();
                self.parse_expected(SyntaxKind::CloseParenToken);
                name
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.finish_node(
                catch_start,
                NodeData::CatchClause(CatchClauseData {
                    variable_declaration,
                    block,
                }),
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.error_token_expected("catch");
        }

        self.finish_node(
            start,
            NodeData::TryStatement(TryData {
                try_block,
                catch_clause,
                finally_block,
            }),
        )
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::VariableStatement(VariableStatementData { declaration_list }),
        )
    }

    /// Parse `var|let|const a = 1, b = 2` (without the terminating semicolon).
    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let declarations = self.make_node_list(declarations);
        self.finish_node_with_flags(
            start,
            flags,
            NodeData::VariableDeclarationList(VariableDeclarationListData { declarations }),
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        self.finish_node(
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { name, initializer }),
        )
    }

    /// `= expression`, or `NONE` when there is no `=`.
    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Binding names and patterns
    // =========================================================================

    /// Identifier, `{ ... }` pattern or `[ ... ]` pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element_start = self.token_pos();
            let element = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let name = self.parse_identifier();
                BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer: NodeIndex::NONE,
                    dot_dot_dot: true,
                }
            } else {
                let property = self.parse_property_name();
                let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
                    (property, self.parse_binding_name())
                } else {
                    (NodeIndex::NONE, property)
                };
                let initializer = self.parse_initializer();
                BindingElementData {
                    property_name,
                    name,
                    initializer,
                    dot_dot_dot: false,
                }
            };
            elements.push(self.finish_node(element_start, NodeData::BindingElement(element)));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let elements = self.make_node_list(elements);
        self.finish_node(
            start,
            NodeData::ObjectBindingPattern(BindingPatternData { elements }),
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                elements.push(self.create_omitted_expression());
                self.next_token();
                continue;
            }
            let element_start = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.parse_initializer();
            elements.push(self.finish_node(
                element_start,
                NodeData::BindingElement(BindingElementData {
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                    dot_dot_dot,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elements = self.make_node_list(elements);
        self.finish_node(
            start,
            NodeData::ArrayBindingPattern(BindingPatternData { elements }),
        )
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Parse `function [*] [name] (params) { body }`. The current token is
    /// `function`; any `async` has already been consumed.
    pub(crate) fn parse_function_declaration(&mut self, start: u32, is_async: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        // Name is optional for `export default function () {}`
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let (parameters, body) = self.parse_function_signature_and_body(is_async, asterisk);
        self.finish_node(
            start,
            NodeData::FunctionDeclaration(FunctionData {
                name,
                parameters,
                body,
                is_async,
                asterisk,
                is_static: false,
            }),
        )
    }

    /// Parameter list and block body, parsed in the function's own context.
    pub(crate) fn parse_function_signature_and_body(
        &mut self,
        is_async: bool,
        asterisk: bool,
    ) -> (NodeList, NodeIndex) {
        let flags = function_context_flags(is_async, asterisk);
        self.with_context(flags, |p| {
            let parameters = p.parse_parameter_list();
            let body = if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                p.error_token_expected("{");
                p.create_missing_node()
            };
            (parameters, body)
        })
    }

    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(parameters)
    }

    fn parse_parameter(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        self.finish_node(
            start,
            NodeData::Parameter(ParameterData {
                name,
                initializer,
                dot_dot_dot,
            }),
        )
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Parse a class declaration or expression. The current token is `class`.
    pub(crate) fn parse_class(&mut self, start: u32, is_expression: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let pos_before = self.token_pos();
            members.push(self.parse_class_member());
            if self.token_pos() == pos_before {
                self.error_identifier_expected();
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let data = ClassData {
            name,
            heritage,
            members: self.make_node_list(members),
        };
        if is_expression {
            self.finish_node(start, NodeData::ClassExpression(data))
        } else {
            self.finish_node(start, NodeData::ClassDeclaration(data))
        }
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_static =
            self.is_token(SyntaxKind::StaticKeyword) && self.look_ahead_is_class_modifier();
        if is_static {
            self.next_token();
            if self.parse_optional(SyntaxKind::OpenBraceToken) {
                let statements = self.with_context(0, |p| {
                    p.parse_statement_list(|token| token == SyntaxKind::CloseBraceToken)
                });
                self.parse_expected(SyntaxKind::CloseBraceToken);
                return self.finish_node(
                    start,
                    NodeData::ClassStaticBlock(BlockData { statements }),
                );
            }
        }

        let modifiers = self.parse_method_modifiers();
        let name = self.parse_property_name();

        if self.is_token(SyntaxKind::OpenParenToken) {
            let is_constructor = !is_static
                && self.arena.identifier_text(name) == Some("constructor")
                && modifiers.accessor.is_none();
            return self.parse_method_after_name(start, name, modifiers, is_static, is_constructor);
        }

        let initializer = self.with_context(0, |p| p.parse_initializer());
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::PropertyDeclaration(PropertyDeclarationData {
                name,
                initializer,
                is_static,
            }),
        )
    }

    /// `static` is a modifier unless it is itself the member name
    /// (`static() {}`, `static = 1`, `static;`).
    fn look_ahead_is_class_modifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !matches!(
                p.token(),
                SyntaxKind::OpenParenToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
            ) && !p.has_preceding_line_break()
        })
    }

    /// Parse `async`, `*`, `get` and `set` before a method name.
    pub(crate) fn parse_method_modifiers(&mut self) -> MethodModifiers {
        let mut modifiers = MethodModifiers::default();
        if self.is_token(SyntaxKind::AsyncKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_token(SyntaxKind::AsteriskToken) || p.is_property_name_start())
            })
        {
            modifiers.is_async = true;
            self.next_token();
        }
        if self.parse_optional(SyntaxKind::AsteriskToken) {
            modifiers.asterisk = true;
        }
        if !modifiers.is_async
            && !modifiers.asterisk
            && (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            modifiers.accessor = Some(self.token());
            self.next_token();
        }
        modifiers
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        ) || token_is_identifier_or_keyword(self.token())
    }

    /// Parse the parameters and body of a method whose name was just parsed.
    pub(crate) fn parse_method_after_name(
        &mut self,
        start: u32,
        name: NodeIndex,
        modifiers: MethodModifiers,
        is_static: bool,
        is_constructor: bool,
    ) -> NodeIndex {
        let (parameters, body) =
            self.parse_function_signature_and_body(modifiers.is_async, modifiers.asterisk);
        let data = FunctionData {
            name,
            parameters,
            body,
            is_async: modifiers.is_async,
            asterisk: modifiers.asterisk,
            is_static,
        };
        let node = match modifiers.accessor {
            Some(SyntaxKind::GetKeyword) => NodeData::GetAccessor(data),
            Some(_) => NodeData::SetAccessor(data),
            None if is_constructor => NodeData::Constructor(data),
            None => NodeData::MethodDeclaration(data),
        };
        self.finish_node(start, node)
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_import_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword);
        let mut specifiers = Vec::new();

        if !self.is_token(SyntaxKind::StringLiteral) {
            if self.is_identifier() {
                specifiers.push(self.parse_module_specifier(false, true));
                self.parse_optional(SyntaxKind::CommaToken);
            }

            if self.is_token(SyntaxKind::AsteriskToken) {
                let spec_start = self.token_pos();
                self.next_token();
                self.parse_expected(SyntaxKind::AsKeyword);
                let name = self.parse_identifier();
                specifiers.push(self.finish_node(
                    spec_start,
                    NodeData::ImportSpecifier(SpecifierData {
                        property_name: NodeIndex::NONE,
                        name,
                    }),
                ));
            } else if self.is_token(SyntaxKind::OpenBraceToken) {
                specifiers.extend(self.parse_named_specifiers(false));
            }
            self.parse_expected(SyntaxKind::FromKeyword);
        }

        let module_specifier = self.parse_module_name();
        self.parse_semicolon();
        let specifiers = self.make_node_list(specifiers);
        self.finish_node(
            start,
            NodeData::ImportDeclaration(ImportDeclData {
                specifiers,
                module_specifier,
            }),
        )
    }

    /// `{ a, b as c }` for imports and exports.
    fn parse_named_specifiers(&mut self, is_export: bool) -> Vec<NodeIndex> {
        let mut specifiers = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            specifiers.push(self.parse_module_specifier(is_export, false));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        specifiers
    }

    /// One import or export specifier. `name` is always the local binding.
    fn parse_module_specifier(&mut self, is_export: bool, is_default_import: bool) -> NodeIndex {
        let start = self.token_pos();
        let (property_name, name) = if is_default_import {
            (NodeIndex::NONE, self.parse_identifier())
        } else {
            let first = self.parse_module_export_name();
            if self.parse_optional(SyntaxKind::AsKeyword) {
                let second = if is_export {
                    self.parse_module_export_name()
                } else {
                    self.parse_identifier()
                };
                if is_export {
                    // export { local as exported }
                    (second, first)
                } else {
                    // import { imported as local }
                    (first, second)
                }
            } else {
                (NodeIndex::NONE, first)
            }
        };
        let data = SpecifierData {
            property_name,
            name,
        };
        if is_export {
            self.finish_node(start, NodeData::ExportSpecifier(data))
        } else {
            self.finish_node(start, NodeData::ImportSpecifier(data))
        }
    }

    /// Identifier, keyword or string used as an imported/exported name.
    fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            return self.parse_literal(LiteralKind::String);
        }
        self.parse_identifier_name()
    }

    fn parse_module_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal(LiteralKind::String)
        } else {
            self.error_token_expected("string literal");
            self.create_missing_node()
        }
    }

    fn parse_export_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ExportKeyword);

        if self.parse_optional(SyntaxKind::DefaultKeyword) {
            let declaration_start = self.token_pos();
            let declaration = match self.token() {
                SyntaxKind::FunctionKeyword => {
                    self.parse_function_declaration(declaration_start, false)
                }
                SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                    self.next_token();
                    self.parse_function_declaration(declaration_start, true)
                }
                SyntaxKind::ClassKeyword => self.parse_class(declaration_start, false),
                _ => {
                    let expression = self.allow_in(|p| p.parse_assignment_expression());
                    self.parse_semicolon();
                    return self.finish_node(
                        start,
                        NodeData::ExportAssignment(ExportAssignmentData { expression }),
                    );
                }
            };
            return self.finish_node(
                start,
                NodeData::ExportDeclaration(ExportDeclData {
                    declaration,
                    specifiers: NodeList::new(),
                    module_specifier: NodeIndex::NONE,
                    is_default: true,
                }),
            );
        }

        let mut specifiers = Vec::new();
        let mut module_specifier = NodeIndex::NONE;
        let mut declaration = NodeIndex::NONE;
        if self.is_token(SyntaxKind::AsteriskToken) {
            let spec_start = self.token_pos();
            self.next_token();
            if self.parse_optional(SyntaxKind::AsKeyword) {
                let name = self.parse_module_export_name();
                specifiers.push(self.finish_node(
                    spec_start,
                    NodeData::ExportSpecifier(SpecifierData {
                        property_name: NodeIndex::NONE,
                        name,
                    }),
                ));
            }
            self.parse_expected(SyntaxKind::FromKeyword);
            module_specifier = self.parse_module_name();
            self.parse_semicolon();
        } else if self.is_token(SyntaxKind::OpenBraceToken) {
            specifiers = self.parse_named_specifiers(true);
            if self.parse_optional(SyntaxKind::FromKeyword) {
                module_specifier = self.parse_module_name();
            }
            self.parse_semicolon();
        } else {
            declaration = self.parse_statement();
        }

        let specifiers = self.make_node_list(specifiers);
        self.finish_node(
            start,
            NodeData::ExportDeclaration(ExportDeclData {
                declaration,
                specifiers,
                module_specifier,
                is_default: false,
            }),
        )
    }

    /// Run `f` with `in` allowed as a binary operator.
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        self.with_context(flags, f)
    }
}

/// Context flags for a function body.
pub(crate) fn function_context_flags(is_async: bool, asterisk: bool) -> u32 {
    let mut flags = 0;
    if is_async {
        flags |= CONTEXT_FLAG_ASYNC;
    }
    if asterisk {
        flags |= CONTEXT_FLAG_GENERATOR;
    }
    flags
}

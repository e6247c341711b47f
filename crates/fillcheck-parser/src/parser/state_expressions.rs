//! Parser state - expression parsing methods

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState};
use super::state_statements::function_context_flags;
use fillcheck_scanner::{
    SyntaxKind, token_is_assignment_operator, token_is_contextual_keyword,
    token_is_identifier_or_keyword,
};

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Parse an expression (including comma operator)
    pub fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            left = self.finish_node(
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken,
                    right,
                }),
            );
        }
        left
    }

    /// Parse assignment expression
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_node();
        }
        let expression = self.parse_assignment_expression_worker();
        self.leave_recursion();
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_start_of_arrow_function() {
            // `async => x` is a plain arrow whose parameter is named `async`
            if self.is_token(SyntaxKind::AsyncKeyword)
                && !self.look_ahead_is_simple_arrow_function()
            {
                return self.parse_arrow_function(true);
            }
            return self.parse_arrow_function(false);
        }

        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }

        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        if token_is_assignment_operator(self.token()) {
            let operator_token = self.token();
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.finish_node(
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator_token,
                    right,
                }),
            );
        }
        left
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(1);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.allow_in(|p| p.parse_assignment_expression());
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.finish_node(
            start,
            NodeData::Conditional(ConditionalExprData {
                condition,
                when_true,
                when_false,
            }),
        )
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let asterisk = !self.has_preceding_line_break()
            && self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if asterisk
            || (!self.has_preceding_line_break() && self.is_start_of_expression())
        {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(start, NodeData::Yield(YieldData { expression, asterisk }))
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Check if we're at the start of an arrow function
    pub(crate) fn is_start_of_arrow_function(&mut self) -> bool {
        match self.token() {
            SyntaxKind::OpenParenToken => {
                self.look_ahead(|p| p.skip_parenthesized_arrow_parameters())
            }
            SyntaxKind::AsyncKeyword => self.look_ahead(|p| {
                p.next_token();
                if p.has_preceding_line_break() {
                    return false;
                }
                match p.token() {
                    // async => x
                    SyntaxKind::EqualsGreaterThanToken => true,
                    SyntaxKind::OpenParenToken => p.skip_parenthesized_arrow_parameters(),
                    _ if p.is_identifier() => {
                        p.next_token();
                        !p.has_preceding_line_break()
                            && p.is_token(SyntaxKind::EqualsGreaterThanToken)
                    }
                    _ => false,
                }
            }),
            _ if self.is_identifier() => self.look_ahead_is_simple_arrow_function(),
            _ => false,
        }
    }

    /// Identifier immediately followed by `=>` on the same line.
    fn look_ahead_is_simple_arrow_function(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_token(SyntaxKind::EqualsGreaterThanToken)
        })
    }

    /// Skip a balanced `( ... )` group and report whether `=>` follows on the
    /// same line. Only used inside `look_ahead`.
    fn skip_parenthesized_arrow_parameters(&mut self) -> bool {
        let mut stack: Vec<SyntaxKind> = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::TemplateHead => stack.push(self.token()),
                SyntaxKind::CloseBraceToken
                    if stack.last() == Some(&SyntaxKind::TemplateHead) =>
                {
                    if self.re_scan_template_token() != SyntaxKind::TemplateMiddle {
                        stack.pop();
                    }
                }
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    stack.pop();
                    if stack.is_empty() {
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => return false,
                _ => {}
            }
            self.next_token();
        }
        self.next_token();
        !self.has_preceding_line_break() && self.is_token(SyntaxKind::EqualsGreaterThanToken)
    }

    /// Parse `x => body`, `(params) => body` or, with `is_async`,
    /// `async x => body` / `async (params) => body`.
    fn parse_arrow_function(&mut self, is_async: bool) -> NodeIndex {
        let start = self.token_pos();
        if is_async {
            self.next_token();
        }
        let flags = function_context_flags(is_async, false);
        let parameters = if self.is_token(SyntaxKind::OpenParenToken) {
            self.with_context(flags, |p| p.parse_parameter_list())
        } else {
            let param_start = self.token_pos();
            let name = self.parse_identifier();
            let parameter = self.finish_node(
                param_start,
                NodeData::Parameter(ParameterData {
                    name,
                    initializer: NodeIndex::NONE,
                    dot_dot_dot: false,
                }),
            );
            self.make_node_list(vec![parameter])
        };
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        // Concise bodies keep the caller's `in` restriction
        let body_flags = flags | (self.context_flags & CONTEXT_FLAG_DISALLOW_IN);
        let body = self.with_context(body_flags, |p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                p.allow_in(|p| p.parse_block())
            } else {
                p.parse_assignment_expression()
            }
        });

        self.finish_node(
            start,
            NodeData::ArrowFunction(FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                is_async,
                asterisk: false,
                is_static: false,
            }),
        )
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    /// Binding power of a binary operator; 0 means "not a binary operator".
    fn binary_operator_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::BarToken => 3,
            SyntaxKind::CaretToken => 4,
            SyntaxKind::AmpersandToken => 5,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 6,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword => 7,
            SyntaxKind::InKeyword if !self.in_context(CONTEXT_FLAG_DISALLOW_IN) => 7,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
            SyntaxKind::AsteriskAsteriskToken => 11,
            _ => 0,
        }
    }

    /// Precedence climbing over binary operators binding at least as tightly
    /// as `min_precedence`.
    pub(crate) fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_node();
        }

        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator_token = self.token();
            let precedence = self.binary_operator_precedence(operator_token);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.next_token();
            // `**` is right-associative
            let next_min = if operator_token == SyntaxKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_min);
            left = self.finish_node(
                start,
                NodeData::Binary(BinaryExprData {
                    left,
                    operator_token,
                    right,
                }),
            );
        }

        self.leave_recursion();
        left
    }

    pub(crate) fn parse_unary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => self.parse_prefix_unary_expression(),
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.parse_prefix_unary_expression()
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_prefix_unary_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.create_missing_node();
        }
        let start = self.token_pos();
        let operator = self.token();
        self.next_token();
        let operand = self.parse_unary_expression();
        self.leave_recursion();
        self.finish_node(
            start,
            NodeData::PrefixUnary(UnaryExprData { operator, operand }),
        )
    }

    /// `await` is an operator in async functions, and at the top level when
    /// an operand follows on the same line.
    fn is_await_expression(&mut self) -> bool {
        if self.in_context(CONTEXT_FLAG_ASYNC) {
            return true;
        }
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && p.is_start_of_unary_operand()
        })
    }

    fn is_start_of_unary_operand(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateHead
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::ImportKeyword
        ) || self.is_identifier()
    }

    /// True when the current token can begin an expression.
    pub(crate) fn is_start_of_expression(&self) -> bool {
        self.is_start_of_unary_operand()
            || matches!(
                self.token(),
                SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::SlashToken
                    | SyntaxKind::SlashEqualsToken
                    | SyntaxKind::DotDotDotToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        if (self.is_token(SyntaxKind::PlusPlusToken) || self.is_token(SyntaxKind::MinusMinusToken))
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            return self.finish_node(
                start,
                NodeData::PostfixUnary(UnaryExprData { operator, operand }),
            );
        }
        operand
    }

    // =========================================================================
    // Left-hand-side expressions
    // =========================================================================

    /// Member accesses, calls, `new` and tagged templates.
    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = match self.token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => self.parse_primary_expression(),
        };
        self.parse_member_expression_rest(start, expression, true)
    }

    /// Apply `.name`, `?.`, `[index]`, tagged templates and (with
    /// `allow_calls`) argument lists to `expression`.
    fn parse_member_expression_rest(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            expression = match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    self.finish_node(
                        start,
                        NodeData::PropertyAccess(AccessExprData {
                            expression,
                            name_or_argument: name,
                            question_dot: false,
                        }),
                    )
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    if self.is_token(SyntaxKind::OpenParenToken) {
                        let arguments = self.parse_argument_list();
                        self.finish_node(
                            start,
                            NodeData::CallExpression(CallExprData {
                                expression,
                                arguments: Some(arguments),
                                question_dot: true,
                            }),
                        )
                    } else if self.parse_optional(SyntaxKind::OpenBracketToken) {
                        let argument = self.allow_in(|p| p.parse_expression());
                        self.parse_expected(SyntaxKind::CloseBracketToken);
                        self.finish_node(
                            start,
                            NodeData::ElementAccess(AccessExprData {
                                expression,
                                name_or_argument: argument,
                                question_dot: true,
                            }),
                        )
                    } else {
                        let name = self.parse_member_name();
                        self.finish_node(
                            start,
                            NodeData::PropertyAccess(AccessExprData {
                                expression,
                                name_or_argument: name,
                                question_dot: true,
                            }),
                        )
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let argument = self.allow_in(|p| p.parse_expression());
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    self.finish_node(
                        start,
                        NodeData::ElementAccess(AccessExprData {
                            expression,
                            name_or_argument: argument,
                            question_dot: false,
                        }),
                    )
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = self.parse_template_literal();
                    self.finish_node(
                        start,
                        NodeData::TaggedTemplate(TaggedTemplateData {
                            tag: expression,
                            template,
                        }),
                    )
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_argument_list();
                    self.finish_node(
                        start,
                        NodeData::CallExpression(CallExprData {
                            expression,
                            arguments: Some(arguments),
                            question_dot: false,
                        }),
                    )
                }
                _ => return expression,
            };
        }
    }

    /// Property name after `.` or `?.`: any identifier, keyword or `#private`.
    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            return self.parse_private_identifier();
        }
        self.parse_identifier_name()
    }

    pub(crate) fn parse_argument_list(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                arguments.push(p.parse_spread_or_assignment());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let start = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(SpreadData { expression }));
        }
        self.parse_assignment_expression()
    }

    /// Parse `new Callee`, `new Callee(args)` or `new.target`.
    pub(crate) fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);

        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::NewKeyword,
                    name,
                }),
            );
        }

        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let expression = self.parse_member_expression_rest(callee_start, callee, false);
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.finish_node(
            start,
            NodeData::NewExpression(CallExprData {
                expression,
                arguments,
                question_dot: false,
            }),
        )
    }

    /// `import(...)` callee or `import.meta`.
    fn parse_import_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                start,
                NodeData::MetaProperty(MetaPropertyData {
                    keyword: SyntaxKind::ImportKeyword,
                    name,
                }),
            );
        }
        self.finish_node(
            start,
            NodeData::Keyword(KeywordData {
                kind: SyntaxKind::ImportKeyword,
            }),
        )
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::AsyncKeyword if self.look_ahead_is_async_function() => {
                self.parse_function_expression()
            }
            _ if self.is_identifier() => self.parse_identifier(),
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            SyntaxKind::NumericLiteral => self.parse_literal(LiteralKind::Numeric),
            SyntaxKind::BigIntLiteral => self.parse_literal(LiteralKind::BigInt),
            SyntaxKind::StringLiteral => self.parse_literal(LiteralKind::String),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.parse_literal(LiteralKind::Boolean)
            }
            SyntaxKind::NullKeyword => self.parse_literal(LiteralKind::Null),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                if self.re_scan_slash_token() == SyntaxKind::RegularExpressionLiteral {
                    self.parse_literal(LiteralKind::RegularExpression)
                } else {
                    self.error_expression_expected();
                    self.create_missing_node()
                }
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword => {
                let start = self.token_pos();
                let kind = self.token();
                self.next_token();
                self.finish_node(start, NodeData::Keyword(KeywordData { kind }))
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::ClassKeyword => {
                let start = self.token_pos();
                self.parse_class(start, true)
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => {
                self.error_expression_expected();
                self.create_missing_node()
            }
        }
    }

    /// True for identifiers and contextual keywords usable as identifiers.
    pub(crate) fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword => !self.in_context(CONTEXT_FLAG_GENERATOR),
            SyntaxKind::AwaitKeyword => !self.in_context(CONTEXT_FLAG_ASYNC),
            kind => token_is_contextual_keyword(kind),
        }
    }

    /// Parse an identifier in binding or reference position.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.error_identifier_expected();
            return self.create_missing_node();
        }
        self.parse_identifier_unchecked()
    }

    /// Parse an identifier where reserved words are allowed (property names).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !token_is_identifier_or_keyword(self.token()) {
            self.error_identifier_expected();
            return self.create_missing_node();
        }
        self.parse_identifier_unchecked()
    }

    fn parse_identifier_unchecked(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let escaped_text = self.token_value();
        self.next_token();
        self.finish_node(start, NodeData::Identifier(IdentifierData { escaped_text }))
    }

    fn parse_private_identifier(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let escaped_text = self.token_value();
        self.next_token();
        self.finish_node(
            start,
            NodeData::PrivateIdentifier(IdentifierData { escaped_text }),
        )
    }

    /// Parse the current token as a literal of `kind`.
    pub(crate) fn parse_literal(&mut self, kind: LiteralKind) -> NodeIndex {
        let start = self.token_pos();
        let text = match kind {
            LiteralKind::String => self.token_value(),
            _ => self.token_text(),
        };
        self.next_token();
        self.finish_node(start, NodeData::Literal(LiteralData { kind, text }))
    }

    /// Parse a template literal starting at a `NoSubstitutionTemplateLiteral`
    /// or `TemplateHead` token.
    fn parse_template_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut quasis = vec![self.token_value()];
        let mut expressions = Vec::new();

        let mut terminated = true;
        if self.is_token(SyntaxKind::TemplateHead) {
            self.next_token();
            loop {
                expressions.push(self.allow_in(|p| p.parse_expression()));
                if !self.is_token(SyntaxKind::CloseBraceToken) {
                    self.error_token_expected("}");
                    terminated = false;
                    break;
                }
                let kind = self.re_scan_template_token();
                quasis.push(self.token_value());
                if kind != SyntaxKind::TemplateMiddle {
                    break;
                }
                self.next_token();
            }
        }
        if terminated {
            self.next_token();
        }

        let expressions = self.make_node_list(expressions);
        self.finish_node(
            start,
            NodeData::TemplateLiteral(TemplateLiteralData {
                quasis,
                expressions,
            }),
        )
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(start, NodeData::Parenthesized(ParenthesizedData { expression }))
    }

    pub(crate) fn create_omitted_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_node(pos, pos, 0, NodeData::OmittedExpression)
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.is_token(SyntaxKind::CommaToken) {
                    elements.push(p.create_omitted_expression());
                    p.next_token();
                    continue;
                }
                elements.push(p.parse_spread_or_assignment());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elements = self.make_node_list(elements);
        self.finish_node(start, NodeData::ArrayLiteral(ArrayLiteralData { elements }))
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut properties = Vec::new();
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                properties.push(p.parse_object_literal_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let properties = self.make_node_list(properties);
        self.finish_node(
            start,
            NodeData::ObjectLiteral(ObjectLiteralData { properties }),
        )
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(SpreadData { expression }));
        }

        let modifiers = self.parse_method_modifiers();
        let name = self.parse_property_name();

        if self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_method_after_name(start, name, modifiers, false, false);
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return self.finish_node(
                start,
                NodeData::PropertyAssignment(PropertyAssignmentData { name, initializer }),
            );
        }

        // Shorthand `{ a }`, or `{ a = 1 }` as a destructuring target
        let default_value = self.parse_initializer();
        self.finish_node(
            start,
            NodeData::ShorthandPropertyAssignment(ShorthandPropertyData {
                name,
                default_value,
            }),
        )
    }

    /// Property name in object literals, classes and binding patterns.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral => self.parse_literal(LiteralKind::String),
            SyntaxKind::NumericLiteral => self.parse_literal(LiteralKind::Numeric),
            SyntaxKind::BigIntLiteral => self.parse_literal(LiteralKind::BigInt),
            SyntaxKind::PrivateIdentifier => self.parse_private_identifier(),
            SyntaxKind::OpenBracketToken => {
                let start = self.token_pos();
                self.next_token();
                let expression = self.allow_in(|p| p.parse_assignment_expression());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.finish_node(
                    start,
                    NodeData::ComputedPropertyName(ComputedPropertyData { expression }),
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    /// Parse `[async] function [*] [name] (params) { body }` in expression
    /// position.
    fn parse_function_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        // The name of a generator/async function expression follows the
        // function's own context
        let flags = function_context_flags(is_async, asterisk);
        let name = if self.with_context(flags, |p| p.is_identifier()) {
            self.parse_identifier_unchecked()
        } else {
            NodeIndex::NONE
        };
        let (parameters, body) = self.parse_function_signature_and_body(is_async, asterisk);
        self.finish_node(
            start,
            NodeData::FunctionExpression(FunctionData {
                name,
                parameters,
                body,
                is_async,
                asterisk,
                is_static: false,
            }),
        )
    }
}

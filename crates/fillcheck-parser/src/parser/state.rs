//! Parser state: token cursor, diagnostics, context flags and recursion guard.
//!
//! Statement parsing lives in `state_statements.rs`, expression parsing in
//! `state_expressions.rs`.

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, NodeData, SourceFileData};
use fillcheck_common::diagnostics::{
    Diagnostic, diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};
use fillcheck_common::limits::MAX_PARSER_RECURSION_DEPTH;
use fillcheck_scanner::scanner_impl::{ScannerSnapshot, ScannerState};
use fillcheck_scanner::{SyntaxKind, token_to_display_text};
use std::sync::Arc;
use tracing::debug;

/// Inside an `async` function body.
pub const CONTEXT_FLAG_ASYNC: u32 = 1 << 0;
/// Inside a generator body.
pub const CONTEXT_FLAG_GENERATOR: u32 = 1 << 1;
/// `in` is not a binary operator (for-statement initializers).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 2;

/// Cursor position saved for speculative parsing.
struct ParserSnapshot {
    scanner: ScannerSnapshot,
    current_token: SyntaxKind,
    last_token_end: u32,
    diagnostics_len: usize,
}

/// Recursive-descent JavaScript parser producing a `NodeArena`.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End of the previously consumed token; nodes end here.
    last_token_end: u32,
    pub(crate) context_flags: u32,
    parse_diagnostics: Vec<Diagnostic>,
    /// Position of the last reported error, used to suppress cascades.
    last_error_pos: Option<u32>,
    recursion_depth: u32,
    reported_nesting: bool,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let capacity = source_text.len() / 4;
        let source: Arc<str> = Arc::from(source_text.as_str());
        let mut arena = NodeArena::with_capacity(capacity);
        arena.set_source_text(source);
        ParserState {
            scanner: ScannerState::new(source_text, true),
            arena,
            file_name,
            current_token: SyntaxKind::Unknown,
            last_token_end: 0,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            last_error_pos: None,
            recursion_depth: 0,
            reported_nesting: false,
        }
    }

    /// Parse the whole file and return the `SourceFile` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        debug!(file = %self.file_name, "parsing source file");
        self.next_token();
        let statements = self.parse_statement_list(|token| token == SyntaxKind::EndOfFileToken);
        self.collect_scanner_errors();
        let end = self.scanner.text().len() as u32;
        let source_file = self.arena.add_node(
            0,
            end,
            0,
            NodeData::SourceFile(SourceFileData {
                file_name: self.file_name.clone(),
                statements,
            }),
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        source_file
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.parse_diagnostics)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    /// End offset of the last consumed token.
    #[inline]
    pub(crate) fn node_end(&self) -> u32 {
        self.last_token_end
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.get_token_value().to_string()
    }

    pub(crate) fn token_text(&self) -> String {
        self.scanner.get_token_text().to_string()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Advance to the next token and return it.
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_token_end = self.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub(crate) fn re_scan_slash_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_slash_token();
        self.current_token
    }

    /// Re-scan a `}` as the continuation of a template literal.
    pub(crate) fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.re_scan_template_token();
        self.current_token
    }

    /// Consume `kind` or report `'x' expected.`.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        self.error_token_expected(token_to_display_text(kind));
        false
    }

    /// Consume `kind` if it is the current token.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            return true;
        }
        false
    }

    /// True when a statement may end here (explicit `;` or automatic
    /// semicolon insertion).
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.can_parse_semicolon() {
            self.parse_optional(SyntaxKind::SemicolonToken);
            return true;
        }
        self.error_token_expected(";");
        false
    }

    /// Run `f` speculatively; the cursor and diagnostics are restored
    /// afterwards. `f` must not create nodes.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.save_state();
        let result = f(self);
        self.restore_state(snapshot);
        result
    }

    fn save_state(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            current_token: self.current_token,
            last_token_end: self.last_token_end,
            diagnostics_len: self.parse_diagnostics.len(),
        }
    }

    fn restore_state(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.current_token = snapshot.current_token;
        self.last_token_end = snapshot.last_token_end;
        self.parse_diagnostics.truncate(snapshot.diagnostics_len);
    }

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `flags` set as the complete context, restoring the old
    /// context afterwards.
    pub(crate) fn with_context<T>(&mut self, flags: u32, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags = flags;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    // =========================================================================
    // Node helpers
    // =========================================================================

    #[inline]
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.node_end().max(start);
        self.arena.add_node(start, end, 0, data)
    }

    #[inline]
    pub(crate) fn finish_node_with_flags(
        &mut self,
        start: u32,
        flags: u16,
        data: NodeData,
    ) -> NodeIndex {
        let end = self.node_end().max(start);
        self.arena.add_node(start, end, flags, data)
    }

    /// Zero-width placeholder for a missing expression or statement.
    pub(crate) fn create_missing_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_node(pos, pos, 0, NodeData::Missing)
    }

    pub(crate) fn make_node_list(&self, nodes: Vec<NodeIndex>) -> NodeList {
        NodeList::from(nodes)
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter one nesting level. Returns false (after reporting once) when the
    /// nesting limit is reached; the caller must then not call
    /// `leave_recursion`.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            if !self.reported_nesting {
                self.reported_nesting = true;
                let start = self.token_pos();
                let length = self.token_end().saturating_sub(start);
                self.parse_error_at(
                    start,
                    length,
                    diagnostic_messages::NESTING_TOO_DEEP,
                    diagnostic_codes::NESTING_TOO_DEEP,
                );
            }
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn leave_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record a parse error, dropping repeats at the same position.
    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(Diagnostic::error(
            self.file_name.clone(),
            start,
            length,
            message.to_string(),
            code,
        ));
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn error_token_expected(&mut self, token: &str) {
        let message = format_message(diagnostic_messages::EXPECTED, &[token]);
        self.parse_error_at_current_token(&message, diagnostic_codes::EXPECTED);
    }

    pub(crate) fn error_expression_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::EXPRESSION_EXPECTED,
            diagnostic_codes::EXPRESSION_EXPECTED,
        );
    }

    pub(crate) fn error_identifier_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
    }

    pub(crate) fn error_statement_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
            diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        );
    }

    /// Convert lexical errors into parse diagnostics, ordered by position.
    fn collect_scanner_errors(&mut self) {
        let errors = self.scanner.take_errors();
        if errors.is_empty() {
            return;
        }
        for error in errors {
            let message = get_message_template(error.code).unwrap_or("Invalid token.");
            self.parse_diagnostics.push(Diagnostic::error(
                self.file_name.clone(),
                error.start,
                error.length,
                message.to_string(),
                error.code,
            ));
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }
}

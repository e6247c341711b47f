//! Scanner implementation - the tokenizer state machine.
//!
//! The scanner is driven by the parser one token at a time. Context-sensitive
//! tokens are handled the same way the TypeScript scanner does it: the scanner
//! always produces `/` or `}` first, and the parser asks for a re-scan as a
//! regular expression or template continuation when the grammar expects one.

use bitflags::bitflags;
use fillcheck_common::diagnostics::diagnostic_codes;

use crate::syntax_kind::{SyntaxKind, text_to_keyword, text_to_punctuation};

bitflags! {
    /// Per-token facts recorded while scanning.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u32 {
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED = 1 << 1;
        const SCIENTIFIC = 1 << 2;
        const HEX_SPECIFIER = 1 << 3;
        const BINARY_SPECIFIER = 1 << 4;
        const OCTAL_SPECIFIER = 1 << 5;
        const CONTAINS_SEPARATOR = 1 << 6;
    }
}

/// A lexical error found while scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerError {
    pub code: u32,
    pub start: u32,
    pub length: u32,
}

/// Saved scanner position for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    error_count: usize,
}

pub struct ScannerState {
    text: String,
    skip_trivia: bool,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    errors: Vec<ScannerError>,
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}'
    ) || ('\u{2000}'..='\u{200A}').contains(&ch)
}

pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '$' || ch == '_' || (!ch.is_ascii() && ch.is_alphabetic())
}

pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

impl ScannerState {
    pub fn new(text: String, skip_trivia: bool) -> Self {
        ScannerState {
            text,
            skip_trivia,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, excluding leading trivia.
    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    /// Start of the current token, including leading trivia.
    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked value of the current token (escape sequences resolved).
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    pub fn errors(&self) -> &[ScannerError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ScannerError> {
        std::mem::take(&mut self.errors)
    }

    // =========================================================================
    // Lookahead support
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            error_count: self.errors.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.errors.truncate(snapshot.error_count);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn current(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        let rest = self.text.get(self.pos..)?;
        rest.chars().nth(offset)
    }

    fn advance_char(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&mut self, code: u32, start: usize, length: usize) {
        self.errors.push(ScannerError {
            code,
            start: start as u32,
            length: length as u32,
        });
    }

    fn finish(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.token = kind;
        kind
    }

    // =========================================================================
    // Main scan loop
    // =========================================================================

    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::empty();

        loop {
            self.token_start = self.pos;
            self.token_value.clear();

            let Some(ch) = self.current() else {
                return self.finish(SyntaxKind::EndOfFileToken);
            };

            match ch {
                _ if is_line_break(ch) => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += ch.len_utf8();
                    if ch == '\r' && self.current() == Some('\n') {
                        self.pos += 1;
                    }
                    if self.skip_trivia {
                        continue;
                    }
                    return self.finish(SyntaxKind::NewLineTrivia);
                }
                _ if is_white_space_single_line(ch) => {
                    while self.current().is_some_and(is_white_space_single_line) {
                        self.advance_char();
                    }
                    if self.skip_trivia {
                        continue;
                    }
                    return self.finish(SyntaxKind::WhitespaceTrivia);
                }
                '#' if self.pos == 0 && self.peek(1) == Some('!') => {
                    self.skip_to_line_end();
                    if self.skip_trivia {
                        continue;
                    }
                    return self.finish(SyntaxKind::ShebangTrivia);
                }
                '/' if self.peek(1) == Some('/') => {
                    self.skip_to_line_end();
                    if self.skip_trivia {
                        continue;
                    }
                    return self.finish(SyntaxKind::SingleLineCommentTrivia);
                }
                '/' if self.peek(1) == Some('*') => {
                    self.scan_multi_line_comment();
                    if self.skip_trivia {
                        continue;
                    }
                    return self.finish(SyntaxKind::MultiLineCommentTrivia);
                }
                '"' | '\'' => return self.scan_string(ch),
                '`' => {
                    self.pos += 1;
                    return self.scan_template(true);
                }
                '0'..='9' => return self.scan_number(),
                '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => {
                    return self.scan_number();
                }
                '#' => return self.scan_private_identifier(),
                _ if is_identifier_start(ch) => return self.scan_identifier(),
                '\\' => {
                    // Unicode escapes in identifiers are not supported
                    self.pos += 1;
                    self.error(diagnostic_codes::INVALID_CHARACTER, self.token_start, 1);
                    return self.finish(SyntaxKind::Unknown);
                }
                _ => {
                    if let Some(kind) = self.scan_punctuation() {
                        return self.finish(kind);
                    }
                    self.advance_char();
                    self.error(
                        diagnostic_codes::INVALID_CHARACTER,
                        self.token_start,
                        ch.len_utf8(),
                    );
                    return self.finish(SyntaxKind::Unknown);
                }
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while let Some(ch) = self.current() {
            if is_line_break(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_multi_line_comment(&mut self) {
        self.pos += 2;
        let rest = &self.text[self.pos..];
        match rest.find("*/") {
            Some(close) => {
                if rest[..close].chars().any(is_line_break) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.pos += close + 2;
            }
            None => {
                if rest.chars().any(is_line_break) {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                }
                self.pos = self.text.len();
                self.error(diagnostic_codes::ASTERISK_SLASH_EXPECTED, self.pos, 0);
            }
        }
    }

    fn scan_punctuation(&mut self) -> Option<SyntaxKind> {
        for len in (1..=4).rev() {
            let Some(slice) = self.text.get(self.pos..self.pos + len) else {
                continue;
            };
            let Some(kind) = text_to_punctuation(slice) else {
                continue;
            };
            // `a?.5:b` is a conditional, not optional chaining
            if kind == SyntaxKind::QuestionDotToken
                && self.peek(2).is_some_and(|c| c.is_ascii_digit())
            {
                continue;
            }
            self.pos += len;
            return Some(kind);
        }
        None
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while self.current().is_some_and(is_identifier_part) {
            self.advance_char();
        }
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        let kind = text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier);
        self.finish(kind)
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        self.pos += 1;
        if !self.current().is_some_and(is_identifier_start) {
            self.error(diagnostic_codes::INVALID_CHARACTER, self.token_start, 1);
            return self.finish(SyntaxKind::Unknown);
        }
        while self.current().is_some_and(is_identifier_part) {
            self.advance_char();
        }
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        self.finish(SyntaxKind::PrivateIdentifier)
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn scan_digits(&mut self, is_digit: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if is_digit(ch) {
                count += 1;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let radix_flag = match (self.current(), self.peek(1)) {
            (Some('0'), Some('x' | 'X')) => Some((TokenFlags::HEX_SPECIFIER, 16)),
            (Some('0'), Some('o' | 'O')) => Some((TokenFlags::OCTAL_SPECIFIER, 8)),
            (Some('0'), Some('b' | 'B')) => Some((TokenFlags::BINARY_SPECIFIER, 2)),
            _ => None,
        };

        if let Some((flag, radix)) = radix_flag {
            self.pos += 2;
            self.token_flags |= flag;
            if self.scan_digits(|c| c.is_digit(radix)) == 0 {
                self.error(diagnostic_codes::DIGIT_EXPECTED, self.pos, 0);
            }
        } else {
            self.scan_digits(|c| c.is_ascii_digit());
            if self.current() == Some('.') {
                self.pos += 1;
                self.scan_digits(|c| c.is_ascii_digit());
            }
            if matches!(self.current(), Some('e' | 'E')) {
                self.pos += 1;
                self.token_flags |= TokenFlags::SCIENTIFIC;
                if matches!(self.current(), Some('+' | '-')) {
                    self.pos += 1;
                }
                if self.scan_digits(|c| c.is_ascii_digit()) == 0 {
                    self.error(diagnostic_codes::DIGIT_EXPECTED, self.pos, 0);
                }
            }
        }

        let kind = if self.current() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        self.finish(kind)
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        loop {
            let Some(ch) = self.current() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.unterminated(diagnostic_codes::UNTERMINATED_STRING_LITERAL);
                break;
            }
            if ch == '\\' {
                self.scan_escape_sequence();
                continue;
            }
            self.pos += ch.len_utf8();
            self.token_value.push(ch);
        }
        self.finish(SyntaxKind::StringLiteral)
    }

    fn unterminated(&mut self, code: u32) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(code, self.token_start, self.pos - self.token_start);
    }

    /// Scan the escape starting at a backslash and append its cooked value.
    fn scan_escape_sequence(&mut self) {
        self.pos += 1;
        let Some(ch) = self.advance_char() else {
            return;
        };
        match ch {
            'n' => self.token_value.push('\n'),
            't' => self.token_value.push('\t'),
            'r' => self.token_value.push('\r'),
            'b' => self.token_value.push('\u{0008}'),
            'f' => self.token_value.push('\u{000C}'),
            'v' => self.token_value.push('\u{000B}'),
            '0' if !self.current().is_some_and(|c| c.is_ascii_digit()) => {
                self.token_value.push('\0');
            }
            'x' => {
                let value = self.scan_hex_digits(2, 2);
                self.push_code_point(value);
            }
            'u' => {
                let value = if self.current() == Some('{') {
                    self.pos += 1;
                    let value = self.scan_hex_digits(1, 6);
                    if self.current() == Some('}') {
                        self.pos += 1;
                    }
                    value
                } else {
                    self.scan_hex_digits(4, 4)
                };
                self.push_code_point(value);
            }
            '\r' => {
                // Line continuation
                if self.current() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => self.token_value.push(other),
        }
    }

    fn scan_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let mut value = 0u32;
        let mut count = 0;
        while count < max {
            let Some(digit) = self.current().and_then(|c| c.to_digit(16)) else {
                break;
            };
            value = value * 16 + digit;
            count += 1;
            self.pos += 1;
        }
        if count < min {
            self.error(diagnostic_codes::DIGIT_EXPECTED, start, self.pos - start);
            return None;
        }
        Some(value)
    }

    fn push_code_point(&mut self, value: Option<u32>) {
        if let Some(ch) = value.and_then(char::from_u32) {
            self.token_value.push(ch);
        }
    }

    /// Scan template characters up to the closing backtick or the next `${`.
    fn scan_template(&mut self, starts_with_backtick: bool) -> SyntaxKind {
        let kind = loop {
            let Some(ch) = self.current() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL);
                break if starts_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if starts_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.peek(1) == Some('{') => {
                    self.pos += 2;
                    break if starts_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => self.scan_escape_sequence(),
                '\r' => {
                    // Template values normalize CRLF and CR to LF
                    self.pos += 1;
                    if self.current() == Some('\n') {
                        self.pos += 1;
                    }
                    self.token_value.push('\n');
                }
                _ => {
                    self.pos += ch.len_utf8();
                    self.token_value.push(ch);
                }
            }
        };
        self.finish(kind)
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }

        self.pos = self.token_start + 1;
        let mut in_escape = false;
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.current() else {
                self.unterminated(diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL);
                break;
            };
            if is_line_break(ch) {
                self.unterminated(diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL);
                break;
            }
            self.pos += ch.len_utf8();
            if in_escape {
                in_escape = false;
            } else if ch == '\\' {
                in_escape = true;
            } else if ch == '/' && !in_character_class {
                break;
            } else if ch == '[' {
                in_character_class = true;
            } else if ch == ']' {
                in_character_class = false;
            }
        }

        if !self.is_unterminated() {
            // Flags
            while self.current().is_some_and(is_identifier_part) {
                self.advance_char();
            }
        }

        self.token_value.clear();
        self.token_value
            .push_str(&self.text[self.token_start..self.pos]);
        self.finish(SyntaxKind::RegularExpressionLiteral)
    }

    /// Re-scan a `}` token as the continuation of a template literal.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token_value.clear();
        self.scan_template(false)
    }
}

/// Text of the first token in `source`, skipping leading trivia.
///
/// Returns `None` for empty or trivia-only input.
pub fn first_token_text(source: &str) -> Option<String> {
    let mut scanner = ScannerState::new(source.to_string(), true);
    match scanner.scan() {
        SyntaxKind::EndOfFileToken => None,
        _ => Some(scanner.get_token_text().to_string()),
    }
}

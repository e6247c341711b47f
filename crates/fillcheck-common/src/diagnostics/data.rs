use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const DIGIT_EXPECTED: u32 = 1124;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: u32 = 1161;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const NESTING_TOO_DEEP: u32 = 1200;

    pub const ARRAY_FILL_WITH_REFERENCE_TYPE: u32 = 2001;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const DIGIT_EXPECTED: &str = "Digit expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: &str =
        "Unterminated regular expression literal.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const NESTING_TOO_DEEP: &str = "Expression is nested too deeply to be analyzed.";

    pub const ARRAY_FILL_WITH_REFERENCE_TYPE: &str = "Avoid using `{0}` with reference type{1}. Use `Array.from({ ... }, () => { return independent instance })` instead to ensure no reference shared.";
}

macro_rules! message {
    ($name:ident, $category:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::$category,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(UNTERMINATED_STRING_LITERAL, Error),
    message!(IDENTIFIER_EXPECTED, Error),
    message!(EXPECTED, Error),
    message!(ASTERISK_SLASH_EXPECTED, Error),
    message!(DIGIT_EXPECTED, Error),
    message!(INVALID_CHARACTER, Error),
    message!(DECLARATION_OR_STATEMENT_EXPECTED, Error),
    message!(UNTERMINATED_TEMPLATE_LITERAL, Error),
    message!(UNTERMINATED_REGULAR_EXPRESSION_LITERAL, Error),
    message!(EXPRESSION_EXPECTED, Error),
    message!(NESTING_TOO_DEEP, Error),
    message!(ARRAY_FILL_WITH_REFERENCE_TYPE, Error),
];

use crate::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source.to_string(), true);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            return kinds;
        }
        kinds.push(kind);
    }
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new(), true);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace_without_skipping() {
    let mut scanner = ScannerState::new("  \nfoo".to_string(), false);
    assert_eq!(scanner.scan(), SyntaxKind::WhitespaceTrivia);
    assert_eq!(scanner.scan(), SyntaxKind::NewLineTrivia);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_whitespace_skip() {
    let mut scanner = ScannerState::new("   foo".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "foo");
    assert_eq!(scanner.get_token_pos(), 3);
    assert_eq!(scanner.get_token_full_start(), 0);
}

#[test]
fn test_preceding_line_break_through_comments() {
    let mut scanner = ScannerState::new("a /* x\n */ b // c\nd".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(!scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "d");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_scan_punctuation() {
    assert_eq!(
        scan_all("{}()[];,"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CommaToken,
        ]
    );
}

#[test]
fn test_scan_compound_operators_longest_match() {
    assert_eq!(
        scan_all("=== !== => && || ?? ??= >>>= ... ?."),
        vec![
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::QuestionDotToken,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        scan_all("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_scan_keywords_and_identifiers() {
    assert_eq!(
        scan_all("const let foo $bar _baz"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::LetKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_scan_string_with_escapes() {
    let mut scanner = ScannerState::new("\"hello\\nworld\\u0041\\x42\"".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "hello\nworldAB");
    assert!(!scanner.is_unterminated());
}

#[test]
fn test_scan_unterminated_string() {
    let mut scanner = ScannerState::new("'abc\nx".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.errors().len(), 1);
    assert_eq!(
        scanner.errors()[0].code,
        fillcheck_common::diagnostics::diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
}

#[test]
fn test_scan_numbers() {
    let cases = [
        ("42", SyntaxKind::NumericLiteral),
        ("3.14", SyntaxKind::NumericLiteral),
        (".5", SyntaxKind::NumericLiteral),
        ("1e10", SyntaxKind::NumericLiteral),
        ("0xFF", SyntaxKind::NumericLiteral),
        ("1_000", SyntaxKind::NumericLiteral),
        ("123n", SyntaxKind::BigIntLiteral),
        ("0b1010n", SyntaxKind::BigIntLiteral),
    ];
    for (source, expected) in cases {
        let mut scanner = ScannerState::new(source.to_string(), true);
        assert_eq!(scanner.scan(), expected, "{source}");
        assert_eq!(scanner.get_token_value(), source);
        assert!(scanner.errors().is_empty(), "{source}");
    }
}

#[test]
fn test_scan_hex_without_digits_reports_error() {
    let mut scanner = ScannerState::new("0x".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.errors().len(), 1);
}

#[test]
fn test_slash_is_division_until_rescanned() {
    let mut scanner = ScannerState::new("/ab+c/gi.test".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_value(), "/ab+c/gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
}

#[test]
fn test_regex_with_slash_in_class() {
    let mut scanner = ScannerState::new("/[/]\\//".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_text(), "/[/]\\//");
}

#[test]
fn test_unterminated_regex() {
    let mut scanner = ScannerState::new("/abc\n".to_string(), true);
    scanner.scan();
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.errors().len(), 1);
}

#[test]
fn test_scan_no_substitution_template() {
    let mut scanner = ScannerState::new("`hello`".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "hello");
}

#[test]
fn test_scan_template_with_substitutions() {
    let mut scanner = ScannerState::new("`a${x}b${y}c`".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.get_token_value(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.get_token_value(), "c");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("a b 'c".to_string(), true);
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.errors().len(), 1);
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "a");
    assert!(scanner.errors().is_empty());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}

#[test]
fn test_private_identifier() {
    let mut scanner = ScannerState::new("#count".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
    assert_eq!(scanner.get_token_value(), "#count");
}

#[test]
fn test_shebang_is_trivia() {
    assert_eq!(
        scan_all("#!/usr/bin/env node\nx"),
        vec![SyntaxKind::Identifier]
    );
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new("\u{00A7}".to_string(), true);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.errors().len(), 1);
}

#[test]
fn test_first_token_text() {
    assert_eq!(first_token_text("  foo.bar").as_deref(), Some("foo"));
    assert_eq!(first_token_text("class {}").as_deref(), Some("class"));
    assert_eq!(first_token_text("/* c */ (x)").as_deref(), Some("("));
    assert_eq!(first_token_text("   "), None);
}

//! Tests for token classification helpers.

use crate::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::ConstKeyword));
    assert!(token_is_keyword(SyntaxKind::LetKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_reserved_and_contextual_keywords_are_disjoint() {
    assert!(token_is_reserved_word(SyntaxKind::NewKeyword));
    assert!(!token_is_contextual_keyword(SyntaxKind::NewKeyword));
    assert!(token_is_contextual_keyword(SyntaxKind::LetKeyword));
    assert!(!token_is_reserved_word(SyntaxKind::LetKeyword));
}

#[test]
fn test_token_is_identifier_or_keyword() {
    assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
    assert!(token_is_identifier_or_keyword(SyntaxKind::BreakKeyword));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::QuestionQuestionEqualsToken));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
    assert!(!token_is_assignment_operator(SyntaxKind::EqualsEqualsToken));
}

#[test]
fn test_text_to_keyword() {
    assert_eq!(text_to_keyword("const"), Some(SyntaxKind::ConstKeyword));
    assert_eq!(text_to_keyword("instanceof"), Some(SyntaxKind::InstanceOfKeyword));
    assert_eq!(text_to_keyword("Const"), None);
    assert_eq!(text_to_keyword("x"), None);
    assert_eq!(text_to_keyword("constant"), None);
}

#[test]
fn test_keyword_and_punctuation_text() {
    assert_eq!(keyword_to_text(SyntaxKind::AsyncKeyword), Some("async"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
    assert_eq!(punctuation_to_text(SyntaxKind::EqualsEqualsEqualsToken), Some("==="));
    assert_eq!(token_to_display_text(SyntaxKind::CloseParenToken), ")");
    assert_eq!(token_to_display_text(SyntaxKind::Identifier), "identifier");
}

use crate::diagnostics::*;

#[test]
fn test_format_message_substitutes_placeholders() {
    let text = format_message("'{0}' expected.", &[")"]);
    assert_eq!(text, "')' expected.");
}

#[test]
fn test_format_message_empty_argument() {
    let template = get_message_template(diagnostic_codes::ARRAY_FILL_WITH_REFERENCE_TYPE)
        .expect("rule message registered");
    let text = format_message(template, &["new Array().fill()", ""]);
    assert!(text.starts_with("Avoid using `new Array().fill()` with reference type. Use"));
}

#[test]
fn test_message_table_codes_are_unique() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    codes.sort_unstable();
    let before = codes.len();
    codes.dedup();
    assert_eq!(before, codes.len());
}

#[test]
fn test_unknown_code_has_no_template() {
    assert!(get_message_template(9999).is_none());
}

#[test]
fn test_diagnostic_serializes_with_rule() {
    let diag = Diagnostic::warning("a.js".to_string(), 3, 4, "msg".to_string(), 2001)
        .with_rule("no-array-fill-with-reference-type");
    let json = serde_json::to_value(&diag).expect("serializes");
    assert_eq!(json["category"], "warning");
    assert_eq!(json["rule"], "no-array-fill-with-reference-type");
    assert!(!diag.is_error());
}

#[test]
fn test_diagnostic_without_rule_omits_field() {
    let diag = Diagnostic::error("a.js".to_string(), 0, 1, "msg".to_string(), 1109);
    let json = serde_json::to_value(&diag).expect("serializes");
    assert!(json.get("rule").is_none());
    assert!(diag.is_error());
}

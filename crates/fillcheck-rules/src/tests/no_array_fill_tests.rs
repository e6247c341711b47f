//! Tests for no-array-fill-with-reference-type

use crate::no_array_fill_with_reference_type::NAME;
use crate::{ArrayProducer, NoArrayFillWithReferenceType, Rule, RuleContext, Severity, find_fill_calls};
use fillcheck_binder::BinderState;
use fillcheck_common::diagnostics::diagnostic_codes;
use fillcheck_common::{Diagnostic, DiagnosticCategory};
use fillcheck_parser::ParserState;
use serde_json::{Value, json};

fn lint_with(source: &str, severity: Severity, options: &Value) -> Vec<Diagnostic> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);

    let ctx = RuleContext::new("test.js", &arena, &binder, root)
        .with_severity(severity)
        .with_options(options);
    NoArrayFillWithReferenceType.check(&ctx)
}

fn lint(source: &str) -> Vec<Diagnostic> {
    lint_with(source, Severity::Error, &Value::Null)
}

fn messages(source: &str) -> Vec<String> {
    lint(source).into_iter().map(|d| d.message_text).collect()
}

fn expected(shape: &str, suffix: &str) -> String {
    format!(
        "Avoid using `{shape}` with reference type{suffix}. Use `Array.from({{ ... }}, () => {{ return independent instance }})` instead to ensure no reference shared."
    )
}

#[test]
fn test_reports_every_producer_shape() {
    let cases = [
        ("new Array(3).fill({});", "new Array().fill()"),
        ("Array(3).fill({});", "Array().fill()"),
        ("Array.from({ length: 3 }).fill({});", "Array.from().fill()"),
        ("Array.of(1, 2).fill({});", "Array.of().fill()"),
        ("[1, 2, 3].fill({});", "[].fill()"),
    ];
    for (source, shape) in cases {
        assert_eq!(messages(source), vec![expected(shape, " (Object)")], "{source}");
    }
}

#[test]
fn test_labels_in_messages() {
    assert_eq!(messages("new Array(3).fill([]);"), vec![expected("new Array().fill()", " (Array)")]);
    assert_eq!(
        messages("new Array(3).fill(new Map());"),
        vec![expected("new Array().fill()", " (new Map())")]
    );
    assert_eq!(
        messages("const shared = {};\nnew Array(3).fill(shared);"),
        vec![expected("new Array().fill()", " (Object)")]
    );
    assert_eq!(
        messages("const made = make();\nArray(2).fill(made);"),
        vec![expected("Array().fill()", " (variable (made))")]
    );
    // No label: the parenthetical is omitted
    assert_eq!(messages("Array(2).fill(make());"), vec![expected("Array().fill()", "")]);
}

#[test]
fn test_value_arguments_are_not_reported() {
    for source in [
        "new Array(3).fill(0);",
        "new Array(3).fill('');",
        "new Array(3).fill(null);",
        "new Array(3).fill(`row ${i}`);",
        "new Array(3).fill(() => {});",
        "new Array(3).fill(/x/);",
        "new Array(3).fill(Symbol());",
        "let row = [];\nnew Array(3).fill(row);",
        "new Array(3).fill(unknownGlobal);",
    ] {
        assert!(lint(source).is_empty(), "{source}");
    }
}

#[test]
fn test_fill_without_arguments_is_not_reported() {
    assert!(lint("new Array(3).fill();").is_empty());
    assert!(find_fill_calls_in("new Array(3).fill();").is_empty());
}

#[test]
fn test_other_receivers_are_not_reported() {
    for source in [
        "const arr = [];\narr.fill({});",
        "new Uint8Array(3).fill({});",
        "foo.fill({});",
        "Array.prototype.fill.call(x, {});",
        "new Array(3).map(() => ({}));",
        "Array.from({ length: 3 }, () => ({}));",
    ] {
        assert!(lint(source).is_empty(), "{source}");
    }
}

#[test]
fn test_shadowed_array_is_not_reported() {
    let source = "class Array { fill() {} }\nnew Array(3).fill({});\nArray.of(1).fill([]);";
    assert!(lint(source).is_empty());
}

#[test]
fn test_options_are_applied() {
    let source = "new Array(3).fill(() => {});\nnew Array(3).fill(/re/);";
    assert!(lint(source).is_empty());

    let strict = json!({ "canFillWithFunction": false, "canFillWithRegexp": false });
    let found: Vec<String> = lint_with(source, Severity::Error, &strict)
        .into_iter()
        .map(|d| d.message_text)
        .collect();
    assert_eq!(
        found,
        vec![
            expected("new Array().fill()", " (Function)"),
            expected("new Array().fill()", " (RegExp)"),
        ]
    );
}

#[test]
fn test_diagnostic_location_and_metadata() {
    let source = "const x = 1;\nconst rows = new Array(3).fill({});";
    let diagnostics = lint(source);
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics[0];
    let call = "new Array(3).fill({})";
    assert_eq!(diag.start as usize, source.find(call).expect("call"));
    assert_eq!(diag.length as usize, call.len());
    assert_eq!(diag.code, diagnostic_codes::ARRAY_FILL_WITH_REFERENCE_TYPE);
    assert_eq!(diag.rule, Some(NAME));
    assert_eq!(diag.file, "test.js");
    assert_eq!(diag.category, DiagnosticCategory::Error);
}

#[test]
fn test_severity_controls_category() {
    let source = "new Array(3).fill({});";
    let warnings = lint_with(source, Severity::Warn, &Value::Null);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].category, DiagnosticCategory::Warning);

    assert!(lint_with(source, Severity::Off, &Value::Null).is_empty());
}

#[test]
fn test_report_follows_context_severity() {
    let mut parser = ParserState::new("test.js".to_string(), String::new());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let binder = BinderState::new();
    let report = |severity| {
        RuleContext::new("test.js", &arena, &binder, root)
            .with_severity(severity)
            .report(0, 1, "message".to_string(), 1)
            .map(|d| d.category)
    };
    assert_eq!(report(Severity::Off), None);
    assert_eq!(report(Severity::Warn), Some(DiagnosticCategory::Warning));
    assert_eq!(report(Severity::Error), Some(DiagnosticCategory::Error));
}

#[test]
fn test_nested_and_multiple_calls_in_source_order() {
    let source = r#"
function grid(n) {
  const empty = [];
  return new Array(n).fill(null).map(() => Array(n).fill(empty));
}
const a = [0, 0].fill({});
const b = Array.of(1).fill(new Set());
"#;
    let diagnostics = lint(source);
    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics.windows(2).all(|w| w[0].start < w[1].start));
    assert!(diagnostics[0].message_text.contains("`Array().fill()` with reference type (Array)"));
    assert!(diagnostics[1].message_text.contains("`[].fill()`"));
    assert!(diagnostics[2].message_text.contains("(new Set())"));
}

#[test]
fn test_parenthesized_receiver() {
    assert_eq!(messages("(new Array(2)).fill({});"), vec![expected("new Array().fill()", " (Object)")]);
}

#[test]
fn test_find_fill_calls_reports_producers() {
    let calls = find_fill_calls_in("new Array(1).fill(a);\n[].fill(b, 0, 1);\nArray.from(x).fill(c);");
    let producers: Vec<ArrayProducer> = calls.iter().map(|c| c.producer).collect();
    assert_eq!(
        producers,
        vec![ArrayProducer::NewArray, ArrayProducer::ArrayLiteral, ArrayProducer::ArrayFrom]
    );
    assert!(calls[1].array_ident.is_none());
    assert!(calls[0].array_ident.is_some());
}

#[test]
fn test_validate_options() {
    let rule = NoArrayFillWithReferenceType;
    assert!(rule.validate_options(&Value::Null).is_ok());
    assert!(rule.validate_options(&json!({ "canFillWithRegexp": false })).is_ok());
    assert!(rule.validate_options(&json!({ "canFillWithObjects": true })).is_err());
    assert!(rule.validate_options(&json!("strict")).is_err());
}

fn find_fill_calls_in(source: &str) -> Vec<crate::FillCall> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    find_fill_calls(&arena, root)
}

use super::reporter::{Reporter, render_json};
use fillcheck_common::Diagnostic;
use serde_json::Value;

const SOURCE: &str = "const x = 1;\nconst rows = new Array(3).fill({});\n";
const CALL: &str = "new Array(3).fill({})";

fn fill_diagnostic() -> Diagnostic {
    let start = SOURCE.find(CALL).expect("call") as u32;
    Diagnostic::error(
        "src/app.js".to_string(),
        start,
        CALL.len() as u32,
        "Avoid using `new Array().fill()` with reference type (Object).".to_string(),
        2001,
    )
    .with_rule("no-array-fill-with-reference-type")
}

fn reporter() -> Reporter {
    let mut reporter = Reporter::new(false);
    reporter.add_source("src/app.js", SOURCE);
    reporter
}

#[test]
fn formats_location_category_and_code() {
    let output = reporter().format_diagnostic(&fill_diagnostic());
    let first_line = output.lines().next().expect("header line");
    assert_eq!(
        first_line,
        "src/app.js:2:14 - error FC2001: Avoid using `new Array().fill()` with reference type (Object)."
    );
}

#[test]
fn formats_snippet_with_underline() {
    let output = reporter().format_diagnostic(&fill_diagnostic());
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "    2   const rows = new Array(3).fill({});");
    assert_eq!(lines[3], format!("        {}{}", " ".repeat(13), "~".repeat(CALL.len())));
}

#[test]
fn warnings_use_warning_category() {
    let mut diagnostic = fill_diagnostic();
    diagnostic.category = fillcheck_common::DiagnosticCategory::Warning;
    let output = reporter().format_diagnostic(&diagnostic);
    assert!(output.contains(" - warning FC2001: "), "{output}");
}

#[test]
fn unknown_file_falls_back_to_name() {
    let mut diagnostic = fill_diagnostic();
    diagnostic.file = "does/not/exist.js".to_string();
    let output = Reporter::new(false).format_diagnostic(&diagnostic);
    assert!(output.starts_with("does/not/exist.js - error FC2001: "), "{output}");
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn reads_sources_from_disk() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("app.js");
    std::fs::write(&path, SOURCE).expect("write");

    let mut diagnostic = fill_diagnostic();
    diagnostic.file = path.display().to_string();
    let output = Reporter::new(false).format_diagnostic(&diagnostic);
    assert!(output.starts_with(&format!("{}:2:14 - ", path.display())), "{output}");
}

#[test]
fn render_appends_summary() {
    let mut warning = fill_diagnostic();
    warning.category = fillcheck_common::DiagnosticCategory::Warning;
    let output = reporter().render(&[fill_diagnostic(), fill_diagnostic(), warning]);
    assert!(output.ends_with("Found 2 errors and 1 warning.\n"), "{output}");
    assert_eq!(output.matches("src/app.js:2:14").count(), 3);
}

#[test]
fn render_is_empty_without_diagnostics() {
    assert_eq!(reporter().render(&[]), "");
}

#[test]
fn colored_output_keeps_text() {
    colored::control::set_override(true);
    let mut reporter = Reporter::new(true);
    reporter.add_source("src/app.js", SOURCE);
    let output = reporter.format_diagnostic(&fill_diagnostic());
    colored::control::unset_override();
    assert!(output.contains("\u{1b}["), "expected ANSI escapes: {output:?}");
    assert!(output.contains("FC2001"));
    assert!(output.contains("error"));
}

#[test]
fn json_output_is_an_array_of_diagnostics() {
    let json = render_json(&[fill_diagnostic()]).expect("serialize");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    let array = value.as_array().expect("array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["file"], "src/app.js");
    assert_eq!(array[0]["code"], 2001);
    assert_eq!(array[0]["category"], "error");
    assert_eq!(array[0]["rule"], "no-array-fill-with-reference-type");
    assert_eq!(array[0]["start"], SOURCE.find(CALL).expect("call") as u64);

    assert_eq!(render_json(&[]).expect("serialize"), "[]");
}

use super::args::CliArgs;
use super::config::{ResolvedConfig, RuleSetting, RuleSettings};
use super::driver::{discover_files, has_lintable_extension, lint_source, run};
use clap::Parser;
use fillcheck_classifier::NoopTracer;
use fillcheck_common::DiagnosticCategory;
use fillcheck_common::diagnostics::diagnostic_codes;
use fillcheck_rules::Severity;
use fillcheck_rules::no_array_fill_with_reference_type::NAME;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn settings(severity: Severity, options: Value) -> RuleSettings {
    let mut rules = RuleSettings::default();
    rules.insert(NAME, RuleSetting { severity, options });
    rules
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["fillcheck"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn lint_source_reports_rule_findings() {
    let diagnostics = lint_source(
        "app.js",
        "const grid = new Array(3).fill([]);\n",
        &settings(Severity::Error, Value::Null),
        &NoopTracer,
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, "app.js");
    assert_eq!(diagnostics[0].code, diagnostic_codes::ARRAY_FILL_WITH_REFERENCE_TYPE);
    assert_eq!(diagnostics[0].rule, Some(NAME));
}

#[test]
fn lint_source_respects_severity_and_options() {
    let source = "new Array(2).fill(() => {});\nnew Array(2).fill({});\n";

    let off = lint_source("a.js", source, &settings(Severity::Off, Value::Null), &NoopTracer);
    assert!(off.is_empty());

    let warn = lint_source("a.js", source, &settings(Severity::Warn, Value::Null), &NoopTracer);
    assert_eq!(warn.len(), 1);
    assert_eq!(warn[0].category, DiagnosticCategory::Warning);

    let strict = lint_source(
        "a.js",
        source,
        &settings(Severity::Error, json!({ "canFillWithFunction": false })),
        &NoopTracer,
    );
    assert_eq!(strict.len(), 2);
    assert!(strict[0].start < strict[1].start);
}

#[test]
fn lint_source_keeps_parse_errors() {
    let diagnostics = lint_source(
        "broken.js",
        "const a = ;\nnew Array(1).fill({});\n",
        &settings(Severity::Error, Value::Null),
        &NoopTracer,
    );
    assert!(diagnostics.iter().any(|d| d.rule.is_none()), "{diagnostics:?}");
    assert!(diagnostics.iter().any(|d| d.rule == Some(NAME)), "{diagnostics:?}");
}

#[test]
fn lintable_extensions() {
    for name in ["a.js", "a.mjs", "a.cjs", "a.jsx", "a.ts"] {
        assert!(has_lintable_extension(Path::new(name)), "{name}");
    }
    for name in ["a.json", "a.tsx", "a.d", "README", "a.js.map"] {
        assert!(!has_lintable_extension(Path::new(name)), "{name}");
    }
}

#[test]
fn discover_walks_directories_and_filters() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write_file(root, "src/b.js", "");
    write_file(root, "src/a.mjs", "");
    write_file(root, "src/notes.md", "");
    write_file(root, "node_modules/pkg/index.js", "");
    write_file(root, "lib/c.ts", "");

    let config = ResolvedConfig::defaults(root);
    let files = discover_files(&[root.to_path_buf()], &config).expect("discover");
    let relative: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(root).expect("under root").to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("lib/c.ts"),
            PathBuf::from("src/a.mjs"),
            PathBuf::from("src/b.js"),
        ]
    );
}

#[test]
fn discover_keeps_explicit_files_and_dedups() {
    let dir = TempDir::new().expect("temp dir");
    let file = write_file(dir.path(), "script.cjs", "");
    let config = ResolvedConfig::defaults(dir.path());
    let files = discover_files(&[file.clone(), dir.path().to_path_buf()], &config).expect("discover");
    assert_eq!(files, vec![file]);
}

#[test]
fn discover_fails_for_missing_path() {
    let dir = TempDir::new().expect("temp dir");
    let config = ResolvedConfig::defaults(dir.path());
    let err = discover_files(&[dir.path().join("nope")], &config).expect_err("should fail");
    assert!(err.to_string().contains("no such file or directory"));
}

#[test]
fn run_applies_config_overrides() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write_file(
        root,
        "fillcheck.json",
        r#"{
          "include": ["src/**"],
          "overrides": [
            { "files": ["src/**/*.test.js"], "rules": { "no-array-fill-with-reference-type": "warn" } }
          ]
        }"#,
    );
    write_file(root, "src/app.js", "export const rows = Array(4).fill({});\n");
    write_file(root, "src/app.test.js", "const fixtures = [1, 2].fill(new Map());\n");
    write_file(root, "scripts/build.js", "Array(2).fill([]);\n");

    let result = run(&args(&[]), root).expect("run");
    let names: Vec<&str> = result.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["src/app.js", "src/app.test.js"]);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.warning_count(), 1);

    let test_file = &result.files[1];
    assert_eq!(test_file.diagnostics[0].file, "src/app.test.js");
    assert_eq!(test_file.diagnostics[0].category, DiagnosticCategory::Warning);
}

#[test]
fn run_with_explicit_paths_and_config() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write_file(
        root,
        "configs/strict.json",
        r#"{ "rules": { "no-array-fill-with-reference-type": ["error", { "canFillWithRegexp": false }] } }"#,
    );
    write_file(root, "one.js", "new Array(2).fill(/x/g);\n");
    write_file(root, "two.js", "new Array(2).fill(/x/g);\n");

    let result = run(&args(&["--config", "configs/strict.json", "one.js"]), root).expect("run");
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].name, "one.js");
    assert_eq!(result.error_count(), 1);
    assert!(result.files[0].diagnostics[0].message_text.contains("(RegExp)"));
}

#[test]
fn run_reports_config_errors() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "fillcheck.json", r#"{ "rules": { "nope": "error" } }"#);
    let err = run(&args(&[]), dir.path()).expect_err("should fail");
    assert!(format!("{err:#}").contains("unknown rule `nope`"));
}

#[test]
fn run_with_trace_classifier_matches_plain_run() {
    let dir = TempDir::new().expect("temp dir");
    write_file(dir.path(), "a.js", "const o = {};\nconst alias = o;\nArray(1).fill(alias);\n");
    let plain = run(&args(&[]), dir.path()).expect("run");
    let traced = run(&args(&["--trace-classifier"]), dir.path()).expect("run");
    let plain: Vec<_> = plain.diagnostics().cloned().collect();
    let traced: Vec<_> = traced.diagnostics().cloned().collect();
    assert_eq!(plain, traced);
    assert_eq!(plain.len(), 1);
}

//! End-to-end tests for the `fillcheck` binary: output formats and exit codes.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fillcheck(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fillcheck"))
        .args(args)
        .current_dir(cwd)
        .env_remove("FILLCHECK_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fillcheck")
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(path, contents).expect("write");
    }
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn clean_project_exits_zero() {
    let dir = project(&[("src/ok.js", "const rows = Array.from({ length: 3 }, () => ({}));\n")]);
    let output = fillcheck(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
}

#[test]
fn errors_exit_one_with_pretty_output() {
    let dir = project(&[("src/bad.js", "const grid = new Array(3).fill([]);\n")]);
    let output = fillcheck(dir.path(), &["--no-color"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(
        text.contains("src/bad.js:1:14 - error FC2001: Avoid using `new Array().fill()` with reference type (Array)."),
        "{text}"
    );
    assert!(text.contains("Found 1 error and 0 warnings."), "{text}");
}

#[test]
fn json_format_prints_diagnostics() {
    let dir = project(&[("a.js", "[0, 0].fill(new Set());\n")]);
    let output = fillcheck(dir.path(), &["--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    let diagnostics = value.as_array().expect("array");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["file"], "a.js");
    assert_eq!(diagnostics[0]["code"], 2001);
}

#[test]
fn warnings_respect_max_warnings() {
    let dir = project(&[
        ("fillcheck.json", r#"{ "rules": { "no-array-fill-with-reference-type": "warn" } }"#),
        ("a.js", "Array(2).fill({});\nArray(2).fill([]);\n"),
    ]);
    assert_eq!(fillcheck(dir.path(), &[]).status.code(), Some(0));
    assert_eq!(fillcheck(dir.path(), &["--max-warnings", "2"]).status.code(), Some(0));
    assert_eq!(fillcheck(dir.path(), &["--max-warnings", "1"]).status.code(), Some(1));
}

#[test]
fn config_errors_exit_two() {
    let dir = project(&[
        ("fillcheck.json", r#"{ "rules": { "no-such-rule": "error" } }"#),
        ("a.js", "Array(2).fill({});\n"),
    ]);
    let output = fillcheck(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown rule `no-such-rule`"), "{stderr}");
}

#[test]
fn missing_path_exits_two() {
    let dir = project(&[]);
    let output = fillcheck(dir.path(), &["missing.js"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn list_rules_prints_builtin_rules() {
    let dir = project(&[]);
    let output = fillcheck(dir.path(), &["--list-rules"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("no-array-fill-with-reference-type"));
}

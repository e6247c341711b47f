use anyhow::{Context, Result, bail};
use fillcheck_binder::BinderState;
use fillcheck_classifier::{ClassifierTracer, LogTracer, NoopTracer};
use fillcheck_common::{Diagnostic, DiagnosticCategory};
use fillcheck_parser::ParserState;
use fillcheck_rules::{RuleContext, builtin_rules};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::{ResolvedConfig, RuleSettings};

/// Extensions picked up when walking directories.
pub const LINTABLE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts"];

/// One linted file.
#[derive(Debug, Clone)]
pub struct LintedFile {
    /// Display name, relative to the working directory when possible.
    pub name: String,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct LintResult {
    pub files: Vec<LintedFile>,
}

impl LintResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|file| file.diagnostics.iter())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count()
    }
}

/// Lint everything named by `args`, resolved against `cwd`.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<LintResult> {
    let config = ResolvedConfig::discover(args.config.as_deref(), cwd)?;
    let roots = if args.paths.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        args.paths.iter().map(|path| cwd.join(path)).collect()
    };

    let files = discover_files(&roots, &config)?;
    debug!(files = files.len(), "discovered files");

    let tracer: &(dyn ClassifierTracer + Sync) = if args.trace_classifier {
        &LogTracer
    } else {
        &NoopTracer
    };
    lint_files(&files, cwd, &config, tracer)
}

/// Expand `roots` into the files to lint, sorted and deduplicated.
///
/// Directories are walked for [`LINTABLE_EXTENSIONS`] and filtered by the
/// configuration's globs. Files named directly are always linted.
pub fn discover_files(roots: &[PathBuf], config: &ResolvedConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("no such file or directory: {}", root.display());
        }

        let walker = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !(entry.file_type().is_dir() && config.is_excluded_dir(entry.path())));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && has_lintable_extension(path) && config.is_included(path) {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

pub fn has_lintable_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LINTABLE_EXTENSIONS.contains(&ext))
}

/// Lint `files` in parallel. Results keep the order of `files`.
pub fn lint_files(
    files: &[PathBuf],
    cwd: &Path,
    config: &ResolvedConfig,
    tracer: &(dyn ClassifierTracer + Sync),
) -> Result<LintResult> {
    let files = files
        .par_iter()
        .map(|path| -> Result<LintedFile> {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = display_name(path, cwd);
            let rules = config.rules_for(path);
            let diagnostics = lint_source(&name, &source, &rules, tracer);
            Ok(LintedFile {
                name,
                source,
                diagnostics,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LintResult { files })
}

/// Parse, bind and run every enabled rule over one file.
///
/// Parse errors are reported alongside rule findings; the parser always
/// produces a tree, so rules still run.
pub fn lint_source(
    file_name: &str,
    source: &str,
    rules: &RuleSettings,
    tracer: &dyn ClassifierTracer,
) -> Vec<Diagnostic> {
    let span = info_span!("lint_file", file = file_name);
    let _enter = span.enter();

    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut diagnostics = parser.take_diagnostics();
    let arena = parser.into_arena();

    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);

    let registry = builtin_rules();
    for (name, setting) in rules {
        if !setting.severity.is_enabled() {
            continue;
        }
        let Some(rule) = registry.get(name) else {
            warn!(rule = name, "rule is not registered");
            continue;
        };
        let ctx = RuleContext::new(file_name, &arena, &binder, root)
            .with_severity(setting.severity)
            .with_options(&setting.options)
            .with_tracer(tracer);
        diagnostics.extend(rule.check(&ctx));
    }

    diagnostics.sort_by_key(|d| d.start);
    debug!(diagnostics = diagnostics.len(), "linted file");
    diagnostics
}

fn display_name(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd).unwrap_or(path).display().to_string()
}

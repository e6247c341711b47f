//! Tracing configuration for the `fillcheck` binary.
//!
//! Supports three output formats controlled by `FILLCHECK_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one span per file
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! FILLCHECK_LOG=debug FILLCHECK_LOG_FORMAT=tree fillcheck src/
//! FILLCHECK_LOG="fillcheck_binder=trace" fillcheck src/app.js
//! fillcheck --trace-classifier src/app.js
//! ```
//!
//! The subscriber is only initialised when `FILLCHECK_LOG` (or `RUST_LOG`) is
//! set, or when `--trace-classifier` asks for classifier events.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "FILLCHECK_LOG";
pub const LOG_FORMAT_ENV: &str = "FILLCHECK_LOG_FORMAT";

/// Target the classifier tracer logs under.
pub const CLASSIFIER_TARGET: &str = "fillcheck::classifier";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `FILLCHECK_LOG`, falling back to `RUST_LOG`.
///
/// With `trace_classifier`, classifier events are enabled on top of
/// whatever the environment asks for.
fn build_filter(trace_classifier: bool) -> EnvFilter {
    let filter = if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    if !trace_classifier {
        return filter;
    }
    match format!("{CLASSIFIER_TARGET}=trace").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initialise the global tracing subscriber.
///
/// All output goes to stderr so it never mixes with `--format json` on stdout.
pub fn init_tracing(trace_classifier: bool) {
    let has_log = std::env::var(LOG_ENV).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_log && !has_rust_log && !trace_classifier {
        return;
    }

    let filter = build_filter(trace_classifier);

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

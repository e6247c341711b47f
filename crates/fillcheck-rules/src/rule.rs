//! The `Rule` trait and the per-file context rules run in.

use fillcheck_binder::BinderState;
use fillcheck_classifier::{ClassifierTracer, NoopTracer};
use fillcheck_common::Diagnostic;
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::NodeArena;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NOOP_TRACER: NoopTracer = NoopTracer;
static NO_OPTIONS: Value = Value::Null;

/// How a rule's findings are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    #[default]
    Error,
}

impl Severity {
    #[inline]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Severity::Off)
    }
}

/// Everything a rule may look at while checking one file.
pub struct RuleContext<'a> {
    pub file_name: &'a str,
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    pub root: NodeIndex,
    pub severity: Severity,
    /// Raw options from the configuration; `Value::Null` when none were given.
    pub options: &'a Value,
    pub tracer: &'a dyn ClassifierTracer,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        file_name: &'a str,
        arena: &'a NodeArena,
        binder: &'a BinderState,
        root: NodeIndex,
    ) -> Self {
        RuleContext {
            file_name,
            arena,
            binder,
            root,
            severity: Severity::Error,
            options: &NO_OPTIONS,
            tracer: &NOOP_TRACER,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_options(mut self, options: &'a Value) -> Self {
        self.options = options;
        self
    }

    pub fn with_tracer(mut self, tracer: &'a dyn ClassifierTracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Build a diagnostic at the context's severity; `None` when the rule is off.
    pub fn report(&self, start: u32, length: u32, message: String, code: u32) -> Option<Diagnostic> {
        let file = self.file_name.to_string();
        match self.severity {
            Severity::Off => None,
            Severity::Warn => Some(Diagnostic::warning(file, start, length, message, code)),
            Severity::Error => Some(Diagnostic::error(file, start, length, message, code)),
        }
    }
}

/// A lint rule.
///
/// Rules are stateless; per-file state lives in `RuleContext`.
pub trait Rule: Send + Sync {
    /// Configuration key, e.g. `no-array-fill-with-reference-type`.
    fn name(&self) -> &'static str;

    /// One-line description for `--list-rules` style output.
    fn description(&self) -> &'static str;

    /// Validate raw options when the configuration is loaded.
    fn validate_options(&self, options: &Value) -> Result<(), serde_json::Error>;

    /// Check one file. Never called with `Severity::Off`.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic>;
}

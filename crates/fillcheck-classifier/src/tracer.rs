//! Observability hook for classification decisions.
//!
//! The classifier reports each decision through an injected
//! [`ClassifierTracer`]. Production callers use [`NoopTracer`];
//! `--trace-classifier` swaps in [`LogTracer`], which forwards events to
//! `tracing` under the `fillcheck::classifier` target.

use crate::recursion::RecursionResult;
use crate::verdict::Verdict;
use fillcheck_binder::{ResolveError, SymbolId};
use fillcheck_parser::NodeIndex;
use tracing::trace;

/// One classification decision.
#[derive(Debug)]
pub enum TraceEvent<'a> {
    /// A node received its final verdict.
    Classified {
        node: NodeIndex,
        kind: &'static str,
        verdict: &'a Verdict,
    },
    /// An identifier has no declaration in scope.
    Unresolved { ident: NodeIndex, name: &'a str },
    /// An identifier resolved to a `let`/`var`/parameter/catch binding.
    Reassignable { ident: NodeIndex, name: &'a str },
    /// An identifier resolved to a fixed binding; its initializer is next.
    FollowBinding {
        ident: NodeIndex,
        name: &'a str,
        symbol: SymbolId,
        initializer: NodeIndex,
    },
    /// The resolver failed; the identifier is treated as unresolved.
    ResolverFailed {
        ident: NodeIndex,
        error: &'a ResolveError,
    },
    /// Following a binding was refused by the recursion guard.
    RecursionDenied {
        ident: NodeIndex,
        symbol: SymbolId,
        reason: RecursionResult,
    },
    /// `Symbol(...)` where `Symbol` is declared in the file.
    ShadowedSymbol { call: NodeIndex, declaration: SymbolId },
}

pub trait ClassifierTracer {
    fn trace(&self, event: &TraceEvent<'_>);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl ClassifierTracer for NoopTracer {
    #[inline]
    fn trace(&self, _event: &TraceEvent<'_>) {}
}

/// Forwards events to `tracing` at TRACE level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl ClassifierTracer for LogTracer {
    fn trace(&self, event: &TraceEvent<'_>) {
        match event {
            TraceEvent::Classified {
                node,
                kind,
                verdict,
            } => trace!(
                target: "fillcheck::classifier",
                node = node.0,
                kind,
                reference = verdict.is_reference_type,
                label = verdict.type_label.as_deref().unwrap_or(""),
                "classified"
            ),
            TraceEvent::Unresolved { ident, name } => trace!(
                target: "fillcheck::classifier",
                ident = ident.0,
                name,
                "unresolved identifier"
            ),
            TraceEvent::Reassignable { ident, name } => trace!(
                target: "fillcheck::classifier",
                ident = ident.0,
                name,
                "reassignable binding"
            ),
            TraceEvent::FollowBinding {
                ident,
                name,
                symbol,
                initializer,
            } => trace!(
                target: "fillcheck::classifier",
                ident = ident.0,
                name,
                symbol = symbol.0,
                initializer = initializer.0,
                "following binding"
            ),
            TraceEvent::ResolverFailed { ident, error } => trace!(
                target: "fillcheck::classifier",
                ident = ident.0,
                %error,
                "resolver failed"
            ),
            TraceEvent::RecursionDenied {
                ident,
                symbol,
                reason,
            } => trace!(
                target: "fillcheck::classifier",
                ident = ident.0,
                symbol = symbol.0,
                ?reason,
                "binding chain cut"
            ),
            TraceEvent::ShadowedSymbol { call, declaration } => trace!(
                target: "fillcheck::classifier",
                call = call.0,
                declaration = declaration.0,
                "Symbol() callee is a local binding"
            ),
        }
    }
}

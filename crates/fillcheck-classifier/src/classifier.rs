//! Reference/value classification of expressions.
//!
//! `TypeClassifier::classify` decides whether evaluating an expression yields
//! a shared, mutable reference (object, array, class instance, ...) or a
//! value that is safe to copy into every slot of an array. Unknown shapes
//! degrade to value-type: a missed report is preferred over a false one.

use crate::labels::{type_label, variable_label};
use crate::options::ClassifierOptions;
use crate::recursion::{RecursionGuard, RecursionResult};
use crate::resolver::BindingResolver;
use crate::tracer::{ClassifierTracer, NoopTracer, TraceEvent};
use crate::verdict::Verdict;
use fillcheck_binder::{ArenaResolver, BinderState, Binding, DeclarationKind, SymbolId};
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::{CallExprData, LiteralKind, NodeArena, NodeData};
use tracing::{trace, warn};

static NOOP_TRACER: NoopTracer = NoopTracer;

/// Classifies expressions of one bound file.
///
/// ```ignore
/// let classifier = TypeClassifier::for_file(&arena, &binder, options);
/// let verdict = classifier.classify(argument);
/// if verdict.is_reference_type { /* report */ }
/// ```
pub struct TypeClassifier<'a, R: BindingResolver = ArenaResolver<'a>> {
    arena: &'a NodeArena,
    resolver: R,
    options: ClassifierOptions,
    tracer: &'a dyn ClassifierTracer,
}

impl<'a> TypeClassifier<'a, ArenaResolver<'a>> {
    /// Classifier resolving identifiers through `binder`.
    pub fn for_file(arena: &'a NodeArena, binder: &'a BinderState, options: ClassifierOptions) -> Self {
        TypeClassifier::new(arena, ArenaResolver::new(arena, binder), options)
    }
}

impl<'a, R: BindingResolver> TypeClassifier<'a, R> {
    pub fn new(arena: &'a NodeArena, resolver: R, options: ClassifierOptions) -> Self {
        TypeClassifier {
            arena,
            resolver,
            options,
            tracer: &NOOP_TRACER,
        }
    }

    /// Report every decision to `tracer`.
    pub fn with_tracer(mut self, tracer: &'a dyn ClassifierTracer) -> Self {
        self.tracer = tracer;
        self
    }

    #[inline]
    pub fn options(&self) -> ClassifierOptions {
        self.options
    }

    /// Classify the expression at `node`.
    ///
    /// Total: `NodeIndex::NONE`, indices outside the arena and shapes the
    /// classifier does not know all yield `Verdict::value()`.
    pub fn classify(&self, node: NodeIndex) -> Verdict {
        let mut guard = RecursionGuard::binding_chain();
        self.classify_node(node, &mut guard)
    }

    fn classify_node(&self, idx: NodeIndex, guard: &mut RecursionGuard<SymbolId>) -> Verdict {
        let Some(node) = self.arena.get(idx) else {
            return Verdict::value();
        };

        let verdict = match &node.data {
            NodeData::Literal(lit) => {
                if lit.kind == LiteralKind::RegularExpression && !self.options.can_fill_with_regexp {
                    Verdict::reference(type_label(self.arena, idx))
                } else {
                    Verdict::value()
                }
            }

            // Interpolation coerces to string
            NodeData::TemplateLiteral(_) => Verdict::value(),

            NodeData::Identifier(ident) => {
                self.classify_identifier(idx, &ident.escaped_text, guard)
            }

            NodeData::CallExpression(call) if self.is_symbol_call(idx, call) => Verdict::value(),

            NodeData::FunctionExpression(_) | NodeData::ArrowFunction(_) => {
                if self.options.can_fill_with_function {
                    Verdict::value()
                } else {
                    Verdict::reference(type_label(self.arena, idx))
                }
            }

            NodeData::NewExpression(new)
                if self.options.can_fill_with_regexp && self.is_builtin(new.expression, "RegExp") =>
            {
                Verdict::value()
            }

            NodeData::ObjectLiteral(_)
            | NodeData::ArrayLiteral(_)
            | NodeData::NewExpression(_)
            | NodeData::ClassExpression(_)
            | NodeData::CallExpression(_) => Verdict::reference(type_label(self.arena, idx)),

            NodeData::Parenthesized(paren) => return self.classify_node(paren.expression, guard),

            _ => Verdict::value(),
        };

        self.tracer.trace(&TraceEvent::Classified {
            node: idx,
            kind: node.data.kind_name(),
            verdict: &verdict,
        });
        verdict
    }

    /// Follow a fixed binding to its initializer.
    ///
    /// Reassignable bindings are value-type whatever their initializer: the
    /// classifier does not track assignments after the declaration.
    fn classify_identifier(
        &self,
        ident: NodeIndex,
        name: &str,
        guard: &mut RecursionGuard<SymbolId>,
    ) -> Verdict {
        let Some(binding) = self.resolve(ident) else {
            self.tracer.trace(&TraceEvent::Unresolved { ident, name });
            return Verdict::value();
        };

        if binding.kind == DeclarationKind::Reassignable {
            self.tracer.trace(&TraceEvent::Reassignable { ident, name });
            return Verdict::value();
        }
        if binding.initializer.is_none() {
            return Verdict::value();
        }

        match guard.enter(binding.symbol) {
            RecursionResult::Entered => {}
            reason => {
                self.tracer.trace(&TraceEvent::RecursionDenied {
                    ident,
                    symbol: binding.symbol,
                    reason,
                });
                if cfg!(debug_assertions) {
                    warn!(name, symbol = binding.symbol.0, ?reason, "binding chain cut short");
                }
                return Verdict::value();
            }
        }

        self.tracer.trace(&TraceEvent::FollowBinding {
            ident,
            name,
            symbol: binding.symbol,
            initializer: binding.initializer,
        });
        let inner = self.classify_node(binding.initializer, guard);
        guard.leave(binding.symbol);

        if inner.is_reference_type && inner.type_label.is_none() {
            Verdict::reference(Some(variable_label(name)))
        } else {
            inner
        }
    }

    /// Resolve an identifier, folding resolver errors into "not found".
    fn resolve(&self, ident: NodeIndex) -> Option<Binding> {
        match self.resolver.resolve_identifier(ident) {
            Ok(binding) => binding,
            Err(error) => {
                trace!(ident = ident.0, %error, "resolver error treated as unresolved");
                self.tracer.trace(&TraceEvent::ResolverFailed {
                    ident,
                    error: &error,
                });
                None
            }
        }
    }

    /// `Symbol(...)` produces a primitive.
    ///
    /// A `Symbol` declared in the file keeps the value-type verdict; the
    /// shadowing is only reported to the tracer.
    fn is_symbol_call(&self, call_idx: NodeIndex, call: &CallExprData) -> bool {
        let callee = self.arena.skip_parentheses(call.expression);
        if self.arena.identifier_text(callee) != Some("Symbol") {
            return false;
        }
        if let Some(binding) = self.resolve(callee) {
            self.tracer.trace(&TraceEvent::ShadowedSymbol {
                call: call_idx,
                declaration: binding.symbol,
            });
        }
        true
    }

    /// Whether `callee` names the global `name` rather than a local binding.
    fn is_builtin(&self, callee: NodeIndex, name: &str) -> bool {
        let callee = self.arena.skip_parentheses(callee);
        self.arena.identifier_text(callee) == Some(name) && self.resolve(callee).is_none()
    }
}

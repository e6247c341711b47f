//! `no-array-fill-with-reference-type`
//!
//! `new Array(3).fill({})` puts the *same* object in every slot, so mutating
//! `arr[0].x` also changes `arr[1].x`. The rule reports `fill` calls on a
//! freshly produced array whose argument classifies as a reference type.
//!
//! Recognized producers:
//!
//! | producer          | shape in message         |
//! |-------------------|--------------------------|
//! | `new Array(n)`    | `new Array().fill()`     |
//! | `Array(n)`        | `Array().fill()`         |
//! | `Array.from(x)`   | `Array.from().fill()`    |
//! | `Array.of(...)`   | `Array.of().fill()`      |
//! | `[...]`           | `[].fill()`              |

use crate::rule::{Rule, RuleContext};
use fillcheck_binder::ArenaResolver;
use fillcheck_classifier::{ClassifierOptions, TypeClassifier};
use fillcheck_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use fillcheck_common::{Diagnostic, format_message};
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::{CallExprData, NodeArena, NodeData};
use serde_json::Value;
use tracing::{debug, trace, warn};

pub const NAME: &str = "no-array-fill-with-reference-type";

#[derive(Clone, Copy, Debug, Default)]
pub struct NoArrayFillWithReferenceType;

/// How the filled array was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayProducer {
    NewArray,
    ArrayCall,
    ArrayFrom,
    ArrayOf,
    ArrayLiteral,
}

impl ArrayProducer {
    /// Call-shape description used in the message.
    pub const fn shape(self) -> &'static str {
        match self {
            ArrayProducer::NewArray => "new Array().fill()",
            ArrayProducer::ArrayCall => "Array().fill()",
            ArrayProducer::ArrayFrom => "Array.from().fill()",
            ArrayProducer::ArrayOf => "Array.of().fill()",
            ArrayProducer::ArrayLiteral => "[].fill()",
        }
    }
}

/// A matched `<producer>.fill(argument, ...)` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillCall {
    pub call: NodeIndex,
    pub producer: ArrayProducer,
    /// The `Array` identifier of the producer; `NONE` for array literals.
    pub array_ident: NodeIndex,
    pub argument: NodeIndex,
}

impl NoArrayFillWithReferenceType {
    fn options(ctx: &RuleContext<'_>) -> ClassifierOptions {
        if ctx.options.is_null() {
            return ClassifierOptions::default();
        }
        match serde_json::from_value(ctx.options.clone()) {
            Ok(options) => options,
            Err(err) => {
                warn!(rule = NAME, %err, "invalid options, using defaults");
                ClassifierOptions::default()
            }
        }
    }
}

impl Rule for NoArrayFillWithReferenceType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Disallow filling arrays with a single shared object, array or instance"
    }

    fn validate_options(&self, options: &Value) -> Result<(), serde_json::Error> {
        if options.is_null() {
            return Ok(());
        }
        serde_json::from_value::<ClassifierOptions>(options.clone()).map(|_| ())
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        if !ctx.severity.is_enabled() {
            return Vec::new();
        }
        let options = Self::options(ctx);
        let resolver = ArenaResolver::new(ctx.arena, ctx.binder);
        let classifier = TypeClassifier::new(ctx.arena, resolver, options).with_tracer(ctx.tracer);

        let mut diagnostics = Vec::new();
        for fill in find_fill_calls(ctx.arena, ctx.root) {
            if fill.array_ident.is_some() && matches!(resolver.resolve(fill.array_ident), Ok(Some(_))) {
                trace!(call = fill.call.0, "Array is a local binding, skipping");
                continue;
            }
            let verdict = classifier.classify(fill.argument);
            if !verdict.is_reference_type {
                continue;
            }
            let Some(call) = ctx.arena.get(fill.call) else {
                continue;
            };
            let suffix = verdict.label_suffix();
            let message = format_message(
                diagnostic_messages::ARRAY_FILL_WITH_REFERENCE_TYPE,
                &[fill.producer.shape(), &suffix],
            );
            debug!(file = ctx.file_name, call = fill.call.0, shape = fill.producer.shape(), "reporting");
            let reported = ctx.report(
                call.pos,
                call.width(),
                message,
                diagnostic_codes::ARRAY_FILL_WITH_REFERENCE_TYPE,
            );
            diagnostics.extend(reported.map(|d| d.with_rule(NAME)));
        }
        diagnostics.sort_by_key(|d| d.start);
        diagnostics
    }
}

/// Every `<producer>.fill(arg, ...)` call under `root`, in source order.
///
/// Calls without arguments are skipped: they fill with `undefined`.
pub fn find_fill_calls(arena: &NodeArena, root: NodeIndex) -> Vec<FillCall> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    let mut visited = 0usize;

    while let Some(idx) = stack.pop() {
        // A tree cannot visit more nodes than the arena holds
        visited += 1;
        if visited > arena.len() {
            warn!(visited, "tree walk revisited nodes, stopping");
            break;
        }
        let Some(node) = arena.get(idx) else {
            continue;
        };
        if let NodeData::CallExpression(call) = &node.data
            && let Some(fill) = match_fill_call(arena, idx, call)
        {
            found.push(fill);
        }
        let first_child = stack.len();
        node.data.for_each_child(|child| stack.push(child));
        // Pop children left to right
        stack[first_child..].reverse();
    }

    found
}

fn match_fill_call(arena: &NodeArena, idx: NodeIndex, call: &CallExprData) -> Option<FillCall> {
    let argument = call.arguments.as_ref()?.first()?;
    let callee = arena.get(call.expression)?;
    let access = arena.get_property_access(callee)?;
    if arena.identifier_text(access.name_or_argument)? != "fill" {
        return None;
    }
    let (producer, array_ident) = array_producer(arena, arena.skip_parentheses(access.expression))?;
    Some(FillCall {
        call: idx,
        producer,
        array_ident,
        argument,
    })
}

/// Classify the receiver of `.fill`, returning the `Array` identifier too.
fn array_producer(arena: &NodeArena, idx: NodeIndex) -> Option<(ArrayProducer, NodeIndex)> {
    let node = arena.get(idx)?;
    match &node.data {
        NodeData::ArrayLiteral(_) => Some((ArrayProducer::ArrayLiteral, NodeIndex::NONE)),
        NodeData::NewExpression(new) => {
            let ident = array_identifier(arena, new.expression)?;
            Some((ArrayProducer::NewArray, ident))
        }
        NodeData::CallExpression(call) => {
            if let Some(ident) = array_identifier(arena, call.expression) {
                return Some((ArrayProducer::ArrayCall, ident));
            }
            let callee = arena.get(arena.skip_parentheses(call.expression))?;
            let access = arena.get_property_access(callee)?;
            let ident = array_identifier(arena, access.expression)?;
            match arena.identifier_text(access.name_or_argument)? {
                "from" => Some((ArrayProducer::ArrayFrom, ident)),
                "of" => Some((ArrayProducer::ArrayOf, ident)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `idx` (parentheses skipped) if it is the identifier `Array`.
fn array_identifier(arena: &NodeArena, idx: NodeIndex) -> Option<NodeIndex> {
    let idx = arena.skip_parentheses(idx);
    (arena.identifier_text(idx) == Some("Array")).then_some(idx)
}

//! Tests for TypeClassifier

use crate::{BindingResolver, ClassifierOptions, ClassifierTracer, LogTracer, TraceEvent, TypeClassifier, Verdict};
use fillcheck_binder::{BinderState, Binding, ResolveError};
use fillcheck_parser::parser::{NodeArena, NodeData};
use fillcheck_parser::{NodeIndex, ParserState};
use std::cell::RefCell;

struct Fixture {
    arena: NodeArena,
    binder: BinderState,
    /// First argument of the last `subject(...)` call in the source.
    subject: NodeIndex,
}

impl Fixture {
    fn new(source: &str) -> Self {
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

        let subject = arena
            .nodes
            .iter()
            .filter_map(|node| match &node.data {
                NodeData::CallExpression(call)
                    if arena.identifier_text(call.expression) == Some("subject") =>
                {
                    Some((node.pos, call.arguments.as_ref()?.first()?))
                }
                _ => None,
            })
            .max_by_key(|(pos, _)| *pos)
            .map(|(_, arg)| arg)
            .expect("source should contain subject(<expr>)");

        Fixture {
            arena,
            binder,
            subject,
        }
    }

    fn classify(&self, options: ClassifierOptions) -> Verdict {
        TypeClassifier::for_file(&self.arena, &self.binder, options).classify(self.subject)
    }

    fn classify_traced(&self, options: ClassifierOptions) -> (Verdict, Vec<String>) {
        let tracer = RecordingTracer::default();
        let verdict = TypeClassifier::for_file(&self.arena, &self.binder, options)
            .with_tracer(&tracer)
            .classify(self.subject);
        (verdict, tracer.events.into_inner())
    }
}

#[derive(Default)]
struct RecordingTracer {
    events: RefCell<Vec<String>>,
}

impl ClassifierTracer for RecordingTracer {
    fn trace(&self, event: &TraceEvent<'_>) {
        self.events.borrow_mut().push(format!("{event:?}"));
    }
}

fn classify(source: &str) -> Verdict {
    Fixture::new(source).classify(ClassifierOptions::default())
}

fn classify_strict(source: &str) -> Verdict {
    Fixture::new(source).classify(ClassifierOptions::STRICT)
}

fn reference(label: &str) -> Verdict {
    Verdict::reference(Some(label.to_string()))
}

// =============================================================================
// Literals and templates
// =============================================================================

#[test]
fn test_primitive_literals_are_value_types() {
    for expr in [
        "42", "0x1F", "1e3", "10n", "'single'", "\"double\"", "true", "false", "null",
        "undefined",
    ] {
        let source = format!("subject({expr});");
        assert_eq!(classify(&source), Verdict::value(), "{expr}");
        assert_eq!(classify_strict(&source), Verdict::value(), "{expr}");
    }
}

#[test]
fn test_template_literals_are_value_types() {
    for expr in ["`plain`", "`hi ${x}`", "`${{}}`", "`${[]} and ${new Map()}`"] {
        let source = format!("const x = {{}};\nsubject({expr});");
        assert_eq!(classify_strict(&source), Verdict::value(), "{expr}");
    }
}

#[test]
fn test_regex_literal_respects_option() {
    assert_eq!(classify("subject(/abc/g);"), Verdict::value());
    assert_eq!(classify_strict("subject(/abc/g);"), reference("RegExp"));
}

// =============================================================================
// Constructions
// =============================================================================

#[test]
fn test_object_and_array_literals() {
    assert_eq!(classify("subject({});"), reference("Object"));
    assert_eq!(classify("subject({ a: 1, b: [] });"), reference("Object"));
    assert_eq!(classify("subject([]);"), reference("Array"));
    assert_eq!(classify("subject([1, 2, 3]);"), reference("Array"));
}

#[test]
fn test_new_expressions_are_labelled_by_constructor() {
    assert_eq!(classify("subject(new Map());"), reference("new Map()"));
    assert_eq!(classify("subject(new Set);"), reference("new Set()"));
    assert_eq!(classify("subject(new Date(0));"), reference("new Date()"));
    // Unnamed callees fall back to their first token
    assert_eq!(classify("subject(new (class {})());"), reference("new class()"));
    assert_eq!(classify("subject(new lib.widgets.Widget());"), reference("new lib()"));
    assert_eq!(
        classify("subject(new someVeryLongFactoryNameHere.Thing());"),
        reference("new someVeryLongFactoryN()")
    );
}

#[test]
fn test_regexp_constructor_respects_option() {
    assert_eq!(classify("subject(new RegExp('a+'));"), Verdict::value());
    assert_eq!(classify_strict("subject(new RegExp('a+'));"), reference("new RegExp()"));
}

#[test]
fn test_shadowed_regexp_constructor_is_a_reference() {
    let source = "class RegExp {}\nsubject(new RegExp());";
    assert_eq!(classify(source), reference("new RegExp()"));
}

#[test]
fn test_functions_respect_option() {
    for expr in ["() => {}", "x => x", "async () => 1", "function () {}", "function named() {}"] {
        let source = format!("subject({expr});");
        assert_eq!(classify(&source), Verdict::value(), "{expr}");
        assert_eq!(classify_strict(&source), reference("Function"), "{expr}");
    }
}

#[test]
fn test_classes_and_calls_are_unlabelled_references() {
    assert_eq!(classify("subject(class {});"), Verdict::reference(None));
    assert_eq!(classify("subject(class Named {});"), Verdict::reference(None));
    assert_eq!(classify("subject(make());"), Verdict::reference(None));
    assert_eq!(classify("subject(obj.create(1));"), Verdict::reference(None));
}

#[test]
fn test_symbol_calls_are_value_types() {
    assert_eq!(classify("subject(Symbol('key'));"), Verdict::value());
    assert_eq!(classify("subject(Symbol());"), Verdict::value());
}

#[test]
fn test_shadowed_symbol_is_traced_but_still_value_type() {
    let fixture = Fixture::new("function Symbol() { return {}; }\nsubject(Symbol());");
    let (verdict, events) = fixture.classify_traced(ClassifierOptions::default());
    assert_eq!(verdict, Verdict::value());
    assert!(events.iter().any(|e| e.starts_with("ShadowedSymbol")), "{events:?}");
}

#[test]
fn test_parentheses_are_transparent() {
    assert_eq!(classify("subject(({}));"), reference("Object"));
    assert_eq!(classify("subject(((42)));"), Verdict::value());
}

#[test]
fn test_other_expressions_default_to_value_type() {
    for expr in [
        "a || {}",
        "c ? {} : []",
        "this",
        "obj.prop",
        "obj[key]",
        "-1",
        "typeof x",
        "(a, {})",
        "tag`x`",
        "x = {}",
    ] {
        let source = format!("subject({expr});");
        assert_eq!(classify_strict(&source), Verdict::value(), "{expr}");
    }
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn test_fixed_binding_follows_initializer() {
    assert_eq!(classify("const p = {};\nsubject(p);"), reference("Object"));
    assert_eq!(classify("const list = [];\nsubject(list);"), reference("Array"));
    assert_eq!(classify("const m = new Map();\nsubject(m);"), reference("new Map()"));
}

#[test]
fn test_fixed_binding_to_value_matches_initializer() {
    for init in ["42", "'s'", "`t`", "null", "() => 1", "/r/"] {
        let via_binding = classify(&format!("const v = {init};\nsubject(v);"));
        let direct = classify(&format!("subject({init});"));
        assert_eq!(via_binding, direct, "{init}");
    }
}

#[test]
fn test_unlabelled_initializer_gets_variable_label() {
    assert_eq!(classify("const made = make();\nsubject(made);"), reference("variable (made)"));
    assert_eq!(classify("const K = class {};\nsubject(K);"), reference("variable (K)"));
}

#[test]
fn test_alias_chain_keeps_innermost_label() {
    let source = "const a = {};\nconst b = a;\nconst c = b;\nsubject(c);";
    assert_eq!(classify(source), reference("Object"));
}

#[test]
fn test_reassignable_bindings_are_value_types() {
    assert_eq!(classify("let p = {};\nsubject(p);"), Verdict::value());
    assert_eq!(classify("var p = [];\nsubject(p);"), Verdict::value());
    assert_eq!(classify("function f(p = {}) { subject(p); }"), Verdict::value());
    assert_eq!(classify("try {} catch (e) { subject(e); }"), Verdict::value());
}

#[test]
fn test_fixed_bindings_without_initializer_are_value_types() {
    assert_eq!(classify("function f() {}\nsubject(f);"), Verdict::value());
    assert_eq!(classify("class C {}\nsubject(C);"), Verdict::value());
    assert_eq!(classify("import dep from 'dep';\nsubject(dep);"), Verdict::value());
    assert_eq!(classify("const { a } = source;\nsubject(a);"), Verdict::value());
}

#[test]
fn test_unresolved_identifiers_are_value_types() {
    let fixture = Fixture::new("subject(globalThing);");
    let (verdict, events) = fixture.classify_traced(ClassifierOptions::default());
    assert_eq!(verdict, Verdict::value());
    assert!(events.iter().any(|e| e.starts_with("Unresolved")), "{events:?}");
}

#[test]
fn test_inner_declaration_shadows_outer() {
    let shadowed = "const x = {};\nfunction f() { let x = 1; subject(x); }";
    assert_eq!(classify(shadowed), Verdict::value());

    let inner_const = "let x = 1;\n{ const x = []; subject(x); }";
    assert_eq!(classify(inner_const), reference("Array"));

    let outer_visible = "const x = {};\nfunction f() { subject(x); }";
    assert_eq!(classify(outer_visible), reference("Object"));
}

// =============================================================================
// Failure semantics
// =============================================================================

#[test]
fn test_cyclic_bindings_terminate_as_value_type() {
    let fixture = Fixture::new("const a = b;\nconst b = a;\nsubject(a);");
    let (verdict, events) = fixture.classify_traced(ClassifierOptions::default());
    assert_eq!(verdict, Verdict::value());
    assert!(
        events.iter().any(|e| e.starts_with("RecursionDenied") && e.contains("Cycle")),
        "{events:?}"
    );
}

#[test]
fn test_deep_binding_chain_is_cut() {
    let mut source = String::from("const v0 = {};\n");
    for i in 1..100 {
        source.push_str(&format!("const v{i} = v{};\n", i - 1));
    }
    source.push_str("subject(v99);\n");

    let fixture = Fixture::new(&source);
    let (verdict, events) = fixture.classify_traced(ClassifierOptions::default());
    assert_eq!(verdict, Verdict::value());
    assert!(
        events.iter().any(|e| e.contains("DepthExceeded")),
        "expected a depth cut"
    );

    // A short chain still resolves
    let short = "const v0 = {};\nconst v1 = v0;\nconst v2 = v1;\nsubject(v2);";
    assert_eq!(classify(short), reference("Object"));
}

struct FailingResolver;

impl BindingResolver for FailingResolver {
    fn resolve_identifier(&self, _ident: NodeIndex) -> Result<Option<Binding>, ResolveError> {
        Err(ResolveError::Unbound)
    }
}

#[test]
fn test_resolver_errors_are_treated_as_unresolved() {
    let fixture = Fixture::new("const p = {};\nsubject(p);");
    let tracer = RecordingTracer::default();
    let classifier = TypeClassifier::new(&fixture.arena, FailingResolver, ClassifierOptions::STRICT)
        .with_tracer(&tracer);
    assert_eq!(classifier.classify(fixture.subject), Verdict::value());
    assert!(tracer.events.borrow().iter().any(|e| e.starts_with("ResolverFailed")));
}

#[test]
fn test_custom_resolver_drives_identifier_classification() {
    // A resolver that binds every identifier to the same fixed initializer
    struct Constant(Binding);
    impl BindingResolver for Constant {
        fn resolve_identifier(&self, _ident: NodeIndex) -> Result<Option<Binding>, ResolveError> {
            Ok(Some(self.0))
        }
    }

    let fixture = Fixture::new("let unused = [1];\nsubject(anything);");
    let array = fixture
        .arena
        .nodes
        .iter()
        .position(|node| matches!(node.data, NodeData::ArrayLiteral(_)))
        .map(|i| NodeIndex(i as u32))
        .expect("array literal");
    let binding = Binding {
        symbol: fillcheck_binder::SymbolId(0),
        kind: fillcheck_binder::DeclarationKind::Fixed,
        initializer: array,
    };
    let classifier = TypeClassifier::new(&fixture.arena, Constant(binding), ClassifierOptions::default());
    assert_eq!(classifier.classify(fixture.subject), reference("Array"));
}

#[test]
fn test_absent_and_out_of_range_nodes() {
    let fixture = Fixture::new("subject({});");
    let classifier = TypeClassifier::for_file(&fixture.arena, &fixture.binder, ClassifierOptions::STRICT);
    assert_eq!(classifier.classify(NodeIndex::NONE), Verdict::value());
    assert_eq!(classifier.classify(NodeIndex(1_000_000)), Verdict::value());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_classification_is_idempotent() {
    let fixture = Fixture::new("const a = {};\nconst b = a;\nsubject(b);");
    let classifier = TypeClassifier::for_file(&fixture.arena, &fixture.binder, ClassifierOptions::default());
    let first = classifier.classify(fixture.subject);
    let second = classifier.classify(fixture.subject);
    assert_eq!(first, second);
    assert_eq!(first, reference("Object"));
}

#[test]
fn test_options_only_affect_regex_and_functions() {
    for expr in ["{}", "[]", "new Map()", "class {}", "make()", "42", "`t`", "Symbol()"] {
        let source = format!("subject({expr});");
        let fixture = Fixture::new(&source);
        let default = fixture.classify(ClassifierOptions::default());
        for options in [
            ClassifierOptions::STRICT,
            ClassifierOptions {
                can_fill_with_function: false,
                can_fill_with_regexp: true,
            },
            ClassifierOptions {
                can_fill_with_function: true,
                can_fill_with_regexp: false,
            },
        ] {
            assert_eq!(fixture.classify(options), default, "{expr} with {options:?}");
        }
    }

    let function_only = ClassifierOptions {
        can_fill_with_function: false,
        can_fill_with_regexp: true,
    };
    assert_eq!(Fixture::new("subject(/r/);").classify(function_only), Verdict::value());
    assert_eq!(Fixture::new("subject(() => 1);").classify(function_only), reference("Function"));
}

#[test]
fn test_log_tracer_accepts_every_event() {
    let fixture = Fixture::new("const a = b;\nconst b = a;\nconst c = {};\nsubject(c);");
    let verdict = TypeClassifier::for_file(&fixture.arena, &fixture.binder, ClassifierOptions::default())
        .with_tracer(&LogTracer)
        .classify(fixture.subject);
    assert_eq!(verdict, reference("Object"));
}

#[test]
fn test_label_suffix() {
    assert_eq!(reference("Object").label_suffix(), " (Object)");
    assert_eq!(Verdict::reference(None).label_suffix(), "");
    assert_eq!(Verdict::value().label_suffix(), "");
}

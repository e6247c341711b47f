//! Type classifier benchmarks.
//!
//! Measures classification of every `fill(...)` argument in a file, with and
//! without binding chains to follow.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fillcheck_binder::BinderState;
use fillcheck_classifier::{ClassifierOptions, TypeClassifier};
use fillcheck_parser::parser::{NodeArena, NodeData};
use fillcheck_parser::{NodeIndex, ParserState};

/// Direct literals only.
const LITERALS_CODE: &str = r#"
new Array(3).fill(0);
new Array(3).fill("s");
new Array(3).fill({});
new Array(3).fill([]);
new Array(3).fill(new Map());
new Array(3).fill(`t${1}`);
new Array(3).fill(() => {});
new Array(3).fill(/re/);
"#;

/// Arguments that resolve through `const` aliases.
const ALIAS_CHAIN_CODE: &str = r#"
const base = { a: 1 };
const a1 = base;
const a2 = a1;
const a3 = a2;
const a4 = a3;
const a5 = a4;
function build() {
    const local = a5;
    return Array.from({ length: 3 }).fill(local);
}
let mutable = [];
Array(4).fill(mutable);
"#;

/// Deeply nested scopes around the call.
const NESTED_SCOPES_CODE: &str = r#"
const shared = new Set();
function outer() {
    const x = 1;
    return function middle() {
        let y = 2;
        return () => {
            {
                {
                    return [].fill(shared);
                }
            }
        };
    };
}
"#;

fn parse_and_bind(code: &str) -> (NodeArena, BinderState) {
    let mut parser = ParserState::new("bench.js".to_string(), code.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder)
}

/// First argument of every call in the arena.
fn call_arguments(arena: &NodeArena) -> Vec<NodeIndex> {
    arena
        .nodes
        .iter()
        .filter_map(|node| match &node.data {
            NodeData::CallExpression(call) => call.arguments.as_ref()?.first(),
            _ => None,
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let test_cases = [
        ("literals", LITERALS_CODE),
        ("alias_chain", ALIAS_CHAIN_CODE),
        ("nested_scopes", NESTED_SCOPES_CODE),
    ];

    for (name, code) in test_cases {
        let (arena, binder) = parse_and_bind(code);
        let arguments = call_arguments(&arena);
        group.bench_with_input(BenchmarkId::new("arguments", name), &arguments, |b, args| {
            let classifier = TypeClassifier::for_file(&arena, &binder, ClassifierOptions::STRICT);
            b.iter(|| {
                for &arg in args {
                    black_box(classifier.classify(black_box(arg)));
                }
            })
        });
    }

    group.finish();
}

fn bench_parse_bind_classify(c: &mut Criterion) {
    c.bench_function("parse_bind_classify/alias_chain", |b| {
        b.iter(|| {
            let (arena, binder) = parse_and_bind(black_box(ALIAS_CHAIN_CODE));
            let classifier = TypeClassifier::for_file(&arena, &binder, ClassifierOptions::default());
            call_arguments(&arena)
                .into_iter()
                .filter(|&arg| classifier.classify(arg).is_reference_type)
                .count()
        })
    });
}

criterion_group!(benches, bench_classify, bench_parse_bind_classify);
criterion_main!(benches);

//! Tests for identifier resolution through `BinderState` and `ArenaResolver`.

use fillcheck_binder::{ArenaResolver, BinderState, DeclarationKind, ResolveError};
use fillcheck_parser::parser::{NodeArena, NodeData};
use fillcheck_parser::{NodeIndex, ParserState};

struct Bound {
    arena: NodeArena,
    binder: BinderState,
    root: NodeIndex,
}

impl Bound {
    fn new(source: &str) -> Self {
        let mut parser = ParserState::new("test.js".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(parser.get_diagnostics().is_empty());
        let arena = parser.into_arena();
        let mut binder = BinderState::new();
        binder.bind_source_file(&arena, root);
        Bound {
            arena,
            binder,
            root,
        }
    }

    fn resolver(&self) -> ArenaResolver<'_> {
        ArenaResolver::new(&self.arena, &self.binder)
    }

    /// The last identifier spelled `name`: the reference in these tests.
    fn last(&self, name: &str) -> NodeIndex {
        self.arena
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                matches!(&node.data, NodeData::Identifier(id) if id.escaped_text == name)
            })
            .max_by_key(|(_, node)| node.pos)
            .map(|(i, _)| NodeIndex(i as u32))
            .unwrap_or_else(|| panic!("no identifier {name}"))
    }

    fn kind_of(&self, name: &str) -> Option<DeclarationKind> {
        self.resolver()
            .resolve(self.last(name))
            .expect("resolution should not fail")
            .map(|binding| binding.kind)
    }
}

#[test]
fn test_declaration_kinds() {
    let source = r#"
import imported from "mod";
const c = 1;
let l = 1;
var v = 1;
function fn() {}
class Klass {}
function params(p) { try {} catch (e) { use(e, p); } }
use(imported, c, l, v, fn, Klass);
"#;
    let bound = Bound::new(source);
    assert_eq!(bound.kind_of("imported"), Some(DeclarationKind::Fixed));
    assert_eq!(bound.kind_of("c"), Some(DeclarationKind::Fixed));
    assert_eq!(bound.kind_of("fn"), Some(DeclarationKind::Fixed));
    assert_eq!(bound.kind_of("Klass"), Some(DeclarationKind::Fixed));
    assert_eq!(bound.kind_of("l"), Some(DeclarationKind::Reassignable));
    assert_eq!(bound.kind_of("v"), Some(DeclarationKind::Reassignable));
    assert_eq!(bound.kind_of("p"), Some(DeclarationKind::Reassignable));
    assert_eq!(bound.kind_of("e"), Some(DeclarationKind::Reassignable));
}

#[test]
fn test_unresolved_globals() {
    let bound = Bound::new("use(Array, undefined, Symbol);");
    assert_eq!(bound.kind_of("Array"), None);
    assert_eq!(bound.kind_of("undefined"), None);
    assert_eq!(bound.kind_of("Symbol"), None);
}

#[test]
fn test_binding_carries_initializer() {
    let bound = Bound::new("const shared = { a: 1 };\nuse(shared);");
    let binding = bound
        .resolver()
        .resolve(bound.last("shared"))
        .expect("ok")
        .expect("declared");
    assert_eq!(binding.kind, DeclarationKind::Fixed);
    assert_eq!(bound.arena.node_text(binding.initializer), Some("{ a: 1 }"));
}

#[test]
fn test_inner_scope_shadows_outer() {
    let source = r#"
const x = {};
function f() {
  let x = 1;
  {
    use(x);
  }
}
"#;
    let bound = Bound::new(source);
    let binding = bound
        .resolver()
        .resolve(bound.last("x"))
        .expect("ok")
        .expect("declared");
    assert_eq!(binding.kind, DeclarationKind::Reassignable);
    assert_eq!(bound.arena.node_text(binding.initializer), Some("1"));
}

#[test]
fn test_outer_binding_visible_in_closures() {
    let bound = Bound::new("const outer = [];\nconst f = () => () => outer;");
    assert_eq!(bound.kind_of("outer"), Some(DeclarationKind::Fixed));
}

#[test]
fn test_block_scoped_names_do_not_leak() {
    let bound = Bound::new("{ const hidden = {}; }\nuse(hidden);");
    assert_eq!(bound.kind_of("hidden"), None);
}

#[test]
fn test_hoisted_function_resolves_before_declaration() {
    let bound = Bound::new("use(later);\nfunction later() {}");
    let first_use = bound
        .arena
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| matches!(&node.data, NodeData::Identifier(id) if id.escaped_text == "later"))
        .min_by_key(|(_, node)| node.pos)
        .map(|(i, _)| NodeIndex(i as u32))
        .expect("reference");
    let binding = bound.resolver().resolve(first_use).expect("ok");
    assert!(binding.is_some());
}

#[test]
fn test_switch_discriminant_is_outside_case_scope() {
    let source = r#"
const key = {};
switch (key) {
  case 1:
    let key = 2;
    break;
}
"#;
    let bound = Bound::new(source);
    let discriminant = bound
        .arena
        .nodes
        .iter()
        .find_map(|node| match &node.data {
            NodeData::SwitchStatement(switch) => Some(switch.expression),
            _ => None,
        })
        .expect("switch");
    let binding = bound
        .resolver()
        .resolve(discriminant)
        .expect("ok")
        .expect("declared");
    assert_eq!(binding.kind, DeclarationKind::Fixed);
}

#[test]
fn test_resolve_errors() {
    let bound = Bound::new("const a = 1;");
    let resolver = bound.resolver();

    assert_eq!(
        resolver.resolve(NodeIndex(9_999)),
        Err(ResolveError::NodeNotFound(NodeIndex(9_999)))
    );
    assert!(matches!(
        resolver.resolve(bound.root),
        Err(ResolveError::NotAnIdentifier { kind: "SourceFile", .. })
    ));

    let unbound = BinderState::new();
    let resolver = ArenaResolver::new(&bound.arena, &unbound);
    assert_eq!(resolver.resolve(bound.last("a")), Err(ResolveError::Unbound));
    assert_eq!(ResolveError::Unbound.to_string(), "source file has not been bound");
}

#[test]
fn test_binder_resolve_identifier_matches_resolver() {
    let bound = Bound::new("const a = {};\nuse(a);");
    let reference = bound.last("a");
    let symbol = bound
        .binder
        .resolve_identifier(&bound.arena, reference)
        .expect("declared");
    let binding = bound.resolver().resolve(reference).expect("ok").expect("declared");
    assert_eq!(binding.symbol, symbol);
    assert_eq!(bound.binder.get_symbol(symbol).map(|s| s.name.as_str()), Some("a"));
}

#[test]
fn test_deep_binary_chain_binds_without_overflow() {
    let operands = vec!["x"; 20_000].join(" + ");
    let source = format!(
        "const x = {{}};\nconst y = (() => {{ const hidden = 1; return hidden; }})() + {operands};\nconst after = [];\nuse(after, y);\n"
    );
    let bound = Bound::new(&source);

    assert!(bound.binder.depth_exceeded());
    assert_eq!(bound.kind_of("after"), Some(DeclarationKind::Fixed));
    assert_eq!(bound.kind_of("y"), Some(DeclarationKind::Fixed));
    // The leftmost operand sits below the depth limit and is never bound
    assert_eq!(bound.kind_of("hidden"), None);

    assert!(!Bound::new("const a = b + c;").binder.depth_exceeded());
}

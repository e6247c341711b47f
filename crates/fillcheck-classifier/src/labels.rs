//! Display labels for reference-type expressions.
//!
//! Labels only feed diagnostic messages; they never change a verdict.

use fillcheck_common::limits::MAX_LABEL_NAME_LEN;
use fillcheck_parser::NodeIndex;
use fillcheck_parser::parser::{LiteralKind, NodeArena, NodeData};
use fillcheck_scanner::first_token_text;

/// Label for the expression at `node`, if its shape has one.
///
/// | expression              | label          |
/// |-------------------------|----------------|
/// | `{}`                    | `Object`       |
/// | `[]`                    | `Array`        |
/// | `new Map()`             | `new Map()`    |
/// | `new (class {})()`      | `new class()`  |
/// | `() => {}`, `function`  | `Function`     |
/// | `/re/`                  | `RegExp`       |
pub fn type_label(arena: &NodeArena, node: NodeIndex) -> Option<String> {
    let node = arena.get(node)?;
    match &node.data {
        NodeData::ObjectLiteral(_) => Some("Object".to_string()),
        NodeData::ArrayLiteral(_) => Some("Array".to_string()),
        NodeData::NewExpression(new) => {
            constructor_name(arena, new.expression).map(|name| format!("new {name}()"))
        }
        NodeData::FunctionExpression(_) | NodeData::ArrowFunction(_) => {
            Some("Function".to_string())
        }
        NodeData::Literal(lit) if lit.kind == LiteralKind::RegularExpression => {
            Some("RegExp".to_string())
        }
        _ => None,
    }
}

/// Label for an identifier that did not unwrap to a labelled shape.
pub fn variable_label(name: &str) -> String {
    format!("variable ({name})")
}

/// Name of a `new` callee: the identifier itself, or else the first token of
/// its source text, truncated to `MAX_LABEL_NAME_LEN` characters.
pub fn constructor_name(arena: &NodeArena, callee: NodeIndex) -> Option<String> {
    let callee = arena.skip_parentheses(callee);
    if let Some(name) = arena.identifier_text(callee) {
        return Some(name.to_string());
    }
    let token = first_token_text(arena.node_text(callee)?)?;
    Some(token.chars().take(MAX_LABEL_NAME_LEN).collect())
}

//! Centralized limits and thresholds for fillcheck.
//!
//! Recursion depths, walk bounds and display truncation lengths shared across
//! the parser, binder, classifier and reporter live here so every crate agrees
//! on the same values.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of identifier hops the classifier follows.
///
/// Each hop resolves an identifier to a `const` declaration and classifies its
/// initializer. Real code rarely chains more than a handful of aliases:
///
/// ```javascript
/// const a = {};
/// const b = a;
/// const c = b; // classify(c) -> classify(b) -> classify(a) -> Object
/// ```
///
/// Exceeding the limit classifies the identifier as a value type.
pub const MAX_BINDING_CHAIN_DEPTH: u32 = 64;

/// Maximum total binding lookups per classification call.
pub const MAX_BINDING_CHAIN_ITERATIONS: u32 = 10_000;

/// Maximum tree depth the binder descends into.
///
/// Binary and member chains are parsed in a loop, so their trees can be far
/// deeper than any nesting the parser would accept:
///
/// ```javascript
/// const bundle = a + a + a + /* ... 20,000 terms ... */ a;
/// ```
///
/// Declarations below the limit are not bound; references to them resolve as
/// "not found".
pub const MAX_AST_DEPTH: u32 = 500;

/// Maximum nesting depth for recursive-descent parsing.
///
/// Guards against stack overflow on inputs like `((((((...))))))` or
/// `[[[[[[...]]]]]]`. Past the limit the parser reports a diagnostic and
/// stops descending.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 200;

// =============================================================================
// Walk Limits
// =============================================================================

/// Maximum parent-chain steps when locating the scope of a node.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;

/// Maximum scope-chain steps when resolving an identifier.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

// =============================================================================
// Display Limits
// =============================================================================

/// Maximum length of a constructor name shown in a diagnostic label.
///
/// Applies when the name is lexed from the callee's source text, e.g. the
/// `class` in `new (class { ... })()`.
pub const MAX_LABEL_NAME_LEN: usize = 20;

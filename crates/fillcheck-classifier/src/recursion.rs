//! Recursion guard for following identifier bindings.
//!
//! Classifying `c` in `const a = {}; const b = a; const c = b;` walks the
//! chain `c -> b -> a -> {}`. Well-formed input cannot loop, since a `const`
//! initializer cannot read its own binding before it is initialized, but the
//! arena may come from anywhere. `RecursionGuard` refuses to follow a
//! binding that is already on the walk, one past `MAX_BINDING_CHAIN_DEPTH`
//! hops, or any hop once `MAX_BINDING_CHAIN_ITERATIONS` lookups were spent.
//!
//! Debug builds panic when a guard is dropped with keys still entered, or
//! when a key is left twice.

use fillcheck_common::limits::{MAX_BINDING_CHAIN_DEPTH, MAX_BINDING_CHAIN_ITERATIONS};
use rustc_hash::FxHashSet;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited.
    Cycle,
    /// Maximum recursion depth exceeded.
    DepthExceeded,
    /// Maximum iteration count exceeded.
    IterationExceeded,
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Keys currently being followed, plus the depth and work counters.
///
/// ```ignore
/// let mut guard = RecursionGuard::binding_chain();
///
/// match guard.enter(symbol) {
///     RecursionResult::Entered => {
///         let verdict = classify(initializer);
///         guard.leave(symbol);
///         verdict
///     }
///     _ => Verdict::value(),
/// }
/// ```
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    /// Create a guard with explicit limits.
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    /// Limits for identifier-to-initializer hops during one classification.
    pub fn binding_chain() -> Self {
        Self::new(MAX_BINDING_CHAIN_DEPTH, MAX_BINDING_CHAIN_ITERATIONS)
    }

    /// Try to enter a recursive computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller **must** call
    /// [`leave`](Self::leave) with the same key when done.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.depth >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave a recursive computation for `key`.
    ///
    /// # Debug panics
    ///
    /// In debug builds, panics if `key` is not in the visiting set.
    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);

        debug_assert!(
            was_present,
            "RecursionGuard::leave() without a matching enter()"
        );

        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!("RecursionGuard dropped with {} active entries", self.visiting.len());
        }
    }
}

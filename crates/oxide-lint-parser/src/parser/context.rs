//! Per-parse matching state.

use std::collections::HashMap;

use super::MatchResult;
use crate::dialect::{Dialect, LibraryEntry};
use crate::grammar::Grammar;
use crate::segment::Segment;

/// Default bound on nested grammar evaluation.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 512;

/// Identity of one named match: the library entry, the input slice and
/// the terminators active at the time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MemoKey {
    entry: usize,
    start: usize,
    len: usize,
    terminators: Vec<usize>,
}

/// State threaded through one match: the active dialect, the stack of
/// terminators pushed by enclosing grammars, the recursion depth and the
/// results of named matches already evaluated.
///
/// A context is owned by a single parse. Nothing in it is shared between
/// threads; the dialect is only read. Results are remembered by input
/// position, so one context must only see slices of a single token buffer
/// that outlives it.
#[derive(Debug)]
pub struct ParseContext<'a> {
    dialect: &'a Dialect,
    terminators: Vec<&'a Grammar>,
    depth: usize,
    max_depth: usize,
    depth_exceeded: bool,
    limit_hits: usize,
    memo: HashMap<MemoKey, Option<MatchResult>>,
}

impl<'a> ParseContext<'a> {
    /// Creates a context for `dialect` with the default recursion bound.
    #[must_use]
    pub fn new(dialect: &'a Dialect) -> Self {
        Self::with_max_depth(dialect, DEFAULT_MAX_RECURSION_DEPTH)
    }

    /// Creates a context with an explicit recursion bound.
    #[must_use]
    pub fn with_max_depth(dialect: &'a Dialect, max_depth: usize) -> Self {
        Self {
            dialect,
            terminators: Vec::new(),
            depth: 0,
            max_depth,
            depth_exceeded: false,
            limit_hits: 0,
            memo: HashMap::new(),
        }
    }

    /// Returns the dialect grammars are resolved against.
    #[must_use]
    pub const fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    /// Returns the terminators pushed by enclosing grammars, innermost last.
    #[must_use]
    pub fn terminators(&self) -> &[&'a Grammar] {
        &self.terminators
    }

    /// Returns true once any evaluation hit the recursion bound.
    #[must_use]
    pub const fn depth_exceeded(&self) -> bool {
        self.depth_exceeded
    }

    /// Returns the number of distinct named matches remembered so far.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    pub(crate) fn memo_key(&self, entry: &LibraryEntry, segments: &[Segment]) -> MemoKey {
        MemoKey {
            entry: std::ptr::from_ref(entry) as usize,
            start: segments.as_ptr() as usize,
            len: segments.len(),
            terminators: self
                .terminators
                .iter()
                .map(|&t| std::ptr::from_ref(t) as usize)
                .collect(),
        }
    }

    pub(crate) fn recall(&self, key: &MemoKey) -> Option<Option<MatchResult>> {
        self.memo.get(key).cloned()
    }

    pub(crate) fn remember(&mut self, key: MemoKey, result: Option<MatchResult>) {
        self.memo.insert(key, result);
    }

    /// Counts how often the recursion bound has refused an evaluation. A
    /// result computed while this moved depends on depth and is not kept.
    pub(crate) const fn limit_hits(&self) -> usize {
        self.limit_hits
    }

    /// Runs `f` with `terminators` added to the active set.
    pub(crate) fn with_terminators<R>(
        &mut self,
        terminators: impl IntoIterator<Item = &'a Grammar>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let mark = self.terminators.len();
        self.terminators.extend(terminators);
        let result = f(self);
        self.terminators.truncate(mark);
        result
    }

    /// Runs `f` with no active terminators, as inside a bracket pair or
    /// while testing a terminator itself.
    pub(crate) fn without_terminators<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::take(&mut self.terminators);
        let result = f(self);
        self.terminators = saved;
        result
    }

    /// Enters one level of grammar evaluation. Returns false, and leaves
    /// the depth unchanged, when the bound is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            if !self.depth_exceeded {
                tracing::warn!(max_depth = self.max_depth, "recursion limit reached");
            }
            self.depth_exceeded = true;
            self.limit_hits += 1;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

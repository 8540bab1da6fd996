//! SQL dialects.
//!
//! A [`Dialect`] is a frozen bundle of lexer matchers, named grammars,
//! segment definitions, named string sets and bracket pair sets. Dialects
//! are built with a [`DialectBuilder`], either from scratch or derived from
//! a parent with [`Dialect::derive`], and never change once finished. A
//! finished dialect is `Send + Sync` and can be shared by any number of
//! concurrent parses.

mod builder;
mod library;

use indexmap::{IndexMap, IndexSet};

pub use builder::{default_bracket_pairs, DialectBuilder};
pub use library::{BracketPair, LibraryEntry, SegmentDef};

use crate::error::{DialectError, DialectResult};
use crate::grammar::Grammar;
use crate::lexer::{LexMatcher, Lexer};
use crate::segment::{ReferenceLevel, ReferencePart, ReferenceStyle, Segment};

/// A finished, immutable SQL dialect.
#[derive(Debug, Clone)]
pub struct Dialect {
    name: String,
    parent: Option<String>,
    root: &'static str,
    library: IndexMap<&'static str, LibraryEntry>,
    lexer_matchers: Vec<LexMatcher>,
    sets: IndexMap<&'static str, IndexSet<String>>,
    bracket_sets: IndexMap<&'static str, Vec<BracketPair>>,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the dialect this one was derived from.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the name of the segment definition a whole file parses as.
    #[must_use]
    pub const fn root(&self) -> &'static str {
        self.root
    }

    /// Starts building a child dialect from a copy of this one.
    ///
    /// The copy is structural: later edits on the builder never reach
    /// `self`.
    #[must_use]
    pub fn derive(&self, name: impl Into<String>) -> DialectBuilder {
        let name = name.into();
        tracing::debug!(parent = %self.name, dialect = %name, "deriving dialect");
        let mut child = self.clone();
        child.parent = Some(std::mem::replace(&mut child.name, name));
        DialectBuilder::from_dialect(child)
    }

    /// Looks up a named library entry.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&LibraryEntry> {
        self.library.get(name)
    }

    /// Returns the names of every library entry, in definition order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.library.keys().copied()
    }

    /// Returns the named grammar.
    ///
    /// # Errors
    ///
    /// Fails if the name is unknown or names a segment definition.
    pub fn grammar(&self, name: &str) -> DialectResult<&Grammar> {
        match self.library.get(name) {
            Some(LibraryEntry::Grammar(grammar)) => Ok(grammar),
            Some(LibraryEntry::Segment(_)) => Err(self.wrong_kind(name, "grammar")),
            None => Err(self.unknown(name)),
        }
    }

    /// Returns the named segment definition.
    ///
    /// # Errors
    ///
    /// Fails if the name is unknown or names a plain grammar.
    pub fn segment(&self, name: &str) -> DialectResult<&SegmentDef> {
        match self.library.get(name) {
            Some(LibraryEntry::Segment(def)) => Ok(def),
            Some(LibraryEntry::Grammar(_)) => Err(self.wrong_kind(name, "segment")),
            None => Err(self.unknown(name)),
        }
    }

    /// Returns the ordered lexer matchers.
    #[must_use]
    pub fn lexer_matchers(&self) -> &[LexMatcher] {
        &self.lexer_matchers
    }

    /// Returns a lexer for this dialect.
    #[must_use]
    pub fn lexer(&self) -> Lexer<'_> {
        Lexer::new(&self.lexer_matchers)
    }

    /// Returns the named set, if the dialect defines it.
    #[must_use]
    pub fn set(&self, name: &str) -> Option<&IndexSet<String>> {
        self.sets.get(name)
    }

    /// Returns true if `value` is in the named set. Unknown sets are empty.
    #[must_use]
    pub fn set_contains(&self, set: &str, value: &str) -> bool {
        self.sets.get(set).is_some_and(|s| s.contains(value))
    }

    /// Returns the pairs of the named bracket pair set.
    #[must_use]
    pub fn bracket_pairs(&self, set: &str) -> &[BracketPair] {
        self.bracket_sets.get(set).map_or(&[], Vec::as_slice)
    }

    /// Returns the pair of `bracket_type` in the named set.
    #[must_use]
    pub fn bracket_pair(&self, set: &str, bracket_type: &str) -> Option<&BracketPair> {
        self.bracket_pairs(set)
            .iter()
            .find(|pair| pair.bracket_type == bracket_type)
    }

    /// Returns the reference style of the definition that built `segment`.
    #[must_use]
    pub fn reference_style(&self, segment: &Segment) -> ReferenceStyle {
        segment
            .name()
            .and_then(|name| self.segment(name).ok())
            .map_or(ReferenceStyle::NotAReference, SegmentDef::references)
    }

    /// Splits a reference segment into its parts, using this dialect's
    /// interpretation of that segment kind.
    #[must_use]
    pub fn iter_raw_references<'a>(&self, segment: &'a Segment) -> Vec<ReferencePart<'a>> {
        self.reference_style(segment).iter_raw_references(segment)
    }

    /// Returns the parts of a reference segment that may name the object at
    /// `level`, using this dialect's interpretation of that segment kind.
    #[must_use]
    pub fn extract_possible_references<'a>(
        &self,
        segment: &'a Segment,
        level: ReferenceLevel,
    ) -> Vec<ReferencePart<'a>> {
        self.reference_style(segment)
            .extract_possible_references(segment, level)
    }

    fn unknown(&self, name: &str) -> DialectError {
        DialectError::UnknownName {
            dialect: self.name.clone(),
            name: name.to_string(),
        }
    }

    fn wrong_kind(&self, name: &str, expected: &'static str) -> DialectError {
        DialectError::WrongKind {
            dialect: self.name.clone(),
            name: name.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_dialect_is_shareable() {
        assert_send_sync::<Dialect>();
    }
}

//! Construction of dialects.

use indexmap::{IndexMap, IndexSet};

use super::{BracketPair, Dialect, LibraryEntry, SegmentDef};
use crate::error::{DialectError, DialectResult};
use crate::grammar::{Grammar, DEFAULT_BRACKET_SET};
use crate::lexer::LexMatcher;

/// A dialect under construction.
///
/// Edits are only possible here; [`DialectBuilder::finish`] validates the
/// result and freezes it into a [`Dialect`].
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    dialect: Dialect,
    own: IndexSet<&'static str>,
}

impl DialectBuilder {
    /// Starts an empty dialect whose files parse as the segment `root`.
    #[must_use]
    pub fn new(name: impl Into<String>, root: &'static str) -> Self {
        Self {
            dialect: Dialect {
                name: name.into(),
                parent: None,
                root,
                library: IndexMap::new(),
                lexer_matchers: Vec::new(),
                sets: IndexMap::new(),
                bracket_sets: IndexMap::new(),
            },
            own: IndexSet::new(),
        }
    }

    pub(super) fn from_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            own: IndexSet::new(),
        }
    }

    /// Returns the name of the dialect being built.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.dialect.name
    }

    /// Changes the root segment.
    pub fn set_root(&mut self, root: &'static str) -> &mut Self {
        self.dialect.root = root;
        self
    }

    /// Adds a named grammar.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::AlreadyRegistered`] if this dialect (not its
    /// parent) already registered `name`.
    pub fn register(&mut self, name: &'static str, grammar: Grammar) -> DialectResult<&mut Self> {
        self.insert_own(name, LibraryEntry::Grammar(grammar))
    }

    /// Adds a segment definition under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::AlreadyRegistered`] if this dialect (not its
    /// parent) already registered the name.
    pub fn register_segment(&mut self, def: SegmentDef) -> DialectResult<&mut Self> {
        self.insert_own(def.name(), LibraryEntry::Segment(def))
    }

    /// Replaces an existing entry with a grammar. Every `Ref` to `name`
    /// resolves to the replacement.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownName`] if nothing is registered under
    /// `name`.
    pub fn replace(&mut self, name: &'static str, grammar: Grammar) -> DialectResult<&mut Self> {
        self.replace_entry(name, LibraryEntry::Grammar(grammar))
    }

    /// Replaces an existing entry with a segment definition of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownName`] if nothing is registered under
    /// the definition's name.
    pub fn replace_segment(&mut self, def: SegmentDef) -> DialectResult<&mut Self> {
        self.replace_entry(def.name(), LibraryEntry::Segment(def))
    }

    /// Returns the current grammar under `name`, typically to derive a
    /// replacement with [`Grammar::copy_with`].
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is a segment definition.
    pub fn grammar(&self, name: &str) -> DialectResult<&Grammar> {
        self.dialect.grammar(name)
    }

    /// Returns the current segment definition under `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is unknown or is a plain grammar.
    pub fn segment(&self, name: &str) -> DialectResult<&SegmentDef> {
        self.dialect.segment(name)
    }

    /// Appends lexer matchers. Earlier matchers take priority.
    pub fn add_lexer_matchers(&mut self, matchers: Vec<LexMatcher>) -> &mut Self {
        self.dialect.lexer_matchers.extend(matchers);
        self
    }

    /// Inserts lexer matchers immediately before the matcher named
    /// `before`, giving them priority over it.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownLexerMatcher`] if `before` is not a
    /// matcher of this dialect.
    pub fn insert_lexer_matchers(
        &mut self,
        matchers: Vec<LexMatcher>,
        before: &str,
    ) -> DialectResult<&mut Self> {
        let idx = self.lexer_position(before)?;
        tracing::debug!(
            dialect = %self.dialect.name,
            before,
            count = matchers.len(),
            "inserting lexer matchers"
        );
        self.dialect.lexer_matchers.splice(idx..idx, matchers);
        Ok(self)
    }

    /// Replaces existing lexer matchers by name, keeping their positions.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnknownLexerMatcher`] if a replacement names
    /// a matcher this dialect does not have.
    pub fn patch_lexer_matchers(&mut self, matchers: Vec<LexMatcher>) -> DialectResult<&mut Self> {
        for matcher in matchers {
            let idx = self.lexer_position(matcher.name())?;
            self.dialect.lexer_matchers[idx] = matcher;
        }
        Ok(self)
    }

    /// Adds `values` to the named set, creating it if needed.
    pub fn update_set<I, S>(&mut self, set: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dialect
            .sets
            .entry(set)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Adds one value to the named set, creating it if needed.
    pub fn add_to_set(&mut self, set: &'static str, value: impl Into<String>) -> &mut Self {
        self.update_set(set, [value])
    }

    /// Removes one value from the named set. Removing an absent value is a
    /// no-op.
    pub fn remove_from_set(&mut self, set: &str, value: &str) -> &mut Self {
        let removed = self
            .dialect
            .sets
            .get_mut(set)
            .is_some_and(|s| s.shift_remove(value));
        if !removed {
            tracing::debug!(dialect = %self.dialect.name, set, value, "value not in set");
        }
        self
    }

    /// Adds pairs to the named bracket pair set. A pair whose type already
    /// exists in the set replaces the old one.
    pub fn update_bracket_pairs(
        &mut self,
        set: &'static str,
        pairs: Vec<BracketPair>,
    ) -> &mut Self {
        let existing = self.dialect.bracket_sets.entry(set).or_default();
        for pair in pairs {
            if let Some(slot) = existing
                .iter_mut()
                .find(|p| p.bracket_type == pair.bracket_type)
            {
                *slot = pair;
            } else {
                existing.push(pair);
            }
        }
        self
    }

    /// Validates and freezes the dialect.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnresolvedReference`] if the root or any
    /// `Ref` or bracket pair grammar name is not defined, and
    /// [`DialectError::UnknownBracketPair`] if a `Bracketed` grammar asks
    /// for a bracket type its pair set lacks.
    pub fn finish(self) -> DialectResult<Dialect> {
        let dialect = self.dialect;
        if dialect.segment(dialect.root).is_err() {
            return Err(DialectError::UnresolvedReference {
                dialect: dialect.name.clone(),
                from: "<root>".to_string(),
                name: dialect.root.to_string(),
            });
        }
        for (set, pairs) in &dialect.bracket_sets {
            for pair in pairs {
                for name in [pair.open, pair.close] {
                    if !dialect.library.contains_key(name) {
                        return Err(DialectError::UnresolvedReference {
                            dialect: dialect.name.clone(),
                            from: format!("{set}.{}", pair.bracket_type),
                            name: name.to_string(),
                        });
                    }
                }
            }
        }
        for (from, entry) in &dialect.library {
            for grammar in entry.grammars() {
                check_grammar(&dialect, from, grammar)?;
            }
        }
        tracing::debug!(
            dialect = %dialect.name,
            parent = ?dialect.parent,
            entries = dialect.library.len(),
            lexer_matchers = dialect.lexer_matchers.len(),
            "dialect finished"
        );
        Ok(dialect)
    }

    fn insert_own(&mut self, name: &'static str, entry: LibraryEntry) -> DialectResult<&mut Self> {
        if !self.own.insert(name) {
            return Err(DialectError::AlreadyRegistered {
                dialect: self.dialect.name.clone(),
                name: name.to_string(),
            });
        }
        if self.dialect.library.insert(name, entry).is_some() {
            tracing::debug!(dialect = %self.dialect.name, name, "shadowing inherited entry");
        }
        Ok(self)
    }

    fn replace_entry(&mut self, name: &'static str, entry: LibraryEntry) -> DialectResult<&mut Self> {
        let Some(slot) = self.dialect.library.get_mut(name) else {
            return Err(self.dialect.unknown(name));
        };
        *slot = entry;
        self.own.insert(name);
        Ok(self)
    }

    fn lexer_position(&self, name: &str) -> DialectResult<usize> {
        self.dialect
            .lexer_matchers
            .iter()
            .position(|m| m.name() == name)
            .ok_or_else(|| DialectError::UnknownLexerMatcher {
                dialect: self.dialect.name.clone(),
                name: name.to_string(),
            })
    }
}

fn check_grammar(dialect: &Dialect, from: &str, grammar: &Grammar) -> DialectResult<()> {
    let mut result = Ok(());
    grammar.walk(&mut |node| {
        if result.is_err() {
            return;
        }
        match node {
            Grammar::Ref(name) if !dialect.library.contains_key(name) => {
                result = Err(DialectError::UnresolvedReference {
                    dialect: dialect.name.clone(),
                    from: from.to_string(),
                    name: (*name).to_string(),
                });
            }
            Grammar::Bracketed(bracketed)
                if dialect
                    .bracket_pair(bracketed.bracket_pairs_set, bracketed.bracket_type)
                    .is_none() =>
            {
                result = Err(DialectError::UnknownBracketPair {
                    dialect: dialect.name.clone(),
                    set: bracketed.bracket_pairs_set.to_string(),
                    bracket_type: bracketed.bracket_type.to_string(),
                });
            }
            _ => {}
        }
    });
    result
}

/// The round, square and curly pairs most dialects start from, named after
/// the grammars `StartBracketSegment`/`EndBracketSegment` and friends.
#[must_use]
pub fn default_bracket_pairs() -> (&'static str, Vec<BracketPair>) {
    (
        DEFAULT_BRACKET_SET,
        vec![
            BracketPair::new("round", "StartBracketSegment", "EndBracketSegment", true),
            BracketPair::new(
                "square",
                "StartSquareBracketSegment",
                "EndSquareBracketSegment",
                true,
            ),
            BracketPair::new(
                "curly",
                "StartCurlyBracketSegment",
                "EndCurlyBracketSegment",
                true,
            ),
        ],
    )
}

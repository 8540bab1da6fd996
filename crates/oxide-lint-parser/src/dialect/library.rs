//! Entries of a dialect's named library.

use crate::grammar::Grammar;
use crate::segment::ReferenceStyle;

/// How to build one kind of tree node.
///
/// The match grammar only has to establish that a run of segments is this
/// kind of node and where it ends. When a separate parse grammar is given,
/// the match phase keeps the run as raw tokens and the parse phase later
/// decomposes it with the parse grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDef {
    name: &'static str,
    seg_type: &'static str,
    match_grammar: Grammar,
    parse_grammar: Option<Grammar>,
    references: ReferenceStyle,
}

impl SegmentDef {
    /// Creates a definition whose match grammar also explains its content.
    #[must_use]
    pub const fn new(name: &'static str, seg_type: &'static str, match_grammar: Grammar) -> Self {
        Self {
            name,
            seg_type,
            match_grammar,
            parse_grammar: None,
            references: ReferenceStyle::NotAReference,
        }
    }

    /// Sets the grammar used in the parse phase.
    #[must_use]
    pub fn with_parse_grammar(mut self, parse_grammar: Grammar) -> Self {
        self.parse_grammar = Some(parse_grammar);
        self
    }

    /// Replaces the match grammar.
    #[must_use]
    pub fn with_match_grammar(mut self, match_grammar: Grammar) -> Self {
        self.match_grammar = match_grammar;
        self
    }

    /// Sets how references are extracted from nodes of this kind.
    #[must_use]
    pub const fn with_references(mut self, references: ReferenceStyle) -> Self {
        self.references = references;
        self
    }

    /// Copies this definition under a new name and type, as a derived
    /// dialect does when it builds a new segment kind from an inherited
    /// one.
    #[must_use]
    pub fn renamed(&self, name: &'static str, seg_type: &'static str) -> Self {
        Self {
            name,
            seg_type,
            ..self.clone()
        }
    }

    /// Returns the definition name, the key it is registered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type tag of nodes built from this definition.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        self.seg_type
    }

    /// Returns the match grammar.
    #[must_use]
    pub const fn match_grammar(&self) -> &Grammar {
        &self.match_grammar
    }

    /// Returns the parse grammar, if distinct from the match grammar.
    #[must_use]
    pub const fn parse_grammar(&self) -> Option<&Grammar> {
        self.parse_grammar.as_ref()
    }

    /// Returns the reference extraction style.
    #[must_use]
    pub const fn references(&self) -> ReferenceStyle {
        self.references
    }

    pub(crate) fn grammars(&self) -> impl Iterator<Item = &Grammar> {
        std::iter::once(&self.match_grammar).chain(self.parse_grammar.as_ref())
    }
}

/// A named entry of a dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryEntry {
    /// A grammar matched inline wherever it is referenced.
    Grammar(Grammar),
    /// A segment definition producing its own tree node.
    Segment(SegmentDef),
}

impl LibraryEntry {
    pub(crate) fn grammars(&self) -> Box<dyn Iterator<Item = &Grammar> + '_> {
        match self {
            Self::Grammar(grammar) => Box::new(std::iter::once(grammar)),
            Self::Segment(def) => Box::new(def.grammars()),
        }
    }
}

/// One opening/closing pair in a bracket pair set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPair {
    /// The type name `Bracketed` grammars ask for, e.g. `round`.
    pub bracket_type: &'static str,
    /// Name of the grammar matching the opening bracket.
    pub open: &'static str,
    /// Name of the grammar matching the closing bracket.
    pub close: &'static str,
    /// Whether the pair is always a bracket, even outside an explicit
    /// `Bracketed` grammar. Only persistent pairs are skipped as units when
    /// scanning for terminators.
    pub persists: bool,
}

impl BracketPair {
    /// Creates a pair.
    #[must_use]
    pub const fn new(
        bracket_type: &'static str,
        open: &'static str,
        close: &'static str,
        persists: bool,
    ) -> Self {
        Self {
            bracket_type,
            open,
            close,
            persists,
        }
    }
}

//! Grammar combinators.
//!
//! A [`Grammar`] is an immutable value tree. Terminals match single raw
//! segments; structural nodes combine other grammars. Nodes refer to named
//! grammars of the active dialect through [`Grammar::Ref`], which is what
//! lets grammars be mutually recursive and lets a derived dialect override
//! one named rule for every grammar that mentions it.
//!
//! Derived dialects never edit a grammar in place: [`Grammar::copy_with`]
//! returns a new tree.

mod edit;
mod terminal;

pub use edit::GrammarEdit;
pub use terminal::{AntiTemplate, Pattern, Terminal, TerminalKind};

use crate::error::DialectResult;

/// Name of the default bracket pair set.
pub const DEFAULT_BRACKET_SET: &str = "bracket_pairs";

/// A grammar node.
#[derive(Debug, Clone, PartialEq)]
pub enum Grammar {
    /// Matches one raw segment.
    Terminal(Terminal),
    /// Matches every child in order; non-code may appear between them.
    Sequence(Vec<Grammar>),
    /// Matches the alternative consuming the most segments. On a tie the
    /// one declared first wins.
    OneOf(Vec<Grammar>),
    /// Matches an inner grammar between a bracket pair.
    Bracketed(Bracketed),
    /// Matches elements separated by a delimiter.
    Delimited(Delimited),
    /// Matches its elements repeatedly.
    AnyNumberOf(AnyNumberOf),
    /// Matches an anchor, then everything up to a terminator without
    /// looking inside.
    StartsWith(StartsWith),
    /// Looks up a named grammar or segment in the active dialect.
    Ref(&'static str),
    /// Matches any run of segments, stopping at the active terminators.
    Anything,
    /// Never matches.
    Nothing,
    /// Zero-width marker: content that follows is one level deeper.
    Indent,
    /// Zero-width marker: content that follows is one level shallower.
    Dedent,
    /// Matches the inner grammar, or nothing at all.
    Optional(Box<Grammar>),
}

/// Options of [`Grammar::Bracketed`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bracketed {
    /// Grammar for the content between the brackets.
    pub inner: Box<Grammar>,
    /// Bracket type looked up in the pair set, e.g. `round`.
    pub bracket_type: &'static str,
    /// Name of the dialect's bracket pair set to consult.
    pub bracket_pairs_set: &'static str,
}

impl Bracketed {
    /// Round brackets from the default pair set.
    #[must_use]
    pub fn new(inner: Grammar) -> Self {
        Self {
            inner: Box::new(inner),
            bracket_type: "round",
            bracket_pairs_set: DEFAULT_BRACKET_SET,
        }
    }

    /// Uses a different bracket type from the same set.
    #[must_use]
    pub const fn bracket_type(mut self, bracket_type: &'static str) -> Self {
        self.bracket_type = bracket_type;
        self
    }

    /// Looks the bracket type up in a scoped pair set.
    #[must_use]
    pub const fn pairs_set(mut self, set: &'static str) -> Self {
        self.bracket_pairs_set = set;
        self
    }
}

/// Options of [`Grammar::Delimited`].
#[derive(Debug, Clone, PartialEq)]
pub struct Delimited {
    /// Alternatives accepted for each element.
    pub elements: Vec<Grammar>,
    /// The separator.
    pub delimiter: Box<Grammar>,
    /// Accept a delimiter after the last element.
    pub allow_trailing: bool,
    /// Minimum number of delimiters that must be present.
    pub min_delimiters: usize,
    /// Stop before this grammar when it matches at an element position.
    pub terminator: Option<Box<Grammar>>,
}

impl Delimited {
    /// Elements separated by `delimiter`.
    #[must_use]
    pub fn new(elements: Vec<Grammar>, delimiter: Grammar) -> Self {
        Self {
            elements,
            delimiter: Box::new(delimiter),
            allow_trailing: false,
            min_delimiters: 0,
            terminator: None,
        }
    }

    /// Accepts a dangling delimiter after the last element.
    #[must_use]
    pub const fn allow_trailing(mut self) -> Self {
        self.allow_trailing = true;
        self
    }

    /// Requires at least `count` delimiters.
    #[must_use]
    pub const fn min_delimiters(mut self, count: usize) -> Self {
        self.min_delimiters = count;
        self
    }

    /// Stops the list before `terminator`.
    #[must_use]
    pub fn terminator(mut self, terminator: Grammar) -> Self {
        self.terminator = Some(Box::new(terminator));
        self
    }
}

/// Options of [`Grammar::AnyNumberOf`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnyNumberOf {
    /// Alternatives accepted at each repetition.
    pub elements: Vec<Grammar>,
    /// Fewer repetitions than this is a failed match.
    pub min_times: usize,
    /// Repetition stops here.
    pub max_times: Option<usize>,
}

impl AnyNumberOf {
    /// Zero or more repetitions of any of `elements`.
    #[must_use]
    pub const fn new(elements: Vec<Grammar>) -> Self {
        Self {
            elements,
            min_times: 0,
            max_times: None,
        }
    }

    /// Requires at least `min` repetitions.
    #[must_use]
    pub const fn min_times(mut self, min: usize) -> Self {
        self.min_times = min;
        self
    }

    /// Allows at most `max` repetitions.
    #[must_use]
    pub const fn max_times(mut self, max: usize) -> Self {
        self.max_times = Some(max);
        self
    }
}

/// Options of [`Grammar::StartsWith`].
#[derive(Debug, Clone, PartialEq)]
pub struct StartsWith {
    /// Grammar that must match at the start.
    pub anchor: Box<Grammar>,
    /// Scanning stops where this matches.
    pub terminator: Option<Box<Grammar>>,
    /// Consume the terminator as part of the match.
    pub include_terminator: bool,
    /// Only accept a terminator that follows whitespace, a newline or a
    /// comment.
    pub enforce_whitespace_preceding_terminator: bool,
}

impl StartsWith {
    /// Anchored at `anchor`, running to the end of the available input or
    /// to an enclosing terminator.
    #[must_use]
    pub fn new(anchor: Grammar) -> Self {
        Self {
            anchor: Box::new(anchor),
            terminator: None,
            include_terminator: false,
            enforce_whitespace_preceding_terminator: false,
        }
    }

    /// Stops scanning at `terminator`.
    #[must_use]
    pub fn terminator(mut self, terminator: Grammar) -> Self {
        self.terminator = Some(Box::new(terminator));
        self
    }

    /// Consumes the terminator too.
    #[must_use]
    pub const fn include_terminator(mut self) -> Self {
        self.include_terminator = true;
        self
    }

    /// Requires layout before the terminator.
    #[must_use]
    pub const fn enforce_whitespace_preceding_terminator(mut self) -> Self {
        self.enforce_whitespace_preceding_terminator = true;
        self
    }
}

impl From<Bracketed> for Grammar {
    fn from(value: Bracketed) -> Self {
        Self::Bracketed(value)
    }
}

impl From<Delimited> for Grammar {
    fn from(value: Delimited) -> Self {
        Self::Delimited(value)
    }
}

impl From<AnyNumberOf> for Grammar {
    fn from(value: AnyNumberOf) -> Self {
        Self::AnyNumberOf(value)
    }
}

impl From<StartsWith> for Grammar {
    fn from(value: StartsWith) -> Self {
        Self::StartsWith(value)
    }
}

impl From<Terminal> for Grammar {
    fn from(value: Terminal) -> Self {
        Self::Terminal(value)
    }
}

impl Grammar {
    /// A case-insensitive keyword.
    #[must_use]
    pub const fn keyword(word: &'static str) -> Self {
        Self::Terminal(Terminal::keyword(word))
    }

    /// Exact text producing a segment of `seg_type`.
    #[must_use]
    pub const fn symbol(template: &'static str, seg_type: &'static str) -> Self {
        Self::Terminal(Terminal::symbol(template, seg_type))
    }

    /// Any segment produced by the lexer matcher `matcher`.
    #[must_use]
    pub const fn token(matcher: &'static str, seg_type: &'static str) -> Self {
        Self::Terminal(Terminal::token(matcher, seg_type))
    }

    /// A regular expression over the upper-cased text of one segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` does not compile.
    pub fn pattern(pattern: &str, seg_type: &'static str) -> DialectResult<Self> {
        Ok(Self::Terminal(Terminal::pattern(
            Pattern::new(pattern)?,
            seg_type,
        )))
    }

    /// A word belonging to the dialect set `set`.
    #[must_use]
    pub const fn set_member(set: &'static str, seg_type: &'static str) -> Self {
        Self::Terminal(Terminal::set_member(set, seg_type))
    }

    /// A reference to a named grammar or segment.
    #[must_use]
    pub const fn reference(name: &'static str) -> Self {
        Self::Ref(name)
    }

    /// Round brackets around `inner`.
    #[must_use]
    pub fn bracketed(inner: Self) -> Self {
        Self::Bracketed(Bracketed::new(inner))
    }

    /// `inner` either bare or in round brackets.
    #[must_use]
    pub fn optionally_bracketed(inner: Self) -> Self {
        Self::OneOf(vec![Self::bracketed(inner.clone()), inner])
    }

    /// Marks this grammar optional. Already optional grammars are returned
    /// unchanged.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Returns true if this grammar may match nothing.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the variant name, for diagnostics.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "Terminal",
            Self::Sequence(_) => "Sequence",
            Self::OneOf(_) => "OneOf",
            Self::Bracketed(_) => "Bracketed",
            Self::Delimited(_) => "Delimited",
            Self::AnyNumberOf(_) => "AnyNumberOf",
            Self::StartsWith(_) => "StartsWith",
            Self::Ref(_) => "Ref",
            Self::Anything => "Anything",
            Self::Nothing => "Nothing",
            Self::Indent => "Indent",
            Self::Dedent => "Dedent",
            Self::Optional(_) => "Optional",
        }
    }

    /// Visits this node and every descendant in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::Sequence(children) | Self::OneOf(children) => {
                for child in children {
                    child.walk(visit);
                }
            }
            Self::AnyNumberOf(any) => {
                for child in &any.elements {
                    child.walk(visit);
                }
            }
            Self::Delimited(delimited) => {
                for child in &delimited.elements {
                    child.walk(visit);
                }
                delimited.delimiter.walk(visit);
                if let Some(terminator) = &delimited.terminator {
                    terminator.walk(visit);
                }
            }
            Self::Bracketed(bracketed) => bracketed.inner.walk(visit),
            Self::StartsWith(starts) => {
                starts.anchor.walk(visit);
                if let Some(terminator) = &starts.terminator {
                    terminator.walk(visit);
                }
            }
            Self::Optional(inner) => inner.walk(visit),
            Self::Terminal(_)
            | Self::Ref(_)
            | Self::Anything
            | Self::Nothing
            | Self::Indent
            | Self::Dedent => {}
        }
    }

    /// Returns every name referenced through [`Grammar::Ref`] in this tree.
    #[must_use]
    pub fn references(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        self.walk(&mut |node| {
            if let Self::Ref(name) = node {
                names.push(*name);
            }
        });
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_is_idempotent() {
        let g = Grammar::keyword("SELECT").optional().optional();
        assert_eq!(g, Grammar::Optional(Box::new(Grammar::keyword("SELECT"))));
        assert!(g.is_optional());
    }

    #[test]
    fn test_references_walks_all_children() {
        let g = Grammar::Sequence(vec![
            Grammar::reference("A"),
            Delimited::new(vec![Grammar::reference("B")], Grammar::reference("Comma")).into(),
            Grammar::bracketed(Grammar::reference("C").optional()),
            StartsWith::new(Grammar::keyword("X"))
                .terminator(Grammar::reference("D"))
                .into(),
        ]);
        assert_eq!(g.references(), vec!["A", "B", "Comma", "C", "D"]);
    }

    #[test]
    fn test_pattern_equality_ignores_compiled_form() {
        let a = Grammar::pattern("[A-Z]+", "identifier").unwrap();
        let b = Grammar::pattern("[A-Z]+", "identifier").unwrap();
        let c = Grammar::pattern("[A-Z]+", "literal").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_bracketed_defaults() {
        let Grammar::Bracketed(b) = Grammar::bracketed(Grammar::Anything) else {
            panic!("expected bracketed");
        };
        assert_eq!(b.bracket_type, "round");
        assert_eq!(b.bracket_pairs_set, DEFAULT_BRACKET_SET);
    }
}

//! Terminal grammars: the leaves of a grammar tree, each matching a single
//! raw segment.

use std::fmt;

use regex::Regex;

use crate::dialect::Dialect;
use crate::error::{DialectError, DialectResult};
use crate::segment::{RawSegment, Segment, KEYWORD};

/// A terminal matcher and the segment type it assigns on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    kind: TerminalKind,
    seg_type: &'static str,
}

/// What a terminal compares a raw segment against.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalKind {
    /// A word compared case-insensitively.
    Keyword(&'static str),
    /// Exact text, e.g. an operator.
    Symbol(&'static str),
    /// Any segment produced by the named lexer matcher.
    Token(&'static str),
    /// A regular expression over the upper-cased text.
    Pattern(Pattern),
    /// Any word whose upper-cased text is a member of the named dialect
    /// set, e.g. date parts.
    SetMember(&'static str),
}

impl Terminal {
    /// A keyword terminal producing a `keyword` segment.
    #[must_use]
    pub const fn keyword(word: &'static str) -> Self {
        Self {
            kind: TerminalKind::Keyword(word),
            seg_type: KEYWORD,
        }
    }

    /// An exact-text terminal.
    #[must_use]
    pub const fn symbol(template: &'static str, seg_type: &'static str) -> Self {
        Self {
            kind: TerminalKind::Symbol(template),
            seg_type,
        }
    }

    /// A terminal accepting any segment from lexer matcher `matcher`.
    #[must_use]
    pub const fn token(matcher: &'static str, seg_type: &'static str) -> Self {
        Self {
            kind: TerminalKind::Token(matcher),
            seg_type,
        }
    }

    /// A pattern terminal.
    #[must_use]
    pub const fn pattern(pattern: Pattern, seg_type: &'static str) -> Self {
        Self {
            kind: TerminalKind::Pattern(pattern),
            seg_type,
        }
    }

    /// A terminal accepting members of the dialect set `set`. The set is
    /// read from the active dialect at match time, so a derived dialect
    /// that extends the set extends the terminal too.
    #[must_use]
    pub const fn set_member(set: &'static str, seg_type: &'static str) -> Self {
        Self {
            kind: TerminalKind::SetMember(set),
            seg_type,
        }
    }

    /// Returns what this terminal compares against.
    #[must_use]
    pub const fn kind(&self) -> &TerminalKind {
        &self.kind
    }

    /// Returns the segment type assigned to matched segments.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        self.seg_type
    }

    /// Returns true if `raw` is accepted. Set-based anti-templates are
    /// looked up in `dialect`.
    #[must_use]
    pub fn matches(&self, raw: &RawSegment, dialect: &Dialect) -> bool {
        if !raw.is_code() {
            return false;
        }
        match &self.kind {
            TerminalKind::Keyword(word) => raw.raw().eq_ignore_ascii_case(word),
            TerminalKind::Symbol(template) => raw.raw() == *template,
            TerminalKind::Token(matcher) => raw.matcher() == *matcher,
            TerminalKind::Pattern(pattern) => pattern.matches(raw.raw(), dialect),
            TerminalKind::SetMember(set) => {
                dialect.set_contains(set, &raw.raw().to_ascii_uppercase())
            }
        }
    }

    /// Returns the typed copy of `raw` this terminal produces.
    #[must_use]
    pub fn produce(&self, raw: &RawSegment) -> Segment {
        Segment::Raw(raw.with_type(self.seg_type))
    }
}

/// A compiled, fully anchored regular expression with optional exclusion
/// rules.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    anti: Vec<AntiTemplate>,
}

/// Text a pattern terminal must not accept even when the pattern matches.
#[derive(Clone)]
pub enum AntiTemplate {
    /// Reject text fully matching this expression.
    Pattern(String, Regex),
    /// Reject text that is a member of the named dialect set.
    Set(&'static str),
}

fn compile_anchored(pattern: &str) -> DialectResult<Regex> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|e| DialectError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl Pattern {
    /// Compiles `pattern`. It must match the whole upper-cased text of a
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidPattern`] if the expression does not
    /// compile.
    pub fn new(pattern: &str) -> DialectResult<Self> {
        Ok(Self {
            source: pattern.to_string(),
            regex: compile_anchored(pattern)?,
            anti: Vec::new(),
        })
    }

    /// Excludes text fully matching `anti_template`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidPattern`] if the expression does not
    /// compile.
    pub fn excluding(mut self, anti_template: &str) -> DialectResult<Self> {
        self.anti.push(AntiTemplate::Pattern(
            anti_template.to_string(),
            compile_anchored(anti_template)?,
        ));
        Ok(self)
    }

    /// Excludes members of the dialect set `set`, e.g. reserved keywords.
    #[must_use]
    pub fn excluding_set(mut self, set: &'static str) -> Self {
        self.anti.push(AntiTemplate::Set(set));
        self
    }

    /// Returns the source of the expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the exclusion rules.
    #[must_use]
    pub fn anti_templates(&self) -> &[AntiTemplate] {
        &self.anti
    }

    fn matches(&self, raw: &str, dialect: &Dialect) -> bool {
        let upper = raw.to_ascii_uppercase();
        if !self.regex.is_match(&upper) {
            return false;
        }
        self.anti.iter().all(|anti| match anti {
            AntiTemplate::Pattern(_, regex) => !regex.is_match(&upper),
            AntiTemplate::Set(set) => !dialect.set_contains(set, &upper),
        })
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.anti == other.anti
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("anti", &self.anti)
            .finish()
    }
}

impl PartialEq for AntiTemplate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Pattern(a, _), Self::Pattern(b, _)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for AntiTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(source, _) => f.debug_tuple("Pattern").field(source).finish(),
            Self::Set(set) => f.debug_tuple("Set").field(set).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DialectBuilder, SegmentDef};
    use crate::grammar::Grammar;
    use crate::lexer::Span;

    fn dialect() -> Dialect {
        let mut b = DialectBuilder::new("terminals", "FileSegment");
        b.register_segment(SegmentDef::new("FileSegment", "file", Grammar::Anything))
            .unwrap();
        b.update_set("reserved_keywords", ["SELECT"])
            .update_set("datetime_units", ["DAY", "MONTH"]);
        b.finish().unwrap()
    }

    fn word(text: &str) -> RawSegment {
        RawSegment::new("code", "word", text, Span::new(0, text.len()))
    }

    #[test]
    fn test_set_member_is_case_insensitive() {
        let d = dialect();
        let unit = Terminal::set_member("datetime_units", "date_part");
        assert!(unit.matches(&word("day"), &d));
        assert!(unit.matches(&word("MONTH"), &d));
        assert!(!unit.matches(&word("week"), &d));
        assert!(!Terminal::set_member("no_such_set", "x").matches(&word("day"), &d));
    }

    #[test]
    fn test_anti_templates_combine() {
        let d = dialect();
        let name = Terminal::pattern(
            Pattern::new("[A-Z_][A-Z0-9_]*")
                .unwrap()
                .excluding("STRUCT")
                .unwrap()
                .excluding_set("reserved_keywords"),
            "function_name_identifier",
        );
        assert!(name.matches(&word("count"), &d));
        assert!(!name.matches(&word("struct"), &d));
        assert!(!name.matches(&word("select"), &d));
        assert_eq!(
            match name.kind() {
                TerminalKind::Pattern(p) => p.anti_templates().len(),
                _ => 0,
            },
            2
        );
    }

    #[test]
    fn test_layout_never_matches() {
        let d = dialect();
        let space = RawSegment::new("whitespace", "whitespace", " ", Span::new(0, 1));
        assert!(!Terminal::symbol(" ", "x").matches(&space, &d));
    }
}

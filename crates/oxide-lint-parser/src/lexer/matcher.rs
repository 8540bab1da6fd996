//! Lexer matchers: fixed strings and anchored patterns.

use fancy_regex::Regex;

use crate::error::{DialectError, DialectResult};

/// One entry of a dialect's ordered lexer matcher list.
#[derive(Debug, Clone)]
pub struct LexMatcher {
    name: &'static str,
    seg_type: &'static str,
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Literal(&'static str),
    Patterns(Vec<LexPattern>),
}

#[derive(Debug, Clone)]
struct LexPattern {
    source: String,
    regex: Regex,
}

impl LexPattern {
    fn compile(pattern: &str) -> DialectResult<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
            DialectError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    fn match_len(&self, rest: &str) -> Option<usize> {
        match self.regex.find(rest) {
            Ok(found) => found.map(|m| m.end()),
            Err(e) => {
                tracing::trace!(pattern = %self.source, error = %e, "lexer pattern aborted");
                None
            }
        }
    }
}

impl LexMatcher {
    /// Creates a matcher for an exact string.
    #[must_use]
    pub const fn string(name: &'static str, template: &'static str, seg_type: &'static str) -> Self {
        Self {
            name,
            seg_type,
            kind: MatcherKind::Literal(template),
        }
    }

    /// Creates a matcher for a regular expression.
    ///
    /// The pattern is anchored at the current position; look-around is
    /// supported.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn regex(name: &'static str, pattern: &str, seg_type: &'static str) -> DialectResult<Self> {
        Self::regex_alternatives(name, &[pattern], seg_type)
    }

    /// Creates a matcher from several patterns tried at the same position.
    /// The longest match among them wins; on equal length the earlier
    /// pattern wins.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidPattern`] if any pattern does not
    /// compile.
    pub fn regex_alternatives(
        name: &'static str,
        patterns: &[&str],
        seg_type: &'static str,
    ) -> DialectResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| LexPattern::compile(p))
            .collect::<DialectResult<Vec<_>>>()?;
        Ok(Self {
            name,
            seg_type,
            kind: MatcherKind::Patterns(patterns),
        })
    }

    /// Returns the matcher name. Raw segments remember it, and dialect edits
    /// address matchers by it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the segment type produced by this matcher.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        self.seg_type
    }

    /// Returns the byte length of the match at the start of `rest`, or
    /// `None`. Empty matches count as no match.
    #[must_use]
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        let len = match &self.kind {
            MatcherKind::Literal(template) => {
                rest.starts_with(template).then_some(template.len())
            }
            MatcherKind::Patterns(patterns) => patterns
                .iter()
                .filter_map(|p| p.match_len(rest))
                .fold(None, |best: Option<usize>, len| match best {
                    Some(b) if b >= len => Some(b),
                    _ => Some(len),
                }),
        }?;
        (len > 0).then_some(len)
    }
}

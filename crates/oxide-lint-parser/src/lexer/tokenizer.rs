//! Splitting source text into raw segments.

use super::{LexMatcher, Span};
use crate::segment::{RawSegment, Segment, UNLEXABLE};

/// A lexer driven by a dialect's ordered matcher list.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    matchers: &'a [LexMatcher],
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `matchers`, tried in order at each position.
    #[must_use]
    pub const fn new(matchers: &'a [LexMatcher]) -> Self {
        Self { matchers }
    }

    /// Finds the first matcher accepting input at the start of `rest`.
    fn match_at(&self, rest: &str) -> Option<(&'a LexMatcher, usize)> {
        self.matchers
            .iter()
            .find_map(|m| m.match_len(rest).map(|len| (m, len)))
    }

    /// Tokenizes `source` into raw segments covering it without gaps or
    /// overlaps.
    ///
    /// Input that no matcher accepts becomes an `unlexable` segment running
    /// up to the next position where some matcher does match.
    #[must_use]
    pub fn tokenize(&self, source: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            if let Some((matcher, len)) = self.match_at(rest) {
                segments.push(Segment::Raw(RawSegment::new(
                    matcher.seg_type(),
                    matcher.name(),
                    &rest[..len],
                    Span::new(pos, pos + len),
                )));
                pos += len;
                continue;
            }

            let end = rest
                .char_indices()
                .skip(1)
                .find(|(offset, _)| self.match_at(&rest[*offset..]).is_some())
                .map_or(source.len(), |(offset, _)| pos + offset);
            tracing::warn!(
                start = pos,
                end,
                text = &source[pos..end],
                "no lexer matcher accepts input"
            );
            segments.push(Segment::Raw(RawSegment::new(
                UNLEXABLE,
                UNLEXABLE,
                &source[pos..end],
                Span::new(pos, end),
            )));
            pos = end;
        }

        tracing::trace!(count = segments.len(), "lexed source");
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers() -> Vec<LexMatcher> {
        vec![
            LexMatcher::regex("whitespace", r"[^\S\r\n]+", "whitespace").unwrap(),
            LexMatcher::regex("newline", r"\r\n|\n", "newline").unwrap(),
            LexMatcher::string("right_arrow", "=>", "code"),
            LexMatcher::string("equals", "=", "code"),
            LexMatcher::regex("code", "[0-9a-zA-Z_]+", "code").unwrap(),
        ]
    }

    fn tokens(source: &str) -> Vec<(String, &'static str)> {
        let matchers = matchers();
        Lexer::new(&matchers)
            .tokenize(source)
            .iter()
            .map(|s| (s.raw().into_owned(), s.seg_type()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_declared_order_wins() {
        assert_eq!(
            tokens("a=>b"),
            vec![
                ("a".to_string(), "code"),
                ("=>".to_string(), "code"),
                ("b".to_string(), "code"),
            ]
        );
    }

    #[test]
    fn test_layout_segments() {
        assert_eq!(
            tokens("a \nb"),
            vec![
                ("a".to_string(), "code"),
                (" ".to_string(), "whitespace"),
                ("\n".to_string(), "newline"),
                ("b".to_string(), "code"),
            ]
        );
    }

    #[test]
    fn test_unlexable_run_is_kept() {
        assert_eq!(
            tokens("a ¤¤ b"),
            vec![
                ("a".to_string(), "code"),
                (" ".to_string(), "whitespace"),
                ("¤¤".to_string(), UNLEXABLE),
                (" ".to_string(), "whitespace"),
                ("b".to_string(), "code"),
            ]
        );
    }

    #[test]
    fn test_unlexable_at_end() {
        let out = tokens("a ¤");
        assert_eq!(out.last(), Some(&("¤".to_string(), UNLEXABLE)));
    }

    #[test]
    fn test_spans_cover_input() {
        let matchers = matchers();
        let source = "x = y ¤ z";
        let segments = Lexer::new(&matchers).tokenize(source);
        let mut expected_start = 0;
        for segment in &segments {
            assert_eq!(segment.span().start, expected_start);
            expected_start = segment.span().end;
        }
        assert_eq!(expected_start, source.len());
        let joined: String = segments.iter().map(|s| s.raw().into_owned()).collect();
        assert_eq!(joined, source);
    }
}

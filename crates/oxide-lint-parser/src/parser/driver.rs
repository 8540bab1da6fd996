//! Lex, match and expand a whole file.

use std::num::NonZeroUsize;

use super::matcher::{match_grammar, next_code};
use super::{ParseContext, DEFAULT_MAX_RECURSION_DEPTH};
use crate::config::ParserConfig;
use crate::dialect::Dialect;
use crate::grammar::Grammar;
use crate::segment::{NodeSegment, Segment};

/// Parses SQL text into a lossless tree with one dialect.
///
/// A parser only borrows its dialect, so one finished dialect can back any
/// number of parsers on any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    dialect: &'a Dialect,
    max_recursion_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default recursion bound.
    #[must_use]
    pub const fn new(dialect: &'a Dialect) -> Self {
        Self {
            dialect,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    /// Creates a parser using the limits in `config`. The dialect named by
    /// the config is resolved by the caller.
    #[must_use]
    pub const fn with_config(dialect: &'a Dialect, config: &ParserConfig) -> Self {
        Self {
            dialect,
            max_recursion_depth: config.max_recursion_depth,
        }
    }

    /// Returns the dialect this parser uses.
    #[must_use]
    pub const fn dialect(&self) -> &'a Dialect {
        self.dialect
    }

    /// Splits `source` into raw segments.
    #[must_use]
    pub fn lex(&self, source: &str) -> Vec<Segment> {
        self.dialect.lexer().tokenize(source)
    }

    /// Parses `source` into a tree rooted at the dialect's root segment.
    ///
    /// Parsing never fails: input no grammar explains ends up inside
    /// `unparsable` nodes, and `render()` on the result always reproduces
    /// `source`.
    #[must_use]
    pub fn parse(&self, source: &str) -> Segment {
        let tokens = self.lex(source);
        tracing::debug!(
            dialect = self.dialect.name(),
            bytes = source.len(),
            tokens = tokens.len(),
            "parsing"
        );
        self.parse_tokens(tokens)
    }

    /// Parses an already lexed token stream.
    #[must_use]
    pub fn parse_tokens(&self, tokens: Vec<Segment>) -> Segment {
        let root = self.dialect.root();
        let seg_type = self
            .dialect
            .segment(root)
            .map_or("file", |def| def.seg_type());
        self.expand(Segment::Node(NodeSegment::unexpanded(seg_type, root, tokens)))
    }

    /// Parses every source on a pool of scoped worker threads. Results are
    /// in input order.
    #[must_use]
    pub fn parse_many<S: AsRef<str> + Sync>(&self, sources: &[S]) -> Vec<Segment> {
        let workers = std::thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .min(sources.len());
        if workers <= 1 {
            return sources.iter().map(|s| self.parse(s.as_ref())).collect();
        }

        let per_worker = sources.len().div_ceil(workers);
        tracing::debug!(files = sources.len(), workers, "parsing in parallel");
        std::thread::scope(|scope| {
            let tasks: Vec<_> = sources
                .chunks(per_worker)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|s| self.parse(s.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            tasks
                .into_iter()
                .flat_map(|task| {
                    task.join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    /// Rewrites every unexpanded node in the tree by running its parse
    /// grammar over its tokens.
    fn expand(&self, segment: Segment) -> Segment {
        match segment {
            Segment::Node(node) if !node.is_expanded() => self.expand_node(node),
            Segment::Node(node) => {
                let (seg_type, name) = (node.seg_type(), node.name());
                let children = node
                    .into_children()
                    .into_iter()
                    .map(|child| self.expand(child))
                    .collect();
                Segment::node(seg_type, name, children)
            }
            leaf => leaf,
        }
    }

    fn expand_node(&self, node: NodeSegment) -> Segment {
        let (seg_type, name) = (node.seg_type(), node.name());
        let children = node.into_children();
        let Ok(def) = self.dialect.segment(name) else {
            tracing::warn!(segment = name, "no definition for node; leaving it unparsed");
            return Segment::node(seg_type, name, children);
        };
        let grammar = def.parse_grammar().unwrap_or_else(|| def.match_grammar());
        let children = self
            .parse_body(grammar, name, children)
            .into_iter()
            .map(|child| self.expand(child))
            .collect();
        Segment::node(seg_type, name, children)
    }

    /// Matches `grammar` over the code range of `children`. Leading and
    /// trailing non-code stays outside the match; code the grammar does not
    /// explain is wrapped in an `unparsable` node.
    fn parse_body(&self, grammar: &'a Grammar, name: &str, children: Vec<Segment>) -> Vec<Segment> {
        let Some(first) = children.iter().position(Segment::is_code) else {
            return children;
        };
        let last = children
            .iter()
            .rposition(Segment::is_code)
            .map_or(children.len(), |idx| idx + 1);
        let body = &children[first..last];

        let mut ctx = ParseContext::with_max_depth(self.dialect, self.max_recursion_depth);
        let mut out = children[..first].to_vec();
        match match_grammar(grammar, body, &mut ctx).filter(|m| !m.is_empty()) {
            Some(m) => {
                let rest = next_code(body, m.len);
                out.extend(m.segments);
                out.extend_from_slice(&body[m.len..rest]);
                if rest < body.len() {
                    tracing::warn!(
                        segment = name,
                        start = body[rest].span().start,
                        end = body[body.len() - 1].span().end,
                        "unparsable trailing content"
                    );
                    out.push(Segment::unparsable(body[rest..].to_vec()));
                }
            }
            None => {
                tracing::warn!(
                    segment = name,
                    start = body[0].span().start,
                    end = body[body.len() - 1].span().end,
                    depth_exceeded = ctx.depth_exceeded(),
                    "could not parse segment"
                );
                out.push(Segment::unparsable(body.to_vec()));
            }
        }
        out.extend_from_slice(&children[last..]);
        out
    }
}

//! The syntax tree produced by the parser.
//!
//! A [`Segment`] is either a raw leaf carrying source text, an internal node
//! owning its children, or a zero-width meta marker. Concatenating the raw
//! text of every leaf in order reproduces the parsed source exactly; nothing
//! in this crate builds a tree that breaks that rule.
//!
//! Segments are immutable. Rules that want to rewrite the tree build new
//! segments with [`Segment::with_type`], [`RawSegment::edit`] or
//! [`NodeSegment::with_children`].

mod dump;
mod reference;

use std::borrow::Cow;

use serde::Serialize;

use crate::lexer::Span;

pub use reference::{ReferenceLevel, ReferencePart, ReferenceStyle};

/// Segment type of a raw leaf produced by a code matcher.
pub const CODE: &str = "code";
/// Segment type of horizontal whitespace.
pub const WHITESPACE: &str = "whitespace";
/// Segment type of a line break.
pub const NEWLINE: &str = "newline";
/// Segment type of inline and block comments.
pub const COMMENT: &str = "comment";
/// Segment type of input no lexer matcher accepts.
pub const UNLEXABLE: &str = "unlexable";
/// Segment type of a region whose parse grammar did not match.
pub const UNPARSABLE: &str = "unparsable";
/// Segment type of a bracketed group.
pub const BRACKETED: &str = "bracketed";
/// Segment type of keywords matched by keyword terminals.
pub const KEYWORD: &str = "keyword";

/// Returns true if segments of `seg_type` are layout rather than code.
#[must_use]
pub fn is_non_code_type(seg_type: &str) -> bool {
    matches!(seg_type, WHITESPACE | NEWLINE | COMMENT)
}

/// A leaf produced by the lexer, possibly retyped by a terminal grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSegment {
    seg_type: &'static str,
    matcher: &'static str,
    raw: String,
    span: Span,
}

impl RawSegment {
    /// Creates a raw segment.
    #[must_use]
    pub fn new(
        seg_type: &'static str,
        matcher: &'static str,
        raw: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            seg_type,
            matcher,
            raw: raw.into(),
            span,
        }
    }

    /// Returns the segment type.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        self.seg_type
    }

    /// Returns the name of the lexer matcher that produced this leaf.
    #[must_use]
    pub const fn matcher(&self) -> &'static str {
        self.matcher
    }

    /// Returns the source text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns true unless this is whitespace, a newline or a comment.
    #[must_use]
    pub fn is_code(&self) -> bool {
        !is_non_code_type(self.seg_type)
    }

    /// Returns a copy carrying a different segment type.
    #[must_use]
    pub fn with_type(&self, seg_type: &'static str) -> Self {
        Self {
            seg_type,
            ..self.clone()
        }
    }

    /// Returns a copy with replaced text. The span still points at the
    /// original source location.
    #[must_use]
    pub fn edit(&self, raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..self.clone()
        }
    }
}

/// An internal node owning an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSegment {
    seg_type: &'static str,
    name: &'static str,
    children: Vec<Segment>,
    span: Span,
    #[serde(skip)]
    expanded: bool,
}

impl NodeSegment {
    /// Creates a fully parsed node.
    #[must_use]
    pub fn new(seg_type: &'static str, name: &'static str, children: Vec<Segment>) -> Self {
        Self::build(seg_type, name, children, true)
    }

    /// Creates a node whose children are raw tokens still waiting for the
    /// parse phase.
    pub(crate) fn unexpanded(
        seg_type: &'static str,
        name: &'static str,
        children: Vec<Segment>,
    ) -> Self {
        Self::build(seg_type, name, children, false)
    }

    fn build(
        seg_type: &'static str,
        name: &'static str,
        children: Vec<Segment>,
        expanded: bool,
    ) -> Self {
        let span = span_of(&children);
        Self {
            seg_type,
            name,
            children,
            span,
            expanded,
        }
    }

    /// Returns the segment type.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        self.seg_type
    }

    /// Returns the name of the segment definition that built this node.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the children in source order.
    #[must_use]
    pub fn children(&self) -> &[Segment] {
        &self.children
    }

    /// Returns the source span covered by the children.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    pub(crate) const fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn into_children(self) -> Vec<Segment> {
        self.children
    }

    /// Returns a copy of this node with different children.
    #[must_use]
    pub fn with_children(&self, children: Vec<Segment>) -> Self {
        Self::build(self.seg_type, self.name, children, self.expanded)
    }
}

/// Kind of a zero-width layout marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKind {
    /// The following content is one level deeper.
    Indent,
    /// The following content is one level shallower.
    Dedent,
}

impl MetaKind {
    /// Returns the segment type used for this marker.
    #[must_use]
    pub const fn seg_type(self) -> &'static str {
        match self {
            Self::Indent => "indent",
            Self::Dedent => "dedent",
        }
    }
}

/// A zero-width marker carrying no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaSegment {
    kind: MetaKind,
    span: Span,
}

impl MetaSegment {
    /// Creates a marker at byte `offset`.
    #[must_use]
    pub const fn new(kind: MetaKind, offset: usize) -> Self {
        Self {
            kind,
            span: Span::point(offset),
        }
    }

    /// Returns the marker kind.
    #[must_use]
    pub const fn kind(&self) -> MetaKind {
        self.kind
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// A leaf carrying source text.
    Raw(RawSegment),
    /// An internal node.
    Node(NodeSegment),
    /// A zero-width indentation marker.
    Meta(MetaSegment),
}

impl Segment {
    /// Creates a fully parsed node segment.
    #[must_use]
    pub fn node(seg_type: &'static str, name: &'static str, children: Vec<Self>) -> Self {
        Self::Node(NodeSegment::new(seg_type, name, children))
    }

    /// Wraps `children` in an `unparsable` node.
    #[must_use]
    pub fn unparsable(children: Vec<Self>) -> Self {
        Self::node(UNPARSABLE, "Unparsable", children)
    }

    /// Returns the segment type.
    #[must_use]
    pub const fn seg_type(&self) -> &'static str {
        match self {
            Self::Raw(raw) => raw.seg_type(),
            Self::Node(node) => node.seg_type(),
            Self::Meta(meta) => meta.kind.seg_type(),
        }
    }

    /// Returns true if the segment has type `seg_type`.
    #[must_use]
    pub fn is_type(&self, seg_type: &str) -> bool {
        self.seg_type() == seg_type
    }

    /// Returns true if the segment has any of `seg_types`.
    #[must_use]
    pub fn is_any_type(&self, seg_types: &[&str]) -> bool {
        seg_types.iter().any(|t| self.is_type(t))
    }

    /// Returns the definition name for nodes, `None` otherwise.
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::Node(node) => Some(node.name()),
            Self::Raw(_) | Self::Meta(_) => None,
        }
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Raw(raw) => raw.span(),
            Self::Node(node) => node.span(),
            Self::Meta(meta) => meta.span,
        }
    }

    /// Returns the children of a node, or an empty slice for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Node(node) => node.children(),
            Self::Raw(_) | Self::Meta(_) => &[],
        }
    }

    /// Returns true for raw leaves.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Returns true for indent and dedent markers.
    #[must_use]
    pub const fn is_meta(&self) -> bool {
        matches!(self, Self::Meta(_))
    }

    /// Returns true if the segment contains any code.
    #[must_use]
    pub fn is_code(&self) -> bool {
        match self {
            Self::Raw(raw) => raw.is_code(),
            Self::Node(node) => node.children().iter().any(Self::is_code),
            Self::Meta(_) => false,
        }
    }

    /// Returns the source text covered by this segment.
    #[must_use]
    pub fn raw(&self) -> Cow<'_, str> {
        match self {
            Self::Raw(raw) => Cow::Borrowed(raw.raw()),
            Self::Node(_) => Cow::Owned(self.render()),
            Self::Meta(_) => Cow::Borrowed(""),
        }
    }

    /// Returns the upper-cased source text.
    #[must_use]
    pub fn raw_upper(&self) -> String {
        self.raw().to_ascii_uppercase()
    }

    /// Returns the source text with one layer of matching quotes removed.
    #[must_use]
    pub fn raw_trimmed(&self) -> String {
        let raw = self.raw();
        let mut chars = raw.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close))
                if open == close && matches!(open, '"' | '\'' | '`') =>
            {
                raw[1..raw.len() - 1].to_string()
            }
            _ => raw.into_owned(),
        }
    }

    /// Concatenates the raw text of every leaf. This is the lossless
    /// serialization of the tree.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.span().len());
        self.write_raw(&mut out);
        out
    }

    fn write_raw(&self, out: &mut String) {
        match self {
            Self::Raw(raw) => out.push_str(raw.raw()),
            Self::Node(node) => {
                for child in node.children() {
                    child.write_raw(out);
                }
            }
            Self::Meta(_) => {}
        }
    }

    /// Iterates over this segment and all of its descendants in pre-order.
    pub fn iter_tree(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children().iter().rev());
            Some(next)
        })
    }

    /// Iterates over every descendant, excluding `self`, in pre-order.
    pub fn descendants(&self) -> impl Iterator<Item = &Self> {
        self.iter_tree().skip(1)
    }

    /// Returns a copy of a raw leaf with different text. Nodes and markers
    /// are returned unchanged.
    #[must_use]
    pub fn edit(&self, raw: impl Into<String>) -> Self {
        match self {
            Self::Raw(leaf) => Self::Raw(leaf.edit(raw)),
            Self::Node(_) | Self::Meta(_) => self.clone(),
        }
    }

    /// Iterates over the raw leaves in source order.
    pub fn raw_segments(&self) -> impl Iterator<Item = &RawSegment> {
        self.iter_tree().filter_map(|segment| match segment {
            Self::Raw(raw) => Some(raw),
            Self::Node(_) | Self::Meta(_) => None,
        })
    }

    /// Returns every segment in this subtree, including `self`, whose type
    /// is one of `seg_types`, in pre-order.
    #[must_use]
    pub fn recursive_crawl(&self, seg_types: &[&str]) -> Vec<&Self> {
        self.iter_tree()
            .filter(|segment| segment.is_any_type(seg_types))
            .collect()
    }

    /// Returns the first direct child of type `seg_type`.
    #[must_use]
    pub fn get_child(&self, seg_type: &str) -> Option<&Self> {
        self.children().iter().find(|child| child.is_type(seg_type))
    }

    /// Returns every direct child of type `seg_type`.
    #[must_use]
    pub fn get_children(&self, seg_type: &str) -> Vec<&Self> {
        self.children()
            .iter()
            .filter(|child| child.is_type(seg_type))
            .collect()
    }

    /// Returns a copy of this segment with a different type.
    #[must_use]
    pub fn with_type(&self, seg_type: &'static str) -> Self {
        match self {
            Self::Raw(raw) => Self::Raw(raw.with_type(seg_type)),
            Self::Node(node) => Self::Node(NodeSegment {
                seg_type,
                ..node.clone()
            }),
            Self::Meta(meta) => Self::Meta(*meta),
        }
    }
}

impl From<RawSegment> for Segment {
    fn from(raw: RawSegment) -> Self {
        Self::Raw(raw)
    }
}

impl From<NodeSegment> for Segment {
    fn from(node: NodeSegment) -> Self {
        Self::Node(node)
    }
}

/// Returns the span covering `segments`, or an empty span when there are
/// none. Markers only count when nothing else is present.
#[must_use]
pub fn span_of(segments: &[Segment]) -> Span {
    let mut text = segments.iter().filter(|s| !s.is_meta());
    match (text.next(), text.next_back()) {
        (Some(first), Some(last)) => first.span().merge(last.span()),
        (Some(only), None) => only.span(),
        (None, _) => match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(seg_type: &'static str, text: &str, start: usize) -> Segment {
        Segment::Raw(RawSegment::new(
            seg_type,
            seg_type,
            text,
            Span::new(start, start + text.len()),
        ))
    }

    fn sample() -> Segment {
        Segment::node(
            "select_clause",
            "SelectClauseSegment",
            vec![
                raw(KEYWORD, "SELECT", 0),
                Segment::Meta(MetaSegment::new(MetaKind::Indent, 6)),
                raw(WHITESPACE, " ", 6),
                Segment::node(
                    "column_reference",
                    "ColumnReferenceSegment",
                    vec![raw("identifier", "\"id\"", 7)],
                ),
                Segment::Meta(MetaSegment::new(MetaKind::Dedent, 11)),
            ],
        )
    }

    #[test]
    fn test_render_is_concatenation_of_leaves() {
        assert_eq!(sample().render(), "SELECT \"id\"");
    }

    #[test]
    fn test_node_span_covers_children() {
        assert_eq!(sample().span(), Span::new(0, 11));
    }

    #[test]
    fn test_is_code() {
        assert!(sample().is_code());
        assert!(!raw(WHITESPACE, " ", 0).is_code());
        assert!(!Segment::Meta(MetaSegment::new(MetaKind::Indent, 0)).is_code());
    }

    #[test]
    fn test_recursive_crawl_includes_self_in_preorder() {
        let tree = sample();
        let found = tree.recursive_crawl(&["select_clause", "identifier"]);
        let types: Vec<_> = found.iter().map(|s| s.seg_type()).collect();
        assert_eq!(types, vec!["select_clause", "identifier"]);
    }

    #[test]
    fn test_get_child() {
        let tree = sample();
        assert!(tree.get_child("column_reference").is_some());
        assert!(tree.get_child("identifier").is_none());
        assert_eq!(tree.get_children(WHITESPACE).len(), 1);
    }

    #[test]
    fn test_raw_trimmed_strips_matching_quotes() {
        assert_eq!(raw("identifier", "\"id\"", 0).raw_trimmed(), "id");
        assert_eq!(raw("identifier", "`a-b`", 0).raw_trimmed(), "a-b");
        assert_eq!(raw("identifier", "\"a'", 0).raw_trimmed(), "\"a'");
        assert_eq!(raw("identifier", "x", 0).raw_trimmed(), "x");
    }

    #[test]
    fn test_edit_keeps_original_untouched() {
        let original = RawSegment::new("literal", "numeric_literal", "1", Span::new(0, 1));
        let edited = original.edit("0");
        assert_eq!(original.raw(), "1");
        assert_eq!(edited.raw(), "0");
        assert_eq!(edited.span(), original.span());
    }

    #[test]
    fn test_with_children_recomputes_span() {
        let Segment::Node(node) = sample() else {
            panic!("expected node");
        };
        let trimmed = node.with_children(vec![raw(KEYWORD, "SELECT", 0)]);
        assert_eq!(trimmed.span(), Span::new(0, 6));
        assert_eq!(node.children().len(), 5);
    }

    #[test]
    fn test_raw_segments_in_order() {
        let tree = sample();
        let texts: Vec<_> = tree.raw_segments().map(RawSegment::raw).collect();
        assert_eq!(texts, vec!["SELECT", " ", "\"id\""]);
    }
}

//! Structural dumps of a segment tree for diagnostics and tests.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::Segment;

impl Segment {
    /// Renders the tree as indented `type: 'raw'` lines.
    ///
    /// Each level is indented by two spaces. Leaves print their raw text in
    /// Rust debug quoting; nodes and metas print only their type.
    #[must_use]
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Raw(raw) => {
                let _ = writeln!(out, "{indent}{}: {:?}", raw.seg_type(), raw.raw());
            }
            Self::Meta(meta) => {
                let _ = writeln!(out, "{indent}[{}]", meta.kind().seg_type());
            }
            Self::Node(node) => {
                let _ = writeln!(out, "{indent}{}:", node.seg_type());
                for child in node.children() {
                    child.write_tree(out, depth + 1);
                }
            }
        }
    }

    /// Builds a nested JSON record of the tree: leaves become
    /// `{type: raw}` and nodes become `{type: [children...]}`.
    ///
    /// With `code_only`, whitespace, newlines, comments and metas are left
    /// out, which is the shape rule authors usually want to assert against.
    #[must_use]
    pub fn to_record(&self, code_only: bool) -> Value {
        let mut record = Map::new();
        let value = match self {
            Self::Raw(raw) => Value::String(raw.raw().to_string()),
            Self::Meta(_) => Value::String(String::new()),
            Self::Node(node) => Value::Array(
                node.children()
                    .iter()
                    .filter(|child| !code_only || (child.is_code() && !child.is_meta()))
                    .map(|child| child.to_record(code_only))
                    .collect(),
            ),
        };
        record.insert(self.seg_type().to_string(), value);
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::lexer::Span;
    use crate::segment::{MetaKind, MetaSegment, RawSegment, Segment};

    fn tree() -> Segment {
        Segment::node(
            "statement",
            "StatementSegment",
            vec![
                Segment::Raw(RawSegment::new("keyword", "code", "SELECT", Span::new(0, 6))),
                Segment::Meta(MetaSegment::new(MetaKind::Indent, 6)),
                Segment::Raw(RawSegment::new("whitespace", "whitespace", " ", Span::new(6, 7))),
                Segment::Raw(RawSegment::new("literal", "numeric_literal", "1", Span::new(7, 8))),
            ],
        )
    }

    #[test]
    fn test_tree_string() {
        insta::assert_snapshot!(tree().to_tree_string(), @r#"
        statement:
          keyword: "SELECT"
          [indent]
          whitespace: " "
          literal: "1"
        "#);
    }

    #[test]
    fn test_record_code_only() {
        assert_eq!(
            tree().to_record(true),
            json!({"statement": [{"keyword": "SELECT"}, {"literal": "1"}]})
        );
    }

    #[test]
    fn test_record_with_layout() {
        let record = tree().to_record(false);
        assert_eq!(record["statement"].as_array().map(Vec::len), Some(4));
    }
}

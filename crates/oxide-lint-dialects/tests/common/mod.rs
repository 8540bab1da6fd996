#![allow(dead_code)]

use oxide_lint_dialects::dialect_selector;
use oxide_lint_parser::{Dialect, Parser, Segment};

pub fn ansi() -> &'static Dialect {
    dialect_selector("ansi").unwrap()
}

pub fn bigquery() -> &'static Dialect {
    dialect_selector("bigquery").unwrap()
}

/// Parses `sql` and checks the tree renders back to it.
pub fn parse(dialect: &Dialect, sql: &str) -> Segment {
    let tree = Parser::new(dialect).parse(sql);
    assert_eq!(tree.render(), sql, "render must reproduce the input");
    tree
}

/// Parses `sql` and checks nothing in it was left unparsable.
pub fn parse_clean(dialect: &Dialect, sql: &str) -> Segment {
    let tree = parse(dialect, sql);
    assert_eq!(
        count(&tree, "unparsable"),
        0,
        "unexpected unparsable content in {sql:?}:\n{}",
        tree.to_tree_string()
    );
    tree
}

pub fn count(tree: &Segment, seg_type: &str) -> usize {
    tree.recursive_crawl(&[seg_type]).len()
}

/// Returns the source text of every segment of `seg_type`, in order.
pub fn raws(tree: &Segment, seg_type: &str) -> Vec<String> {
    tree.recursive_crawl(&[seg_type])
        .iter()
        .map(|s| s.raw().into_owned())
        .collect()
}

/// Returns the first segment of `seg_type`.
pub fn first<'a>(tree: &'a Segment, seg_type: &str) -> &'a Segment {
    tree.recursive_crawl(&[seg_type])
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no {seg_type} in:\n{}", tree.to_tree_string()))
}

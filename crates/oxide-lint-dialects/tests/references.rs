mod common;

use common::{ansi, bigquery, first, parse_clean};
use oxide_lint_parser::{Dialect, ReferenceLevel, ReferenceStyle, Segment};

fn parts(dialect: &Dialect, segment: &Segment) -> Vec<String> {
    dialect
        .iter_raw_references(segment)
        .into_iter()
        .map(|p| p.part)
        .collect()
}

fn at(dialect: &Dialect, segment: &Segment, level: ReferenceLevel) -> Vec<String> {
    dialect
        .extract_possible_references(segment, level)
        .into_iter()
        .map(|p| p.part)
        .collect()
}

#[test]
fn test_ansi_dotted_column() {
    let d = ansi();
    let tree = parse_clean(d, "SELECT a.b.c FROM s.t");
    let column = first(&tree, "column_reference");
    assert_eq!(d.reference_style(column), ReferenceStyle::Object);
    assert_eq!(parts(d, column), vec!["a", "b", "c"]);
    assert_eq!(at(d, column, ReferenceLevel::Object), vec!["c"]);
    assert_eq!(at(d, column, ReferenceLevel::Table), vec!["b"]);
    assert_eq!(at(d, column, ReferenceLevel::Schema), vec!["a"]);

    let table = first(&tree, "table_reference");
    assert_eq!(at(d, table, ReferenceLevel::Object), vec!["t"]);
    assert_eq!(at(d, table, ReferenceLevel::Table), vec!["s"]);
    assert!(at(d, table, ReferenceLevel::Schema).is_empty());
}

#[test]
fn test_bigquery_column_is_ambiguous() {
    let d = bigquery();
    let tree = parse_clean(d, "SELECT a.b.c, t.col FROM t");
    let columns = tree.recursive_crawl(&["column_reference"]);
    assert_eq!(d.reference_style(columns[0]), ReferenceStyle::AmbiguousColumn);
    assert_eq!(at(d, columns[0], ReferenceLevel::Schema), vec!["a"]);
    assert_eq!(at(d, columns[0], ReferenceLevel::Table), vec!["a", "b"]);
    assert_eq!(at(d, columns[0], ReferenceLevel::Object), vec!["b", "c"]);

    // Two parts are never ambiguous.
    assert_eq!(at(d, columns[1], ReferenceLevel::Table), vec!["t"]);
    assert_eq!(at(d, columns[1], ReferenceLevel::Object), vec!["col"]);

    // Tables keep the plain interpretation.
    let table = first(&tree, "table_reference");
    assert_eq!(d.reference_style(table), ReferenceStyle::Object);
}

#[test]
fn test_hyphenated_parts_are_joined() {
    let d = bigquery();
    let tree = parse_clean(d, "SELECT col FROM my-project.dataset.tbl");
    let reference = first(&tree, "hyphenated_object_reference");
    assert_eq!(parts(d, reference), vec!["my-project", "dataset", "tbl"]);
    assert_eq!(at(d, reference, ReferenceLevel::Object), vec!["tbl"]);
    assert_eq!(at(d, reference, ReferenceLevel::Schema), vec!["my-project"]);
    let pieces = &d.iter_raw_references(reference)[0].segments;
    assert_eq!(pieces.len(), 3);
}

#[test]
fn test_quoted_identifier_is_split_on_dots() {
    let d = bigquery();
    let tree = parse_clean(d, "SELECT 1 FROM `my-project.dataset.tbl`");
    let table = first(&tree, "table_reference");
    assert_eq!(parts(d, table), vec!["my-project", "dataset", "tbl"]);
    assert_eq!(at(d, table, ReferenceLevel::Table), vec!["dataset"]);
}

#[test]
fn test_non_reference_segments_have_no_parts() {
    let d = ansi();
    let tree = parse_clean(d, "SELECT a FROM t");
    let clause = first(&tree, "select_clause");
    assert_eq!(d.reference_style(clause), ReferenceStyle::NotAReference);
    assert!(parts(d, clause).is_empty());
}

mod common;

use common::{count, kw, parse, r, toy_builder, toy_dialect};
use oxide_lint_parser::{Grammar, Parser, SegmentDef, StartsWith};

#[test]
fn test_select_statement_structure() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a, 1 FROM t;");
    assert!(tree.is_type("file"));
    assert_eq!(count(&tree, "statement"), 1);
    assert_eq!(count(&tree, "select_statement"), 1);
    assert_eq!(count(&tree, "expression"), 2);
    assert_eq!(count(&tree, "unparsable"), 0);

    let select = &tree.recursive_crawl(&["select_statement"])[0];
    let keywords: Vec<_> = select
        .get_children("keyword")
        .iter()
        .map(|k| k.raw_upper())
        .collect();
    assert_eq!(keywords, vec!["SELECT", "FROM"]);
    assert_eq!(select.get_child("identifier").unwrap().raw(), "t");
}

#[test]
fn test_keywords_are_case_insensitive() {
    let d = toy_dialect();
    let tree = parse(&d, "select a from t");
    assert_eq!(count(&tree, "select_statement"), 1);
    assert_eq!(count(&tree, "unparsable"), 0);
}

#[test]
fn test_reserved_keyword_is_not_an_identifier() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT from");
    assert_eq!(count(&tree, "select_statement"), 0);
    assert_eq!(count(&tree, "unparsable"), 1);
}

#[test]
fn test_multiple_statements_and_layout() {
    let d = toy_dialect();
    let sql = "-- leading\nSELECT a;\n\nSELECT b FROM c ;;\n";
    let tree = parse(&d, sql);
    assert_eq!(count(&tree, "select_statement"), 2);
    assert_eq!(count(&tree, "comment"), 1);
    assert_eq!(count(&tree, "unparsable"), 0);
    // Leading and trailing layout stays directly under the file.
    assert!(tree.children()[0].is_type("comment"));
    assert!(tree.children().last().unwrap().is_type("newline"));
}

#[test]
fn test_unparsable_containment() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a FROM t; GARBAGE (x; SELECT b");
    assert_eq!(count(&tree, "select_statement"), 2);
    let unparsable = tree.recursive_crawl(&["unparsable"]);
    assert_eq!(unparsable.len(), 1);
    assert_eq!(unparsable[0].raw(), "GARBAGE (x");
}

#[test]
fn test_partial_match_leaves_unparsable_tail() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a b c");
    assert_eq!(count(&tree, "select_statement"), 1);
    let unparsable = tree.recursive_crawl(&["unparsable"]);
    assert_eq!(unparsable.len(), 1);
    assert_eq!(unparsable[0].raw(), "b c");
}

#[test]
fn test_unlexable_input_is_kept() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a § FROM t");
    assert_eq!(count(&tree, "unlexable"), 1);
    assert_eq!(count(&tree, "unparsable"), 1);
}

#[test]
fn test_empty_and_layout_only_input() {
    let d = toy_dialect();
    let tree = parse(&d, "");
    assert!(tree.children().is_empty());
    let tree = parse(&d, "  -- nothing here\n");
    assert_eq!(count(&tree, "statement"), 0);
    assert_eq!(count(&tree, "unparsable"), 0);
}

#[test]
fn test_comparison_operators_are_not_brackets() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a < b, c > d FROM t");
    assert_eq!(count(&tree, "comparison"), 2);
    assert_eq!(count(&tree, "bracketed"), 0);
    assert_eq!(count(&tree, "unparsable"), 0);
}

#[test]
fn test_angle_brackets_in_scoped_set() {
    let d = toy_dialect();
    let tree = parse(&d, "DECLARE x STRUCT<a INT, b STRUCT<c INT>>");
    assert_eq!(count(&tree, "declare_statement"), 1);
    assert_eq!(count(&tree, "bracketed"), 2);
    assert_eq!(count(&tree, "start_angle_bracket"), 2);
    assert_eq!(count(&tree, "end_angle_bracket"), 2);
    assert_eq!(count(&tree, "unparsable"), 0);
}

#[test]
fn test_round_brackets_nest_in_expressions() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT ((a < 1)) FROM t");
    assert_eq!(count(&tree, "bracketed"), 2);
    assert_eq!(count(&tree, "comparison"), 1);
    assert_eq!(count(&tree, "indent"), 3);
    assert_eq!(count(&tree, "dedent"), 3);
}

#[test]
fn test_ambiguity_prefers_longer_alternative() {
    let mut b = toy_builder();
    b.register_segment(SegmentDef::new(
        "PairSegment",
        "pair",
        Grammar::OneOf(vec![
            kw("A"),
            Grammar::Sequence(vec![kw("A"), kw("B")]),
        ]),
    ))
    .unwrap();
    b.replace_segment(
        SegmentDef::new("StatementSegment", "statement", Grammar::Anything)
            .with_parse_grammar(r("PairSegment")),
    )
    .unwrap();
    let d = b.finish().unwrap();

    let tree = parse(&d, "A B");
    let pair = &tree.recursive_crawl(&["pair"])[0];
    assert_eq!(pair.get_children("keyword").len(), 2);
    assert_eq!(count(&tree, "unparsable"), 0);

    let tree = parse(&d, "A");
    assert_eq!(tree.recursive_crawl(&["pair"])[0].raw(), "A");
}

#[test]
fn test_starts_with_whitespace_policy() {
    let mut b = toy_builder();
    b.register_segment(SegmentDef::new(
        "ClauseSegment",
        "clause",
        StartsWith::new(kw("KEEP"))
            .terminator(kw("STOP"))
            .enforce_whitespace_preceding_terminator()
            .into(),
    ))
    .unwrap();
    b.replace_segment(
        SegmentDef::new("StatementSegment", "statement", Grammar::Anything).with_parse_grammar(
            Grammar::Sequence(vec![r("ClauseSegment"), kw("STOP").optional(), Grammar::Anything]),
        ),
    )
    .unwrap();
    let d = b.finish().unwrap();

    let tree = parse(&d, "KEEP x STOP y");
    assert_eq!(tree.recursive_crawl(&["clause"])[0].raw(), "KEEP x");

    // Without preceding layout the word does not end the clause.
    let tree = parse(&d, "KEEP (x)STOP y");
    assert_eq!(tree.recursive_crawl(&["clause"])[0].raw(), "KEEP (x)STOP y");
}

#[test]
fn test_recursion_bound_from_config() {
    let d = toy_dialect();
    let config = oxide_lint_parser::ParserConfig {
        max_recursion_depth: 4,
        ..Default::default()
    };
    let tree = Parser::with_config(&d, &config).parse("SELECT a FROM t");
    assert_eq!(tree.render(), "SELECT a FROM t");
    assert_eq!(count(&tree, "select_statement"), 0);
    assert!(count(&tree, "unparsable") > 0);
}

#[test]
fn test_determinism() {
    let d = toy_dialect();
    let sql = "SELECT a < 1, (b) FROM t;\nDECLARE s STRUCT<x INT>;\nnonsense here";
    let first = Parser::new(&d).parse(sql);
    for _ in 0..5 {
        assert_eq!(Parser::new(&d).parse(sql), first);
    }
}

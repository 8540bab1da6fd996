//! Rendering a parsed tree must reproduce its input byte for byte, whatever
//! the input.

mod common;

use common::{parse, toy_dialect};
use oxide_lint_parser::Parser;
use proptest::prelude::*;

#[test]
fn test_known_inputs_round_trip() {
    let d = toy_dialect();
    for sql in [
        "SELECT a FROM t",
        "select a,b,1 from t;",
        "  SELECT\n\ta\n  FROM\n\tt  ;\n\n",
        "SELECT (a < 1) FROM t;;; DECLARE x STRUCT<y INT>",
        "DECLARE x STRUCT<a INT, b STRUCT<c INT>>",
        ");(;<>;SELECT",
        "SELECT a\r\nFROM t -- trailing comment",
        "ünïcödé ☃ SELECT",
    ] {
        parse(&d, sql);
    }
}

#[test]
fn test_tree_dump() {
    let d = toy_dialect();
    let tree = parse(&d, "SELECT a FROM t");
    insta::assert_snapshot!(tree.to_tree_string(), @r#"
    file:
      statement:
        select_statement:
          keyword: "SELECT"
          [indent]
          whitespace: " "
          expression:
            identifier: "a"
          [dedent]
          whitespace: " "
          keyword: "FROM"
          whitespace: " "
          identifier: "t"
    "#);
}

#[test]
fn test_spans_cover_source() {
    let d = toy_dialect();
    let sql = "SELECT a, b FROM t; junk";
    let tree = parse(&d, sql);
    let mut expected_start = 0;
    for leaf in tree.raw_segments() {
        assert_eq!(leaf.span().start, expected_start);
        assert_eq!(leaf.span().slice(sql), Some(leaf.raw()));
        expected_start = leaf.span().end;
    }
    assert_eq!(expected_start, sql.len());
}

fn sql_fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("SELECT"),
        Just("FROM"),
        Just("DECLARE"),
        Just("STRUCT"),
        Just("a"),
        Just("1"),
        Just(","),
        Just(";"),
        Just("<"),
        Just(">"),
        Just("="),
        Just("("),
        Just(")"),
        Just(" "),
        Just("\n"),
        Just("-- c\n"),
        Just("#"),
    ]
}

proptest! {
    #[test]
    fn test_arbitrary_text_round_trips(source in "\\PC{0,64}") {
        let d = toy_dialect();
        let tree = Parser::new(&d).parse(&source);
        prop_assert_eq!(tree.render(), source);
    }

    #[test]
    fn test_sql_like_text_round_trips(parts in prop::collection::vec(sql_fragment(), 0..40)) {
        let d = toy_dialect();
        let source = parts.concat();
        let tree = Parser::new(&d).parse(&source);
        prop_assert_eq!(tree.render(), source);
    }
}

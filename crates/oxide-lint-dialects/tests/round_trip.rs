//! Every dialect renders every input back unchanged, and the shape of a
//! simple query is pinned.

mod common;

use common::{ansi, bigquery, parse, parse_clean};
use oxide_lint_dialects::{available_dialects, dialect_selector};
use oxide_lint_parser::{Dialect, Parser};
use proptest::prelude::*;

#[test]
fn test_known_inputs_round_trip() {
    for name in available_dialects() {
        let d = dialect_selector(name).unwrap();
        for sql in [
            "",
            ";",
            "SELECT",
            "SELECT a FROM t WHERE",
            "SELECT (a FROM t",
            "SELECT a)) FROM t;;",
            "SELECT `unterminated FROM t",
            "SELECT 'unterminated FROM t",
            "/* open comment SELECT 1",
            "SELECT ünïcödé, '☃' FROM t\r\n",
            "DECLARE x STRUCT<a INT64",
            "SELECT a < b > c FROM t",
        ] {
            parse(d, sql);
        }
    }
}

#[test]
fn test_code_only_record() {
    let sql = "SELECT a FROM t WHERE b = 1";
    let record = |d: &Dialect| {
        serde_json::to_string(&parse_clean(d, sql).to_record(true)).unwrap()
    };
    let in_ansi = record(ansi());
    assert_eq!(record(bigquery()), in_ansi);
    insta::assert_snapshot!(in_ansi, @r#"{"file":[{"statement":[{"select_statement":[{"select_clause":[{"keyword":"SELECT"},{"select_clause_element":[{"column_reference":[{"identifier":"a"}]}]}]},{"from_clause":[{"keyword":"FROM"},{"from_expression":[{"from_expression_element":[{"table_expression":[{"table_reference":[{"identifier":"t"}]}]}]}]}]},{"where_clause":[{"keyword":"WHERE"},{"expression":[{"column_reference":[{"identifier":"b"}]},{"comparison_operator":"="},{"numeric_literal":"1"}]}]}]}]}]}"#);
}

#[test]
fn test_parse_many_matches_parse() {
    let d = bigquery();
    let sources = [
        "SELECT 1",
        "SELECT a FROM `p.d.t` QUALIFY x = 1",
        "DECLARE s STRUCT<a INT64>",
        "garbage (",
    ];
    let parser = Parser::new(d);
    let many = parser.parse_many(&sources);
    for (source, tree) in sources.iter().zip(&many) {
        assert_eq!(tree, &parser.parse(source));
    }
}

fn sql_fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("SELECT"),
        Just("FROM"),
        Just("WHERE"),
        Just("STRUCT"),
        Just("EXCEPT"),
        Just("a"),
        Just("`p-q.r`"),
        Just("'s'"),
        Just("1"),
        Just(","),
        Just("."),
        Just("-"),
        Just(";"),
        Just("<"),
        Just(">"),
        Just("=>"),
        Just("("),
        Just(")"),
        Just("["),
        Just("]"),
        Just(" "),
        Just("\n"),
        Just("-- c\n"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_sql_like_text_round_trips(parts in prop::collection::vec(sql_fragment(), 0..24)) {
        let source = parts.concat();
        for d in [ansi(), bigquery()] {
            let tree = Parser::new(d).parse(&source);
            prop_assert_eq!(tree.render(), source.as_str());
        }
    }
}

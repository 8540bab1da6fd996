#![allow(dead_code)]

use oxide_lint_parser::dialect::default_bracket_pairs;
use oxide_lint_parser::{
    AnyNumberOf, BracketPair, Bracketed, Delimited, Dialect, DialectBuilder, Grammar, LexMatcher,
    Parser, Pattern, Segment, SegmentDef, Terminal,
};

pub fn r(name: &'static str) -> Grammar {
    Grammar::reference(name)
}

pub fn kw(word: &'static str) -> Grammar {
    Grammar::keyword(word)
}

/// A small dialect with SELECT and DECLARE statements, comparisons and
/// angle-bracketed struct types.
pub fn toy_builder() -> DialectBuilder {
    let mut b = DialectBuilder::new("toy", "FileSegment");
    b.add_lexer_matchers(vec![
        LexMatcher::regex("whitespace", r"[^\S\r\n]+", "whitespace").unwrap(),
        LexMatcher::regex("newline", r"\r\n|\n", "newline").unwrap(),
        LexMatcher::regex("inline_comment", r"--[^\n]*", "comment").unwrap(),
        LexMatcher::string("semicolon", ";", "statement_terminator"),
        LexMatcher::string("comma", ",", "comma"),
        LexMatcher::string("start_bracket", "(", "start_bracket"),
        LexMatcher::string("end_bracket", ")", "end_bracket"),
        LexMatcher::string("less_than", "<", "comparison_operator"),
        LexMatcher::string("greater_than", ">", "comparison_operator"),
        LexMatcher::string("equals", "=", "comparison_operator"),
        LexMatcher::regex("numeric_literal", r"[0-9]+", "literal").unwrap(),
        LexMatcher::regex("word", r"[A-Za-z_][A-Za-z0-9_]*", "word").unwrap(),
    ]);

    let identifier = Terminal::pattern(
        Pattern::new("[A-Z_][A-Z0-9_]*")
            .unwrap()
            .excluding_set("reserved_keywords"),
        "identifier",
    );
    let grammars = [
        ("DelimiterSegment", Grammar::symbol(";", "statement_terminator")),
        ("CommaSegment", Grammar::symbol(",", "comma")),
        ("StartBracketSegment", Grammar::symbol("(", "start_bracket")),
        ("EndBracketSegment", Grammar::symbol(")", "end_bracket")),
        ("StartSquareBracketSegment", Grammar::Nothing),
        ("EndSquareBracketSegment", Grammar::Nothing),
        ("StartCurlyBracketSegment", Grammar::Nothing),
        ("EndCurlyBracketSegment", Grammar::Nothing),
        ("StartAngleBracketSegment", Grammar::symbol("<", "start_angle_bracket")),
        ("EndAngleBracketSegment", Grammar::symbol(">", "end_angle_bracket")),
        (
            "ComparisonOperatorGrammar",
            Grammar::OneOf(vec![
                Grammar::symbol("<", "comparison_operator"),
                Grammar::symbol(">", "comparison_operator"),
                Grammar::symbol("=", "comparison_operator"),
            ]),
        ),
        ("NakedIdentifierSegment", identifier.into()),
        (
            "NumericLiteralSegment",
            Grammar::token("numeric_literal", "numeric_literal"),
        ),
        (
            "OperandGrammar",
            Grammar::OneOf(vec![
                r("NakedIdentifierSegment"),
                r("NumericLiteralSegment"),
                Grammar::bracketed(r("ExpressionSegment")),
            ]),
        ),
    ];
    for (name, grammar) in grammars {
        b.register(name, grammar).unwrap();
    }

    let struct_fields = Delimited::new(
        vec![Grammar::Sequence(vec![
            r("NakedIdentifierSegment"),
            r("DataTypeSegment"),
        ])],
        r("CommaSegment"),
    );
    let segments = [
        SegmentDef::new(
            "ComparisonSegment",
            "comparison",
            Grammar::Sequence(vec![
                r("OperandGrammar"),
                r("ComparisonOperatorGrammar"),
                r("OperandGrammar"),
            ]),
        ),
        SegmentDef::new(
            "ExpressionSegment",
            "expression",
            Grammar::OneOf(vec![r("ComparisonSegment"), r("OperandGrammar")]),
        ),
        SegmentDef::new(
            "SelectStatementSegment",
            "select_statement",
            Grammar::Sequence(vec![
                kw("SELECT"),
                Grammar::Indent,
                Delimited::new(vec![r("ExpressionSegment")], r("CommaSegment")).into(),
                Grammar::Dedent,
                Grammar::Sequence(vec![kw("FROM"), r("NakedIdentifierSegment")]).optional(),
            ]),
        ),
        SegmentDef::new(
            "DataTypeSegment",
            "data_type",
            Grammar::OneOf(vec![
                r("NakedIdentifierSegment"),
                Grammar::Sequence(vec![
                    kw("STRUCT"),
                    Bracketed::new(struct_fields.into())
                        .bracket_type("angle")
                        .pairs_set("angle_bracket_pairs")
                        .into(),
                ]),
            ]),
        ),
        SegmentDef::new(
            "DeclareStatementSegment",
            "declare_statement",
            Grammar::Sequence(vec![
                kw("DECLARE"),
                r("NakedIdentifierSegment"),
                r("DataTypeSegment"),
            ]),
        ),
        SegmentDef::new("StatementSegment", "statement", Grammar::Anything).with_parse_grammar(
            Grammar::OneOf(vec![
                r("SelectStatementSegment"),
                r("DeclareStatementSegment"),
            ]),
        ),
        SegmentDef::new("FileSegment", "file", Grammar::Anything).with_parse_grammar(
            Delimited::new(
                vec![r("StatementSegment")],
                AnyNumberOf::new(vec![r("DelimiterSegment")])
                    .min_times(1)
                    .into(),
            )
            .allow_trailing()
            .into(),
        ),
    ];
    for def in segments {
        b.register_segment(def).unwrap();
    }

    b.update_set("reserved_keywords", ["SELECT", "FROM", "DECLARE"]);
    let (set, pairs) = default_bracket_pairs();
    b.update_bracket_pairs(set, pairs);
    b.update_bracket_pairs(
        "angle_bracket_pairs",
        vec![BracketPair::new(
            "angle",
            "StartAngleBracketSegment",
            "EndAngleBracketSegment",
            false,
        )],
    );
    b
}

pub fn toy_dialect() -> Dialect {
    toy_builder()
        .finish()
        .unwrap_or_else(|e| panic!("toy dialect failed to build: {e}"))
}

/// Parses `sql` and checks the tree renders back to it.
pub fn parse(dialect: &Dialect, sql: &str) -> Segment {
    let tree = Parser::new(dialect).parse(sql);
    assert_eq!(tree.render(), sql, "render must reproduce the input");
    tree
}

pub fn count(tree: &Segment, seg_type: &str) -> usize {
    tree.recursive_crawl(&[seg_type]).len()
}

//! The BigQuery dialect, derived from [`ansi`](crate::ansi).
//!
//! Everything not mentioned here is inherited. Angle brackets only act as
//! brackets inside type expressions such as `STRUCT<a INT64>`; they live in
//! their own `angle_bracket_pairs` set so `a < b` stays a comparison.

use oxide_lint_parser::{
    AnyNumberOf, BracketPair, Bracketed, Delimited, Dialect, DialectBuilder, DialectResult, Grammar,
    GrammarEdit, LexMatcher, Pattern, ReferenceStyle, SegmentDef, StartsWith, Terminal,
};

use crate::ansi;
use crate::shorthand::{
    bracketed, clause, comma_list, kw, one_of, r, register_grammars, register_segments, seq,
};

/// Name the dialect is registered under.
pub const NAME: &str = "bigquery";

const ANGLE_BRACKET_SET: &str = "angle_bracket_pairs";

// Quoted literals take optional r/b prefixes in either order. A quote may be
// escaped by a backslash preceded by an even number of backslashes. The
// triple-quoted form is tried first.
const SINGLE_QUOTE: &str = r"([rR]?[bB]?|[bB]?[rR]?)?('''((?<!\\)(\\{2})*\\'|'{0,2}(?!')|[^'])*(?<!\\)(\\{2})*'''|'((?<!\\)(\\{2})*\\'|[^'])*(?<!\\)(\\{2})*')";
const DOUBLE_QUOTE: &str = r#"([rR]?[bB]?|[bB]?[rR]?)?("""((?<!\\)(\\{2})*\\"|"{0,2}(?!")|[^"])*(?<!\\)(\\{2})*"""|"((?<!\\)(\\{2})*\\"|[^"])*(?<!\\)(\\{2})*")"#;

/// Builds the BigQuery dialect on top of a freshly built ANSI dialect.
///
/// # Errors
///
/// Fails if either definition is inconsistent.
pub fn dialect() -> DialectResult<Dialect> {
    derive_from(&ansi::dialect()?)
}

/// Builds the BigQuery dialect on top of `ansi`, which is left untouched.
///
/// # Errors
///
/// Fails if an edit refers to something `ansi` does not define.
pub fn derive_from(ansi: &Dialect) -> DialectResult<Dialect> {
    let mut b = ansi.derive(NAME);
    b.insert_lexer_matchers(vec![LexMatcher::string("right_arrow", "=>", "code")], "equals")?
        .patch_lexer_matchers(vec![
            LexMatcher::regex("single_quote", SINGLE_QUOTE, "code")?,
            LexMatcher::regex("double_quote", DOUBLE_QUOTE, "code")?,
        ])?;

    register_grammars(&mut b, added_grammars())?;
    replace_grammars(&mut b, replaced_grammars(ansi)?)?;
    update_sets(&mut b);

    register_segments(&mut b, query_segments())?;
    register_segments(&mut b, expression_segments())?;
    register_segments(&mut b, script_segments())?;
    register_segments(&mut b, table_option_segments())?;
    register_segments(&mut b, vec![hyphenated_reference(ansi)?])?;
    replace_segments(&mut b, query_overrides(ansi)?)?;
    replace_segments(&mut b, expression_overrides(ansi)?)?;
    replace_segments(&mut b, vec![create_table()])?;

    tracing::debug!(dialect = NAME, parent = ansi.name(), "assembled dialect definition");
    b.finish()
}

fn replace_grammars(
    b: &mut DialectBuilder,
    grammars: Vec<(&'static str, Grammar)>,
) -> DialectResult<()> {
    for (name, grammar) in grammars {
        b.replace(name, grammar)?;
    }
    Ok(())
}

fn replace_segments(b: &mut DialectBuilder, defs: Vec<SegmentDef>) -> DialectResult<()> {
    for def in defs {
        b.replace_segment(def)?;
    }
    Ok(())
}

/// Copies an inherited segment with `edit` applied to the grammar its
/// content is parsed with.
fn edit_parse_grammar(ansi: &Dialect, name: &str, edit: &GrammarEdit) -> DialectResult<SegmentDef> {
    let def = ansi.segment(name)?;
    let grammar = def
        .parse_grammar()
        .unwrap_or_else(|| def.match_grammar())
        .copy_with(edit)?;
    Ok(def.clone().with_parse_grammar(grammar))
}

fn edit_match_grammar(ansi: &Dialect, name: &str, edit: &GrammarEdit) -> DialectResult<SegmentDef> {
    let def = ansi.segment(name)?;
    let grammar = def.match_grammar().copy_with(edit)?;
    Ok(def.clone().with_match_grammar(grammar))
}

fn angle_bracketed(inner: Grammar) -> Grammar {
    Bracketed::new(inner)
        .bracket_type("angle")
        .pairs_set(ANGLE_BRACKET_SET)
        .into()
}

fn added_grammars() -> Vec<(&'static str, Grammar)> {
    vec![
        ("DoubleQuotedLiteralSegment", Grammar::token("double_quote", "quoted_literal")),
        ("DoubleQuotedUDFBody", Grammar::token("double_quote", "udf_body")),
        ("SingleQuotedUDFBody", Grammar::token("single_quote", "udf_body")),
        ("StructKeywordSegment", kw("STRUCT")),
        ("StartAngleBracketSegment", Grammar::symbol("<", "start_angle_bracket")),
        ("EndAngleBracketSegment", Grammar::symbol(">", "end_angle_bracket")),
        ("RightArrowSegment", Grammar::symbol("=>", "right_arrow")),
    ]
}

fn replaced_grammars(ansi: &Dialect) -> DialectResult<Vec<(&'static str, Grammar)>> {
    Ok(vec![
        (
            "SelectClauseElementListGrammar",
            Delimited::new(vec![r("SelectClauseElementSegment")], r("CommaSegment"))
                .allow_trailing()
                .into(),
        ),
        (
            "FunctionContentsExpressionGrammar",
            one_of(vec![
                r("DatetimeUnitSegment"),
                seq(vec![
                    r("ExpressionSegment"),
                    seq(vec![one_of(vec![kw("IGNORE"), kw("RESPECT")]), kw("NULLS")]).optional(),
                ]),
                r("NamedArgumentSegment"),
            ]),
        ),
        (
            "SimpleArrayTypeGrammar",
            seq(vec![kw("ARRAY"), angle_bracketed(r("DatatypeIdentifierSegment"))]),
        ),
        (
            "BaseExpressionElementGrammar",
            ansi.grammar("BaseExpressionElementGrammar")?
                .copy_with(&GrammarEdit::insert(vec![r("TypelessStructSegment")]))?,
        ),
        (
            "FunctionContentsGrammar",
            ansi.grammar("FunctionContentsGrammar")?.copy_with(
                &GrammarEdit::insert(vec![r("TypelessStructSegment")])
                    .before(r("ExpressionSegment")),
            )?,
        ),
        (
            "ParameterNameSegment",
            one_of(vec![
                Grammar::pattern("[A-Z_][A-Z0-9_]*", "parameter")?,
                Grammar::token("back_quote", "parameter"),
            ]),
        ),
        ("DateTimeLiteralGrammar", Grammar::Nothing),
        ("QuotedIdentifierSegment", Grammar::token("back_quote", "identifier")),
        (
            "LiteralGrammar",
            ansi.grammar("LiteralGrammar")?.copy_with(&GrammarEdit::insert(vec![
                r("DoubleQuotedLiteralSegment"),
                r("LiteralCoercionSegment"),
            ]))?,
        ),
        (
            "PostTableExpressionGrammar",
            seq(vec![
                seq(vec![
                    kw("FOR"),
                    kw("SYSTEM_TIME"),
                    kw("AS"),
                    kw("OF"),
                    r("ExpressionSegment"),
                ])
                .optional(),
                seq(vec![kw("WITH"), kw("OFFSET"), kw("AS"), r("SingleIdentifierGrammar")])
                    .optional(),
            ]),
        ),
        (
            "FunctionNameIdentifierSegment",
            one_of(vec![
                // STRUCT(...) builds a value rather than calling a function.
                Terminal::pattern(
                    Pattern::new("[A-Z_][A-Z0-9_]*")?
                        .excluding("STRUCT")?
                        .excluding_set("reserved_keywords"),
                    "function_name_identifier",
                )
                .into(),
                Grammar::token("back_quote", "function_name_identifier"),
            ]),
        ),
        ("FunctionDefinitionGrammar", function_definition()),
    ])
}

fn function_definition() -> Grammar {
    let option = seq(vec![r("ParameterNameSegment"), r("EqualsSegment"), Grammar::Anything]);
    AnyNumberOf::new(vec![
        one_of(vec![kw("DETERMINISTIC"), seq(vec![kw("NOT"), kw("DETERMINISTIC")])]),
        seq(vec![
            kw("LANGUAGE"),
            r("ParameterNameSegment"),
            seq(vec![kw("OPTIONS"), bracketed(comma_list(option))]).optional(),
        ]),
        seq(vec![
            kw("AS"),
            one_of(vec![
                r("DoubleQuotedUDFBody"),
                r("SingleQuotedUDFBody"),
                bracketed(one_of(vec![r("ExpressionSegment"), r("SelectStatementSegment")])),
            ]),
        ]),
    ])
    .min_times(1)
    .into()
}

fn update_sets(b: &mut DialectBuilder) {
    b.update_set(
        "datetime_units",
        ["MICROSECOND", "DAYOFWEEK", "ISOWEEK", "ISOYEAR", "DATE", "DATETIME", "TIME"],
    )
    .add_to_set("unreserved_keywords", "SYSTEM_TIME")
    .remove_from_set("unreserved_keywords", "FOR")
    .add_to_set("unreserved_keywords", "STRUCT")
    .add_to_set("unreserved_keywords", "ORDINAL")
    .add_to_set("reserved_keywords", "FOR")
    .update_set("value_table_functions", ["unnest"])
    .update_bracket_pairs(
        ANGLE_BRACKET_SET,
        vec![BracketPair::new(
            "angle",
            "StartAngleBracketSegment",
            "EndAngleBracketSegment",
            false,
        )],
    );
}

fn query_segments() -> Vec<SegmentDef> {
    vec![
        clause(
            "QualifyClauseSegment",
            "qualify_clause",
            kw("QUALIFY"),
            one_of(vec![kw("WINDOW"), seq(vec![kw("ORDER"), kw("BY")]), kw("LIMIT")]),
            seq(vec![
                kw("QUALIFY"),
                Grammar::Indent,
                Grammar::optionally_bracketed(r("ExpressionSegment")),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "ExceptClauseSegment",
            "select_except_clause",
            seq(vec![kw("EXCEPT"), bracketed(comma_list(r("SingleIdentifierGrammar")))]),
        ),
        SegmentDef::new(
            "ReplaceClauseSegment",
            "select_replace_clause",
            seq(vec![
                kw("REPLACE"),
                one_of(vec![
                    bracketed(comma_list(r("SelectClauseElementSegment"))),
                    r("SelectClauseElementSegment"),
                ]),
            ]),
        ),
    ]
}

fn expression_segments() -> Vec<SegmentDef> {
    vec![
        SegmentDef::new(
            "TypelessStructSegment",
            "typeless_struct",
            seq(vec![
                kw("STRUCT"),
                bracketed(
                    comma_list(seq(vec![
                        r("BaseExpressionElementGrammar"),
                        r("AliasExpressionSegment").optional(),
                    ]))
                    .optional(),
                ),
            ]),
        ),
        SegmentDef::new(
            "NamedArgumentSegment",
            "named_argument",
            seq(vec![
                r("NakedIdentifierSegment"),
                r("RightArrowSegment"),
                r("ExpressionSegment"),
            ]),
        ),
        SegmentDef::new(
            "LiteralCoercionSegment",
            "cast_expression",
            seq(vec![
                one_of(vec![kw("DATE"), kw("DATETIME"), kw("TIME"), kw("TIMESTAMP")]),
                r("QuotedLiteralSegment"),
            ]),
        ),
    ]
}

fn script_segments() -> Vec<SegmentDef> {
    let default = || {
        seq(vec![
            kw("DEFAULT"),
            one_of(vec![
                r("LiteralGrammar"),
                bracketed(r("SelectStatementSegment")),
                r("BareFunctionSegment"),
                r("FunctionSegment"),
            ]),
        ])
    };
    vec![
        SegmentDef::new(
            "DeclareStatementSegment",
            "declare_segment",
            StartsWith::new(kw("DECLARE")).into(),
        )
        .with_parse_grammar(seq(vec![
            kw("DECLARE"),
            comma_list(r("NakedIdentifierSegment")),
            one_of(vec![
                seq(vec![r("DatatypeSegment"), default().optional()]),
                default(),
            ]),
        ])),
        SegmentDef::new("SetStatementSegment", "set_segment", StartsWith::new(kw("SET")).into())
            .with_parse_grammar(seq(vec![
                kw("SET"),
                one_of(vec![
                    r("NakedIdentifierSegment"),
                    bracketed(comma_list(r("NakedIdentifierSegment"))),
                ]),
                r("EqualsSegment"),
                comma_list(r("ExpressionSegment")),
            ])),
    ]
}

fn table_option_segments() -> Vec<SegmentDef> {
    let ends_at = |words: &[&'static str]| {
        let mut stops: Vec<Grammar> = words.iter().copied().map(kw).collect();
        stops.push(r("DelimiterSegment"));
        one_of(stops)
    };
    vec![
        clause(
            "PartitionBySegment",
            "partition_by_segment",
            kw("PARTITION"),
            ends_at(&["CLUSTER", "OPTIONS", "AS"]),
            seq(vec![kw("PARTITION"), kw("BY"), r("ExpressionSegment")]),
        ),
        clause(
            "ClusterBySegment",
            "cluster_by_segment",
            kw("CLUSTER"),
            ends_at(&["OPTIONS", "AS"]),
            seq(vec![kw("CLUSTER"), kw("BY"), comma_list(r("ExpressionSegment"))]),
        ),
        SegmentDef::new(
            "OptionsSegment",
            "options_segment",
            seq(vec![
                kw("OPTIONS"),
                bracketed(comma_list(seq(vec![
                    r("ParameterNameSegment"),
                    r("EqualsSegment"),
                    r("LiteralGrammar"),
                ]))),
            ]),
        ),
    ]
}

/// Object references whose parts may contain hyphens, as in
/// `my-project.dataset.table`.
fn hyphenated_reference(ansi: &Dialect) -> DialectResult<SegmentDef> {
    let object = ansi.segment("ObjectReferenceSegment")?;
    let grammar = object.match_grammar().with_delimiter(one_of(vec![
        r("DotSegment"),
        seq(vec![r("DotSegment"), r("DotSegment")]),
        seq(vec![r("MinusSegment")]),
    ]))?;
    Ok(object
        .renamed("HyphenatedObjectReferenceSegment", "hyphenated_object_reference")
        .with_match_grammar(grammar)
        .with_references(ReferenceStyle::Hyphenated))
}

fn query_overrides(ansi: &Dialect) -> DialectResult<Vec<SegmentDef>> {
    Ok(vec![
        edit_parse_grammar(
            ansi,
            "SelectStatementSegment",
            &GrammarEdit::insert(vec![r("QualifyClauseSegment").optional()])
                .before(r("OrderByClauseSegment").optional()),
        )?,
        edit_parse_grammar(
            ansi,
            "StatementSegment",
            &GrammarEdit::insert(vec![r("DeclareStatementSegment"), r("SetStatementSegment")]),
        )?,
        edit_match_grammar(
            ansi,
            "WildcardExpressionSegment",
            &GrammarEdit::insert(vec![
                r("ExceptClauseSegment").optional(),
                r("ReplaceClauseSegment").optional(),
            ]),
        )?,
        edit_match_grammar(
            ansi,
            "TableExpressionSegment",
            &GrammarEdit::insert(vec![r("HyphenatedObjectReferenceSegment")]),
        )?,
        ansi.segment("ColumnReferenceSegment")?
            .clone()
            .with_references(ReferenceStyle::AmbiguousColumn),
        SegmentDef::new(
            "SelectClauseModifierSegment",
            "select_clause_modifier",
            seq(vec![
                seq(vec![kw("AS"), one_of(vec![kw("STRUCT"), kw("VALUE")])]).optional(),
                one_of(vec![kw("DISTINCT"), kw("ALL")]).optional(),
            ]),
        ),
        // A bare EXCEPT introduces a wildcard exclusion list, so the set
        // operators must name DISTINCT or ALL.
        SegmentDef::new(
            "SetOperatorSegment",
            "set_operator",
            seq(vec![
                one_of(vec![kw("UNION"), kw("INTERSECT"), kw("EXCEPT")]),
                one_of(vec![kw("DISTINCT"), kw("ALL")]),
            ]),
        ),
    ])
}

fn expression_overrides(ansi: &Dialect) -> DialectResult<Vec<SegmentDef>> {
    let array_offset = Bracketed::new(seq(vec![
        one_of(vec![kw("OFFSET"), kw("ORDINAL")]),
        bracketed(r("NumericLiteralSegment")),
    ]))
    .bracket_type("square");
    let field_access = seq(vec![
        r("DotSegment"),
        AnyNumberOf::new(vec![seq(vec![r("ParameterNameSegment"), r("DotSegment")])]).into(),
        one_of(vec![r("ParameterNameSegment"), r("StarSegment")]),
    ]);
    Ok(vec![
        ansi.segment("FunctionSegment")?.clone().with_match_grammar(seq(vec![
            seq(vec![
                r("FunctionNameSegment"),
                bracketed(r("FunctionContentsGrammar").optional()),
                Grammar::from(array_offset).optional(),
                field_access.optional(),
            ]),
            r("PostFunctionGrammar").optional(),
        ])),
        SegmentDef::new(
            "ArrayLiteralSegment",
            "array_literal",
            Bracketed::new(
                comma_list(one_of(vec![r("ExpressionSegment"), r("TypelessStructSegment")]))
                    .optional(),
            )
            .bracket_type("square")
            .into(),
        ),
        SegmentDef::new(
            "IntervalExpressionSegment",
            "interval_expression",
            seq(vec![
                kw("INTERVAL"),
                r("ExpressionSegment"),
                one_of(vec![r("QuotedLiteralSegment"), r("DatetimeUnitSegment")]),
            ]),
        ),
        SegmentDef::new(
            "DatatypeSegment",
            "data_type",
            one_of(vec![
                seq(vec![
                    r("DatatypeIdentifierSegment"),
                    bracketed(comma_list(r("NumericLiteralSegment"))).optional(),
                ]),
                seq(vec![kw("ANY"), kw("TYPE")]),
                seq(vec![kw("ARRAY"), angle_bracketed(r("DatatypeSegment"))]),
                seq(vec![
                    kw("STRUCT"),
                    angle_bracketed(comma_list(seq(vec![
                        r("ParameterNameSegment"),
                        r("DatatypeSegment"),
                    ]))),
                ]),
            ]),
        ),
    ])
}

fn create_table() -> SegmentDef {
    SegmentDef::new(
        "CreateTableStatementSegment",
        "create_table_statement",
        seq(vec![
            kw("CREATE"),
            r("OrReplaceGrammar").optional(),
            r("TemporaryTransientGrammar").optional(),
            kw("TABLE"),
            r("IfNotExistsGrammar").optional(),
            r("TableReferenceSegment"),
            seq(vec![
                bracketed(comma_list(one_of(vec![
                    r("TableConstraintSegment"),
                    r("ColumnDefinitionSegment"),
                ]))),
                r("CommentClauseSegment").optional(),
            ])
            .optional(),
            r("PartitionBySegment").optional(),
            r("ClusterBySegment").optional(),
            r("OptionsSegment").optional(),
            seq(vec![kw("AS"), Grammar::optionally_bracketed(r("SelectableGrammar"))]).optional(),
        ]),
    )
}

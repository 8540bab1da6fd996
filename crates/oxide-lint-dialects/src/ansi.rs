//! The ANSI dialect.
//!
//! Every other dialect derives from this one. It covers the common core of
//! SQL: queries with joins, set operators and common table expressions,
//! the DML statements, and `CREATE`/`DROP` for tables and functions.
//!
//! Clauses are matched in two phases. A clause first claims everything from
//! its opening keyword up to the keyword of the next clause (see the
//! `*TerminatorGrammar` entries); its content is only decomposed once the
//! whole statement has been split up. A clause that fails to parse becomes
//! an `unparsable` region without disturbing its siblings.

use oxide_lint_parser::dialect::default_bracket_pairs;
use oxide_lint_parser::{
    AnyNumberOf, Bracketed, Delimited, Dialect, DialectBuilder, DialectResult, Grammar,
    LexMatcher, Pattern, ReferenceStyle, SegmentDef, StartsWith, Terminal,
};

use crate::shorthand::{
    bracketed, clause, comma_list, kw, one_of, r, register_grammars, register_segments, seq,
};

/// Name the dialect is registered under.
pub const NAME: &str = "ansi";

const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CREATE", "CROSS", "DEFAULT", "DELETE",
    "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXCEPT", "EXISTS", "FALSE", "FROM", "FULL",
    "GROUP", "HAVING", "IN", "INNER", "INSERT", "INTERSECT", "INTERVAL", "INTO", "IS", "JOIN",
    "LEFT", "LIKE", "LIMIT", "NATURAL", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "OVER",
    "PARTITION", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TRUE", "UNION", "UPDATE", "USING",
    "VALUES", "WHEN", "WHERE", "WINDOW", "WITH",
];

const UNRESERVED_KEYWORDS: &[&str] = &[
    "ANY", "ARRAY", "CASCADE", "CAST", "CLUSTER", "COMMENT", "CONSTRAINT", "CURRENT", "DATE",
    "DATETIME", "DAY", "DETERMINISTIC", "DOUBLE", "ESCAPE", "FILTER", "FIRST", "FOLLOWING", "FOR",
    "FOREIGN", "FUNCTION", "HOUR", "IF", "IGNORE", "ILIKE", "KEY", "LANGUAGE", "LAST", "MINUS",
    "MINUTE", "MONTH", "NULLS", "OF", "OFFSET", "OPTIONS", "OVERWRITE", "PRECEDING", "PRECISION",
    "PRIMARY", "QUALIFY", "RANGE", "RECURSIVE", "REFERENCES", "REPLACE", "RESPECT", "RESTRICT",
    "RETURNS", "RLIKE", "ROW", "ROWS", "SECOND", "SEPARATOR", "TEMP", "TEMPORARY", "TIME",
    "TIMESTAMP", "TRANSIENT", "TYPE", "UNBOUNDED", "UNIQUE", "UNKNOWN", "VALUE", "VARYING", "VIEW",
    "WEEK", "WITHOUT", "YEAR", "ZONE",
];

const DATETIME_UNITS: &[&str] = &[
    "DAY",
    "DAYOFYEAR",
    "HOUR",
    "MILLISECOND",
    "MINUTE",
    "MONTH",
    "QUARTER",
    "SECOND",
    "WEEK",
    "WEEKDAY",
    "YEAR",
];

const BARE_FUNCTIONS: &[&str] = &["CURRENT_TIMESTAMP", "CURRENT_TIME", "CURRENT_DATE"];

/// Builds the ANSI dialect.
///
/// # Errors
///
/// Fails only if the grammar definitions below are inconsistent.
pub fn dialect() -> DialectResult<Dialect> {
    builder()?.finish()
}

/// Returns the ANSI dialect before validation, for callers that want to
/// adjust it first.
///
/// # Errors
///
/// Fails if a pattern does not compile or a name is registered twice.
pub fn builder() -> DialectResult<DialectBuilder> {
    let mut b = DialectBuilder::new(NAME, "FileSegment");
    b.add_lexer_matchers(lexer_matchers()?);
    register_grammars(&mut b, symbols())?;
    register_grammars(&mut b, terminals()?)?;
    register_grammars(&mut b, expression_grammars())?;
    register_grammars(&mut b, select_grammars())?;
    register_segments(&mut b, reference_segments())?;
    register_segments(&mut b, expression_segments())?;
    register_segments(&mut b, select_segments())?;
    register_segments(&mut b, from_segments())?;
    register_segments(&mut b, statement_segments())?;
    register_segments(&mut b, ddl_segments())?;

    b.update_set("reserved_keywords", RESERVED_KEYWORDS.iter().copied())
        .update_set("unreserved_keywords", UNRESERVED_KEYWORDS.iter().copied())
        .update_set("datetime_units", DATETIME_UNITS.iter().copied())
        .update_set("bare_functions", BARE_FUNCTIONS.iter().copied())
        .update_set("value_table_functions", Vec::<String>::new());
    let (set, pairs) = default_bracket_pairs();
    b.update_bracket_pairs(set, pairs);
    tracing::debug!(dialect = NAME, "assembled dialect definition");
    Ok(b)
}

fn lexer_matchers() -> DialectResult<Vec<LexMatcher>> {
    Ok(vec![
        LexMatcher::regex("whitespace", r"[^\S\r\n]+", "whitespace")?,
        LexMatcher::regex("inline_comment", r"(--|#)[^\n]*", "comment")?,
        LexMatcher::regex("block_comment", r"/\*([^*]|\*(?!/))*\*/", "comment")?,
        LexMatcher::regex("single_quote", r"'([^'\\]|\\.|'')*'", "code")?,
        LexMatcher::regex("double_quote", r#""([^"\\]|\\.)*""#, "code")?,
        LexMatcher::regex("back_quote", r"`[^`]*`", "code")?,
        LexMatcher::regex(
            "numeric_literal",
            r"(\d+(\.\d+)?|\.\d+)([eE][+-]?\d+)?(?![A-Za-z_])",
            "code",
        )?,
        LexMatcher::regex("newline", r"\r\n|\n", "newline")?,
        LexMatcher::string("casting_operator", "::", "code"),
        LexMatcher::string("concat_operator", "||", "code"),
        LexMatcher::string("greater_than_or_equal", ">=", "code"),
        LexMatcher::string("less_than_or_equal", "<=", "code"),
        LexMatcher::regex("not_equal", "!=|<>", "code")?,
        LexMatcher::string("equals", "=", "code"),
        LexMatcher::string("greater_than", ">", "code"),
        LexMatcher::string("less_than", "<", "code"),
        LexMatcher::string("dot", ".", "code"),
        LexMatcher::string("comma", ",", "code"),
        LexMatcher::string("plus", "+", "code"),
        LexMatcher::string("minus", "-", "code"),
        LexMatcher::string("divide", "/", "code"),
        LexMatcher::string("percent", "%", "code"),
        LexMatcher::string("ampersand", "&", "code"),
        LexMatcher::string("vertical_bar", "|", "code"),
        LexMatcher::string("caret", "^", "code"),
        LexMatcher::string("tilde", "~", "code"),
        LexMatcher::string("star", "*", "code"),
        LexMatcher::string("colon", ":", "code"),
        LexMatcher::string("semicolon", ";", "code"),
        LexMatcher::string("start_bracket", "(", "code"),
        LexMatcher::string("end_bracket", ")", "code"),
        LexMatcher::string("start_square_bracket", "[", "code"),
        LexMatcher::string("end_square_bracket", "]", "code"),
        LexMatcher::string("start_curly_bracket", "{", "code"),
        LexMatcher::string("end_curly_bracket", "}", "code"),
        LexMatcher::regex("word", "[0-9a-zA-Z_]+", "code")?,
    ])
}

fn symbols() -> Vec<(&'static str, Grammar)> {
    vec![
        ("DelimiterSegment", Grammar::symbol(";", "statement_terminator")),
        ("CommaSegment", Grammar::symbol(",", "comma")),
        ("DotSegment", Grammar::symbol(".", "dot")),
        ("StarSegment", Grammar::symbol("*", "star")),
        ("ColonSegment", Grammar::symbol(":", "colon")),
        ("CastOperatorSegment", Grammar::symbol("::", "casting_operator")),
        ("StartBracketSegment", Grammar::symbol("(", "start_bracket")),
        ("EndBracketSegment", Grammar::symbol(")", "end_bracket")),
        ("StartSquareBracketSegment", Grammar::symbol("[", "start_square_bracket")),
        ("EndSquareBracketSegment", Grammar::symbol("]", "end_square_bracket")),
        ("StartCurlyBracketSegment", Grammar::symbol("{", "start_curly_bracket")),
        ("EndCurlyBracketSegment", Grammar::symbol("}", "end_curly_bracket")),
        ("PlusSegment", Grammar::symbol("+", "binary_operator")),
        ("MinusSegment", Grammar::symbol("-", "binary_operator")),
        ("MultiplySegment", Grammar::symbol("*", "binary_operator")),
        ("DivideSegment", Grammar::symbol("/", "binary_operator")),
        ("ModuloSegment", Grammar::symbol("%", "binary_operator")),
        ("ConcatSegment", Grammar::symbol("||", "binary_operator")),
        ("BitwiseAndSegment", Grammar::symbol("&", "binary_operator")),
        ("BitwiseOrSegment", Grammar::symbol("|", "binary_operator")),
        ("BitwiseXorSegment", Grammar::symbol("^", "binary_operator")),
        ("TildeSegment", Grammar::symbol("~", "unary_operator")),
        ("EqualsSegment", Grammar::symbol("=", "comparison_operator")),
        ("GreaterThanSegment", Grammar::symbol(">", "comparison_operator")),
        ("LessThanSegment", Grammar::symbol("<", "comparison_operator")),
        ("GreaterThanOrEqualToSegment", Grammar::symbol(">=", "comparison_operator")),
        ("LessThanOrEqualToSegment", Grammar::symbol("<=", "comparison_operator")),
        (
            "NotEqualToSegment",
            one_of(vec![
                Grammar::symbol("!=", "comparison_operator"),
                Grammar::symbol("<>", "comparison_operator"),
            ]),
        ),
    ]
}

fn terminals() -> DialectResult<Vec<(&'static str, Grammar)>> {
    Ok(vec![
        (
            "NakedIdentifierSegment",
            Terminal::pattern(
                Pattern::new("[A-Z_][A-Z0-9_]*")?.excluding_set("reserved_keywords"),
                "identifier",
            )
            .into(),
        ),
        ("QuotedIdentifierSegment", Grammar::token("double_quote", "identifier")),
        ("QuotedLiteralSegment", Grammar::token("single_quote", "quoted_literal")),
        ("NumericLiteralSegment", Grammar::token("numeric_literal", "numeric_literal")),
        ("BooleanLiteralGrammar", Grammar::pattern("TRUE|FALSE", "boolean_literal")?),
        ("NullLiteralSegment", Grammar::pattern("NULL", "null_literal")?),
        ("ParameterNameSegment", Grammar::pattern("[A-Z][A-Z0-9_]*", "parameter")?),
        (
            "FunctionNameIdentifierSegment",
            Terminal::pattern(
                Pattern::new("[A-Z_][A-Z0-9_]*")?.excluding_set("reserved_keywords"),
                "function_name_identifier",
            )
            .into(),
        ),
        (
            "DatatypeIdentifierSegment",
            Grammar::pattern("[A-Z][A-Z0-9_]*", "data_type_identifier")?,
        ),
        ("DatetimeUnitSegment", Grammar::set_member("datetime_units", "date_part")),
        ("BareFunctionSegment", Grammar::set_member("bare_functions", "bare_function")),
        ("AndOperatorGrammar", Grammar::pattern("AND", "binary_operator")?),
        ("OrOperatorGrammar", Grammar::pattern("OR", "binary_operator")?),
    ])
}

#[allow(clippy::too_many_lines)]
fn expression_grammars() -> Vec<(&'static str, Grammar)> {
    let not = || kw("NOT").optional();
    vec![
        (
            "SingleIdentifierGrammar",
            one_of(vec![r("NakedIdentifierSegment"), r("QuotedIdentifierSegment")]),
        ),
        (
            "ArithmeticBinaryOperatorGrammar",
            one_of(vec![
                r("PlusSegment"),
                r("MinusSegment"),
                r("DivideSegment"),
                r("MultiplySegment"),
                r("ModuloSegment"),
                r("BitwiseAndSegment"),
                r("BitwiseOrSegment"),
                r("BitwiseXorSegment"),
            ]),
        ),
        ("StringBinaryOperatorGrammar", one_of(vec![r("ConcatSegment")])),
        (
            "BooleanBinaryOperatorGrammar",
            one_of(vec![r("AndOperatorGrammar"), r("OrOperatorGrammar")]),
        ),
        (
            "ComparisonOperatorGrammar",
            one_of(vec![
                r("EqualsSegment"),
                r("GreaterThanSegment"),
                r("LessThanSegment"),
                r("GreaterThanOrEqualToSegment"),
                r("LessThanOrEqualToSegment"),
                r("NotEqualToSegment"),
            ]),
        ),
        (
            "BinaryOperatorGrammar",
            one_of(vec![
                r("ArithmeticBinaryOperatorGrammar"),
                r("StringBinaryOperatorGrammar"),
                r("BooleanBinaryOperatorGrammar"),
                r("ComparisonOperatorGrammar"),
            ]),
        ),
        (
            "UnaryOperatorGrammar",
            one_of(vec![r("PlusSegment"), r("MinusSegment"), r("TildeSegment"), kw("NOT")]),
        ),
        (
            "LikeGrammar",
            one_of(vec![kw("LIKE"), kw("ILIKE"), kw("RLIKE")]),
        ),
        (
            "IsClauseGrammar",
            one_of(vec![r("NullLiteralSegment"), r("BooleanLiteralGrammar"), kw("UNKNOWN")]),
        ),
        (
            "DateTimeLiteralGrammar",
            seq(vec![
                one_of(vec![kw("DATE"), kw("TIME"), kw("TIMESTAMP"), kw("INTERVAL")]),
                r("QuotedLiteralSegment"),
            ]),
        ),
        (
            "LiteralGrammar",
            one_of(vec![
                r("QuotedLiteralSegment"),
                r("NumericLiteralSegment"),
                r("BooleanLiteralGrammar"),
                r("NullLiteralSegment"),
                r("DateTimeLiteralGrammar"),
                r("ArrayLiteralSegment"),
                r("TypedArrayLiteralSegment"),
            ]),
        ),
        ("SimpleArrayTypeGrammar", kw("ARRAY")),
        (
            "BaseExpressionElementGrammar",
            one_of(vec![
                r("LiteralGrammar"),
                r("BareFunctionSegment"),
                r("IntervalExpressionSegment"),
                r("FunctionSegment"),
                r("ColumnReferenceSegment"),
                r("ExpressionSegment"),
            ]),
        ),
        (
            "Expression_A_Grammar",
            seq(vec![
                r("Expression_D_Grammar"),
                AnyNumberOf::new(vec![
                    seq(vec![r("BinaryOperatorGrammar"), r("Expression_D_Grammar")]),
                    seq(vec![
                        not(),
                        kw("IN"),
                        bracketed(one_of(vec![
                            r("SelectableGrammar"),
                            comma_list(r("ExpressionSegment")),
                        ])),
                    ]),
                    seq(vec![not(), kw("IN"), r("FunctionSegment")]),
                    seq(vec![kw("IS"), not(), r("IsClauseGrammar")]),
                    seq(vec![
                        not(),
                        kw("BETWEEN"),
                        r("Expression_D_Grammar"),
                        kw("AND"),
                        r("Expression_D_Grammar"),
                    ]),
                    seq(vec![
                        not(),
                        r("LikeGrammar"),
                        r("Expression_D_Grammar"),
                        seq(vec![kw("ESCAPE"), r("QuotedLiteralSegment")]).optional(),
                    ]),
                ])
                .into(),
            ]),
        ),
        (
            "Expression_D_Grammar",
            seq(vec![
                AnyNumberOf::new(vec![r("UnaryOperatorGrammar")]).into(),
                one_of(vec![
                    r("LiteralGrammar"),
                    r("BareFunctionSegment"),
                    r("IntervalExpressionSegment"),
                    r("FunctionSegment"),
                    r("ColumnReferenceSegment"),
                    r("CaseExpressionSegment"),
                    seq(vec![kw("EXISTS"), bracketed(r("SelectableGrammar"))]),
                    bracketed(one_of(vec![
                        r("ExpressionSegment"),
                        r("SelectableGrammar"),
                        comma_list(r("ExpressionSegment")),
                    ])),
                ]),
                AnyNumberOf::new(vec![
                    r("ArrayAccessorSegment"),
                    seq(vec![r("CastOperatorSegment"), r("DatatypeSegment")]),
                ])
                .into(),
            ]),
        ),
        (
            "FunctionContentsExpressionGrammar",
            r("ExpressionSegment"),
        ),
        (
            "FunctionContentsGrammar",
            AnyNumberOf::new(vec![
                r("ExpressionSegment"),
                // CAST(x AS type)
                seq(vec![r("ExpressionSegment"), kw("AS"), r("DatatypeSegment")]),
                // EXTRACT(unit FROM x), SUBSTRING(x FROM n)
                seq(vec![
                    one_of(vec![r("DatetimeUnitSegment"), r("ExpressionSegment")]),
                    kw("FROM"),
                    r("ExpressionSegment"),
                ]),
                seq(vec![
                    kw("DISTINCT").optional(),
                    one_of(vec![
                        r("StarSegment"),
                        comma_list(r("FunctionContentsExpressionGrammar")),
                    ]),
                ]),
                r("OrderByClauseSegment"),
                seq(vec![kw("SEPARATOR"), r("LiteralGrammar")]),
                seq(vec![one_of(vec![kw("IGNORE"), kw("RESPECT")]), kw("NULLS")]),
            ])
            .into(),
        ),
        (
            "PostFunctionGrammar",
            one_of(vec![r("OverClauseSegment"), r("FilterClauseGrammar")]),
        ),
        (
            "FilterClauseGrammar",
            seq(vec![
                kw("FILTER"),
                bracketed(seq(vec![kw("WHERE"), r("ExpressionSegment")])),
            ]),
        ),
        ("FrameClauseUnitGrammar", one_of(vec![kw("ROWS"), kw("RANGE")])),
        (
            "FrameBoundGrammar",
            one_of(vec![
                seq(vec![
                    kw("UNBOUNDED"),
                    one_of(vec![kw("PRECEDING"), kw("FOLLOWING")]),
                ]),
                seq(vec![kw("CURRENT"), kw("ROW")]),
                seq(vec![
                    r("NumericLiteralSegment"),
                    one_of(vec![kw("PRECEDING"), kw("FOLLOWING")]),
                ]),
            ]),
        ),
    ]
}

#[allow(clippy::too_many_lines)]
fn select_grammars() -> Vec<(&'static str, Grammar)> {
    let order_by = || seq(vec![kw("ORDER"), kw("BY")]);
    let group_by = || seq(vec![kw("GROUP"), kw("BY")]);
    vec![
        (
            "SelectableGrammar",
            one_of(vec![
                r("WithCompoundStatementSegment"),
                r("NonWithSelectableGrammar"),
            ]),
        ),
        (
            "NonWithSelectableGrammar",
            one_of(vec![r("SetExpressionSegment"), r("NonSetSelectableGrammar")]),
        ),
        (
            "NonSetSelectableGrammar",
            one_of(vec![
                r("ValuesClauseSegment"),
                Grammar::optionally_bracketed(r("SelectStatementSegment")),
            ]),
        ),
        (
            "SelectClauseElementListGrammar",
            comma_list(r("SelectClauseElementSegment")),
        ),
        (
            "SelectClauseTerminatorGrammar",
            one_of(vec![
                kw("FROM"),
                kw("WHERE"),
                order_by(),
                kw("LIMIT"),
                r("SetOperatorSegment"),
            ]),
        ),
        (
            "FromClauseTerminatorGrammar",
            one_of(vec![
                kw("WHERE"),
                kw("LIMIT"),
                group_by(),
                order_by(),
                kw("HAVING"),
                kw("QUALIFY"),
                kw("WINDOW"),
                r("SetOperatorSegment"),
            ]),
        ),
        (
            "WhereClauseTerminatorGrammar",
            one_of(vec![
                kw("LIMIT"),
                group_by(),
                order_by(),
                kw("HAVING"),
                kw("QUALIFY"),
                kw("WINDOW"),
                r("SetOperatorSegment"),
            ]),
        ),
        (
            "GroupByClauseTerminatorGrammar",
            one_of(vec![
                order_by(),
                kw("LIMIT"),
                kw("HAVING"),
                kw("QUALIFY"),
                kw("WINDOW"),
                r("SetOperatorSegment"),
            ]),
        ),
        (
            "HavingClauseTerminatorGrammar",
            one_of(vec![
                order_by(),
                kw("LIMIT"),
                kw("QUALIFY"),
                kw("WINDOW"),
                r("SetOperatorSegment"),
            ]),
        ),
        (
            "OrderByClauseTerminatorGrammar",
            one_of(vec![
                kw("LIMIT"),
                kw("HAVING"),
                kw("QUALIFY"),
                kw("WINDOW"),
                r("FrameClauseUnitGrammar"),
                kw("SEPARATOR"),
            ]),
        ),
        (
            "JoinTypeKeywordsGrammar",
            one_of(vec![
                kw("CROSS"),
                kw("INNER"),
                seq(vec![
                    one_of(vec![kw("FULL"), kw("LEFT"), kw("RIGHT")]),
                    kw("OUTER").optional(),
                ]),
            ]),
        ),
        ("PostTableExpressionGrammar", Grammar::Nothing),
        (
            "BracketedColumnReferenceListGrammar",
            bracketed(comma_list(r("ColumnReferenceSegment"))),
        ),
        ("OrReplaceGrammar", seq(vec![kw("OR"), kw("REPLACE")])),
        ("TemporaryGrammar", one_of(vec![kw("TEMP"), kw("TEMPORARY")])),
        (
            "TemporaryTransientGrammar",
            one_of(vec![kw("TRANSIENT"), r("TemporaryGrammar")]),
        ),
        ("IfExistsGrammar", seq(vec![kw("IF"), kw("EXISTS")])),
        ("IfNotExistsGrammar", seq(vec![kw("IF"), kw("NOT"), kw("EXISTS")])),
        ("PrimaryKeyGrammar", seq(vec![kw("PRIMARY"), kw("KEY")])),
        ("ForeignKeyGrammar", seq(vec![kw("FOREIGN"), kw("KEY")])),
        (
            "ReferenceDefinitionGrammar",
            seq(vec![
                kw("REFERENCES"),
                r("TableReferenceSegment"),
                r("BracketedColumnReferenceListGrammar").optional(),
            ]),
        ),
        (
            "FunctionParameterGrammar",
            one_of(vec![
                seq(vec![r("ParameterNameSegment"), r("DatatypeSegment")]),
                r("DatatypeSegment"),
            ]),
        ),
        (
            "FunctionParameterListGrammar",
            bracketed(comma_list(r("FunctionParameterGrammar")).optional()),
        ),
        (
            "FunctionDefinitionGrammar",
            seq(vec![
                kw("AS"),
                r("QuotedLiteralSegment"),
                seq(vec![kw("LANGUAGE"), r("ParameterNameSegment")]).optional(),
            ]),
        ),
    ]
}

fn reference_segments() -> Vec<SegmentDef> {
    let object = SegmentDef::new(
        "ObjectReferenceSegment",
        "object_reference",
        Delimited::new(
            vec![r("SingleIdentifierGrammar")],
            one_of(vec![
                r("DotSegment"),
                seq(vec![r("DotSegment"), r("DotSegment")]),
            ]),
        )
        .into(),
    )
    .with_references(ReferenceStyle::Object);
    vec![
        object.renamed("TableReferenceSegment", "table_reference"),
        object.renamed("ColumnReferenceSegment", "column_reference"),
        object,
        SegmentDef::new(
            "AliasExpressionSegment",
            "alias_expression",
            seq(vec![kw("AS").optional(), r("SingleIdentifierGrammar")]),
        ),
        SegmentDef::new(
            "WildcardIdentifierSegment",
            "wildcard_identifier",
            seq(vec![
                AnyNumberOf::new(vec![seq(vec![
                    r("SingleIdentifierGrammar"),
                    r("DotSegment"),
                ])])
                .into(),
                r("StarSegment"),
            ]),
        ),
        SegmentDef::new(
            "WildcardExpressionSegment",
            "wildcard_expression",
            seq(vec![r("WildcardIdentifierSegment")]),
        ),
    ]
}

#[allow(clippy::too_many_lines)]
fn expression_segments() -> Vec<SegmentDef> {
    vec![
        SegmentDef::new("ExpressionSegment", "expression", r("Expression_A_Grammar")),
        SegmentDef::new(
            "FunctionNameSegment",
            "function_name",
            seq(vec![
                AnyNumberOf::new(vec![seq(vec![
                    r("SingleIdentifierGrammar"),
                    r("DotSegment"),
                ])])
                .into(),
                one_of(vec![
                    r("FunctionNameIdentifierSegment"),
                    r("QuotedIdentifierSegment"),
                ]),
            ]),
        ),
        SegmentDef::new(
            "FunctionSegment",
            "function",
            seq(vec![
                seq(vec![
                    r("FunctionNameSegment"),
                    bracketed(r("FunctionContentsGrammar").optional()),
                ]),
                r("PostFunctionGrammar").optional(),
            ]),
        ),
        SegmentDef::new(
            "OverClauseSegment",
            "over_clause",
            seq(vec![
                kw("OVER"),
                one_of(vec![
                    r("SingleIdentifierGrammar"),
                    bracketed(r("WindowSpecificationSegment").optional()),
                ]),
            ]),
        ),
        SegmentDef::new(
            "WindowSpecificationSegment",
            "window_specification",
            seq(vec![
                r("PartitionClauseSegment").optional(),
                r("OrderByClauseSegment").optional(),
                r("FrameClauseSegment").optional(),
            ]),
        ),
        SegmentDef::new(
            "PartitionClauseSegment",
            "partitionby_clause",
            seq(vec![
                kw("PARTITION"),
                kw("BY"),
                Grammar::Indent,
                comma_list(r("ExpressionSegment")),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "FrameClauseSegment",
            "frame_clause",
            seq(vec![
                r("FrameClauseUnitGrammar"),
                one_of(vec![
                    seq(vec![
                        kw("BETWEEN"),
                        r("FrameBoundGrammar"),
                        kw("AND"),
                        r("FrameBoundGrammar"),
                    ]),
                    r("FrameBoundGrammar"),
                ]),
            ]),
        ),
        SegmentDef::new(
            "CaseExpressionSegment",
            "case_expression",
            seq(vec![
                kw("CASE"),
                Grammar::Indent,
                r("ExpressionSegment").optional(),
                AnyNumberOf::new(vec![r("WhenClauseSegment")]).min_times(1).into(),
                r("ElseClauseSegment").optional(),
                Grammar::Dedent,
                kw("END"),
            ]),
        ),
        SegmentDef::new(
            "WhenClauseSegment",
            "when_clause",
            seq(vec![
                kw("WHEN"),
                Grammar::Indent,
                r("ExpressionSegment"),
                kw("THEN"),
                r("ExpressionSegment"),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "ElseClauseSegment",
            "else_clause",
            seq(vec![kw("ELSE"), r("ExpressionSegment")]),
        ),
        SegmentDef::new(
            "IntervalExpressionSegment",
            "interval_expression",
            seq(vec![
                kw("INTERVAL"),
                one_of(vec![
                    seq(vec![
                        r("NumericLiteralSegment"),
                        one_of(vec![r("QuotedLiteralSegment"), r("DatetimeUnitSegment")]),
                    ]),
                    r("QuotedLiteralSegment"),
                ]),
            ]),
        ),
        SegmentDef::new(
            "ArrayLiteralSegment",
            "array_literal",
            Bracketed::new(comma_list(r("ExpressionSegment")).optional())
                .bracket_type("square")
                .into(),
        ),
        SegmentDef::new(
            "TypedArrayLiteralSegment",
            "typed_array_literal",
            seq(vec![r("SimpleArrayTypeGrammar"), r("ArrayLiteralSegment")]),
        ),
        SegmentDef::new(
            "ArrayAccessorSegment",
            "array_accessor",
            Bracketed::new(
                Delimited::new(
                    vec![r("NumericLiteralSegment"), r("ExpressionSegment")],
                    r("ColonSegment"),
                )
                .into(),
            )
            .bracket_type("square")
            .into(),
        ),
        SegmentDef::new(
            "DatatypeSegment",
            "data_type",
            one_of(vec![
                seq(vec![
                    one_of(vec![kw("TIME"), kw("TIMESTAMP")]),
                    bracketed(r("NumericLiteralSegment")).optional(),
                    seq(vec![
                        one_of(vec![kw("WITH"), kw("WITHOUT")]),
                        kw("TIME"),
                        kw("ZONE"),
                    ])
                    .optional(),
                ]),
                seq(vec![kw("DOUBLE"), kw("PRECISION")]),
                seq(vec![
                    r("DatatypeIdentifierSegment"),
                    bracketed(comma_list(r("NumericLiteralSegment"))).optional(),
                ]),
            ]),
        ),
    ]
}

#[allow(clippy::too_many_lines)]
fn select_segments() -> Vec<SegmentDef> {
    let order_by = || seq(vec![kw("ORDER"), kw("BY")]);
    let group_by = || seq(vec![kw("GROUP"), kw("BY")]);
    vec![
        clause(
            "SelectStatementSegment",
            "select_statement",
            kw("SELECT"),
            r("SetOperatorSegment"),
            seq(vec![
                r("SelectClauseSegment"),
                r("FromClauseSegment").optional(),
                r("WhereClauseSegment").optional(),
                r("GroupByClauseSegment").optional(),
                r("HavingClauseSegment").optional(),
                r("OrderByClauseSegment").optional(),
                r("LimitClauseSegment").optional(),
            ]),
        ),
        clause(
            "SelectClauseSegment",
            "select_clause",
            kw("SELECT"),
            r("SelectClauseTerminatorGrammar"),
            seq(vec![
                kw("SELECT"),
                r("SelectClauseModifierSegment").optional(),
                Grammar::Indent,
                r("SelectClauseElementListGrammar"),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "SelectClauseModifierSegment",
            "select_clause_modifier",
            one_of(vec![kw("DISTINCT"), kw("ALL")]),
        ),
        SegmentDef::new(
            "SelectClauseElementSegment",
            "select_clause_element",
            one_of(vec![
                r("WildcardExpressionSegment"),
                seq(vec![
                    r("BaseExpressionElementGrammar"),
                    r("AliasExpressionSegment").optional(),
                ]),
            ]),
        ),
        clause(
            "WhereClauseSegment",
            "where_clause",
            kw("WHERE"),
            r("WhereClauseTerminatorGrammar"),
            seq(vec![
                kw("WHERE"),
                Grammar::Indent,
                Grammar::optionally_bracketed(r("ExpressionSegment")),
                Grammar::Dedent,
            ]),
        ),
        clause(
            "GroupByClauseSegment",
            "groupby_clause",
            group_by(),
            r("GroupByClauseTerminatorGrammar"),
            seq(vec![
                kw("GROUP"),
                kw("BY"),
                Grammar::Indent,
                comma_list(one_of(vec![
                    r("ColumnReferenceSegment"),
                    r("NumericLiteralSegment"),
                    r("ExpressionSegment"),
                ])),
                Grammar::Dedent,
            ]),
        ),
        clause(
            "HavingClauseSegment",
            "having_clause",
            kw("HAVING"),
            r("HavingClauseTerminatorGrammar"),
            seq(vec![
                kw("HAVING"),
                Grammar::Indent,
                Grammar::optionally_bracketed(r("ExpressionSegment")),
                Grammar::Dedent,
            ]),
        ),
        clause(
            "OrderByClauseSegment",
            "orderby_clause",
            order_by(),
            r("OrderByClauseTerminatorGrammar"),
            seq(vec![
                kw("ORDER"),
                kw("BY"),
                Grammar::Indent,
                comma_list(seq(vec![
                    one_of(vec![
                        r("ColumnReferenceSegment"),
                        r("NumericLiteralSegment"),
                        r("ExpressionSegment"),
                    ]),
                    one_of(vec![kw("ASC"), kw("DESC")]).optional(),
                    seq(vec![kw("NULLS"), one_of(vec![kw("FIRST"), kw("LAST")])]).optional(),
                ])),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "LimitClauseSegment",
            "limit_clause",
            seq(vec![
                kw("LIMIT"),
                Grammar::Indent,
                one_of(vec![
                    r("NumericLiteralSegment"),
                    seq(vec![
                        r("NumericLiteralSegment"),
                        kw("OFFSET"),
                        r("NumericLiteralSegment"),
                    ]),
                    seq(vec![
                        r("NumericLiteralSegment"),
                        r("CommaSegment"),
                        r("NumericLiteralSegment"),
                    ]),
                ]),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "SetOperatorSegment",
            "set_operator",
            one_of(vec![
                seq(vec![
                    kw("UNION"),
                    one_of(vec![kw("DISTINCT"), kw("ALL")]).optional(),
                ]),
                kw("INTERSECT"),
                kw("EXCEPT"),
                kw("MINUS"),
            ]),
        ),
        SegmentDef::new(
            "SetExpressionSegment",
            "set_expression",
            seq(vec![
                r("NonSetSelectableGrammar"),
                AnyNumberOf::new(vec![seq(vec![
                    r("SetOperatorSegment"),
                    r("NonSetSelectableGrammar"),
                ])])
                .min_times(1)
                .into(),
                r("OrderByClauseSegment").optional(),
                r("LimitClauseSegment").optional(),
            ]),
        ),
        SegmentDef::new(
            "WithCompoundStatementSegment",
            "with_compound_statement",
            seq(vec![
                kw("WITH"),
                kw("RECURSIVE").optional(),
                Grammar::Indent,
                comma_list(r("CTEDefinitionSegment")),
                Grammar::Dedent,
                r("NonWithSelectableGrammar"),
            ]),
        ),
        SegmentDef::new(
            "CTEDefinitionSegment",
            "common_table_expression",
            seq(vec![
                r("SingleIdentifierGrammar"),
                r("BracketedColumnReferenceListGrammar").optional(),
                kw("AS"),
                bracketed(r("SelectableGrammar")),
            ]),
        ),
        SegmentDef::new(
            "ValuesClauseSegment",
            "values_clause",
            seq(vec![
                one_of(vec![kw("VALUE"), kw("VALUES")]),
                comma_list(bracketed(comma_list(one_of(vec![
                    kw("DEFAULT"),
                    r("ExpressionSegment"),
                ])))),
            ]),
        ),
    ]
}

fn from_segments() -> Vec<SegmentDef> {
    vec![
        clause(
            "FromClauseSegment",
            "from_clause",
            kw("FROM"),
            r("FromClauseTerminatorGrammar"),
            seq(vec![
                kw("FROM"),
                Grammar::Indent,
                comma_list(r("FromExpressionSegment")),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "FromExpressionSegment",
            "from_expression",
            seq(vec![
                r("FromExpressionElementSegment"),
                AnyNumberOf::new(vec![r("JoinClauseSegment")]).into(),
            ]),
        ),
        SegmentDef::new(
            "FromExpressionElementSegment",
            "from_expression_element",
            seq(vec![
                Grammar::optionally_bracketed(r("TableExpressionSegment")),
                r("AliasExpressionSegment").optional(),
                r("PostTableExpressionGrammar").optional(),
            ]),
        ),
        SegmentDef::new(
            "TableExpressionSegment",
            "table_expression",
            one_of(vec![
                r("ValuesClauseSegment"),
                r("BareFunctionSegment"),
                r("FunctionSegment"),
                r("TableReferenceSegment"),
                bracketed(r("SelectableGrammar")),
            ]),
        ),
        SegmentDef::new(
            "JoinClauseSegment",
            "join_clause",
            seq(vec![
                r("JoinTypeKeywordsGrammar").optional(),
                kw("JOIN"),
                Grammar::Indent,
                r("FromExpressionElementSegment"),
                r("JoinOnConditionSegment").optional(),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "JoinOnConditionSegment",
            "join_on_condition",
            one_of(vec![
                seq(vec![
                    kw("ON"),
                    Grammar::Indent,
                    Grammar::optionally_bracketed(r("ExpressionSegment")),
                    Grammar::Dedent,
                ]),
                seq(vec![
                    kw("USING"),
                    bracketed(comma_list(r("SingleIdentifierGrammar"))),
                ]),
            ]),
        ),
    ]
}

fn statement_segments() -> Vec<SegmentDef> {
    let statement = |name, seg_type, keyword, parse| {
        SegmentDef::new(name, seg_type, StartsWith::new(kw(keyword)).into())
            .with_parse_grammar(parse)
    };
    vec![
        SegmentDef::new("FileSegment", "file", Grammar::Anything).with_parse_grammar(
            Delimited::new(
                vec![r("StatementSegment")],
                AnyNumberOf::new(vec![r("DelimiterSegment")]).min_times(1).into(),
            )
            .allow_trailing()
            .into(),
        ),
        SegmentDef::new("StatementSegment", "statement", Grammar::Anything).with_parse_grammar(
            one_of(vec![
                r("SelectableGrammar"),
                r("InsertStatementSegment"),
                r("DeleteStatementSegment"),
                r("UpdateStatementSegment"),
                r("CreateTableStatementSegment"),
                r("DropStatementSegment"),
                r("CreateFunctionStatementSegment"),
            ]),
        ),
        statement(
            "InsertStatementSegment",
            "insert_statement",
            "INSERT",
            seq(vec![
                kw("INSERT"),
                kw("OVERWRITE").optional(),
                kw("INTO"),
                r("TableReferenceSegment"),
                r("BracketedColumnReferenceListGrammar").optional(),
                r("SelectableGrammar"),
            ]),
        ),
        statement(
            "DeleteStatementSegment",
            "delete_statement",
            "DELETE",
            seq(vec![
                kw("DELETE"),
                r("FromClauseSegment"),
                r("WhereClauseSegment").optional(),
            ]),
        ),
        statement(
            "UpdateStatementSegment",
            "update_statement",
            "UPDATE",
            seq(vec![
                kw("UPDATE"),
                Grammar::Indent,
                r("TableReferenceSegment"),
                r("AliasExpressionSegment").optional(),
                r("SetClauseListSegment"),
                r("FromClauseSegment").optional(),
                r("WhereClauseSegment").optional(),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "SetClauseListSegment",
            "set_clause_list",
            seq(vec![
                kw("SET"),
                Grammar::Indent,
                comma_list(r("SetClauseSegment")),
                Grammar::Dedent,
            ]),
        ),
        SegmentDef::new(
            "SetClauseSegment",
            "set_clause",
            seq(vec![
                r("ColumnReferenceSegment"),
                r("EqualsSegment"),
                one_of(vec![r("ExpressionSegment"), kw("DEFAULT")]),
            ]),
        ),
    ]
}

#[allow(clippy::too_many_lines)]
fn ddl_segments() -> Vec<SegmentDef> {
    vec![
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
                one_of(vec![
                    seq(vec![
                        bracketed(comma_list(one_of(vec![
                            r("TableConstraintSegment"),
                            r("ColumnDefinitionSegment"),
                        ]))),
                        r("CommentClauseSegment").optional(),
                    ]),
                    seq(vec![
                        kw("AS"),
                        Grammar::optionally_bracketed(r("SelectableGrammar")),
                    ]),
                    seq(vec![kw("LIKE"), r("TableReferenceSegment")]),
                ]),
            ]),
        ),
        SegmentDef::new(
            "ColumnDefinitionSegment",
            "column_definition",
            seq(vec![
                r("SingleIdentifierGrammar"),
                r("DatatypeSegment"),
                AnyNumberOf::new(vec![r("ColumnConstraintSegment")]).into(),
            ]),
        ),
        SegmentDef::new(
            "ColumnConstraintSegment",
            "column_constraint",
            seq(vec![
                seq(vec![kw("CONSTRAINT"), r("ObjectReferenceSegment")]).optional(),
                one_of(vec![
                    seq(vec![kw("NOT").optional(), kw("NULL")]),
                    seq(vec![
                        kw("DEFAULT"),
                        one_of(vec![
                            r("LiteralGrammar"),
                            r("FunctionSegment"),
                            r("BareFunctionSegment"),
                        ]),
                    ]),
                    r("PrimaryKeyGrammar"),
                    kw("UNIQUE"),
                    r("ReferenceDefinitionGrammar"),
                    r("CommentClauseSegment"),
                ]),
            ]),
        ),
        SegmentDef::new(
            "TableConstraintSegment",
            "table_constraint",
            seq(vec![
                seq(vec![kw("CONSTRAINT"), r("ObjectReferenceSegment")]).optional(),
                one_of(vec![
                    seq(vec![kw("UNIQUE"), r("BracketedColumnReferenceListGrammar")]),
                    seq(vec![
                        r("PrimaryKeyGrammar"),
                        r("BracketedColumnReferenceListGrammar"),
                    ]),
                    seq(vec![
                        r("ForeignKeyGrammar"),
                        r("BracketedColumnReferenceListGrammar"),
                        r("ReferenceDefinitionGrammar"),
                    ]),
                ]),
            ]),
        ),
        SegmentDef::new(
            "CommentClauseSegment",
            "comment_clause",
            seq(vec![kw("COMMENT"), r("QuotedLiteralSegment")]),
        ),
        SegmentDef::new(
            "DropStatementSegment",
            "drop_statement",
            seq(vec![
                kw("DROP"),
                one_of(vec![kw("TABLE"), kw("VIEW")]),
                r("IfExistsGrammar").optional(),
                r("TableReferenceSegment"),
                one_of(vec![kw("RESTRICT"), kw("CASCADE")]).optional(),
            ]),
        ),
        SegmentDef::new(
            "CreateFunctionStatementSegment",
            "create_function_statement",
            seq(vec![
                kw("CREATE"),
                r("OrReplaceGrammar").optional(),
                r("TemporaryGrammar").optional(),
                kw("FUNCTION"),
                r("IfNotExistsGrammar").optional(),
                r("FunctionNameSegment"),
                r("FunctionParameterListGrammar"),
                seq(vec![kw("RETURNS"), r("DatatypeSegment")]).optional(),
                r("FunctionDefinitionGrammar"),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(dialect: &Dialect, sql: &str) -> Vec<(String, &'static str)> {
        dialect
            .lexer()
            .tokenize(sql)
            .iter()
            .filter(|s| s.is_code())
            .filter_map(|s| match s {
                oxide_lint_parser::Segment::Raw(raw) => Some((raw.raw().to_string(), raw.matcher())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_dialect_builds() {
        let d = dialect().unwrap();
        assert_eq!(d.name(), NAME);
        assert_eq!(d.parent(), None);
        assert_eq!(d.root(), "FileSegment");
        assert!(d.set_contains("reserved_keywords", "SELECT"));
        assert!(d.set_contains("unreserved_keywords", "FOR"));
        assert!(d.set("value_table_functions").is_some_and(|s| s.is_empty()));
    }

    #[test]
    fn test_multi_character_operators_lex_as_one() {
        let d = dialect().unwrap();
        let tokens = lex(&d, "a>=1 AND b<>2 OR c||d != e::INT");
        let matchers: Vec<_> = tokens.iter().map(|(_, m)| *m).collect();
        assert!(matchers.contains(&"greater_than_or_equal"));
        assert!(matchers.contains(&"not_equal"));
        assert!(matchers.contains(&"concat_operator"));
        assert!(matchers.contains(&"casting_operator"));
        assert!(!matchers.contains(&"equals"));
    }

    #[test]
    fn test_comments_and_quotes() {
        let d = dialect().unwrap();
        let tokens = d.lexer().tokenize("SELECT 'it''s' /* note */ -- end\n# hash\n\"col\"");
        let comments = tokens.iter().filter(|s| s.is_type("comment")).count();
        assert_eq!(comments, 3);
        let code = lex(&d, "SELECT 'it''s', \"col\", `x`");
        assert_eq!(code[1], ("'it''s'".to_string(), "single_quote"));
        assert_eq!(code[3], ("\"col\"".to_string(), "double_quote"));
        assert_eq!(code[5], ("`x`".to_string(), "back_quote"));
    }

    #[test]
    fn test_numbers_do_not_swallow_words() {
        let d = dialect().unwrap();
        let tokens = lex(&d, "1.5 .5 1e10 t1 1abc");
        let matchers: Vec<_> = tokens.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            matchers,
            vec!["numeric_literal", "numeric_literal", "numeric_literal", "word", "word"]
        );
    }
}

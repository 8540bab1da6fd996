//! Short constructors for writing grammars as data.

use oxide_lint_parser::{
    Delimited, DialectBuilder, DialectResult, Grammar, SegmentDef, StartsWith,
};

pub const fn r(name: &'static str) -> Grammar {
    Grammar::reference(name)
}

pub const fn kw(word: &'static str) -> Grammar {
    Grammar::keyword(word)
}

pub const fn seq(children: Vec<Grammar>) -> Grammar {
    Grammar::Sequence(children)
}

pub const fn one_of(alternatives: Vec<Grammar>) -> Grammar {
    Grammar::OneOf(alternatives)
}

pub fn bracketed(inner: Grammar) -> Grammar {
    Grammar::bracketed(inner)
}

/// `element` repeated with commas in between.
pub fn comma_list(element: Grammar) -> Grammar {
    Delimited::new(vec![element], r("CommaSegment")).into()
}

/// A clause matched from `anchor` up to whatever `terminator` names, with
/// its content parsed later by `parse`.
pub fn clause(
    name: &'static str,
    seg_type: &'static str,
    anchor: Grammar,
    terminator: Grammar,
    parse: Grammar,
) -> SegmentDef {
    SegmentDef::new(
        name,
        seg_type,
        StartsWith::new(anchor)
            .terminator(terminator)
            .enforce_whitespace_preceding_terminator()
            .into(),
    )
    .with_parse_grammar(parse)
}

pub fn register_grammars(
    builder: &mut DialectBuilder,
    grammars: Vec<(&'static str, Grammar)>,
) -> DialectResult<()> {
    for (name, grammar) in grammars {
        builder.register(name, grammar)?;
    }
    Ok(())
}

pub fn register_segments(builder: &mut DialectBuilder, defs: Vec<SegmentDef>) -> DialectResult<()> {
    for def in defs {
        builder.register_segment(def)?;
    }
    Ok(())
}

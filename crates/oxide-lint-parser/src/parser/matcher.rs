//! The match phase: evaluating grammars against slices of segments.
//!
//! Every matcher receives a slice whose first element is code (or an empty
//! slice) and consumes a prefix of it. Non-code between matched elements is
//! carried into the output; non-code after the last element is left for
//! the caller. The output of a match always covers exactly the consumed
//! input, so concatenating raw text stays lossless.

use super::ParseContext;
use crate::dialect::{BracketPair, LibraryEntry};
use crate::grammar::{AnyNumberOf, Bracketed, Delimited, Grammar, StartsWith, DEFAULT_BRACKET_SET};
use crate::segment::{MetaKind, MetaSegment, NodeSegment, Segment, BRACKETED};

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Number of input segments consumed.
    pub len: usize,
    /// Output segments covering exactly the consumed input.
    pub segments: Vec<Segment>,
}

impl MatchResult {
    const fn empty() -> Self {
        Self {
            len: 0,
            segments: Vec::new(),
        }
    }

    /// Returns true if nothing was consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Matches `grammar` against a prefix of `segments`.
///
/// Returns `None` if the grammar does not match, or if evaluation would
/// exceed the context's recursion bound.
pub fn match_grammar<'a>(
    grammar: &'a Grammar,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    if !ctx.enter() {
        return None;
    }
    let result = match_node(grammar, segments, ctx);
    ctx.leave();
    result
}

fn match_node<'a>(
    grammar: &'a Grammar,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    match grammar {
        Grammar::Terminal(terminal) => match segments.first()? {
            Segment::Raw(raw) if terminal.matches(raw, ctx.dialect()) => Some(MatchResult {
                len: 1,
                segments: vec![terminal.produce(raw)],
            }),
            _ => None,
        },
        Grammar::Sequence(children) => match_sequence(children, segments, ctx),
        Grammar::OneOf(alternatives) => longest(alternatives, segments, ctx),
        Grammar::Optional(inner) => {
            Some(match_grammar(inner, segments, ctx).unwrap_or_else(MatchResult::empty))
        }
        Grammar::AnyNumberOf(any) => match_any_number_of(any, segments, ctx),
        Grammar::Delimited(delimited) => match_delimited(delimited, segments, ctx),
        Grammar::Bracketed(bracketed) => match_bracketed(bracketed, segments, ctx),
        Grammar::StartsWith(starts) => match_starts_with(starts, segments, ctx),
        Grammar::Ref(name) => match_ref(name, segments, ctx),
        Grammar::Anything => {
            let terminators = ctx.terminators().to_vec();
            let end = match scan(segments, 0, &terminators, false, ctx) {
                Some((at, _)) => trim_end(segments, 0, at),
                None => trim_end(segments, 0, segments.len()),
            };
            Some(MatchResult {
                len: end,
                segments: segments[..end].to_vec(),
            })
        }
        Grammar::Nothing => None,
        Grammar::Indent => Some(meta(MetaKind::Indent, offset_after(segments, 0))),
        Grammar::Dedent => Some(meta(MetaKind::Dedent, offset_after(segments, 0))),
    }
}

/// Resolves `name` and matches it. Results are remembered per input slice
/// and active terminators, so alternatives that reach the same position
/// through the same name share one evaluation.
fn match_ref<'a>(
    name: &str,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let dialect = ctx.dialect();
    let Some(entry) = dialect.lookup(name) else {
        tracing::warn!(dialect = dialect.name(), name, "unresolved grammar reference");
        return None;
    };
    let key = ctx.memo_key(entry, segments);
    if let Some(remembered) = ctx.recall(&key) {
        return remembered;
    }
    let hits = ctx.limit_hits();
    let result = match entry {
        LibraryEntry::Grammar(grammar) => match_grammar(grammar, segments, ctx),
        LibraryEntry::Segment(def) => match_grammar(def.match_grammar(), segments, ctx)
            .filter(|m| !m.is_empty())
            .map(|m| {
                let node = if def.parse_grammar().is_some() {
                    NodeSegment::unexpanded(def.seg_type(), def.name(), segments[..m.len].to_vec())
                } else {
                    NodeSegment::new(def.seg_type(), def.name(), m.segments)
                };
                MatchResult {
                    len: m.len,
                    segments: vec![node.into()],
                }
            }),
    };
    if ctx.limit_hits() == hits {
        ctx.remember(key, result.clone());
    }
    result
}

fn match_sequence<'a>(
    children: &'a [Grammar],
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let mut pos = 0;
    let mut out = Vec::new();
    for child in children {
        match child {
            Grammar::Indent => {
                out.push(meta_segment(MetaKind::Indent, offset_after(segments, pos)));
                continue;
            }
            Grammar::Dedent => {
                out.push(meta_segment(MetaKind::Dedent, offset_after(segments, pos)));
                continue;
            }
            _ => {}
        }
        let start = next_code(segments, pos);
        let m = match_grammar(child, &segments[start..], ctx)?;
        if !m.is_empty() {
            out.extend_from_slice(&segments[pos..start]);
            pos = start + m.len;
        }
        out.extend(m.segments);
    }
    Some(MatchResult {
        len: pos,
        segments: out,
    })
}

/// Evaluates every alternative and keeps the one consuming the most
/// segments. The first declared alternative wins a tie.
fn longest<'a>(
    alternatives: &'a [Grammar],
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let mut best: Option<MatchResult> = None;
    for alternative in alternatives {
        let Some(m) = match_grammar(alternative, segments, ctx) else {
            continue;
        };
        let better = match &best {
            Some(current) => m.len > current.len,
            None => true,
        };
        if better {
            tracing::trace!(
                alternative = alternative.variant_name(),
                len = m.len,
                "new longest alternative"
            );
            best = Some(m);
        }
    }
    best
}

fn match_any_number_of<'a>(
    any: &'a AnyNumberOf,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let mut pos = 0;
    let mut count = 0;
    let mut out = Vec::new();
    while !matches!(any.max_times, Some(max) if count >= max) {
        let start = next_code(segments, pos);
        if start >= segments.len() {
            break;
        }
        match longest(&any.elements, &segments[start..], ctx) {
            Some(m) if !m.is_empty() => {
                out.extend_from_slice(&segments[pos..start]);
                out.extend(m.segments);
                pos = start + m.len;
                count += 1;
            }
            _ => break,
        }
    }
    (count >= any.min_times).then_some(MatchResult {
        len: pos,
        segments: out,
    })
}

fn match_delimited<'a>(
    delimited: &'a Delimited,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let stops: Vec<&'a Grammar> = std::iter::once(delimited.delimiter.as_ref())
        .chain(delimited.terminator.as_deref())
        .collect();
    let mut pos = 0;
    let mut out = Vec::new();
    let mut elements = 0;
    let mut delimiters = 0;
    // A delimiter already matched but not yet followed by an element:
    // its end position and output, including the gap before it.
    let mut pending: Option<(usize, Vec<Segment>)> = None;

    loop {
        let from = pending.as_ref().map_or(pos, |(end, _)| *end);
        let start = next_code(segments, from);
        if start >= segments.len() {
            break;
        }
        if let Some(terminator) = delimited.terminator.as_deref() {
            if terminates(terminator, &segments[start..], ctx) {
                break;
            }
        }
        let element = ctx.with_terminators(stops.iter().copied(), |ctx| {
            longest(&delimited.elements, &segments[start..], ctx)
        });
        let Some(element) = element.filter(|m| !m.is_empty()) else {
            break;
        };
        if let Some((_, delimiter)) = pending.take() {
            out.extend(delimiter);
            delimiters += 1;
        }
        out.extend_from_slice(&segments[from..start]);
        out.extend(element.segments);
        pos = start + element.len;
        elements += 1;

        let delimiter_start = next_code(segments, pos);
        if delimiter_start >= segments.len() {
            break;
        }
        let delimiter = ctx.without_terminators(|ctx| {
            match_grammar(&delimited.delimiter, &segments[delimiter_start..], ctx)
        });
        match delimiter {
            Some(m) if !m.is_empty() => {
                let mut output = segments[pos..delimiter_start].to_vec();
                output.extend(m.segments);
                pending = Some((delimiter_start + m.len, output));
            }
            _ => break,
        }
    }

    if let Some((end, delimiter)) = pending {
        if delimited.allow_trailing {
            out.extend(delimiter);
            pos = end;
            delimiters += 1;
        }
    }
    (elements > 0 && delimiters >= delimited.min_delimiters).then_some(MatchResult {
        len: pos,
        segments: out,
    })
}

fn match_bracketed<'a>(
    bracketed: &'a Bracketed,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let pairs = ctx.dialect().bracket_pairs(bracketed.bracket_pairs_set);
    let pair = pairs
        .iter()
        .find(|pair| pair.bracket_type == bracketed.bracket_type)?;
    let open = match_single(pair.open, segments, ctx)?;
    let (close_idx, close) = find_close(pairs, pair, segments, open.len, ctx)?;

    let interior = &segments[open.len..close_idx];
    let start = next_code(interior, 0);
    let end = interior
        .iter()
        .rposition(Segment::is_code)
        .map_or(start, |idx| idx + 1);
    let inner = ctx.without_terminators(|ctx| {
        match_grammar(&bracketed.inner, &interior[start..end], ctx)
    })?;
    if start + inner.len != end {
        return None;
    }

    let mut children = open.segments;
    children.push(meta_segment(
        MetaKind::Indent,
        offset_after(segments, open.len),
    ));
    children.extend_from_slice(&interior[..start]);
    children.extend(inner.segments);
    children.extend_from_slice(&interior[end..]);
    children.push(meta_segment(
        MetaKind::Dedent,
        segments[close_idx].span().start,
    ));
    children.extend(close.segments);
    Some(MatchResult {
        len: close_idx + close.len,
        segments: vec![Segment::node(BRACKETED, "Bracketed", children)],
    })
}

fn match_starts_with<'a>(
    starts: &'a StartsWith,
    segments: &[Segment],
    ctx: &mut ParseContext<'a>,
) -> Option<MatchResult> {
    let anchor = match_grammar(&starts.anchor, segments, ctx).filter(|m| !m.is_empty())?;
    let own: Vec<&'a Grammar> = starts.terminator.as_deref().into_iter().collect();
    let inherited = ctx.terminators().to_vec();

    let limit = scan(segments, anchor.len, &inherited, false, ctx).map_or(segments.len(), |(at, _)| at);
    let bounded = &segments[..limit];
    let end = match scan(
        bounded,
        anchor.len,
        &own,
        starts.enforce_whitespace_preceding_terminator,
        ctx,
    ) {
        Some((at, len)) if starts.include_terminator => at + len,
        Some((at, _)) => trim_end(segments, anchor.len, at),
        None => trim_end(segments, anchor.len, limit),
    };

    let mut out = anchor.segments;
    out.extend_from_slice(&segments[anchor.len..end]);
    Some(MatchResult { len: end, segments: out })
}

/// Scans code positions from `from` for the first place any of
/// `terminators` matches, stepping over persistent bracket groups of the
/// default pair set as units. Returns the position and the terminator's
/// length.
fn scan<'a>(
    segments: &[Segment],
    from: usize,
    terminators: &[&'a Grammar],
    require_preceding_non_code: bool,
    ctx: &mut ParseContext<'a>,
) -> Option<(usize, usize)> {
    let pairs = ctx.dialect().bracket_pairs(DEFAULT_BRACKET_SET);
    let mut idx = from;
    while idx < segments.len() {
        if !segments[idx].is_code() {
            idx += 1;
            continue;
        }
        let rest = &segments[idx..];
        let eligible = !require_preceding_non_code || (idx > 0 && !segments[idx - 1].is_code());
        if eligible {
            for &terminator in terminators {
                let found = ctx.without_terminators(|ctx| match_grammar(terminator, rest, ctx));
                if let Some(m) = found.filter(|m| !m.is_empty()) {
                    return Some((idx, m.len));
                }
            }
        }
        let group = pairs
            .iter()
            .filter(|pair| pair.persists)
            .find_map(|pair| match_single(pair.open, rest, ctx).map(|open| (pair, open.len)));
        idx = match group {
            Some((pair, open_len)) => find_close(pairs, pair, segments, idx + open_len, ctx)
                .map_or(idx + 1, |(close_idx, close)| close_idx + close.len),
            None => idx + 1,
        };
    }
    None
}

/// Finds the closer matching `pair`, counting nesting of every pair in
/// `pairs`. A closer of another pair out of turn means the brackets are
/// unbalanced.
fn find_close<'a>(
    pairs: &'a [BracketPair],
    pair: &'a BracketPair,
    segments: &[Segment],
    from: usize,
    ctx: &mut ParseContext<'a>,
) -> Option<(usize, MatchResult)> {
    let mut expected = vec![pair.close];
    let mut idx = from;
    while idx < segments.len() {
        if !segments[idx].is_code() {
            idx += 1;
            continue;
        }
        let rest = &segments[idx..];
        let top = *expected.last()?;
        if let Some(close) = match_single(top, rest, ctx) {
            expected.pop();
            if expected.is_empty() {
                return Some((idx, close));
            }
            idx += close.len;
            continue;
        }
        if let Some((nested, open)) = pairs
            .iter()
            .find_map(|p| match_single(p.open, rest, ctx).map(|open| (p, open)))
        {
            expected.push(nested.close);
            idx += open.len;
            continue;
        }
        if pairs
            .iter()
            .any(|p| match_single(p.close, rest, ctx).is_some())
        {
            return None;
        }
        idx += 1;
    }
    None
}

fn match_single(name: &str, segments: &[Segment], ctx: &mut ParseContext<'_>) -> Option<MatchResult> {
    ctx.without_terminators(|ctx| match_ref(name, segments, ctx))
        .filter(|m| !m.is_empty())
}

fn terminates<'a>(terminator: &'a Grammar, segments: &[Segment], ctx: &mut ParseContext<'a>) -> bool {
    ctx.without_terminators(|ctx| match_grammar(terminator, segments, ctx))
        .is_some_and(|m| !m.is_empty())
}

/// Index of the first code segment at or after `from`, or the slice
/// length.
pub(crate) fn next_code(segments: &[Segment], from: usize) -> usize {
    segments
        .get(from..)
        .and_then(|rest| rest.iter().position(Segment::is_code))
        .map_or(segments.len(), |offset| from + offset)
}

/// Backs `end` off over trailing non-code, never below `floor`.
fn trim_end(segments: &[Segment], floor: usize, mut end: usize) -> usize {
    while end > floor && !segments[end - 1].is_code() {
        end -= 1;
    }
    end
}

fn offset_after(segments: &[Segment], pos: usize) -> usize {
    match pos.checked_sub(1).and_then(|idx| segments.get(idx)) {
        Some(previous) => previous.span().end,
        None => segments.first().map_or(0, |first| first.span().start),
    }
}

const fn meta_segment(kind: MetaKind, offset: usize) -> Segment {
    Segment::Meta(MetaSegment::new(kind, offset))
}

fn meta(kind: MetaKind, offset: usize) -> MatchResult {
    MatchResult {
        len: 0,
        segments: vec![meta_segment(kind, offset)],
    }
}

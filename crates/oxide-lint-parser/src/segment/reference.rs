//! Splitting object references into their dotted parts.
//!
//! Dialects disagree on how `a.b.c` maps onto schema, table and column. Each
//! segment definition carries a [`ReferenceStyle`] and callers go through
//! the dialect's table, so one dialect can change the interpretation for a
//! single segment kind without touching the others.

use super::Segment;

/// The level of an object reference a caller asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceLevel {
    /// The referenced object itself, e.g. a column.
    Object = 1,
    /// The table holding the object.
    Table = 2,
    /// The schema holding the table.
    Schema = 3,
}

impl ReferenceLevel {
    /// Returns the level as a count of trailing parts.
    #[must_use]
    pub const fn depth(self) -> usize {
        self as usize
    }
}

/// One logical part of a reference and the leaves it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePart<'a> {
    /// The unquoted text of the part.
    pub part: String,
    /// The segments making up the part.
    pub segments: Vec<&'a Segment>,
}

/// How a segment kind turns its leaves into reference parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceStyle {
    /// The segment is not a reference.
    #[default]
    NotAReference,
    /// Dotted identifiers; the last part is the object, the one before it
    /// the table, and so on.
    Object,
    /// Like [`Self::Object`], but with three or more parts the leading
    /// parts are ambiguous between project, dataset, table and struct field
    /// access, so every plausible candidate is returned.
    AmbiguousColumn,
    /// Parts may contain embedded hyphens: identifiers and minus operators
    /// between dots are joined into one part.
    Hyphenated,
}

impl ReferenceStyle {
    /// Splits `segment` into its reference parts.
    #[must_use]
    pub fn iter_raw_references(self, segment: &Segment) -> Vec<ReferencePart<'_>> {
        match self {
            Self::NotAReference => Vec::new(),
            Self::Object | Self::AmbiguousColumn => segment
                .recursive_crawl(&["identifier"])
                .into_iter()
                .flat_map(|elem| {
                    elem.raw_trimmed()
                        .split('.')
                        .map(|part| ReferencePart {
                            part: part.to_string(),
                            segments: vec![elem],
                        })
                        .collect::<Vec<_>>()
                })
                .collect(),
            Self::Hyphenated => {
                let mut parts = Vec::new();
                let mut current: Vec<&Segment> = Vec::new();
                for elem in segment.recursive_crawl(&["identifier", "binary_operator", "dot"]) {
                    if elem.is_type("dot") {
                        flush_hyphenated(&mut current, &mut parts);
                    } else {
                        current.push(elem);
                    }
                }
                flush_hyphenated(&mut current, &mut parts);
                parts
            }
        }
    }

    /// Returns the parts that may name the object at `level`.
    #[must_use]
    pub fn extract_possible_references(
        self,
        segment: &Segment,
        level: ReferenceLevel,
    ) -> Vec<ReferencePart<'_>> {
        let refs = self.iter_raw_references(segment);
        if self == Self::AmbiguousColumn && refs.len() >= 3 {
            return match level {
                ReferenceLevel::Schema => refs.into_iter().take(1).collect(),
                ReferenceLevel::Table => refs.into_iter().take(2).collect(),
                ReferenceLevel::Object => refs.into_iter().skip(1).take(2).collect(),
            };
        }
        let depth = level.depth();
        if refs.len() >= depth {
            refs.into_iter().rev().nth(depth - 1).into_iter().collect()
        } else {
            Vec::new()
        }
    }
}

fn flush_hyphenated<'a>(current: &mut Vec<&'a Segment>, parts: &mut Vec<ReferencePart<'a>>) {
    if current.is_empty() {
        return;
    }
    let segments = std::mem::take(current);
    let part = segments.iter().map(|s| s.raw_trimmed()).collect();
    parts.push(ReferencePart { part, segments });
}

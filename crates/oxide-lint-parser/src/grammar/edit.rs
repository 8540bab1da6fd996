//! Copy-and-splice edits of grammar trees.
//!
//! A derived dialect extends an inherited `Sequence` or `OneOf` by copying it
//! with extra children inserted next to an anchor child, or with children
//! removed, instead of restating the whole grammar.

use super::{Delimited, Grammar};
use crate::error::{DialectError, DialectResult};

#[derive(Debug, Clone, PartialEq, Default)]
enum InsertAt {
    #[default]
    End,
    Before(Grammar),
    After(Grammar),
}

/// An edit applied by [`Grammar::copy_with`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrammarEdit {
    insert: Vec<Grammar>,
    at: InsertAt,
    remove: Vec<Grammar>,
}

impl GrammarEdit {
    /// Appends `nodes` to the child list.
    #[must_use]
    pub fn insert(nodes: Vec<Grammar>) -> Self {
        Self {
            insert: nodes,
            ..Self::default()
        }
    }

    /// Removes `nodes` from the child list.
    #[must_use]
    pub fn remove(nodes: Vec<Grammar>) -> Self {
        Self {
            remove: nodes,
            ..Self::default()
        }
    }

    /// Inserts immediately before the child equal to `anchor`.
    #[must_use]
    pub fn before(mut self, anchor: Grammar) -> Self {
        self.at = InsertAt::Before(anchor);
        self
    }

    /// Inserts immediately after the child equal to `anchor`.
    #[must_use]
    pub fn after(mut self, anchor: Grammar) -> Self {
        self.at = InsertAt::After(anchor);
        self
    }

    /// Also removes `nodes`. Removal happens before insertion.
    #[must_use]
    pub fn and_remove(mut self, nodes: Vec<Grammar>) -> Self {
        self.remove.extend(nodes);
        self
    }

    fn apply(&self, children: &[Grammar]) -> DialectResult<Vec<Grammar>> {
        let mut out = children.to_vec();
        for node in &self.remove {
            let idx = position_of(&out, node)?;
            out.remove(idx);
        }
        let idx = match &self.at {
            InsertAt::End => out.len(),
            InsertAt::Before(anchor) => position_of(&out, anchor)?,
            InsertAt::After(anchor) => position_of(&out, anchor)? + 1,
        };
        out.splice(idx..idx, self.insert.iter().cloned());
        Ok(out)
    }
}

fn position_of(children: &[Grammar], anchor: &Grammar) -> DialectResult<usize> {
    children
        .iter()
        .position(|child| child == anchor)
        .ok_or_else(|| DialectError::AnchorNotFound {
            anchor: format!("{anchor:?}"),
        })
}

impl Grammar {
    /// Returns a copy of this grammar with `edit` applied to its child
    /// list. `self` is left untouched.
    ///
    /// Applies to `Sequence`, `OneOf`, `AnyNumberOf` and the element list of
    /// `Delimited`; an `Optional` wrapper is looked through and kept.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::AnchorNotFound`] if an anchor or a node to
    /// remove is not a direct child, and [`DialectError::UnsupportedEdit`]
    /// for grammars without a child list.
    pub fn copy_with(&self, edit: &GrammarEdit) -> DialectResult<Self> {
        Ok(match self {
            Self::Sequence(children) => Self::Sequence(edit.apply(children)?),
            Self::OneOf(children) => Self::OneOf(edit.apply(children)?),
            Self::AnyNumberOf(any) => {
                let mut any = any.clone();
                any.elements = edit.apply(&any.elements)?;
                Self::AnyNumberOf(any)
            }
            Self::Delimited(delimited) => {
                let mut delimited = delimited.clone();
                delimited.elements = edit.apply(&delimited.elements)?;
                Self::Delimited(delimited)
            }
            Self::Optional(inner) => Self::Optional(Box::new(inner.copy_with(edit)?)),
            other => {
                return Err(DialectError::UnsupportedEdit {
                    edit: "copy_with",
                    grammar: other.variant_name(),
                })
            }
        })
    }

    /// Returns a copy of a `Delimited` grammar with a different delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::UnsupportedEdit`] unless this is a
    /// `Delimited`, optionally wrapped in `Optional`.
    pub fn with_delimiter(&self, delimiter: Self) -> DialectResult<Self> {
        match self {
            Self::Delimited(delimited) => Ok(Self::Delimited(Delimited {
                delimiter: Box::new(delimiter),
                ..delimited.clone()
            })),
            Self::Optional(inner) => Ok(Self::Optional(Box::new(inner.with_delimiter(delimiter)?))),
            other => Err(DialectError::UnsupportedEdit {
                edit: "with_delimiter",
                grammar: other.variant_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &'static str) -> Grammar {
        Grammar::reference(name)
    }

    fn seq() -> Grammar {
        Grammar::Sequence(vec![r("Select"), r("Where").optional(), r("OrderBy").optional()])
    }

    #[test]
    fn test_insert_at_end() {
        let edited = seq().copy_with(&GrammarEdit::insert(vec![r("Limit")])).unwrap();
        let Grammar::Sequence(children) = edited else {
            panic!("expected sequence");
        };
        assert_eq!(children.last(), Some(&r("Limit")));
    }

    #[test]
    fn test_insert_before_optional_anchor() {
        let edited = seq()
            .copy_with(
                &GrammarEdit::insert(vec![r("Qualify").optional()])
                    .before(r("OrderBy").optional()),
            )
            .unwrap();
        assert_eq!(
            edited,
            Grammar::Sequence(vec![
                r("Select"),
                r("Where").optional(),
                r("Qualify").optional(),
                r("OrderBy").optional(),
            ])
        );
    }

    #[test]
    fn test_insert_after_anchor() {
        let edited = seq()
            .copy_with(&GrammarEdit::insert(vec![r("From")]).after(r("Select")))
            .unwrap();
        let Grammar::Sequence(children) = edited else {
            panic!("expected sequence");
        };
        assert_eq!(children[1], r("From"));
    }

    #[test]
    fn test_remove() {
        let edited = seq()
            .copy_with(&GrammarEdit::remove(vec![r("Where").optional()]))
            .unwrap();
        assert_eq!(
            edited,
            Grammar::Sequence(vec![r("Select"), r("OrderBy").optional()])
        );
    }

    #[test]
    fn test_original_is_untouched() {
        let original = seq();
        let _ = original.copy_with(&GrammarEdit::insert(vec![r("Limit")])).unwrap();
        assert_eq!(original, seq());
    }

    #[test]
    fn test_missing_anchor() {
        let err = seq()
            .copy_with(&GrammarEdit::insert(vec![r("X")]).before(r("Nope")))
            .unwrap_err();
        assert!(matches!(err, DialectError::AnchorNotFound { .. }));
    }

    #[test]
    fn test_unsupported_edit() {
        let err = r("A")
            .copy_with(&GrammarEdit::insert(vec![r("X")]))
            .unwrap_err();
        assert!(matches!(err, DialectError::UnsupportedEdit { grammar: "Ref", .. }));
    }

    #[test]
    fn test_optional_wrapper_is_kept() {
        let g = Grammar::OneOf(vec![r("A")]).optional();
        let edited = g.copy_with(&GrammarEdit::insert(vec![r("B")])).unwrap();
        assert_eq!(edited, Grammar::OneOf(vec![r("A"), r("B")]).optional());
    }

    #[test]
    fn test_with_delimiter() {
        let g: Grammar = Delimited::new(vec![r("Id")], r("Dot")).into();
        let edited = g.with_delimiter(r("Minus")).unwrap();
        let Grammar::Delimited(d) = edited else {
            panic!("expected delimited");
        };
        assert_eq!(*d.delimiter, r("Minus"));
        assert_eq!(d.elements, vec![r("Id")]);
    }
}

//! # oxide-lint-parser
//!
//! A dialect-aware, lossless SQL parsing engine.
//!
//! This crate provides:
//! - A lexer driven by an ordered list of string and pattern matchers
//! - Grammar combinators (`Sequence`, `OneOf`, `Delimited`, `Bracketed`,
//!   `StartsWith`, ...) referring to each other by name
//! - A two-phase match/parse algorithm producing a tree of segments
//! - Dialects built by editing a parent dialect, frozen once finished
//!
//! ## Lossless trees
//!
//! Every byte of the input ends up in exactly one leaf, so rendering a tree
//! reproduces the input. Text no grammar explains is kept inside
//! `unparsable` nodes instead of being rejected:
//!
//! ```rust
//! use oxide_lint_parser::{DialectBuilder, Grammar, LexMatcher, Parser, SegmentDef};
//!
//! let mut builder = DialectBuilder::new("tiny", "FileSegment");
//! builder.add_lexer_matchers(vec![
//!     LexMatcher::regex("whitespace", r"\s+", "whitespace")?,
//!     LexMatcher::regex("word", r"\w+", "word")?,
//! ]);
//! builder.register_segment(SegmentDef::new(
//!     "FileSegment",
//!     "file",
//!     Grammar::keyword("HELLO"),
//! ))?;
//! let dialect = builder.finish()?;
//!
//! let tree = Parser::new(&dialect).parse("hello world");
//! assert_eq!(tree.render(), "hello world");
//! assert_eq!(tree.recursive_crawl(&["unparsable"]).len(), 1);
//! # Ok::<(), oxide_lint_parser::DialectError>(())
//! ```
//!
//! Concrete dialects live in the `oxide-lint-dialects` crate.

pub mod config;
pub mod dialect;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod segment;

pub use config::{ConfigInfo, ConfigInfoTable, ParserConfig, Validation};
pub use dialect::{BracketPair, Dialect, DialectBuilder, LibraryEntry, SegmentDef};
pub use error::{ConfigError, ConfigResult, DialectError, DialectResult};
pub use grammar::{
    AnyNumberOf, Bracketed, Delimited, Grammar, GrammarEdit, Pattern, StartsWith, Terminal,
};
pub use lexer::{LexMatcher, Lexer, Span};
pub use parser::{MatchResult, ParseContext, Parser};
pub use segment::{
    MetaKind, MetaSegment, NodeSegment, RawSegment, ReferenceLevel, ReferencePart, ReferenceStyle,
    Segment,
};

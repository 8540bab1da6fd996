//! The two-phase parser.
//!
//! The match phase establishes the extent of each segment cheaply; a
//! segment whose definition carries a separate parse grammar is kept as an
//! unexpanded node of raw tokens. The parse phase then walks the tree and
//! expands those nodes, recursing until every node is fully structured or
//! marked `unparsable`.

mod context;
mod driver;
mod matcher;

pub use context::{ParseContext, DEFAULT_MAX_RECURSION_DEPTH};
pub use driver::Parser;
pub use matcher::{match_grammar, MatchResult};

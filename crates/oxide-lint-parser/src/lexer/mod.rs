//! SQL lexer.
//!
//! Lexing is driven entirely by the dialect's ordered matcher list: no
//! keyword knowledge lives here. Whitespace, newlines and comments are kept
//! as segments so the tree stays lossless.

mod matcher;
mod span;
mod tokenizer;

pub use matcher::LexMatcher;
pub use span::Span;
pub use tokenizer::Lexer;

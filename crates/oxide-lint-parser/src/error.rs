//! Error types for dialect construction and configuration.
//!
//! Lexing gaps, match failures and parse failures are not errors: they are
//! recorded in the tree as `unlexable` leaves and `unparsable` nodes. Only a
//! broken dialect definition or a bad configuration aborts.

/// Errors raised while building a dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialectError {
    /// `register` was called with a name the dialect already defines.
    #[error("Dialect '{dialect}' already defines '{name}'")]
    AlreadyRegistered {
        /// The dialect under construction.
        dialect: String,
        /// The duplicated grammar or segment name.
        name: String,
    },

    /// `replace` or a lookup referenced a name the dialect does not define.
    #[error("Dialect '{dialect}' has no grammar or segment named '{name}'")]
    UnknownName {
        /// The dialect under construction.
        dialect: String,
        /// The missing name.
        name: String,
    },

    /// A segment operation was applied to a plain grammar, or the reverse.
    #[error("'{name}' in dialect '{dialect}' is not a {expected}")]
    WrongKind {
        /// The dialect under construction.
        dialect: String,
        /// The offending name.
        name: String,
        /// What the caller expected, `grammar` or `segment`.
        expected: &'static str,
    },

    /// A grammar edit named an anchor that is not a direct child.
    #[error("Anchor {anchor} not found in grammar")]
    AnchorNotFound {
        /// Debug rendering of the anchor grammar.
        anchor: String,
    },

    /// A grammar edit was applied to a node without a child list.
    #[error("Cannot apply {edit} to a {grammar} grammar")]
    UnsupportedEdit {
        /// The edit that was attempted.
        edit: &'static str,
        /// The variant it was applied to.
        grammar: &'static str,
    },

    /// A lexer edit referenced a matcher that does not exist.
    #[error("Dialect '{dialect}' has no lexer matcher named '{name}'")]
    UnknownLexerMatcher {
        /// The dialect under construction.
        dialect: String,
        /// The missing matcher name.
        name: String,
    },

    /// A regular expression in a lexer matcher or terminal did not compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The source pattern.
        pattern: String,
        /// The regex engine's message.
        message: String,
    },

    /// A `Ref`, bracket pair or root name does not resolve once the dialect
    /// is finished.
    #[error("Dialect '{dialect}': '{from}' references unknown name '{name}'")]
    UnresolvedReference {
        /// The dialect being finished.
        dialect: String,
        /// The grammar or segment holding the reference.
        from: String,
        /// The unresolved name.
        name: String,
    },

    /// A `Bracketed` grammar names a bracket pair set the dialect lacks.
    #[error("Dialect '{dialect}' has no bracket pair set '{set}' with type '{bracket_type}'")]
    UnknownBracketPair {
        /// The dialect being finished.
        dialect: String,
        /// The bracket pair set name.
        set: String,
        /// The bracket type looked up in the set.
        bracket_type: String,
    },
}

/// Errors raised while selecting a dialect or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No dialect is registered under the requested name.
    #[error("Unknown dialect '{name}'. Available dialects: {}", available.join(", "))]
    UnknownDialect {
        /// The requested name.
        name: String,
        /// Names that would have been accepted.
        available: Vec<String>,
    },

    /// The requested dialect exists but its definition failed to build.
    #[error("Dialect failed to build: {0}")]
    Dialect(#[from] DialectError),

    /// A rule option that no configuration table documents.
    #[error("Unknown configuration option '{0}'")]
    UnknownOption(String),

    /// A rule option value that its validator rejects.
    #[error("Invalid value {value} for '{option}': expected {expected}")]
    InvalidValue {
        /// The option name.
        option: String,
        /// The rejected value, rendered as JSON.
        value: String,
        /// Human-readable description of the legal values.
        expected: String,
    },

    /// The configuration document could not be deserialized.
    #[error("Invalid configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Result type for dialect construction.
pub type DialectResult<T> = std::result::Result<T, DialectError>;

/// Result type for configuration handling.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

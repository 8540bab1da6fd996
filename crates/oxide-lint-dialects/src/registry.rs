//! Process-wide lookup of dialects by name.
//!
//! Each dialect is built the first time it is asked for and shared from
//! then on. A definition that fails to build keeps failing with the same
//! error.

use std::sync::OnceLock;

use oxide_lint_parser::{ConfigError, ConfigResult, Dialect, DialectResult, Parser, ParserConfig};

use crate::{ansi, bigquery};

const AVAILABLE: &[&str] = &[ansi::NAME, bigquery::NAME];

static ANSI: OnceLock<DialectResult<Dialect>> = OnceLock::new();
static BIGQUERY: OnceLock<DialectResult<Dialect>> = OnceLock::new();

fn ansi_dialect() -> &'static DialectResult<Dialect> {
    ANSI.get_or_init(ansi::dialect)
}

fn bigquery_dialect() -> &'static DialectResult<Dialect> {
    BIGQUERY.get_or_init(|| match ansi_dialect() {
        Ok(parent) => bigquery::derive_from(parent),
        Err(e) => Err(e.clone()),
    })
}

/// Names [`dialect_selector`] accepts.
#[must_use]
pub const fn available_dialects() -> &'static [&'static str] {
    AVAILABLE
}

/// Returns the shared dialect registered as `name`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownDialect`] for a name that is not
/// registered, and [`ConfigError::Dialect`] if the definition does not
/// build.
pub fn dialect_selector(name: &str) -> ConfigResult<&'static Dialect> {
    let built = match name {
        ansi::NAME => ansi_dialect(),
        bigquery::NAME => bigquery_dialect(),
        _ => {
            return Err(ConfigError::UnknownDialect {
                name: name.to_string(),
                available: AVAILABLE.iter().map(ToString::to_string).collect(),
            })
        }
    };
    tracing::debug!(dialect = name, ok = built.is_ok(), "selected dialect");
    built.as_ref().map_err(|e| ConfigError::Dialect(e.clone()))
}

/// Validates `config` and returns a parser for the dialect it names.
///
/// # Errors
///
/// Returns the first rejected rule option, or the error from
/// [`dialect_selector`].
pub fn parser_for(config: &ParserConfig) -> ConfigResult<Parser<'static>> {
    config.validate_rules()?;
    let dialect = dialect_selector(&config.dialect)?;
    Ok(Parser::with_config(dialect, config))
}

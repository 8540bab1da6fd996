//! Parser configuration.

mod info;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

pub use info::{ConfigInfo, ConfigInfoTable, Validation};

use crate::error::ConfigResult;
use crate::parser::DEFAULT_MAX_RECURSION_DEPTH;

/// Settings for one parser run.
///
/// ```
/// use oxide_lint_parser::config::ParserConfig;
///
/// let config = ParserConfig::from_json(
///     r#"{"dialect": "bigquery", "rules": {"comma_style": "leading"}}"#,
/// ).unwrap();
/// assert_eq!(config.dialect, "bigquery");
/// assert!(config.validate_rules().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Name of the dialect to parse with.
    pub dialect: String,
    /// Bound on nested grammar evaluation before a match is abandoned.
    pub max_recursion_depth: usize,
    /// Rule options, keyed by option name.
    pub rules: IndexMap<String, Value>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialect: "ansi".to_string(),
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            rules: IndexMap::new(),
        }
    }
}

impl ParserConfig {
    /// Reads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialize`](crate::error::ConfigError) if
    /// the document is malformed or has unknown top-level fields.
    pub fn from_json(source: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        tracing::debug!(
            dialect = %config.dialect,
            rules = config.rules.len(),
            "loaded parser config"
        );
        Ok(config)
    }

    /// Checks every rule option against the standard option table.
    ///
    /// # Errors
    ///
    /// Returns the first unknown option or rejected value.
    pub fn validate_rules(&self) -> ConfigResult<()> {
        self.validate_rules_with(&ConfigInfoTable::standard())
    }

    /// Checks every rule option against `table`.
    ///
    /// # Errors
    ///
    /// Returns the first unknown option or rejected value.
    pub fn validate_rules_with(&self, table: &ConfigInfoTable) -> ConfigResult<()> {
        self.rules
            .iter()
            .try_for_each(|(option, value)| table.validate(option, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::from_json("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.dialect, "ansi");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ParserConfig::from_json(r#"{"dialekt": "ansi"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
    }

    #[test]
    fn test_validate_rules() {
        let config = ParserConfig::from_json(
            r#"{"rules": {"tab_space_size": 4, "indent_unit": "tab"}}"#,
        )
        .unwrap();
        assert!(config.validate_rules().is_ok());

        let config =
            ParserConfig::from_json(r#"{"rules": {"indent_unit": "pipe"}}"#).unwrap();
        assert!(matches!(
            config.validate_rules(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}

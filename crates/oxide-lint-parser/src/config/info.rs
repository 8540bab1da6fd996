//! Documentation and validation of rule configuration options.
//!
//! Rules read their options from the `rules` table of a
//! [`ParserConfig`](super::ParserConfig). Every option a rule may read is
//! described here once, with the values it accepts and a one-line
//! definition. Plugins contribute extra tables that are merged over the
//! standard one.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// The values an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// One of a fixed list of strings.
    OneOf(&'static [&'static str]),
    /// An integer in `start..end`.
    Range {
        /// Smallest accepted value.
        start: i64,
        /// First rejected value above the range.
        end: i64,
    },
    /// `true` or `false`.
    Boolean,
}

impl Validation {
    /// Returns true if `value` is accepted.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::OneOf(choices) => value.as_str().is_some_and(|v| choices.contains(&v)),
            Self::Range { start, end } => value.as_i64().is_some_and(|v| (*start..*end).contains(&v)),
            Self::Boolean => value.is_boolean(),
        }
    }

    /// Describes the accepted values, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::OneOf(choices) => format!("one of {}", choices.join(", ")),
            Self::Range { start, end } => format!("an integer in {start}..{end}"),
            Self::Boolean => "true or false".to_string(),
        }
    }
}

/// Description of one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigInfo {
    /// Accepted values. `None` accepts anything.
    pub validation: Option<Validation>,
    /// What the option does.
    pub definition: &'static str,
}

impl ConfigInfo {
    const fn new(validation: Validation, definition: &'static str) -> Self {
        Self {
            validation: Some(validation),
            definition,
        }
    }
}

const BOOL: Validation = Validation::Boolean;
const CAPITALISATION: &[&str] = &["consistent", "upper", "lower", "capitalise"];
const EXTENDED_CAPITALISATION: &[&str] = &["consistent", "upper", "lower", "pascal", "capitalise"];

const STANDARD: &[(&str, ConfigInfo)] = &[
    (
        "tab_space_size",
        ConfigInfo::new(
            Validation::Range { start: 0, end: 100 },
            "The number of spaces to consider equal to one tab. \
             Used in the fixing step of this rule",
        ),
    ),
    (
        "max_line_length",
        ConfigInfo::new(
            Validation::Range { start: 0, end: 1000 },
            "The maximum length of a line to allow without raising a violation",
        ),
    ),
    (
        "indent_unit",
        ConfigInfo::new(
            Validation::OneOf(&["space", "tab"]),
            "Whether to use tabs or spaces to add new indents",
        ),
    ),
    (
        "comma_style",
        ConfigInfo::new(
            Validation::OneOf(&["leading", "trailing"]),
            "The comma style to enforce",
        ),
    ),
    (
        "allow_scalar",
        ConfigInfo::new(
            BOOL,
            "Whether or not to allow a single element in the select clause \
             to be without an alias",
        ),
    ),
    (
        "single_table_references",
        ConfigInfo::new(
            Validation::OneOf(&["consistent", "qualified", "unqualified"]),
            "The expectation for references in single-table select",
        ),
    ),
    (
        "unquoted_identifiers_policy",
        ConfigInfo::new(
            Validation::OneOf(&["all", "aliases", "column_aliases"]),
            "Types of unquoted identifiers to flag violations for",
        ),
    ),
    (
        "capitalisation_policy",
        ConfigInfo::new(
            Validation::OneOf(CAPITALISATION),
            "The capitalisation policy to enforce",
        ),
    ),
    (
        "extended_capitalisation_policy",
        ConfigInfo::new(
            Validation::OneOf(EXTENDED_CAPITALISATION),
            "The capitalisation policy to enforce, extended with PascalCase. \
             This is separate from capitalisation_policy as it should not be \
             applied to keywords.",
        ),
    ),
    (
        "lint_templated_tokens",
        ConfigInfo::new(
            BOOL,
            "Should lines starting with a templating placeholder such as \
             `{{blah}}` have their indentation linted",
        ),
    ),
    (
        "select_clause_trailing_comma",
        ConfigInfo::new(
            Validation::OneOf(&["forbid", "require"]),
            "Should trailing commas within select clauses be required or forbidden",
        ),
    ),
    (
        "ignore_comment_lines",
        ConfigInfo::new(
            BOOL,
            "Should lines that contain only whitespace and comments be ignored \
             when linting line lengths",
        ),
    ),
    (
        "forbid_subquery_in",
        ConfigInfo::new(
            Validation::OneOf(&["join", "from", "both"]),
            "Which clauses should be linted for subqueries",
        ),
    ),
    (
        "prefer_count_1",
        ConfigInfo::new(
            BOOL,
            "Should count(1) be preferred over count(*) and count(0)?",
        ),
    ),
    (
        "prefer_count_0",
        ConfigInfo::new(
            BOOL,
            "Should count(0) be preferred over count(*) and count(1)?",
        ),
    ),
    (
        "operator_new_lines",
        ConfigInfo::new(
            Validation::OneOf(&["before", "after"]),
            "Should operator be placed before or after newlines.",
        ),
    ),
];

/// Every known option, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInfoTable {
    entries: IndexMap<&'static str, ConfigInfo>,
}

impl ConfigInfoTable {
    /// The options shipped with the engine.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD.iter().copied().collect(),
        }
    }

    /// Merges a plugin-provided table. Later tables override earlier
    /// entries of the same name.
    #[must_use]
    pub fn merge(mut self, plugin: impl IntoIterator<Item = (&'static str, ConfigInfo)>) -> Self {
        for (name, info) in plugin {
            if self.entries.insert(name, info).is_some() {
                tracing::debug!(option = name, "plugin overrides config option");
            }
        }
        self
    }

    /// Returns the description of `option`.
    #[must_use]
    pub fn get(&self, option: &str) -> Option<&ConfigInfo> {
        self.entries.get(option)
    }

    /// Iterates over options in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigInfo)> {
        self.entries.iter().map(|(name, info)| (*name, info))
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no options are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks `value` against the validation of `option`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownOption`] for options not in the table
    /// and [`ConfigError::InvalidValue`] for rejected values.
    pub fn validate(&self, option: &str, value: &Value) -> ConfigResult<()> {
        let info = self
            .get(option)
            .ok_or_else(|| ConfigError::UnknownOption(option.to_string()))?;
        match info.validation {
            Some(validation) if !validation.accepts(value) => Err(ConfigError::InvalidValue {
                option: option.to_string(),
                value: value.to_string(),
                expected: validation.describe(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for ConfigInfoTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_table() {
        let table = ConfigInfoTable::standard();
        assert_eq!(table.len(), 16);
        assert_eq!(
            table.get("comma_style").unwrap().validation,
            Some(Validation::OneOf(&["leading", "trailing"]))
        );
    }

    #[test]
    fn test_validate_choices() {
        let table = ConfigInfoTable::standard();
        assert!(table.validate("comma_style", &json!("leading")).is_ok());
        let err = table.validate("comma_style", &json!("middle")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"middle\" for 'comma_style': expected one of leading, trailing"
        );
    }

    #[test]
    fn test_validate_range_and_bool() {
        let table = ConfigInfoTable::standard();
        assert!(table.validate("tab_space_size", &json!(4)).is_ok());
        assert!(table.validate("tab_space_size", &json!(100)).is_err());
        assert!(table.validate("tab_space_size", &json!(-1)).is_err());
        assert!(table.validate("allow_scalar", &json!(false)).is_ok());
        assert!(table.validate("allow_scalar", &json!("no")).is_err());
    }

    #[test]
    fn test_unknown_option() {
        let table = ConfigInfoTable::standard();
        assert!(matches!(
            table.validate("no_such_option", &json!(1)),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_merge_plugin_table() {
        let table = ConfigInfoTable::standard().merge([
            (
                "prefer_count_1",
                ConfigInfo {
                    validation: None,
                    definition: "overridden",
                },
            ),
            (
                "quoted_identifiers_policy",
                ConfigInfo {
                    validation: Some(Validation::OneOf(&["all", "none"])),
                    definition: "Types of quoted identifiers to flag",
                },
            ),
        ]);
        assert_eq!(table.len(), 17);
        assert!(table.validate("prefer_count_1", &json!("anything")).is_ok());
        assert!(table.validate("quoted_identifiers_policy", &json!("none")).is_ok());
        assert_eq!(table.iter().last().unwrap().0, "quoted_identifiers_policy");
    }
}

//! # oxide-lint-dialects
//!
//! SQL dialect definitions for `oxide-lint-parser`.
//!
//! # Dialects
//!
//! - **[`ansi`]**: the root dialect. Queries with joins, set operators and
//!   common table expressions; `INSERT`, `UPDATE` and `DELETE`;
//!   `CREATE TABLE`, `DROP TABLE` and `CREATE FUNCTION`.
//! - **[`bigquery`]**: derived from `ansi`. Adds:
//!   - **Lexical**: [raw, byte and triple-quoted strings][BigQuery lexical],
//!     back-quoted identifiers and `=>` for named arguments.
//!   - **Queries**: `QUALIFY`, `SELECT AS STRUCT`, `* EXCEPT (...)` and
//!     `* REPLACE (...)`, `FOR SYSTEM_TIME AS OF` and `WITH OFFSET`.
//!   - **Types**: [`STRUCT<...>` and `ARRAY<...>`][BigQuery types]. Angle
//!     brackets are only brackets inside type expressions.
//!   - **References**: hyphenated project names such as
//!     `my-project.dataset.table`.
//!   - **Scripting and DDL**: `DECLARE` and `SET`, plus `PARTITION BY`,
//!     `CLUSTER BY` and `OPTIONS` on `CREATE TABLE`.
//!
//! [BigQuery lexical]: https://cloud.google.com/bigquery/docs/reference/standard-sql/lexical
//! [BigQuery types]: https://cloud.google.com/bigquery/docs/reference/standard-sql/data-types
//!
//! ## Example
//!
//! ```rust
//! use oxide_lint_dialects::dialect_selector;
//! use oxide_lint_parser::Parser;
//!
//! let bigquery = dialect_selector("bigquery")?;
//! let sql = "SELECT * EXCEPT (secret) FROM `my-project.ds.users` WHERE id < 10";
//! let tree = Parser::new(bigquery).parse(sql);
//!
//! assert_eq!(tree.render(), sql);
//! assert!(tree.recursive_crawl(&["unparsable"]).is_empty());
//! assert_eq!(tree.recursive_crawl(&["select_except_clause"]).len(), 1);
//! # Ok::<(), oxide_lint_parser::ConfigError>(())
//! ```

pub mod ansi;
pub mod bigquery;
mod registry;
mod shorthand;

pub use registry::{available_dialects, dialect_selector, parser_for};

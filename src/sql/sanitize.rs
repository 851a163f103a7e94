//! SQL Identifier Quoting Utilities
//!
//! Quotes schema, table, and column names with each dialect's delimiters so
//! that user-supplied names can never escape their quotes.

use crate::dialect::Dialect;

/// Quote a SQL identifier for the given dialect
///
/// An embedded closing delimiter is doubled, which every supported engine
/// reads back as a literal character.
///
/// # Example
/// ```
/// use sql_edit_core::{Dialect, sql::quote_identifier};
///
/// assert_eq!(quote_identifier("users", Dialect::Postgresql), "\"users\"");
/// assert_eq!(quote_identifier("users", Dialect::Mysql), "`users`");
/// assert_eq!(quote_identifier("odd]name", Dialect::Mssql), "[odd]]name]");
/// ```
pub fn quote_identifier(identifier: &str, dialect: Dialect) -> String {
    let (open, close) = dialect.identifier_quotes();
    let mut quoted = String::with_capacity(identifier.len() + 2);
    quoted.push(open);
    for c in identifier.chars() {
        if c == close {
            quoted.push(close);
        }
        quoted.push(c);
    }
    quoted.push(close);
    quoted
}

/// Whether `schema` is emitted in front of table names for this dialect
///
/// Empty schemas are never emitted. Schemas the dialect treats as implied
/// (`public`, `dbo`, `main`) are skipped unless `qualify_default` is set.
/// A MySQL database name is always emitted, so edits never fall through to
/// whichever database the connection has selected.
pub fn schema_is_qualified(schema: &str, dialect: Dialect, qualify_default: bool) -> bool {
    if schema.is_empty() {
        return false;
    }
    qualify_default || !dialect.is_implicit_schema(schema)
}

/// Quote a table name, prefixed by its quoted schema where required
pub fn qualified_table_name(
    schema: &str,
    table: &str,
    dialect: Dialect,
    qualify_default: bool,
) -> String {
    if schema_is_qualified(schema, dialect, qualify_default) {
        format!(
            "{}.{}",
            quote_identifier(schema, dialect),
            quote_identifier(table, dialect)
        )
    } else {
        quote_identifier(table, dialect)
    }
}

//! Supported SQL dialects and their lexical feature flags
//!
//! Every dialect-specific decision in the crate is driven by data from this
//! module: the splitter reads a [`DialectConfig`], the formatter asks the
//! [`Dialect`] for its quoting, placeholder, and schema rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SqlEditError;

/// One of the four database engines the crate generates SQL for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgresql,
    Mysql,
    Sqlite,
    Mssql,
}

impl Dialect {
    /// All dialects, in tag order
    pub const ALL: [Dialect; 4] = [
        Dialect::Postgresql,
        Dialect::Mysql,
        Dialect::Sqlite,
        Dialect::Mssql,
    ];

    /// The lowercase tag used on the wire (`postgresql`, `mysql`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
        }
    }

    /// Lexical feature flags for this dialect
    pub fn parser_config(&self) -> &'static DialectConfig {
        match self {
            Dialect::Postgresql => &SQL_PARSER_CONFIGS[0].1,
            Dialect::Mysql => &SQL_PARSER_CONFIGS[1].1,
            Dialect::Sqlite => &SQL_PARSER_CONFIGS[2].1,
            Dialect::Mssql => &SQL_PARSER_CONFIGS[3].1,
        }
    }

    /// Opening and closing identifier delimiters
    pub fn identifier_quotes(&self) -> (char, char) {
        match self {
            Dialect::Postgresql | Dialect::Sqlite => ('"', '"'),
            Dialect::Mysql => ('`', '`'),
            Dialect::Mssql => ('[', ']'),
        }
    }

    /// Whether `schema` is implied by the connection and therefore not emitted
    ///
    /// MySQL has no default schema of its own; `public` is the editing layer's
    /// placeholder and is never a real MySQL database, so only it is skipped.
    pub fn is_implicit_schema(&self, schema: &str) -> bool {
        match self {
            Dialect::Postgresql | Dialect::Mysql => schema == "public",
            Dialect::Mssql => schema == "dbo",
            Dialect::Sqlite => schema == "main",
        }
    }

    /// Whether `INSERT`/`UPDATE`/`DELETE` accept a trailing `RETURNING *`
    pub fn supports_returning(&self) -> bool {
        matches!(self, Dialect::Postgresql | Dialect::Sqlite)
    }

    /// Parameter marker for the 1-based parameter `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgresql => format!("${}", index),
            Dialect::Mysql | Dialect::Sqlite => "?".to_string(),
            Dialect::Mssql => format!("@p{}", index),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SqlEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgresql),
            "mysql" => Ok(Dialect::Mysql),
            "sqlite" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::Mssql),
            _ => Err(SqlEditError::unknown_dialect(s)),
        }
    }
}

/// Lexical features the statement splitter honours for a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialectConfig {
    /// `$tag$ ... $tag$` string bodies
    pub dollar_quotes: bool,
    /// `/* /* */ */` nests instead of closing at the first `*/`
    pub nested_block_comments: bool,
    /// `` `ident` `` quoting
    pub backtick_identifiers: bool,
    /// `\` escapes the next character inside any quoted string or identifier
    pub backslash_escape: bool,
    /// `#` starts a line comment
    pub hash_line_comment: bool,
    /// `[ident]` quoting
    pub bracket_identifiers: bool,
}

/// Parser configuration for every dialect, in [`Dialect::ALL`] order
pub static SQL_PARSER_CONFIGS: [(Dialect, DialectConfig); 4] = [
    (
        Dialect::Postgresql,
        DialectConfig {
            dollar_quotes: true,
            nested_block_comments: true,
            backtick_identifiers: false,
            backslash_escape: false,
            hash_line_comment: false,
            bracket_identifiers: false,
        },
    ),
    (
        Dialect::Mysql,
        DialectConfig {
            dollar_quotes: false,
            nested_block_comments: false,
            backtick_identifiers: true,
            backslash_escape: true,
            hash_line_comment: true,
            bracket_identifiers: false,
        },
    ),
    (
        Dialect::Sqlite,
        DialectConfig {
            dollar_quotes: false,
            nested_block_comments: false,
            backtick_identifiers: true,
            backslash_escape: false,
            hash_line_comment: false,
            bracket_identifiers: true,
        },
    ),
    (
        Dialect::Mssql,
        DialectConfig {
            dollar_quotes: false,
            nested_block_comments: false,
            backtick_identifiers: false,
            backslash_escape: false,
            hash_line_comment: false,
            bracket_identifiers: true,
        },
    ),
];

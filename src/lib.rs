//! # sql-edit-core
//!
//! Dialect-correct SQL for PostgreSQL, MySQL, SQLite, and MSSQL.
//!
//! This crate turns structured row edits into parameterized statements and
//! splits raw scripts into individually executable statements. It performs
//! no I/O: every function is a pure transformation of its inputs.
//!
//! ## Features
//!
//! - **Statement Splitting**: Semicolon splitting that respects each dialect's
//!   strings, quoted identifiers, comments, and dollar-quoted bodies
//! - **Query Building**: `INSERT`/`UPDATE`/`DELETE` with dialect placeholders
//!   (`$1`, `?`, `@p1`) and ordered parameters
//! - **Previews**: The same statements with literal values inlined, for review
//! - **Validation**: Structured rejection of operations that cannot be built
//! - **Identifier Safety**: All schema, table, and column names are quoted
//!
//! ## Quick Start
//!
//! ```rust
//! use sql_edit_core::{
//!     ColumnChange, Dialect, EditContext, EditOperation, PrimaryKeyValue, build_preview_sql,
//!     build_query, split_statements, validate_operation,
//! };
//!
//! let context = EditContext::new("public", "users").with_primary_keys(["id"]);
//! let op = EditOperation::update(
//!     vec![PrimaryKeyValue::new("id", 1, "integer")],
//!     vec![ColumnChange::new("name", "John", "Jane", "varchar")],
//! );
//!
//! assert!(validate_operation(&op).valid);
//!
//! let query = build_query(&op, &context, Dialect::Mysql);
//! assert_eq!(query.sql, "UPDATE `users` SET `name` = ? WHERE `id` = ?");
//!
//! let preview = build_preview_sql(&op, &context, Dialect::Mysql);
//! assert_eq!(preview, "UPDATE `users` SET `name` = 'Jane' WHERE `id` = 1");
//!
//! let statements = split_statements("SELECT $$ a; b $$; SELECT 2", Dialect::Postgresql);
//! assert_eq!(statements.len(), 2);
//! ```
//!
//! ## Options
//!
//! Query building accepts explicit `QueryOptions`:
//!
//! ```rust
//! use sql_edit_core::{Dialect, QueryOptions};
//!
//! let options = QueryOptions::builder(Dialect::Postgresql)
//!     .returning(false)              // Skip RETURNING * (default: emitted where supported)
//!     .qualify_default_schema(true)  // Emit "public". too (default: implied schemas omitted)
//!     .build();
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod sql;
pub mod types;
pub mod validate;

// Re-export main types for convenience
pub use config::{QueryOptions, QueryOptionsBuilder};
pub use dialect::{Dialect, DialectConfig, SQL_PARSER_CONFIGS};
pub use error::{Result, SqlEditError};
pub use types::{
    BuiltQuery, ColumnChange, ColumnRef, DeleteOperation, EditContext, EditOperation,
    InsertOperation, PrimaryKeyValue, Row, UpdateOperation, ValidationResult,
};
pub use validate::validate_operation;

pub use sql::builder::{
    build_batch_preview_sql, build_batch_preview_sql_with, build_batch_queries,
    build_batch_queries_with, build_preview_sql, build_preview_sql_with, build_query,
    build_query_with, try_build_batch_queries, try_build_query,
};
pub use sql::splitter::{
    StatementSpan, StatementSplitter, create_statement_splitter, split_statement_spans,
    split_statements, statement_at_offset,
};

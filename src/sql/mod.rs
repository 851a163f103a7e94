//! SQL utilities for row editing
//!
//! Provides statement splitting, identifier quoting, value formatting, and
//! query building.

pub mod builder;
pub mod format;
pub mod sanitize;
pub mod splitter;

pub use builder::{
    build_batch_preview_sql, build_batch_preview_sql_with, build_batch_queries,
    build_batch_queries_with, build_preview_sql, build_preview_sql_with, build_query,
    build_query_with, try_build_batch_queries, try_build_query,
};
pub use format::{is_json_type, quote_literal, render_literal, serialize_param};
pub use sanitize::{qualified_table_name, quote_identifier, schema_is_qualified};
pub use splitter::{
    StatementSpan, StatementSplitter, create_statement_splitter, split_statement_spans,
    split_statements, statement_at_offset,
};

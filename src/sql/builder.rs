//! Statement building for row edits
//!
//! Turns validated [`EditOperation`]s into parameterized statements and into
//! human-readable previews. Both outputs come from the same statement
//! skeleton; only the way each value is emitted differs, so the i-th
//! parameter of a built query always matches the i-th literal of its preview.

use serde_json::Value;

use crate::config::QueryOptions;
use crate::dialect::Dialect;
use crate::error::{Result, SqlEditError};
use crate::sql::format::{render_literal, serialize_param};
use crate::sql::sanitize::{qualified_table_name, quote_identifier};
use crate::types::{
    BuiltQuery, DeleteOperation, EditContext, EditOperation, InsertOperation, PrimaryKeyValue,
    UpdateOperation,
};
use crate::validate::validate_operation;

/// Emits one value into a statement and returns its SQL text
trait Binder {
    fn bind(&mut self, value: &Value, data_type: &str) -> String;
}

/// Collects parameters and emits dialect placeholders
struct ParamBinder {
    dialect: Dialect,
    params: Vec<Value>,
}

impl Binder for ParamBinder {
    fn bind(&mut self, value: &Value, data_type: &str) -> String {
        self.params.push(serialize_param(value, data_type));
        self.dialect.placeholder(self.params.len())
    }
}

/// Emits literals in place of placeholders
struct LiteralBinder;

impl Binder for LiteralBinder {
    fn bind(&mut self, value: &Value, data_type: &str) -> String {
        render_literal(value, data_type)
    }
}

// ============================================================================
// Statement Skeletons
// ============================================================================

fn table_name(context: &EditContext, options: &QueryOptions) -> String {
    qualified_table_name(
        &context.schema,
        &context.table,
        options.dialect,
        options.qualify_default_schema,
    )
}

fn where_clause(keys: &[PrimaryKeyValue], dialect: Dialect, binder: &mut impl Binder) -> String {
    keys.iter()
        .map(|key| {
            format!(
                "{} = {}",
                quote_identifier(&key.column, dialect),
                binder.bind(&key.value, &key.data_type)
            )
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn returning_clause(sql: &mut String, options: &QueryOptions) {
    if options.emits_returning() {
        sql.push_str(" RETURNING *");
    }
}

fn render_update(
    op: &UpdateOperation,
    context: &EditContext,
    options: &QueryOptions,
    binder: &mut impl Binder,
) -> String {
    let dialect = options.dialect;
    let set_clauses = op
        .changes
        .iter()
        .map(|change| {
            format!(
                "{} = {}",
                quote_identifier(&change.column, dialect),
                binder.bind(&change.new_value, &change.data_type)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    let where_sql = where_clause(&op.primary_keys, dialect, binder);

    let mut sql = format!(
        "UPDATE {} SET {} WHERE {}",
        table_name(context, options),
        set_clauses,
        where_sql
    );
    returning_clause(&mut sql, options);
    sql
}

/// Columns of an insert with their values and data types, in statement order
///
/// The operation's column list decides the order; remaining value keys follow
/// in map order. Columns without a value are undefined and left out.
fn insert_entries<'a>(
    op: &'a InsertOperation,
    context: &'a EditContext,
) -> Vec<(&'a str, &'a Value, &'a str)> {
    let data_type = |name: &'a str, declared: &'a str| -> &'a str {
        if declared.is_empty() {
            context.column_type(name).unwrap_or("")
        } else {
            declared
        }
    };

    let mut entries: Vec<(&'a str, &'a Value, &'a str)> = Vec::with_capacity(op.values.len());
    for column in &op.columns {
        if entries.iter().any(|(name, _, _)| *name == column.name) {
            continue;
        }
        if let Some(value) = op.values.get(&column.name) {
            entries.push((
                column.name.as_str(),
                value,
                data_type(column.name.as_str(), column.data_type.as_str()),
            ));
        }
    }
    for (name, value) in &op.values {
        if !op.columns.iter().any(|c| &c.name == name) {
            entries.push((name.as_str(), value, data_type(name.as_str(), "")));
        }
    }
    entries
}

fn render_insert(
    op: &InsertOperation,
    context: &EditContext,
    options: &QueryOptions,
    binder: &mut impl Binder,
) -> String {
    let dialect = options.dialect;
    let table = table_name(context, options);
    let entries = insert_entries(op, context);

    let mut sql = if entries.is_empty() {
        match dialect {
            Dialect::Mysql => format!("INSERT INTO {} () VALUES ()", table),
            _ => format!("INSERT INTO {} DEFAULT VALUES", table),
        }
    } else {
        let mut columns = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (name, value, data_type) in entries {
            columns.push(quote_identifier(name, dialect));
            values.push(binder.bind(value, data_type));
        }
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            values.join(", ")
        )
    };
    returning_clause(&mut sql, options);
    sql
}

fn render_delete(
    op: &DeleteOperation,
    context: &EditContext,
    options: &QueryOptions,
    binder: &mut impl Binder,
) -> String {
    let where_sql = where_clause(&op.primary_keys, options.dialect, binder);
    let mut sql = format!("DELETE FROM {} WHERE {}", table_name(context, options), where_sql);
    returning_clause(&mut sql, options);
    sql
}

fn render(
    operation: &EditOperation,
    context: &EditContext,
    options: &QueryOptions,
    binder: &mut impl Binder,
) -> String {
    match operation {
        EditOperation::Update(op) => render_update(op, context, options, binder),
        EditOperation::Insert(op) => render_insert(op, context, options, binder),
        EditOperation::Delete(op) => render_delete(op, context, options, binder),
    }
}

// ============================================================================
// Query Building
// ============================================================================

/// Build the parameterized statement for a validated operation
///
/// # Example
/// ```
/// use sql_edit_core::{
///     ColumnChange, Dialect, EditContext, EditOperation, PrimaryKeyValue, build_query,
/// };
///
/// let op = EditOperation::update(
///     vec![PrimaryKeyValue::new("id", 1, "integer")],
///     vec![ColumnChange::new("name", "John", "Jane", "varchar")],
/// );
/// let query = build_query(&op, &EditContext::new("public", "users"), Dialect::Postgresql);
///
/// assert_eq!(query.sql, "UPDATE \"users\" SET \"name\" = $1 WHERE \"id\" = $2 RETURNING *");
/// assert_eq!(query.params, vec![serde_json::json!("Jane"), serde_json::json!(1)]);
/// ```
pub fn build_query(
    operation: &EditOperation,
    context: &EditContext,
    dialect: Dialect,
) -> BuiltQuery {
    build_query_with(operation, context, &QueryOptions::new(dialect))
}

/// Build the parameterized statement for a validated operation with explicit options
pub fn build_query_with(
    operation: &EditOperation,
    context: &EditContext,
    options: &QueryOptions,
) -> BuiltQuery {
    let mut binder = ParamBinder {
        dialect: options.dialect,
        params: Vec::new(),
    };
    let sql = render(operation, context, options, &mut binder);

    tracing::debug!(
        dialect = %options.dialect,
        operation = operation.kind(),
        id = operation.id(),
        params = binder.params.len(),
        "Built edit query"
    );
    tracing::trace!(sql = %sql, "Generated edit statement");

    BuiltQuery {
        sql,
        params: binder.params,
    }
}

/// Build one statement per operation, in order
pub fn build_batch_queries(
    operations: &[EditOperation],
    context: &EditContext,
    dialect: Dialect,
) -> Vec<BuiltQuery> {
    build_batch_queries_with(operations, context, &QueryOptions::new(dialect))
}

/// Build one statement per operation, in order, with explicit options
pub fn build_batch_queries_with(
    operations: &[EditOperation],
    context: &EditContext,
    options: &QueryOptions,
) -> Vec<BuiltQuery> {
    tracing::debug!(
        dialect = %options.dialect,
        count = operations.len(),
        "Building edit batch"
    );
    operations
        .iter()
        .map(|op| build_query_with(op, context, options))
        .collect()
}

/// Validate an operation, then build it
pub fn try_build_query(
    operation: &EditOperation,
    context: &EditContext,
    options: &QueryOptions,
) -> Result<BuiltQuery> {
    let validation = validate_operation(operation);
    if !validation.valid {
        tracing::warn!(id = operation.id(), reason = ?validation.error, "Rejected edit operation");
    }
    validation.into_result()?;
    Ok(build_query_with(operation, context, options))
}

/// Validate every operation, then build them all
///
/// Nothing is built when any operation is rejected; the first rejection is
/// reported with its operation id.
pub fn try_build_batch_queries(
    operations: &[EditOperation],
    context: &EditContext,
    options: &QueryOptions,
) -> Result<Vec<BuiltQuery>> {
    for operation in operations {
        let validation = validate_operation(operation);
        if !validation.valid {
            let reason = validation
                .error
                .unwrap_or_else(|| "Invalid operation".to_string());
            tracing::warn!(id = operation.id(), reason = %reason, "Rejected edit operation");
            return Err(SqlEditError::invalid_operation(operation.id(), reason));
        }
    }
    Ok(build_batch_queries_with(operations, context, options))
}

// ============================================================================
// Preview Rendering
// ============================================================================

/// Render an operation as SQL with its values inlined, for review
///
/// The result is meant for display and contains no placeholders.
pub fn build_preview_sql(
    operation: &EditOperation,
    context: &EditContext,
    dialect: Dialect,
) -> String {
    build_preview_sql_with(operation, context, &QueryOptions::new(dialect))
}

/// Render a preview with explicit options
pub fn build_preview_sql_with(
    operation: &EditOperation,
    context: &EditContext,
    options: &QueryOptions,
) -> String {
    render(operation, context, options, &mut LiteralBinder)
}

/// Render one preview per operation, in order
pub fn build_batch_preview_sql(
    operations: &[EditOperation],
    context: &EditContext,
    dialect: Dialect,
) -> Vec<String> {
    build_batch_preview_sql_with(operations, context, &QueryOptions::new(dialect))
}

/// Render one preview per operation, in order, with explicit options
pub fn build_batch_preview_sql_with(
    operations: &[EditOperation],
    context: &EditContext,
    options: &QueryOptions,
) -> Vec<String> {
    operations
        .iter()
        .map(|op| build_preview_sql_with(op, context, options))
        .collect()
}

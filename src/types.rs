//! Core type definitions for row editing
//!
//! Includes column references, primary key values, the three edit operation
//! kinds, the per-call edit context, and the value objects produced by the
//! builder and validator.
//!
//! Runtime values are `serde_json::Value`. A value that is *absent* (a key
//! missing from an insert's `values` map) is undefined and is left out of the
//! generated statement; an explicit `null` is SQL `NULL`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SqlEditError};

/// A row keyed by column name
pub type Row = Map<String, Value>;

// ============================================================================
// Column Metadata
// ============================================================================

/// A column's name and declared data type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub name: String,
    /// Declared type as reported by the database (e.g. `jsonb`, `boolean`)
    #[serde(default)]
    pub data_type: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// One component of a row's identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyValue {
    pub column: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub data_type: String,
}

impl PrimaryKeyValue {
    pub fn new(
        column: impl Into<String>,
        value: impl Into<Value>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            data_type: data_type.into(),
        }
    }
}

/// A single cell change inside an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnChange {
    pub column: String,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
    #[serde(default)]
    pub data_type: String,
}

impl ColumnChange {
    pub fn new(
        column: impl Into<String>,
        old_value: impl Into<Value>,
        new_value: impl Into<Value>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            data_type: data_type.into(),
        }
    }
}

// ============================================================================
// Edit Operations
// ============================================================================

/// Update of an existing row identified by its primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOperation {
    pub id: String,
    pub primary_keys: Vec<PrimaryKeyValue>,
    pub changes: Vec<ColumnChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_row: Option<Row>,
}

/// Insert of a new row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOperation {
    pub id: String,
    /// Column values; columns without an entry are omitted from the statement
    pub values: Row,
    /// Column order and data types for `values`
    #[serde(default)]
    pub columns: Vec<ColumnRef>,
}

/// Delete of an existing row identified by its primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOperation {
    pub id: String,
    pub primary_keys: Vec<PrimaryKeyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_row: Option<Row>,
}

/// A structured row edit produced by the editing layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditOperation {
    Update(UpdateOperation),
    Insert(InsertOperation),
    Delete(DeleteOperation),
}

fn new_operation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl EditOperation {
    /// Create an update with a generated id
    pub fn update(primary_keys: Vec<PrimaryKeyValue>, changes: Vec<ColumnChange>) -> Self {
        EditOperation::Update(UpdateOperation {
            id: new_operation_id(),
            primary_keys,
            changes,
            original_row: None,
        })
    }

    /// Create an insert with a generated id
    pub fn insert(values: Row, columns: Vec<ColumnRef>) -> Self {
        EditOperation::Insert(InsertOperation {
            id: new_operation_id(),
            values,
            columns,
        })
    }

    /// Create a delete with a generated id
    pub fn delete(primary_keys: Vec<PrimaryKeyValue>) -> Self {
        EditOperation::Delete(DeleteOperation {
            id: new_operation_id(),
            primary_keys,
            original_row: None,
        })
    }

    /// Replace the operation id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        match &mut self {
            EditOperation::Update(op) => op.id = id,
            EditOperation::Insert(op) => op.id = id,
            EditOperation::Delete(op) => op.id = id,
        }
        self
    }

    /// Attach the row as it was before the edit (ignored for inserts)
    pub fn with_original_row(mut self, row: Row) -> Self {
        match &mut self {
            EditOperation::Update(op) => op.original_row = Some(row),
            EditOperation::Delete(op) => op.original_row = Some(row),
            EditOperation::Insert(_) => {}
        }
        self
    }

    pub fn id(&self) -> &str {
        match self {
            EditOperation::Update(op) => &op.id,
            EditOperation::Insert(op) => &op.id,
            EditOperation::Delete(op) => &op.id,
        }
    }

    /// Lowercase operation kind, matching the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            EditOperation::Update(_) => "update",
            EditOperation::Insert(_) => "insert",
            EditOperation::Delete(_) => "delete",
        }
    }

    /// Decode an operation from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Edit Context
// ============================================================================

/// Table being edited, supplied fresh with every call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    /// Schema name; empty means unqualified
    #[serde(default)]
    pub schema: String,
    pub table: String,
    #[serde(default)]
    pub primary_key_columns: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ColumnRef>,
}

impl EditContext {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            primary_key_columns: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Set the primary key column names
    pub fn with_primary_keys<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the column metadata
    pub fn with_columns(mut self, columns: Vec<ColumnRef>) -> Self {
        self.columns = columns;
        self
    }

    /// Declared data type of a column, if known
    pub fn column_type(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.data_type.as_str())
    }

    /// Decode a context from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// A parameterized statement ready for a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltQuery {
    pub sql: String,
    /// Bound values, in placeholder order
    pub params: Vec<Value>,
}

/// Outcome of validating an edit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Convert into a `Result`, mapping a rejection to `SqlEditError::Validation`
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(SqlEditError::validation(
                self.error.unwrap_or_else(|| "Invalid operation".to_string()),
            ))
        }
    }
}

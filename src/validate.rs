//! Precondition checks for edit operations
//!
//! Validation is independent of the target dialect and runs before an
//! operation reaches the query builder or preview renderer.

use crate::types::{EditOperation, ValidationResult};

pub const MISSING_PRIMARY_KEY_UPDATE: &str = "Update requires a primary key";
pub const MISSING_PRIMARY_KEY_DELETE: &str = "Delete requires a primary key";
pub const NO_CHANGES: &str = "No changes to apply";
pub const EMPTY_ROW: &str = "Cannot insert an empty row";

/// Check that an operation can be turned into a statement
///
/// - Updates need at least one primary key value and one change.
/// - Deletes need at least one primary key value.
/// - Inserts need at least one value that is present and not null.
pub fn validate_operation(operation: &EditOperation) -> ValidationResult {
    match operation {
        EditOperation::Update(op) => {
            if op.primary_keys.is_empty() {
                ValidationResult::invalid(MISSING_PRIMARY_KEY_UPDATE)
            } else if op.changes.is_empty() {
                ValidationResult::invalid(NO_CHANGES)
            } else {
                ValidationResult::ok()
            }
        }
        EditOperation::Insert(op) => {
            if op.values.values().all(|v| v.is_null()) {
                ValidationResult::invalid(EMPTY_ROW)
            } else {
                ValidationResult::ok()
            }
        }
        EditOperation::Delete(op) => {
            if op.primary_keys.is_empty() {
                ValidationResult::invalid(MISSING_PRIMARY_KEY_DELETE)
            } else {
                ValidationResult::ok()
            }
        }
    }
}

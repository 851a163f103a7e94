//! Options for query building
//!
//! Provides a builder pattern for the per-call options of the query builder
//! and preview renderer. Options are always passed explicitly.

use crate::dialect::Dialect;

/// Options controlling how edit operations are rendered to SQL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Target dialect (default: PostgreSQL)
    pub dialect: Dialect,
    /// Append `RETURNING *` where the dialect supports it (default: true)
    pub returning: bool,
    /// Emit the schema prefix even for the dialect's implicit schema (default: false)
    pub qualify_default_schema: bool,
}

impl QueryOptions {
    /// Default options for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        QueryOptionsBuilder::new(dialect).build()
    }

    /// Create a new options builder
    pub fn builder(dialect: Dialect) -> QueryOptionsBuilder {
        QueryOptionsBuilder::new(dialect)
    }

    /// Whether a `RETURNING *` clause is emitted
    pub fn emits_returning(&self) -> bool {
        self.returning && self.dialect.supports_returning()
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl From<Dialect> for QueryOptions {
    fn from(dialect: Dialect) -> Self {
        Self::new(dialect)
    }
}

/// Builder for QueryOptions
#[derive(Debug)]
pub struct QueryOptionsBuilder {
    dialect: Dialect,
    returning: bool,
    qualify_default_schema: bool,
}

impl QueryOptionsBuilder {
    /// Create a new builder for the dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            returning: true,
            qualify_default_schema: false,
        }
    }

    /// Enable or disable the `RETURNING *` clause (default: true)
    pub fn returning(mut self, enabled: bool) -> Self {
        self.returning = enabled;
        self
    }

    /// Disable the `RETURNING *` clause
    pub fn without_returning(mut self) -> Self {
        self.returning = false;
        self
    }

    /// Always qualify table names with their schema (default: false)
    pub fn qualify_default_schema(mut self, enabled: bool) -> Self {
        self.qualify_default_schema = enabled;
        self
    }

    /// Build the options
    pub fn build(self) -> QueryOptions {
        QueryOptions {
            dialect: self.dialect,
            returning: self.returning,
            qualify_default_schema: self.qualify_default_schema,
        }
    }
}

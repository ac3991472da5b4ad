//! Schema mapping errors
//!
//! Error codes:
//! - ORM_SCHEMA_UNMAPPED_FIELD
//! - ORM_SCHEMA_MISSING_IDENTITY
//! - ORM_SCHEMA_DUPLICATE_IDENTITY
//! - ORM_SCHEMA_DUPLICATE_COLUMN

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while deriving column definitions from a record type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("table '{table}': field '{field}' has unmapped type '{type_name}'")]
    UnmappedField {
        table: String,
        field: String,
        type_name: String,
    },

    #[error("table '{0}': record declares no identity field")]
    MissingIdentity(String),

    #[error("table '{0}': record declares more than one identity field")]
    DuplicateIdentity(String),

    #[error("table '{table}': column '{column}' declared twice")]
    DuplicateColumn { table: String, column: String },
}

impl SchemaError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnmappedField { .. } => "ORM_SCHEMA_UNMAPPED_FIELD",
            SchemaError::MissingIdentity(_) => "ORM_SCHEMA_MISSING_IDENTITY",
            SchemaError::DuplicateIdentity(_) => "ORM_SCHEMA_DUPLICATE_IDENTITY",
            SchemaError::DuplicateColumn { .. } => "ORM_SCHEMA_DUPLICATE_COLUMN",
        }
    }
}

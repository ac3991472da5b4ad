//! Driver error types
//!
//! Error kinds:
//! - InvalidInput: an unset identity passed to get/update/delete
//! - TypeMismatch: a value could not move between field and column
//! - NotFound: get found no row for the identity
//! - StoreFailure: the table store rejected an operation
//! - Definition: the record's field declaration cannot be mapped
//! - IdExhausted: the identity space of a table is used up
//!
//! Every error is terminal for its call; there is no partial success.

use std::fmt;
use thiserror::Error;

use crate::codec::CodecError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for driver operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Store operations, for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTable,
    GetTable,
    GetRow,
    GetRows,
    InsertRow,
    ReplaceRow,
    DeleteRow,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateTable => "create table",
            Operation::GetTable => "get table",
            Operation::GetRow => "get row",
            Operation::GetRows => "get rows",
            Operation::InsertRow => "insert row",
            Operation::ReplaceRow => "replace row",
            Operation::DeleteRow => "delete row",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad classification of driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    TypeMismatch,
    NotFound,
    StoreFailure,
    Definition,
    IdExhausted,
}

/// Driver error
#[derive(Debug, Error)]
pub enum OrmError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("table '{table}': {source}")]
    Codec {
        table: String,
        #[source]
        source: CodecError,
    },

    #[error("{table} with id {id} not found")]
    NotFound { table: String, id: i64 },

    #[error("{operation} on table '{table}' failed: {source}")]
    Store {
        table: String,
        operation: Operation,
        #[source]
        source: StoreError,
    },

    #[error("identity space exhausted for table '{0}'")]
    IdExhausted(String),
}

impl OrmError {
    /// Wrap a store error with its table and operation
    pub fn store(table: impl Into<String>, operation: Operation, source: StoreError) -> Self {
        OrmError::Store {
            table: table.into(),
            operation,
            source,
        }
    }

    /// Wrap a codec error with its table
    pub fn codec(table: impl Into<String>, source: CodecError) -> Self {
        OrmError::Codec {
            table: table.into(),
            source,
        }
    }

    /// An unset identity reached an operation that needs one
    pub fn unset_identity(table: &str) -> Self {
        OrmError::InvalidInput(format!("{} id should be larger than 0", table))
    }

    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrmError::InvalidInput(_) => ErrorKind::InvalidInput,
            OrmError::Schema(_) => ErrorKind::Definition,
            OrmError::Codec { .. } => ErrorKind::TypeMismatch,
            OrmError::NotFound { .. } => ErrorKind::NotFound,
            OrmError::Store { .. } => ErrorKind::StoreFailure,
            OrmError::IdExhausted(_) => ErrorKind::IdExhausted,
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            OrmError::InvalidInput(_) => "ORM_INVALID_INPUT",
            OrmError::Schema(e) => e.code(),
            OrmError::Codec { source, .. } => source.code(),
            OrmError::NotFound { .. } => "ORM_NOT_FOUND",
            OrmError::Store { source, .. } => source.code(),
            OrmError::IdExhausted(_) => "ORM_ID_EXHAUSTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_carries_context() {
        let err = OrmError::store(
            "Widget",
            Operation::InsertRow,
            StoreError::DuplicateKey {
                table: "Widget".into(),
                key: "1".into(),
            },
        );
        let display = err.to_string();
        assert!(display.contains("insert row"));
        assert!(display.contains("Widget"));
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert_eq!(err.code(), "ORM_STORE_DUPLICATE_KEY");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(OrmError::unset_identity("Widget").kind(), ErrorKind::InvalidInput);
        assert_eq!(
            OrmError::NotFound { table: "Widget".into(), id: 4 }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            OrmError::from(SchemaError::MissingIdentity("Widget".into())).kind(),
            ErrorKind::Definition
        );
        assert_eq!(
            OrmError::codec("Widget", CodecError::unknown_field("Widget", "x")).kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = OrmError::NotFound { table: "Widget".into(), id: 10000 };
        assert_eq!(err.to_string(), "Widget with id 10000 not found");
        assert_eq!(err.code(), "ORM_NOT_FOUND");
    }
}

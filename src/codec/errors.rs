//! Record codec errors
//!
//! Every codec failure is a type mismatch in the broad sense: a value could
//! not be moved between a record field and a row column.

use thiserror::Error;

use crate::schema::ColumnType;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding a record to a row or decoding a row into one
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("field '{field}': type '{type_name}' not recognized")]
    TypeMismatch { field: String, type_name: String },

    #[error("column '{column}': expected {expected}, got {actual}")]
    ValueMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("column '{column}': value {value} does not fit {target}")]
    OutOfRange {
        column: String,
        value: String,
        target: &'static str,
    },

    #[error("record '{record}' has no settable field '{field}'")]
    UnknownField { record: String, field: String },

    #[error("row has {actual} values but table '{table}' defines {expected} columns")]
    ColumnCountMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },
}

impl CodecError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::TypeMismatch { .. } => "ORM_CODEC_TYPE_MISMATCH",
            CodecError::ValueMismatch { .. } => "ORM_CODEC_VALUE_MISMATCH",
            CodecError::OutOfRange { .. } => "ORM_CODEC_OUT_OF_RANGE",
            CodecError::UnknownField { .. } => "ORM_CODEC_UNKNOWN_FIELD",
            CodecError::ColumnCountMismatch { .. } => "ORM_CODEC_COLUMN_COUNT",
        }
    }

    /// A value of the wrong column type reached a field or column
    pub fn value_mismatch(column: impl Into<String>, expected: ColumnType, actual: ColumnType) -> Self {
        CodecError::ValueMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }

    /// A column names no settable field of the record
    pub fn unknown_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::UnknownField {
            record: record.into(),
            field: field.into(),
        }
    }
}

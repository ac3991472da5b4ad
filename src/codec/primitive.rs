//! Type-directed conversion between Rust field types and column values
//!
//! Implemented for exactly the supported set: bool, i32, i64, String, u32, u64.
//! Decoding widens 32-bit column values into 64-bit fields and narrows 64-bit
//! values into 32-bit fields only when the value fits.

use super::errors::{CodecError, CodecResult};
use super::value::ColumnValue;
use crate::schema::ColumnType;

/// A Rust type that can be stored in a single column.
pub trait Primitive: Sized {
    /// The column type this field maps to
    const COLUMN_TYPE: ColumnType;

    /// Wraps the field's current value
    fn to_column_value(&self) -> ColumnValue;

    /// Converts a column value into the field type.
    ///
    /// `column` names the source column for error context.
    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self>;
}

fn out_of_range(column: &str, value: impl ToString, target: &'static str) -> CodecError {
    CodecError::OutOfRange {
        column: column.to_string(),
        value: value.to_string(),
        target,
    }
}

impl Primitive for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Bool;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::Bool(*self)
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        match value {
            ColumnValue::Bool(v) => Ok(v),
            other => Err(CodecError::value_mismatch(column, Self::COLUMN_TYPE, other.column_type())),
        }
    }
}

impl Primitive for i32 {
    const COLUMN_TYPE: ColumnType = ColumnType::Int32;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::Int32(*self)
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        match value {
            ColumnValue::Int32(v) => Ok(v),
            ColumnValue::Int64(v) => i32::try_from(v).map_err(|_| out_of_range(column, v, "int32")),
            other => Err(CodecError::value_mismatch(column, Self::COLUMN_TYPE, other.column_type())),
        }
    }
}

impl Primitive for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Int64;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::Int64(*self)
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        value
            .as_i64()
            .ok_or_else(|| CodecError::value_mismatch(column, Self::COLUMN_TYPE, value.column_type()))
    }
}

impl Primitive for String {
    const COLUMN_TYPE: ColumnType = ColumnType::String;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::String(self.clone())
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        match value {
            ColumnValue::String(v) => Ok(v),
            other => Err(CodecError::value_mismatch(column, Self::COLUMN_TYPE, other.column_type())),
        }
    }
}

impl Primitive for u32 {
    const COLUMN_TYPE: ColumnType = ColumnType::Uint32;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::Uint32(*self)
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        match value {
            ColumnValue::Uint32(v) => Ok(v),
            ColumnValue::Uint64(v) => u32::try_from(v).map_err(|_| out_of_range(column, v, "uint32")),
            other => Err(CodecError::value_mismatch(column, Self::COLUMN_TYPE, other.column_type())),
        }
    }
}

impl Primitive for u64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Uint64;

    fn to_column_value(&self) -> ColumnValue {
        ColumnValue::Uint64(*self)
    }

    fn from_column_value(column: &str, value: ColumnValue) -> CodecResult<Self> {
        value
            .as_u64()
            .ok_or_else(|| CodecError::value_mismatch(column, Self::COLUMN_TYPE, value.column_type()))
    }
}

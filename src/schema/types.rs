//! Column type definitions
//!
//! Supported column types:
//! - bool: Boolean
//! - int32: 32-bit signed integer
//! - int64: 64-bit signed integer
//! - string: UTF-8 string
//! - uint32: 32-bit unsigned integer
//! - uint64: 64-bit unsigned integer
//!
//! The set is closed. Nested, array and byte columns are not supported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the primary key column every mapped table carries.
pub const ID_COLUMN: &str = "Id";

/// Primitive column types understood by the table store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    /// Boolean
    Bool,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// UTF-8 string
    String,
    /// 32-bit unsigned integer
    Uint32,
    /// 64-bit unsigned integer
    Uint64,
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::String => "string",
            ColumnType::Uint32 => "uint32",
            ColumnType::Uint64 => "uint64",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single column of a table: (name, type, is-key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Column data type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether the column is part of the row key
    pub key: bool,
}

impl ColumnDef {
    /// Create a non-key column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            key: false,
        }
    }

    /// Create a key column
    pub fn key(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            key: true,
        }
    }

    /// The identity column: `Id`, int64, key.
    pub fn identity() -> Self {
        Self::key(ID_COLUMN, ColumnType::Int64)
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type)?;
        if self.key {
            write!(f, " KEY")?;
        }
        Ok(())
    }
}

/// A table's name and its ordered column definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Columns in row order
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Create a new table schema
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Returns the column with the given name
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the row position of the given column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Positions of the key columns, in definition order
    pub fn key_positions(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.key)
            .map(|(i, _)| i)
            .collect()
    }

    /// Position of the identity column.
    ///
    /// Falls back to the first key column for tables not created by the mapper.
    pub fn identity_position(&self) -> Option<usize> {
        self.position(ID_COLUMN)
            .filter(|&i| self.columns[i].key)
            .or_else(|| self.key_positions().first().copied())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

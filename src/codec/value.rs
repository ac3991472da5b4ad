//! Typed column values and rows

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::ColumnType;

/// A single typed column value.
///
/// One variant per `ColumnType`; the ordering derive lets rows be keyed by
/// their key-column values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum ColumnValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    String(String),
    Uint32(u32),
    Uint64(u64),
}

impl ColumnValue {
    /// The column type this value belongs to
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnValue::Bool(_) => ColumnType::Bool,
            ColumnValue::Int32(_) => ColumnType::Int32,
            ColumnValue::Int64(_) => ColumnType::Int64,
            ColumnValue::String(_) => ColumnType::String,
            ColumnValue::Uint32(_) => ColumnType::Uint32,
            ColumnValue::Uint64(_) => ColumnType::Uint64,
        }
    }

    /// Returns the value as i64 when it is a signed integer (i32 widens)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ColumnValue::Int32(v) => Some(i64::from(*v)),
            ColumnValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as u64 when it is an unsigned integer (u32 widens)
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ColumnValue::Uint32(v) => Some(u64::from(*v)),
            ColumnValue::Uint64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Bool(v) => write!(f, "{}", v),
            ColumnValue::Int32(v) => write!(f, "{}", v),
            ColumnValue::Int64(v) => write!(f, "{}", v),
            ColumnValue::String(v) => write!(f, "{:?}", v),
            ColumnValue::Uint32(v) => write!(f, "{}", v),
            ColumnValue::Uint64(v) => write!(f, "{}", v),
        }
    }
}

/// An ordered list of column values, aligned with a table's column definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub columns: Vec<ColumnValue>,
}

impl Row {
    /// Create a row from its values
    pub fn new(columns: Vec<ColumnValue>) -> Self {
        Self { columns }
    }

    /// Value at the given position
    pub fn get(&self, position: usize) -> Option<&ColumnValue> {
        self.columns.get(position)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnValue> {
        self.columns.iter()
    }

    /// Values at the given positions, in order. None if any is missing.
    pub fn project(&self, positions: &[usize]) -> Option<Vec<ColumnValue>> {
        positions.iter().map(|&i| self.columns.get(i).cloned()).collect()
    }
}

impl From<Vec<ColumnValue>> for Row {
    fn from(columns: Vec<ColumnValue>) -> Self {
        Self::new(columns)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a ColumnValue;
    type IntoIter = std::slice::Iter<'a, ColumnValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

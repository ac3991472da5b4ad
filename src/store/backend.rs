//! # Table Store Trait
//!
//! The key-row persistence service the driver delegates to. Keys are the
//! values of a table's key columns, in definition order.

use std::fmt;

use super::errors::StoreResult;
use crate::codec::{ColumnValue, Row};
use crate::schema::{ColumnDef, TableSchema};

/// Lazily produced rows; drained by the caller before its call returns
pub type RowIter<'a> = Box<dyn Iterator<Item = StoreResult<Row>> + 'a>;

/// Backend trait for table storage
pub trait TableStore: Send + Sync + fmt::Debug {
    /// Create a table. Fails if it exists or the definitions are invalid.
    fn create_table(&self, name: &str, columns: &[ColumnDef]) -> StoreResult<()>;

    /// Fetch a table's schema
    fn get_table(&self, name: &str) -> StoreResult<TableSchema>;

    /// Fetch the row with exactly this key
    fn get_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<Option<Row>>;

    /// Fetch all rows whose leading key columns equal `key_prefix`.
    /// An empty prefix selects every row.
    fn get_rows(&self, name: &str, key_prefix: &[ColumnValue]) -> StoreResult<RowIter<'_>>;

    /// Insert a new row. Fails if its key already exists.
    fn insert_row(&self, name: &str, row: Row) -> StoreResult<()>;

    /// Replace an existing row. Fails if its key does not exist.
    fn replace_row(&self, name: &str, row: Row) -> StoreResult<()>;

    /// Delete the row with this key. Deleting a missing row is not an error.
    fn delete_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<()>;
}

impl<T: TableStore + ?Sized> TableStore for &T {
    fn create_table(&self, name: &str, columns: &[ColumnDef]) -> StoreResult<()> {
        (**self).create_table(name, columns)
    }

    fn get_table(&self, name: &str) -> StoreResult<TableSchema> {
        (**self).get_table(name)
    }

    fn get_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<Option<Row>> {
        (**self).get_row(name, key)
    }

    fn get_rows(&self, name: &str, key_prefix: &[ColumnValue]) -> StoreResult<RowIter<'_>> {
        (**self).get_rows(name, key_prefix)
    }

    fn insert_row(&self, name: &str, row: Row) -> StoreResult<()> {
        (**self).insert_row(name, row)
    }

    fn replace_row(&self, name: &str, row: Row) -> StoreResult<()> {
        (**self).replace_row(name, row)
    }

    fn delete_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<()> {
        (**self).delete_row(name, key)
    }
}

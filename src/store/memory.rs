//! # In-Memory Backend
//!
//! Process-local table store. Serves as the stand-in for a host ledger's
//! table API in tests and embedded use.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::backend::{RowIter, TableStore};
use super::errors::{StoreError, StoreResult};
use super::table::StoredTable;
use crate::codec::{ColumnValue, Row};
use crate::schema::{ColumnDef, TableSchema};

/// In-memory table store
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, StoredTable>>,
}

impl MemoryTableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> StoreResult<Vec<String>> {
        let mut names: Vec<_> = self.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Number of rows in a table
    pub fn row_count(&self, name: &str) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(Self::table(&tables, name)?.len())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, StoredTable>>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, StoredTable>>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn table<'a>(tables: &'a HashMap<String, StoredTable>, name: &str) -> StoreResult<&'a StoredTable> {
        tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn table_mut<'a>(
        tables: &'a mut HashMap<String, StoredTable>,
        name: &str,
    ) -> StoreResult<&'a mut StoredTable> {
        tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }
}

impl TableStore for MemoryTableStore {
    fn create_table(&self, name: &str, columns: &[ColumnDef]) -> StoreResult<()> {
        let table = StoredTable::new(name, columns)?;
        let mut tables = self.write()?;
        if tables.contains_key(name) {
            return Err(StoreError::TableAlreadyExists(name.to_string()));
        }
        debug!(table = name, columns = columns.len(), "created table");
        tables.insert(name.to_string(), table);
        Ok(())
    }

    fn get_table(&self, name: &str) -> StoreResult<TableSchema> {
        let tables = self.read()?;
        Ok(Self::table(&tables, name)?.schema().clone())
    }

    fn get_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<Option<Row>> {
        let tables = self.read()?;
        Self::table(&tables, name)?.get(key)
    }

    fn get_rows(&self, name: &str, key_prefix: &[ColumnValue]) -> StoreResult<RowIter<'_>> {
        let tables = self.read()?;
        let rows = Self::table(&tables, name)?.scan(key_prefix)?;
        drop(tables);
        Ok(Box::new(rows.into_iter().map(Ok)))
    }

    fn insert_row(&self, name: &str, row: Row) -> StoreResult<()> {
        let mut tables = self.write()?;
        Self::table_mut(&mut tables, name)?.insert(row)
    }

    fn replace_row(&self, name: &str, row: Row) -> StoreResult<()> {
        let mut tables = self.write()?;
        Self::table_mut(&mut tables, name)?.replace(row)
    }

    fn delete_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<()> {
        let mut tables = self.write()?;
        Self::table_mut(&mut tables, name)?.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef::identity(), ColumnDef::new("name", ColumnType::String)]
    }

    fn row(id: i64, name: &str) -> Row {
        Row::new(vec![ColumnValue::Int64(id), ColumnValue::String(name.into())])
    }

    #[test]
    fn test_create_table_twice() {
        let store = MemoryTableStore::new();
        store.create_table("Widget", &columns()).unwrap();
        let err = store.create_table("Widget", &columns()).unwrap_err();
        assert_eq!(err, StoreError::TableAlreadyExists("Widget".into()));
    }

    #[test]
    fn test_missing_table() {
        let store = MemoryTableStore::new();
        assert!(matches!(store.get_table("Nope"), Err(StoreError::TableNotFound(_))));
        assert!(matches!(
            store.get_row("Nope", &[ColumnValue::Int64(1)]),
            Err(StoreError::TableNotFound(_))
        ));
        assert!(store.get_rows("Nope", &[]).is_err());
        assert!(store.insert_row("Nope", row(1, "a")).is_err());
    }

    #[test]
    fn test_row_lifecycle() {
        let store = MemoryTableStore::new();
        store.create_table("Widget", &columns()).unwrap();

        store.insert_row("Widget", row(1, "bolt")).unwrap();
        store.replace_row("Widget", row(1, "nut")).unwrap();
        assert_eq!(
            store.get_row("Widget", &[ColumnValue::Int64(1)]).unwrap(),
            Some(row(1, "nut"))
        );

        store.delete_row("Widget", &[ColumnValue::Int64(1)]).unwrap();
        assert_eq!(store.get_row("Widget", &[ColumnValue::Int64(1)]).unwrap(), None);
        assert_eq!(store.row_count("Widget").unwrap(), 0);
    }

    #[test]
    fn test_get_rows_drains_all() {
        let store = MemoryTableStore::new();
        store.create_table("Widget", &columns()).unwrap();
        for id in 1..=3 {
            store.insert_row("Widget", row(id, "w")).unwrap();
        }

        let rows: StoreResult<Vec<_>> = store.get_rows("Widget", &[]).unwrap().collect();
        assert_eq!(rows.unwrap().len(), 3);
    }

    #[test]
    fn test_table_names_sorted() {
        let store = MemoryTableStore::new();
        store.create_table("b", &columns()).unwrap();
        store.create_table("a", &columns()).unwrap();
        assert_eq!(store.table_names().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}

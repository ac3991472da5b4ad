//! In-memory table shared by the store backends
//!
//! Rules:
//! - Definitions are non-empty, uniquely named, and include a key column
//! - Rows match the schema's arity and column types
//! - The row key is its key-column values in definition order
//! - Rows iterate in key order

use std::collections::{BTreeMap, HashSet};

use super::errors::{StoreError, StoreResult};
use crate::codec::{ColumnValue, Row};
use crate::schema::{ColumnDef, TableSchema};

/// A table's schema and its rows, indexed by key
#[derive(Debug, Clone)]
pub struct StoredTable {
    schema: TableSchema,
    key_positions: Vec<usize>,
    rows: BTreeMap<Vec<ColumnValue>, Row>,
}

/// Renders a key for error messages
pub(crate) fn format_key(key: &[ColumnValue]) -> String {
    key.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

impl StoredTable {
    /// Creates an empty table after validating its definitions.
    pub fn new(name: &str, columns: &[ColumnDef]) -> StoreResult<Self> {
        if name.is_empty() {
            return Err(StoreError::InvalidTableName(name.to_string()));
        }

        let invalid = |reason: &str| StoreError::InvalidDefinition {
            table: name.to_string(),
            reason: reason.to_string(),
        };

        if columns.is_empty() {
            return Err(invalid("no columns"));
        }

        let mut names = HashSet::new();
        for column in columns {
            if column.name.is_empty() {
                return Err(invalid("empty column name"));
            }
            if !names.insert(column.name.as_str()) {
                return Err(invalid(&format!("duplicate column '{}'", column.name)));
            }
        }

        let schema = TableSchema::new(name, columns.to_vec());
        let key_positions = schema.key_positions();
        if key_positions.is_empty() {
            return Err(invalid("no key column"));
        }

        Ok(Self {
            schema,
            key_positions,
            rows: BTreeMap::new(),
        })
    }

    /// Rebuilds a table from a schema and rows, e.g. after loading from disk.
    pub fn from_parts(schema: TableSchema, rows: Vec<Row>) -> StoreResult<Self> {
        let mut table = Self::new(&schema.name, &schema.columns)?;
        for row in rows {
            table.insert(row)?;
        }
        Ok(table)
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    /// Rows in key order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fetch the row with exactly this key
    pub fn get(&self, key: &[ColumnValue]) -> StoreResult<Option<Row>> {
        self.check_key(key, false)?;
        Ok(self.rows.get(key).cloned())
    }

    /// Rows whose leading key values equal `prefix`, in key order
    pub fn scan(&self, prefix: &[ColumnValue]) -> StoreResult<Vec<Row>> {
        self.check_key(prefix, true)?;
        Ok(self
            .rows
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, row)| row.clone())
            .collect())
    }

    /// Insert a row whose key is not yet present
    pub fn insert(&mut self, row: Row) -> StoreResult<()> {
        let key = self.key_of(&row)?;
        if self.rows.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                table: self.name().to_string(),
                key: format_key(&key),
            });
        }
        self.rows.insert(key, row);
        Ok(())
    }

    /// Replace the row stored under this row's key
    pub fn replace(&mut self, row: Row) -> StoreResult<()> {
        let key = self.key_of(&row)?;
        match self.rows.get_mut(&key) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(StoreError::RowNotFound {
                table: self.name().to_string(),
                key: format_key(&key),
            }),
        }
    }

    /// Remove the row with this key, if present
    pub fn delete(&mut self, key: &[ColumnValue]) -> StoreResult<()> {
        self.check_key(key, false)?;
        self.rows.remove(key);
        Ok(())
    }

    /// Validates a row against the schema and extracts its key
    fn key_of(&self, row: &Row) -> StoreResult<Vec<ColumnValue>> {
        let invalid = |reason: String| StoreError::InvalidRow {
            table: self.name().to_string(),
            reason,
        };

        if row.len() != self.schema.len() {
            return Err(invalid(format!(
                "expected {} values, got {}",
                self.schema.len(),
                row.len()
            )));
        }

        for (column, value) in self.schema.columns.iter().zip(row.iter()) {
            if value.column_type() != column.column_type {
                return Err(invalid(format!(
                    "column '{}' expects {}, got {}",
                    column.name,
                    column.column_type,
                    value.column_type()
                )));
            }
        }

        row.project(&self.key_positions)
            .ok_or_else(|| invalid("missing key values".to_string()))
    }

    /// Validates a full key, or a key prefix when `prefix` is set
    fn check_key(&self, key: &[ColumnValue], prefix: bool) -> StoreResult<()> {
        let invalid = |reason: String| StoreError::InvalidKey {
            table: self.name().to_string(),
            reason,
        };

        let expected = self.key_positions.len();
        let arity_ok = if prefix {
            key.len() <= expected
        } else {
            key.len() == expected
        };
        if !arity_ok {
            return Err(invalid(format!("expected {} key values, got {}", expected, key.len())));
        }

        for (value, &position) in key.iter().zip(&self.key_positions) {
            let column = &self.schema.columns[position];
            if value.column_type() != column.column_type {
                return Err(invalid(format!(
                    "key column '{}' expects {}, got {}",
                    column.name,
                    column.column_type,
                    value.column_type()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn widget_table() -> StoredTable {
        StoredTable::new(
            "Widget",
            &[
                ColumnDef::identity(),
                ColumnDef::new("name", ColumnType::String),
                ColumnDef::new("qty", ColumnType::Uint32),
            ],
        )
        .unwrap()
    }

    fn widget_row(id: i64, name: &str, qty: u32) -> Row {
        Row::new(vec![
            ColumnValue::Int64(id),
            ColumnValue::String(name.into()),
            ColumnValue::Uint32(qty),
        ])
    }

    #[test]
    fn test_definition_validation() {
        assert!(matches!(
            StoredTable::new("", &[ColumnDef::identity()]),
            Err(StoreError::InvalidTableName(_))
        ));
        assert!(matches!(
            StoredTable::new("T", &[]),
            Err(StoreError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            StoredTable::new("T", &[ColumnDef::new("a", ColumnType::Bool)]),
            Err(StoreError::InvalidDefinition { .. })
        ));
        assert!(matches!(
            StoredTable::new("T", &[ColumnDef::identity(), ColumnDef::identity()]),
            Err(StoreError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn test_insert_get() {
        let mut table = widget_table();
        table.insert(widget_row(1, "bolt", 5)).unwrap();

        let row = table.get(&[ColumnValue::Int64(1)]).unwrap();
        assert_eq!(row, Some(widget_row(1, "bolt", 5)));
        assert_eq!(table.get(&[ColumnValue::Int64(2)]).unwrap(), None);
    }

    #[test]
    fn test_duplicate_key() {
        let mut table = widget_table();
        table.insert(widget_row(1, "bolt", 5)).unwrap();
        let err = table.insert(widget_row(1, "nut", 2)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_replace_requires_existing_row() {
        let mut table = widget_table();
        let err = table.replace(widget_row(1, "bolt", 5)).unwrap_err();
        assert!(matches!(err, StoreError::RowNotFound { .. }));

        table.insert(widget_row(1, "bolt", 5)).unwrap();
        table.replace(widget_row(1, "bolt", 7)).unwrap();
        assert_eq!(
            table.get(&[ColumnValue::Int64(1)]).unwrap(),
            Some(widget_row(1, "bolt", 7))
        );
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let mut table = widget_table();
        table.delete(&[ColumnValue::Int64(9)]).unwrap();
        table.insert(widget_row(9, "washer", 1)).unwrap();
        table.delete(&[ColumnValue::Int64(9)]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_row_shape_is_checked() {
        let mut table = widget_table();
        let short = Row::new(vec![ColumnValue::Int64(1)]);
        assert!(matches!(table.insert(short), Err(StoreError::InvalidRow { .. })));

        let wrong_type = Row::new(vec![
            ColumnValue::Int64(1),
            ColumnValue::String("bolt".into()),
            ColumnValue::Int32(5),
        ]);
        assert!(matches!(table.insert(wrong_type), Err(StoreError::InvalidRow { .. })));
    }

    #[test]
    fn test_key_shape_is_checked() {
        let table = widget_table();
        assert!(matches!(
            table.get(&[ColumnValue::Int32(1)]),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(matches!(table.get(&[]), Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_scan_in_key_order() {
        let mut table = widget_table();
        table.insert(widget_row(3, "c", 3)).unwrap();
        table.insert(widget_row(1, "a", 1)).unwrap();
        table.insert(widget_row(2, "b", 2)).unwrap();

        let ids: Vec<_> = table
            .scan(&[])
            .unwrap()
            .iter()
            .map(|r| r.get(0).cloned())
            .collect();
        assert_eq!(
            ids,
            vec![
                Some(ColumnValue::Int64(1)),
                Some(ColumnValue::Int64(2)),
                Some(ColumnValue::Int64(3))
            ]
        );

        assert_eq!(table.scan(&[ColumnValue::Int64(2)]).unwrap().len(), 1);
    }

    #[test]
    fn test_from_parts_rejects_duplicate_rows() {
        let schema = widget_table().schema().clone();
        let err = StoredTable::from_parts(schema, vec![widget_row(1, "a", 1), widget_row(1, "b", 2)])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }
}

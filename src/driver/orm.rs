//! CRUD driver
//!
//! Each operation validates its input locally, then issues one or two store
//! calls. Nothing is cached between calls besides the optional identity
//! sequences.

use tracing::{debug, info};

use super::id::IdGenerator;
use crate::codec::{decode, encode, ColumnValue, Row};
use crate::config::OrmConfig;
use crate::errors::{Operation, OrmError, OrmResult};
use crate::record::{Identity, Record};
use crate::schema::{SchemaMapper, TableSchema};
use crate::store::{StoreError, TableStore};

/// Maps records onto tables of a `TableStore`.
#[derive(Debug)]
pub struct Orm<S: TableStore> {
    store: S,
    config: OrmConfig,
    mapper: SchemaMapper,
    ids: IdGenerator,
}

impl<S: TableStore> Orm<S> {
    /// Creates a driver with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, OrmConfig::default())
    }

    /// Creates a driver with an explicit configuration.
    pub fn with_config(store: S, config: OrmConfig) -> Self {
        Self {
            store,
            config,
            mapper: SchemaMapper::new(config.unmapped_fields),
            ids: IdGenerator::new(config.id_strategy),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &OrmConfig {
        &self.config
    }

    /// Consumes the driver and returns its store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates the table for `R`, named after the record type.
    ///
    /// # Errors
    ///
    /// - `Definition` if the record's fields cannot be mapped
    /// - `StoreFailure` if the store rejects the table (e.g. it exists)
    pub fn create_table<R: Record>(&self) -> OrmResult<()> {
        let table = R::table_name();
        info!(table, "create table");

        let schema = self.mapper.map::<R>()?;
        debug!(table, columns = ?schema.columns, "columns");

        self.store
            .create_table(table, &schema.columns)
            .map_err(|e| OrmError::store(table, Operation::CreateTable, e))
    }

    /// Inserts `item` as a new row under a freshly generated identity.
    ///
    /// The identity is written to `item` before encoding and returned.
    pub fn create<R: Record>(&self, item: &mut R) -> OrmResult<Identity> {
        let table = R::table_name();

        let id = self.ids.next(&self.store, table)?;
        item.set_id(id);

        let row = encode(item).map_err(|e| OrmError::codec(table, e))?;
        info!(table, id = id.get(), row = ?row, "creating");

        self.store
            .insert_row(table, row)
            .map_err(|e| OrmError::store(table, Operation::InsertRow, e))?;
        Ok(id)
    }

    /// Loads the row with identity `id` into `item`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `id` is unset; the store is not consulted
    /// - `NotFound` if no row has that identity
    /// - `TypeMismatch` if the row cannot be decoded into `R`
    pub fn get<R: Record>(&self, item: &mut R, id: impl Into<Identity>) -> OrmResult<()> {
        let table = R::table_name();
        let id = id.into();
        if id.is_unset() {
            return Err(OrmError::unset_identity(table));
        }

        let schema = self
            .store
            .get_table(table)
            .map_err(|e| OrmError::store(table, Operation::GetTable, e))?;

        let row = self
            .find_by_identity(&schema, id)?
            .ok_or_else(|| OrmError::NotFound {
                table: table.to_string(),
                id: id.get(),
            })?;

        decode(&schema, &row, item).map_err(|e| OrmError::codec(table, e))?;

        if item.id().is_unset() {
            return Err(OrmError::NotFound {
                table: table.to_string(),
                id: id.get(),
            });
        }

        debug!(table, id = id.get(), "got item");
        Ok(())
    }

    /// Appends every row of `R`'s table to `items`, in store order.
    ///
    /// On error `items` is left as it was.
    pub fn get_all<R: Record>(&self, items: &mut Vec<R>) -> OrmResult<()> {
        let table = R::table_name();

        let schema = self
            .store
            .get_table(table)
            .map_err(|e| OrmError::store(table, Operation::GetTable, e))?;
        let rows = self
            .store
            .get_rows(table, &[])
            .map_err(|e| OrmError::store(table, Operation::GetRows, e))?;

        let mut loaded = Vec::new();
        for row in rows {
            let row = row.map_err(|e| OrmError::store(table, Operation::GetRows, e))?;
            let mut item = R::default();
            decode(&schema, &row, &mut item).map_err(|e| OrmError::codec(table, e))?;
            loaded.push(item);
        }

        debug!(table, count = loaded.len(), "got all items");
        items.extend(loaded);
        Ok(())
    }

    /// Replaces the stored row of `item` with its current field values.
    pub fn update<R: Record>(&self, item: &R) -> OrmResult<()> {
        let table = R::table_name();
        let id = item.id();
        if id.is_unset() {
            return Err(OrmError::unset_identity(table));
        }

        let row = encode(item).map_err(|e| OrmError::codec(table, e))?;
        info!(table, id = id.get(), row = ?row, "updating");

        self.store
            .replace_row(table, row)
            .map_err(|e| OrmError::store(table, Operation::ReplaceRow, e))
    }

    /// Deletes the stored row of `item`. A missing row is not an error.
    ///
    /// Rows are matched on the identity column alone, also when the table
    /// has further key columns.
    pub fn delete<R: Record>(&self, item: &R) -> OrmResult<()> {
        let table = R::table_name();
        let id = item.id();
        if id.is_unset() {
            return Err(OrmError::unset_identity(table));
        }

        let schema = self
            .store
            .get_table(table)
            .map_err(|e| OrmError::store(table, Operation::GetTable, e))?;
        let key_positions = schema.key_positions();

        let key = if key_positions.len() == 1 {
            vec![ColumnValue::Int64(id.get())]
        } else {
            // Composite key: recover the other key values from the stored row.
            let Some(row) = self.find_by_identity(&schema, id)? else {
                debug!(table, id = id.get(), "nothing to delete");
                return Ok(());
            };
            row.project(&key_positions)
                .ok_or_else(|| OrmError::store(table, Operation::DeleteRow, short_row(table)))?
        };

        info!(table, id = id.get(), "deleting");
        self.store
            .delete_row(table, &key)
            .map_err(|e| OrmError::store(table, Operation::DeleteRow, e))
    }

    /// Returns the identity the next `create` on `table` would use under
    /// the configured strategy. With `Sequence` this consumes the identity.
    pub fn generate_id(&self, table: &str) -> OrmResult<Identity> {
        self.ids.next(&self.store, table)
    }

    /// Fetches the row whose identity column equals `id`.
    ///
    /// A lone identity key is a point lookup. A composite key led by the
    /// identity is a prefix scan; otherwise every row is scanned.
    fn find_by_identity(&self, schema: &TableSchema, id: Identity) -> OrmResult<Option<Row>> {
        let table = schema.name.as_str();
        let position = schema.identity_position().ok_or_else(|| {
            OrmError::store(
                table,
                Operation::GetTable,
                StoreError::InvalidDefinition {
                    table: table.to_string(),
                    reason: "no key column".to_string(),
                },
            )
        })?;
        let key_positions = schema.key_positions();
        let value = ColumnValue::Int64(id.get());

        if key_positions == [position] {
            return self
                .store
                .get_row(table, &[value])
                .map_err(|e| OrmError::store(table, Operation::GetRow, e));
        }

        let prefix = if key_positions.first() == Some(&position) {
            vec![value.clone()]
        } else {
            Vec::new()
        };
        let rows = self
            .store
            .get_rows(table, &prefix)
            .map_err(|e| OrmError::store(table, Operation::GetRows, e))?;
        for row in rows {
            let row = row.map_err(|e| OrmError::store(table, Operation::GetRows, e))?;
            if row.get(position) == Some(&value) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }
}

fn short_row(table: &str) -> StoreError {
    StoreError::InvalidRow {
        table: table.to_string(),
        reason: "stored row is missing key values".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdStrategy, UnmappedFieldPolicy};
    use crate::errors::ErrorKind;
    use crate::store::MemoryTableStore;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Widget {
        id: Identity,
        name: String,
        qty: u32,
    }

    crate::impl_record! {
        Widget {
            #[key] id,
            name: String,
            qty: u32,
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Stock {
        id: Identity,
        region: String,
        qty: u32,
    }

    crate::impl_record! {
        Stock {
            #[key] id,
            #[key] region: String,
            qty: u32,
        }
    }

    fn widget(name: &str, qty: u32) -> Widget {
        Widget {
            id: Identity::UNSET,
            name: name.to_string(),
            qty,
        }
    }

    fn orm() -> Orm<MemoryTableStore> {
        let orm = Orm::new(MemoryTableStore::new());
        orm.create_table::<Widget>().unwrap();
        orm
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let orm = orm();
        let mut a = widget("bolt", 3);
        let mut b = widget("nut", 7);
        assert_eq!(orm.create(&mut a).unwrap(), Identity::new(1));
        assert_eq!(orm.create(&mut b).unwrap(), Identity::new(2));
        assert_eq!(a.id, Identity::new(1));
        assert_eq!(b.id, Identity::new(2));
    }

    #[test]
    fn test_get_round_trip() {
        let orm = orm();
        let mut a = widget("bolt", 3);
        let id = orm.create(&mut a).unwrap();

        let mut loaded = Widget::default();
        orm.get(&mut loaded, id).unwrap();
        assert_eq!(loaded, a);
    }

    #[test]
    fn test_get_unset_id_is_invalid_input() {
        let orm = orm();
        let mut loaded = Widget::default();
        let err = orm.get(&mut loaded, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let orm = orm();
        let mut loaded = Widget::default();
        let err = orm.get(&mut loaded, 10000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Widget with id 10000 not found");
    }

    #[test]
    fn test_update_then_get() {
        let orm = orm();
        let mut a = widget("bolt", 3);
        orm.create(&mut a).unwrap();
        a.qty = 30;
        orm.update(&a).unwrap();

        let mut loaded = Widget::default();
        orm.get(&mut loaded, a.id).unwrap();
        assert_eq!(loaded.qty, 30);
    }

    #[test]
    fn test_update_missing_row_fails() {
        let orm = orm();
        let mut a = widget("bolt", 3);
        a.id = Identity::new(42);
        let err = orm.update(&a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let orm = orm();
        let mut a = widget("bolt", 3);
        orm.create(&mut a).unwrap();
        orm.delete(&a).unwrap();
        orm.delete(&a).unwrap();

        let mut loaded = Widget::default();
        let err = orm.get(&mut loaded, a.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unset_identity_rejected_by_update_and_delete() {
        let orm = orm();
        let a = widget("bolt", 3);
        assert_eq!(orm.update(&a).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(orm.delete(&a).unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_get_all_appends() {
        let orm = orm();
        for (name, qty) in [("bolt", 1), ("nut", 2), ("gear", 3)] {
            orm.create(&mut widget(name, qty)).unwrap();
        }

        let mut items = vec![widget("existing", 0)];
        orm.get_all(&mut items).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "existing");
        let names: Vec<_> = items[1..].iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["bolt", "nut", "gear"]);
    }

    #[test]
    fn test_get_all_missing_table_leaves_items() {
        let orm = Orm::new(MemoryTableStore::new());
        let mut items = vec![widget("existing", 0)];
        let err = orm.get_all(&mut items).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_create_table_twice_fails() {
        let orm = orm();
        let err = orm.create_table::<Widget>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreFailure);
    }

    #[test]
    fn test_sequence_strategy_skips_unused_ids() {
        let config = OrmConfig::default()
            .with_id_strategy(IdStrategy::Sequence)
            .with_unmapped_fields(UnmappedFieldPolicy::Reject);
        let orm = Orm::with_config(MemoryTableStore::new(), config);
        orm.create_table::<Widget>().unwrap();

        assert_eq!(orm.generate_id("Widget").unwrap(), Identity::new(1));
        let mut a = widget("bolt", 3);
        assert_eq!(orm.create(&mut a).unwrap(), Identity::new(2));
    }

    #[test]
    fn test_into_store_keeps_rows() {
        let orm = orm();
        orm.create(&mut widget("bolt", 3)).unwrap();
        let store = orm.into_store();
        assert_eq!(store.row_count("Widget").unwrap(), 1);
    }

    #[test]
    fn test_composite_key_get_and_delete_by_identity() {
        let orm = Orm::new(MemoryTableStore::new());
        orm.create_table::<Stock>().unwrap();

        let mut north = Stock {
            id: Identity::UNSET,
            region: "north".into(),
            qty: 4,
        };
        let mut south = Stock {
            id: Identity::UNSET,
            region: "south".into(),
            qty: 9,
        };
        orm.create(&mut north).unwrap();
        let id = orm.create(&mut south).unwrap();

        let mut loaded = Stock::default();
        orm.get(&mut loaded, id).unwrap();
        assert_eq!(loaded, south);

        orm.delete(&south).unwrap();
        let err = orm.get(&mut loaded, id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        orm.delete(&south).unwrap();

        let mut rest: Vec<Stock> = Vec::new();
        orm.get_all(&mut rest).unwrap();
        assert_eq!(rest, vec![north]);
    }
}

//! Identity allocation
//!
//! `ScanMax` reads every key of the table and returns the maximum plus one
//! (1 for an empty table). Scan and insert are separate store calls, so two
//! creators racing on one table can be handed the same identity; the second
//! insert then fails with a duplicate key.
//!
//! `Sequence` runs the same scan once per table and afterwards counts up
//! under a mutex held by the driver.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::codec::ColumnValue;
use crate::config::IdStrategy;
use crate::errors::{Operation, OrmError, OrmResult};
use crate::record::Identity;
use crate::store::{StoreError, TableStore};

/// Allocates identities for new rows
#[derive(Debug, Default)]
pub struct IdGenerator {
    strategy: IdStrategy,
    sequences: Mutex<HashMap<String, Identity>>,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            sequences: Mutex::new(HashMap::new()),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Returns the next identity for `table`.
    pub fn next<S: TableStore + ?Sized>(&self, store: &S, table: &str) -> OrmResult<Identity> {
        let id = match self.strategy {
            IdStrategy::ScanMax => {
                let max = max_identity(store, table)?;
                following(table, max)?
            }
            IdStrategy::Sequence => {
                // The counters stay consistent even if a holder panicked.
                let mut sequences = self
                    .sequences
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                let current = match sequences.get(table) {
                    Some(id) => *id,
                    None => max_identity(store, table)?,
                };
                let next = following(table, current)?;
                sequences.insert(table.to_string(), next);
                next
            }
        };

        debug!(table, id = id.get(), "generated id");
        Ok(id)
    }
}

fn following(table: &str, id: Identity) -> OrmResult<Identity> {
    id.next().ok_or_else(|| OrmError::IdExhausted(table.to_string()))
}

/// Largest identity currently stored in `table`, or unset if it is empty.
///
/// Non-positive keys never win, so a table holding only such keys yields 1
/// as its next identity.
pub fn max_identity<S: TableStore + ?Sized>(store: &S, table: &str) -> OrmResult<Identity> {
    let schema = store
        .get_table(table)
        .map_err(|e| OrmError::store(table, Operation::GetTable, e))?;
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

    let rows = store
        .get_rows(table, &[])
        .map_err(|e| OrmError::store(table, Operation::GetRows, e))?;

    let mut max = 0i64;
    for row in rows {
        let row = row.map_err(|e| OrmError::store(table, Operation::GetRows, e))?;
        if let Some(value) = row.get(position).and_then(ColumnValue::as_i64) {
            max = max.max(value);
        }
    }

    Ok(Identity::new(max))
}

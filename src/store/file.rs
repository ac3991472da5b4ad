//! # File Backend
//!
//! One JSON file per table under a root directory:
//!
//! ```text
//! <root>/<table>.table.json
//! {"checksum": <crc32 of body>, "body": {"schema": {...}, "rows": [...]}}
//! ```
//!
//! Every read verifies the checksum. Mutations load the table, apply the
//! change, and write a temporary file that is renamed over the old one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::backend::{RowIter, TableStore};
use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StoreError, StoreResult};
use super::table::StoredTable;
use crate::codec::{ColumnValue, Row};
use crate::schema::{ColumnDef, TableSchema};

const TABLE_SUFFIX: &str = ".table.json";
const TMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Serialize, Deserialize)]
struct TableBody {
    schema: TableSchema,
    rows: Vec<Row>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    checksum: u32,
    body: TableBody,
}

/// File-backed table store
#[derive(Debug)]
pub struct FileTableStore {
    root: PathBuf,
    lock: Mutex<()>,
}

/// Table names are used as file names
fn validate_table_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}

impl FileTableStore {
    /// Opens a store rooted at `root`, creating the directory if missing.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    /// Opens a store whose root must already exist as a directory.
    pub fn open_existing(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::RootNotFound(root.display().to_string()));
        }
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of all tables on disk, sorted
    pub fn list_tables(&self) -> StoreResult<Vec<String>> {
        let _guard = self.guard()?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(file_name) = entry.file_name().to_str() {
                if let Some(name) = file_name.strip_suffix(TABLE_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Loads a table and verifies its checksum
    pub fn verify_table(&self, name: &str) -> StoreResult<()> {
        let _guard = self.guard()?;
        self.load(name).map(|_| ())
    }

    fn guard(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn table_path(&self, name: &str) -> StoreResult<PathBuf> {
        validate_table_name(name)?;
        Ok(self.root.join(format!("{}{}", name, TABLE_SUFFIX)))
    }

    fn load(&self, name: &str) -> StoreResult<StoredTable> {
        let path = self.table_path(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::TableNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let corrupted = |reason: String| StoreError::Corrupted {
            table: name.to_string(),
            reason,
        };

        let file: TableFile =
            serde_json::from_slice(&bytes).map_err(|e| corrupted(format!("unreadable: {}", e)))?;
        let body = serde_json::to_vec(&file.body).map_err(|e| corrupted(e.to_string()))?;
        if !verify_checksum(&body, file.checksum) {
            return Err(corrupted("checksum mismatch".to_string()));
        }
        if file.body.schema.name != name {
            return Err(corrupted(format!(
                "file holds table '{}'",
                file.body.schema.name
            )));
        }

        StoredTable::from_parts(file.body.schema, file.body.rows)
            .map_err(|e| corrupted(e.to_string()))
    }

    fn save(&self, table: &StoredTable) -> StoreResult<()> {
        let path = self.table_path(table.name())?;
        let body = TableBody {
            schema: table.schema().clone(),
            rows: table.rows().cloned().collect(),
        };
        let bytes = serde_json::to_vec(&body).map_err(|e| StoreError::Io(e.to_string()))?;
        let file = TableFile {
            checksum: compute_checksum(&bytes),
            body,
        };
        let encoded = serde_json::to_vec(&file).map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = path.with_extension(format!("json{}", TMP_SUFFIX));
        fs::write(&tmp, &encoded)?;
        fs::rename(&tmp, &path)?;
        debug!(table = table.name(), rows = table.len(), "saved table file");
        Ok(())
    }

    fn mutate<F>(&self, name: &str, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoredTable) -> StoreResult<()>,
    {
        let _guard = self.guard()?;
        let mut table = self.load(name)?;
        apply(&mut table)?;
        self.save(&table)
    }
}

impl TableStore for FileTableStore {
    fn create_table(&self, name: &str, columns: &[ColumnDef]) -> StoreResult<()> {
        let path = self.table_path(name)?;
        let table = StoredTable::new(name, columns)?;
        let _guard = self.guard()?;
        if path.exists() {
            return Err(StoreError::TableAlreadyExists(name.to_string()));
        }
        self.save(&table)
    }

    fn get_table(&self, name: &str) -> StoreResult<TableSchema> {
        let _guard = self.guard()?;
        Ok(self.load(name)?.schema().clone())
    }

    fn get_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<Option<Row>> {
        let _guard = self.guard()?;
        self.load(name)?.get(key)
    }

    fn get_rows(&self, name: &str, key_prefix: &[ColumnValue]) -> StoreResult<RowIter<'_>> {
        let guard = self.guard()?;
        let rows = self.load(name)?.scan(key_prefix)?;
        drop(guard);
        Ok(Box::new(rows.into_iter().map(Ok)))
    }

    fn insert_row(&self, name: &str, row: Row) -> StoreResult<()> {
        self.mutate(name, |table| table.insert(row))
    }

    fn replace_row(&self, name: &str, row: Row) -> StoreResult<()> {
        self.mutate(name, |table| table.replace(row))
    }

    fn delete_row(&self, name: &str, key: &[ColumnValue]) -> StoreResult<()> {
        self.mutate(name, |table| table.delete(key))
    }
}

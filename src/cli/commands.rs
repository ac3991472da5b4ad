//! CLI command implementations
//!
//! Every command opens an existing `FileTableStore` at `--root`, reads, and
//! prints one JSON response. Nothing is written, not even the root directory.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::codec::Row;
use crate::store::{FileTableStore, TableStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Run a parsed command and print its response
pub fn run_command(command: Command) -> CliResult<()> {
    let data = match command {
        Command::Tables { root } => tables(&root)?,
        Command::Schema { root, table } => schema(&root, &table)?,
        Command::Rows { root, table } => rows(&root, &table)?,
        Command::Verify { root } => verify(&root)?,
    };
    write_response(data)
}

/// Table names under `root`, sorted
pub fn tables(root: &Path) -> CliResult<Value> {
    let store = FileTableStore::open_existing(root)?;
    let names = store.list_tables()?;
    Ok(json!(names))
}

/// Column definitions of `table`
pub fn schema(root: &Path, table: &str) -> CliResult<Value> {
    let store = FileTableStore::open_existing(root)?;
    let schema = store.get_table(table)?;
    Ok(serde_json::to_value(schema)?)
}

/// Every row of `table`, in key order
pub fn rows(root: &Path, table: &str) -> CliResult<Value> {
    let store = FileTableStore::open_existing(root)?;
    let rows = store
        .get_rows(table, &[])?
        .collect::<Result<Vec<Row>, _>>()?;
    info!(table, count = rows.len(), "read rows");
    Ok(serde_json::to_value(rows)?)
}

/// Checks every table file; fails if any is corrupted
pub fn verify(root: &Path) -> CliResult<Value> {
    let store = FileTableStore::open_existing(root)?;
    let names = store.list_tables()?;

    let mut corrupted = Vec::new();
    for name in &names {
        if let Err(e) = store.verify_table(name) {
            if !e.is_corruption() {
                return Err(e.into());
            }
            warn!(table = %name, error = %e, "verification failed");
            corrupted.push(name.clone());
        }
    }

    if !corrupted.is_empty() {
        return Err(CliError::corrupted(&corrupted));
    }
    Ok(json!({ "verified": names }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ColumnValue;
    use crate::schema::{ColumnDef, ColumnType};
    use crate::store::StoreError;
    use std::fs;
    use tempfile::TempDir;

    fn seeded() -> TempDir {
        let dir = TempDir::new().unwrap();
        let store = FileTableStore::open(dir.path()).unwrap();
        store
            .create_table(
                "Widget",
                &[ColumnDef::identity(), ColumnDef::new("name", ColumnType::String)],
            )
            .unwrap();
        store
            .insert_row(
                "Widget",
                Row::new(vec![ColumnValue::Int64(1), ColumnValue::String("bolt".into())]),
            )
            .unwrap();
        dir
    }

    #[test]
    fn test_tables() {
        let dir = seeded();
        assert_eq!(tables(dir.path()).unwrap(), json!(["Widget"]));
    }

    #[test]
    fn test_schema_lists_columns() {
        let dir = seeded();
        let value = schema(dir.path(), "Widget").unwrap();
        assert_eq!(value["name"], "Widget");
        assert_eq!(value["columns"][0]["name"], "Id");
        assert_eq!(value["columns"][0]["key"], true);
        assert_eq!(value["columns"][1]["type"], "STRING");
    }

    #[test]
    fn test_rows() {
        let dir = seeded();
        let value = rows(dir.path(), "Widget").unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_rows_missing_table() {
        let dir = seeded();
        let err = rows(dir.path(), "Gadget").unwrap_err();
        assert_eq!(err.code_str(), StoreError::TableNotFound("Gadget".into()).code());
    }

    #[test]
    fn test_missing_root_is_error_and_not_created() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("typo");

        let err = verify(&missing).unwrap_err();
        assert_eq!(err.code_str(), "ORM_STORE_ROOT_NOT_FOUND");
        assert!(tables(&missing).is_err());
        assert!(!missing.exists());
    }

    #[test]
    fn test_verify_detects_tampering() {
        let dir = seeded();
        assert!(verify(dir.path()).is_ok());

        let path = dir.path().join("Widget.table.json");
        let text = fs::read_to_string(&path).unwrap().replace("bolt", "nail");
        fs::write(&path, text).unwrap();

        let err = verify(dir.path()).unwrap_err();
        assert_eq!(err.code_str(), "ORM_CLI_CORRUPTED");
        assert!(err.message().contains("Widget"));
    }
}

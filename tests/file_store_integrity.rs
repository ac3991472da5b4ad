//! File Store Integrity Tests
//!
//! Tests for the file-backed table store:
//! - Corruption is never ignored: a tampered file fails to load
//! - Writes are whole-file replacements; a rejected write leaves no trace
//! - Table state survives reopening the store

use std::fs;

use ledger_orm::codec::Row;
use ledger_orm::schema::ColumnDef;
use ledger_orm::{ColumnType, ColumnValue, FileTableStore, StoreError, TableStore};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn widget_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::identity(),
        ColumnDef::new("name", ColumnType::String),
        ColumnDef::new("qty", ColumnType::Uint32),
    ]
}

fn widget_row(id: i64, name: &str, qty: u32) -> Row {
    Row::new(vec![
        ColumnValue::Int64(id),
        ColumnValue::String(name.to_string()),
        ColumnValue::Uint32(qty),
    ])
}

fn seeded_store() -> (TempDir, FileTableStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileTableStore::open(dir.path()).unwrap();
    store.create_table("Widget", &widget_columns()).unwrap();
    store.insert_row("Widget", widget_row(1, "bolt", 3)).unwrap();
    store.insert_row("Widget", widget_row(2, "nut", 5)).unwrap();
    (dir, store)
}

fn table_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("Widget.table.json")
}

// =============================================================================
// Corruption Is Never Ignored
// =============================================================================

/// A flipped value fails the checksum on every read path.
#[test]
fn test_tampered_value_detected() {
    let (dir, store) = seeded_store();

    let path = table_file(&dir);
    let text = fs::read_to_string(&path).unwrap().replace("\"nut\"", "\"nail\"");
    fs::write(&path, text).unwrap();

    assert!(store.get_table("Widget").unwrap_err().is_corruption());
    assert!(store.get_row("Widget", &[ColumnValue::Int64(1)]).unwrap_err().is_corruption());
    assert!(store.verify_table("Widget").unwrap_err().is_corruption());
}

/// Truncated files are corruption, not a missing table.
#[test]
fn test_truncated_file_detected() {
    let (dir, store) = seeded_store();

    let path = table_file(&dir);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = store.get_table("Widget").unwrap_err();
    assert!(matches!(err, StoreError::Corrupted { .. }));
}

/// A file renamed to another table's name is rejected.
#[test]
fn test_misnamed_file_detected() {
    let (dir, store) = seeded_store();
    fs::copy(table_file(&dir), dir.path().join("Gadget.table.json")).unwrap();

    assert!(store.get_table("Gadget").unwrap_err().is_corruption());
}

// =============================================================================
// Whole-file Writes
// =============================================================================

/// A duplicate insert leaves the file byte-for-byte unchanged.
#[test]
fn test_rejected_insert_leaves_file_unchanged() {
    let (dir, store) = seeded_store();
    let before = fs::read(table_file(&dir)).unwrap();

    let err = store.insert_row("Widget", widget_row(1, "dup", 0)).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { .. }));

    assert_eq!(fs::read(table_file(&dir)).unwrap(), before);
}

/// No temporary files are left behind after writes.
#[test]
fn test_no_temp_files_remain() {
    let (dir, store) = seeded_store();
    store.replace_row("Widget", widget_row(2, "nut", 6)).unwrap();
    store.delete_row("Widget", &[ColumnValue::Int64(1)]).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "leftover files: {:?}", leftovers);
}

// =============================================================================
// Durability Across Reopen
// =============================================================================

/// Rows and schema are identical after reopening.
#[test]
fn test_reopen_preserves_rows() {
    let (dir, store) = seeded_store();
    store.replace_row("Widget", widget_row(2, "nut", 6)).unwrap();
    let schema = store.get_table("Widget").unwrap();
    drop(store);

    let reopened = FileTableStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get_table("Widget").unwrap(), schema);
    let rows: Vec<Row> = reopened
        .get_rows("Widget", &[])
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![widget_row(1, "bolt", 3), widget_row(2, "nut", 6)]);
}

/// A key prefix narrows the scan to matching rows.
#[test]
fn test_prefix_scan() {
    let (_dir, store) = seeded_store();
    let rows: Vec<Row> = store
        .get_rows("Widget", &[ColumnValue::Int64(2)])
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![widget_row(2, "nut", 5)]);
}

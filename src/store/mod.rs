//! # Table Store
//!
//! The key-row persistence boundary. The driver only talks to `TableStore`;
//! two backends are provided:
//!
//! - `MemoryTableStore`: process-local, the reference implementation
//! - `FileTableStore`: one checksummed JSON file per table

mod backend;
mod checksum;
mod errors;
mod file;
mod memory;
mod table;

pub use backend::{RowIter, TableStore};
pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StoreError, StoreResult};
pub use file::FileTableStore;
pub use memory::MemoryTableStore;
pub use table::StoredTable;

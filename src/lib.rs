//! ledger-orm - a small object mapper over a key-row table store
//!
//! Records declare their persisted fields through the `Record` trait
//! (usually via `impl_record!`). From that declaration the crate derives a
//! table schema, encodes records into rows and decodes rows back, and
//! drives create/get/get_all/update/delete against any `TableStore`.
//!
//! Modules:
//! - `schema`: column types and record-to-table mapping
//! - `codec`: record/row conversion
//! - `record`: the `Record` trait, `Identity` and `impl_record!`
//! - `store`: the `TableStore` boundary with memory and file backends
//! - `driver`: the `Orm` CRUD driver and identity allocation
//! - `config`: driver configuration
//! - `cli`: the inspection binary

pub mod cli;
pub mod codec;
pub mod config;
pub mod driver;
pub mod errors;
pub mod record;
pub mod schema;
pub mod store;

pub use codec::{ColumnValue, Primitive, Row};
pub use config::{IdStrategy, OrmConfig, UnmappedFieldPolicy};
pub use driver::Orm;
pub use errors::{ErrorKind, Operation, OrmError, OrmResult};
pub use record::{Identity, Record};
pub use schema::{ColumnDef, ColumnType, SchemaMapper, TableSchema};
pub use store::{FileTableStore, MemoryTableStore, StoreError, TableStore};

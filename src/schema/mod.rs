//! Schema mapping for ledger-orm
//!
//! Derives a table's column definitions from a record type's declared fields.
//!
//! # Rules
//!
//! - Column order follows field declaration order
//! - Private fields never become columns
//! - The identity field becomes the `Id` int64 key column
//! - Fields of unsupported types fail mapping (or are skipped under the
//!   legacy policy)
//! - Schemas are recomputed per call, never cached

mod errors;
mod field;
mod mapper;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use field::{DeclaredType, FieldDecl, Visibility};
pub use mapper::SchemaMapper;
pub use types::{ColumnDef, ColumnType, TableSchema, ID_COLUMN};

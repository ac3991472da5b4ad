//! Record types
//!
//! A record is a plain struct that declares its persisted fields through the
//! `Record` trait. The declaration replaces runtime introspection: the field
//! list drives schema mapping, and field access by column name drives the
//! codec.
//!
//! # Usage
//!
//! ```ignore
//! use ledger_orm::{impl_record, Identity};
//!
//! #[derive(Debug, Default)]
//! pub struct Widget {
//!     pub id: Identity,
//!     pub name: String,
//!     pub qty: u32,
//! }
//!
//! impl_record! {
//!     Widget {
//!         #[key] id,
//!         name: String,
//!         qty: u32,
//!     }
//! }
//! ```

mod identity;
mod macros;

pub use identity::Identity;

use crate::codec::{CodecResult, ColumnValue};
use crate::schema::FieldDecl;

/// A struct that maps to one table row.
///
/// `Default` supplies the blank instance rows are decoded into.
pub trait Record: Default {
    /// Table name; by convention the type name
    fn table_name() -> &'static str;

    /// Declared fields in declaration order, including exactly one identity
    fn fields() -> Vec<FieldDecl>;

    /// Current identity
    fn id(&self) -> Identity;

    /// Replace the identity
    fn set_id(&mut self, id: Identity);

    /// Current value of a primitive field, by column name
    fn read_field(&self, name: &str) -> Option<ColumnValue>;

    /// Assign a primitive field from a column value, by column name
    fn write_field(&mut self, name: &str, value: ColumnValue) -> CodecResult<()>;
}

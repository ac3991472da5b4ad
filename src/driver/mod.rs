//! CRUD driver
//!
//! `Orm` ties the schema mapper and the record codec to a `TableStore`:
//! create_table, create, get, get_all, update, delete.

mod id;
mod orm;

pub use id::{max_identity, IdGenerator};
pub use orm::Orm;

//! Record codec
//!
//! Moves values between record fields and table rows:
//! - `encode`: record → row, in field declaration order
//! - `decode`: row → record, guided by the table's column definitions
//!
//! Conversions are type-directed through the closed `Primitive` set.

mod decoder;
mod encoder;
mod errors;
mod primitive;
mod value;

pub use decoder::decode;
pub use encoder::encode;
pub use errors::{CodecError, CodecResult};
pub use primitive::Primitive;
pub use value::{ColumnValue, Row};

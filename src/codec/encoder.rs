//! Record → row encoding

use super::errors::{CodecError, CodecResult};
use super::value::{ColumnValue, Row};
use crate::record::Record;
use crate::schema::DeclaredType;

/// Encodes a record's visible fields into a row, in declaration order.
///
/// # Errors
///
/// - `TypeMismatch` if a visible field has an unsupported declared type
/// - `UnknownField` if the record cannot produce a declared field's value
/// - `ValueMismatch` if a field's value does not carry its declared type
pub fn encode<R: Record>(record: &R) -> CodecResult<Row> {
    let mut columns = Vec::new();

    for field in R::fields().iter().filter(|f| f.is_visible()) {
        let value = match field.declared {
            DeclaredType::Identity => ColumnValue::Int64(record.id().get()),
            DeclaredType::Primitive(column_type) => {
                let value = record
                    .read_field(field.name)
                    .ok_or_else(|| CodecError::unknown_field(R::table_name(), field.name))?;
                if value.column_type() != column_type {
                    return Err(CodecError::value_mismatch(
                        field.name,
                        column_type,
                        value.column_type(),
                    ));
                }
                value
            }
            DeclaredType::Unsupported(type_name) => {
                return Err(CodecError::TypeMismatch {
                    field: field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        };
        columns.push(value);
    }

    Ok(Row::new(columns))
}

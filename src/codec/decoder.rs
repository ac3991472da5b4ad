//! Row → record decoding

use tracing::trace;

use super::errors::{CodecError, CodecResult};
use super::value::Row;
use crate::record::{Identity, Record};
use crate::schema::{ColumnType, DeclaredType, TableSchema};

/// Decodes a row into an existing record, position by position.
///
/// Each value is matched to its column definition, the column name selects
/// the record field, and the field's type decides the conversion. An empty
/// row leaves the record untouched.
///
/// # Errors
///
/// - `ColumnCountMismatch` if the row is longer than the schema
/// - `ValueMismatch` if a value differs from its column's declared type
/// - `UnknownField` if a column names no visible primitive or identity field
/// - `ValueMismatch` / `OutOfRange` if the field cannot hold the value
pub fn decode<R: Record>(schema: &TableSchema, row: &Row, record: &mut R) -> CodecResult<()> {
    if row.len() > schema.len() {
        return Err(CodecError::ColumnCountMismatch {
            table: schema.name.clone(),
            expected: schema.len(),
            actual: row.len(),
        });
    }

    let fields = R::fields();

    for (column, value) in schema.columns.iter().zip(row.iter()) {
        trace!(table = %schema.name, column = %column.name, value = %value, "decoding column");

        if value.column_type() != column.column_type {
            return Err(CodecError::value_mismatch(
                column.name.as_str(),
                column.column_type,
                value.column_type(),
            ));
        }

        let field = fields
            .iter()
            .filter(|f| f.is_visible())
            .find(|f| f.name == column.name)
            .ok_or_else(|| CodecError::unknown_field(R::table_name(), column.name.as_str()))?;

        match field.declared {
            DeclaredType::Identity => {
                let id = value.as_i64().ok_or_else(|| {
                    CodecError::value_mismatch(column.name.as_str(), ColumnType::Int64, value.column_type())
                })?;
                record.set_id(Identity::new(id));
            }
            DeclaredType::Primitive(_) => {
                record.write_field(field.name, value.clone())?;
            }
            DeclaredType::Unsupported(type_name) => {
                return Err(CodecError::TypeMismatch {
                    field: field.name.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }
    }

    Ok(())
}

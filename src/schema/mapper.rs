//! Record type → column definitions
//!
//! Mapping rules:
//! - Declared fields are visited in declaration order
//! - Private fields are skipped
//! - The identity field always maps to the `Id` int64 key column
//! - Primitive fields keep their name, type and key annotation
//! - Unsupported field types are rejected, or skipped under the legacy policy

use std::collections::HashSet;

use tracing::{debug, error};

use super::errors::{SchemaError, SchemaResult};
use super::field::{DeclaredType, FieldDecl};
use super::types::{ColumnDef, TableSchema};
use crate::config::UnmappedFieldPolicy;
use crate::record::Record;

/// Derives table schemas from record declarations.
///
/// The result is recomputed on every call; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaMapper {
    policy: UnmappedFieldPolicy,
}

impl SchemaMapper {
    /// Creates a mapper with the given policy for unmapped fields.
    pub fn new(policy: UnmappedFieldPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active unmapped field policy
    pub fn policy(&self) -> UnmappedFieldPolicy {
        self.policy
    }

    /// Maps a record type to its table schema.
    pub fn map<R: Record>(&self) -> SchemaResult<TableSchema> {
        self.map_fields(R::table_name(), &R::fields())
    }

    /// Maps an explicit field list to a table schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if:
    /// - A public field has an unsupported type and the policy is `Reject`
    /// - No identity field, or more than one, is declared
    /// - Two fields map to the same column name
    pub fn map_fields(&self, table: &str, fields: &[FieldDecl]) -> SchemaResult<TableSchema> {
        let mut columns = Vec::with_capacity(fields.len());
        let mut seen = HashSet::new();
        let mut has_identity = false;

        for field in fields {
            if !field.is_visible() {
                debug!(table, field = field.name, "skipping private field");
                continue;
            }

            let column = match field.declared {
                DeclaredType::Identity => {
                    if has_identity {
                        return Err(SchemaError::DuplicateIdentity(table.to_string()));
                    }
                    has_identity = true;
                    ColumnDef::identity()
                }
                DeclaredType::Primitive(column_type) => ColumnDef {
                    name: field.name.to_string(),
                    column_type,
                    key: field.key,
                },
                DeclaredType::Unsupported(type_name) => match self.policy {
                    UnmappedFieldPolicy::Reject => {
                        return Err(SchemaError::UnmappedField {
                            table: table.to_string(),
                            field: field.name.to_string(),
                            type_name: type_name.to_string(),
                        });
                    }
                    UnmappedFieldPolicy::Skip => {
                        error!(table, field = field.name, type_name, "field type not recognized");
                        continue;
                    }
                },
            };

            if !seen.insert(column.name.clone()) {
                return Err(SchemaError::DuplicateColumn {
                    table: table.to_string(),
                    column: column.name,
                });
            }

            debug!(table, column = %column, "mapped field");
            columns.push(column);
        }

        if !has_identity {
            return Err(SchemaError::MissingIdentity(table.to_string()));
        }

        Ok(TableSchema::new(table, columns))
    }
}

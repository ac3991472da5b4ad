//! Field declarations for record types
//!
//! A record type describes itself as an ordered list of `FieldDecl`s. The
//! schema mapper turns visible declarations into column definitions and the
//! codec uses the same list to read and write field values.

use super::types::{ColumnType, ID_COLUMN};

/// Whether a field takes part in persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Persisted as a column
    Public,
    /// Ignored by mapping and codec
    Private,
}

/// The declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    /// One of the supported primitive column types
    Primitive(ColumnType),
    /// The record's identity (primary key)
    Identity,
    /// A type with no column mapping; carries the type name for diagnostics
    Unsupported(&'static str),
}

impl DeclaredType {
    /// Returns the type name for log and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            DeclaredType::Primitive(t) => t.type_name(),
            DeclaredType::Identity => "identity",
            DeclaredType::Unsupported(name) => name,
        }
    }
}

/// Declaration of a single record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name, used as the column name
    pub name: &'static str,
    /// Declared type
    pub declared: DeclaredType,
    /// Whether the field is persisted
    pub visibility: Visibility,
    /// Explicit key annotation (ignored for the identity field)
    pub key: bool,
}

impl FieldDecl {
    /// Declare a public primitive field
    pub const fn column(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            declared: DeclaredType::Primitive(column_type),
            visibility: Visibility::Public,
            key: false,
        }
    }

    /// Declare the identity field. Its column is always named `Id`.
    pub const fn identity() -> Self {
        Self {
            name: ID_COLUMN,
            declared: DeclaredType::Identity,
            visibility: Visibility::Public,
            key: true,
        }
    }

    /// Declare a public field whose type has no column mapping
    pub const fn unsupported(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            declared: DeclaredType::Unsupported(type_name),
            visibility: Visibility::Public,
            key: false,
        }
    }

    /// Mark the field as part of the row key
    pub const fn key(mut self) -> Self {
        self.key = true;
        self
    }

    /// Mark the field as not persisted
    pub const fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Whether the field is persisted
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Whether this is the identity field
    pub fn is_identity(&self) -> bool {
        self.declared == DeclaredType::Identity
    }
}

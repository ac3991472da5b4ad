//! Table store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a table store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // Table errors
    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("invalid table name: '{0}'")]
    InvalidTableName(String),

    #[error("invalid definition for table '{table}': {reason}")]
    InvalidDefinition { table: String, reason: String },

    // Row errors
    #[error("invalid row for table '{table}': {reason}")]
    InvalidRow { table: String, reason: String },

    #[error("invalid key for table '{table}': {reason}")]
    InvalidKey { table: String, reason: String },

    #[error("row with key [{key}] already exists in table '{table}'")]
    DuplicateKey { table: String, key: String },

    #[error("row with key [{key}] not found in table '{table}'")]
    RowNotFound { table: String, key: String },

    // Backend errors
    #[error("store root not found: {0}")]
    RootNotFound(String),

    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("table '{table}' is corrupted: {reason}")]
    Corrupted { table: String, reason: String },
}

impl StoreError {
    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::TableNotFound(_) => "ORM_STORE_TABLE_NOT_FOUND",
            StoreError::TableAlreadyExists(_) => "ORM_STORE_TABLE_EXISTS",
            StoreError::InvalidTableName(_) => "ORM_STORE_INVALID_TABLE_NAME",
            StoreError::InvalidDefinition { .. } => "ORM_STORE_INVALID_DEFINITION",
            StoreError::InvalidRow { .. } => "ORM_STORE_INVALID_ROW",
            StoreError::InvalidKey { .. } => "ORM_STORE_INVALID_KEY",
            StoreError::DuplicateKey { .. } => "ORM_STORE_DUPLICATE_KEY",
            StoreError::RowNotFound { .. } => "ORM_STORE_ROW_NOT_FOUND",
            StoreError::RootNotFound(_) => "ORM_STORE_ROOT_NOT_FOUND",
            StoreError::LockPoisoned => "ORM_STORE_LOCK_POISONED",
            StoreError::Io(_) => "ORM_STORE_IO_ERROR",
            StoreError::Corrupted { .. } => "ORM_STORE_CORRUPTED",
        }
    }

    /// Whether this error indicates damaged persisted data
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corrupted { .. })
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

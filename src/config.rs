//! Driver configuration
//!
//! All fields are optional in the JSON form and default to the strict
//! behaviour: unmapped fields are rejected and identities come from a key
//! scan.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// What the schema mapper does with a public field of an unsupported type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedFieldPolicy {
    /// Fail table creation
    #[default]
    Reject,
    /// Log the field and leave it out of the table
    Skip,
}

/// How new identities are allocated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Scan every key in the table and take max + 1.
    ///
    /// Not safe for concurrent creators on the same table: two scans can
    /// observe the same maximum before either insert lands.
    #[default]
    ScanMax,
    /// Seed from a scan once, then count up in process under a lock.
    ///
    /// Atomic for creators sharing one driver; other writers to the same
    /// store are not seen after seeding.
    Sequence,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Driver configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrmConfig {
    /// Policy for fields with no column mapping (default: reject)
    #[serde(default)]
    pub unmapped_fields: UnmappedFieldPolicy,

    /// Identity allocation strategy (default: scan_max)
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl OrmConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Set the unmapped field policy
    pub fn with_unmapped_fields(mut self, policy: UnmappedFieldPolicy) -> Self {
        self.unmapped_fields = policy;
        self
    }

    /// Set the identity allocation strategy
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }
}

//! Record identity (primary key value)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The primary key value of a record.
///
/// Zero is reserved: an unset identity means the record has not been
/// created yet (or was not found).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(i64);

impl Identity {
    /// The reserved unset value
    pub const UNSET: Identity = Identity(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Whether this is the reserved unset value
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// The following identity, or None on overflow
    pub fn next(&self) -> Option<Identity> {
        self.0.checked_add(1).map(Identity)
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Identity> for i64 {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

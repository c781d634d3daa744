//! Type definitions for pool-side resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a storage repository on the pool.
///
/// The reference is only meaningful to the session that produced it. It is
/// created per resolution call and carries no identity beyond one build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SrRef(String);

impl SrRef {
    /// Wrap a raw reference string handed back by the pool.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a host on the pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostRef(String);

impl HostRef {
    /// Wrap a raw reference string handed back by the pool.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pool record as reported by the connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Name label of the pool
    pub name_label: String,
    /// The pool master host
    pub master: HostRef,
    /// The pool-wide default SR, if one is configured
    pub default_sr: Option<SrRef>,
}

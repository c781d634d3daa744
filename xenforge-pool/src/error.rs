//! Error types for the pool abstraction layer.

use thiserror::Error;

use crate::types::HostRef;

/// Errors surfaced by a pool connection.
///
/// These describe the session itself failing, never the configured names.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Could not reach the pool.
    #[error("failed to connect to pool: {0}")]
    ConnectionFailed(String),

    /// The pool rejected the session credentials.
    #[error("pool rejected the session credentials: {0}")]
    AuthFailed(String),

    /// A read-only query failed mid-session.
    #[error("pool query failed: {0}")]
    QueryFailed(String),
}

/// Result type alias for pool connection operations.
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors from resolving a storage repository.
///
/// The name-based variants are user-data errors (a fixable configuration
/// problem); [`ResolveError::Pool`] carries a connection failure through
/// unchanged, tagged with the query that hit it.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No SR carries the requested name label.
    #[error("couldn't find a SR with the specified name-label '{0}'")]
    SrNotFound(String),

    /// The name label matched several SRs; labels must be unique to resolve.
    #[error("found {count} SRs with the name '{name}', the name must be unique")]
    AmbiguousSrName { name: String, count: usize },

    /// The connected host's pool has no usable default SR.
    #[error("failed to find default SR on host '{0}'")]
    NoDefaultSr(HostRef),

    /// ISO SRs are never defaulted; the name has to be configured.
    #[error("sr_iso_name must be specified in the builder configuration")]
    MissingIsoSrName,

    /// The underlying connection failed while resolving.
    #[error("pool query '{op}' failed")]
    Pool {
        op: &'static str,
        #[source]
        source: PoolError,
    },
}

impl ResolveError {
    /// True when the failure came from the connection rather than from the
    /// configured names.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Pool { .. })
    }
}

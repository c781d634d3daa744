//! Pool connection capability trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{HostRef, PoolRecord, SrRef};

/// Read-only view of a hypervisor pool, implemented by each session type.
///
/// The resolver locates storage repositories through this trait without
/// knowing anything about the underlying wire protocol. Implementations
/// must not retry internally; a failed query surfaces immediately to the
/// caller.
#[async_trait]
pub trait PoolClient: Send + Sync {
    /// Identity of the host this session is connected to.
    async fn this_host(&self) -> Result<HostRef>;

    /// All pool records visible to this session.
    async fn pools(&self) -> Result<Vec<PoolRecord>>;

    /// Storage repositories carrying the given name label.
    ///
    /// Name labels are not unique on a pool; the caller decides what zero
    /// or multiple matches mean.
    async fn srs_by_name_label(&self, label: &str) -> Result<Vec<SrRef>>;
}

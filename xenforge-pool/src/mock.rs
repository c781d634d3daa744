//! Mock pool connection for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PoolError, Result};
use crate::traits::PoolClient;
use crate::types::{HostRef, PoolRecord, SrRef};

/// Mock pool connection for testing.
///
/// Simulates the read-only pool queries in memory without a live session.
/// Useful for:
/// - Unit and integration testing
/// - Development without a reachable pool
pub struct MockPool {
    host: HostRef,
    pools: RwLock<Vec<PoolRecord>>,
    srs: RwLock<Vec<(String, SrRef)>>,
    failure: RwLock<Option<String>>,
}

fn opaque_ref() -> String {
    format!("OpaqueRef:{}", Uuid::new_v4())
}

impl MockPool {
    /// Create an empty mock pool connection.
    pub fn new() -> Self {
        info!("Creating mock pool connection");
        Self {
            host: HostRef::new(opaque_ref()),
            pools: RwLock::new(Vec::new()),
            srs: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// The host identity this mock reports for the session.
    pub fn host(&self) -> HostRef {
        self.host.clone()
    }

    /// Register an SR under the given name label and return its reference.
    ///
    /// Registering the same label twice produces duplicate name labels, the
    /// way a real pool allows.
    pub fn add_sr(&self, name_label: &str) -> SrRef {
        let sr = SrRef::new(opaque_ref());
        self.srs
            .write()
            .expect("mock state lock poisoned")
            .push((name_label.to_string(), sr.clone()));
        debug!(name_label, sr = %sr, "Registered mock SR");
        sr
    }

    /// Register a pool record.
    pub fn add_pool(&self, name_label: &str, master: HostRef, default_sr: Option<SrRef>) {
        self.pools
            .write()
            .expect("mock state lock poisoned")
            .push(PoolRecord {
                name_label: name_label.to_string(),
                master,
                default_sr,
            });
    }

    /// Register a pool mastered by this mock's own host, with `default_sr`
    /// as the pool-wide default.
    pub fn add_own_pool(&self, default_sr: Option<SrRef>) {
        self.add_pool("mock-pool", self.host(), default_sr);
    }

    /// Make every subsequent query fail with a connection error, or clear
    /// the failure mode again with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        *self.failure.write().expect("mock state lock poisoned") = reason.map(str::to_string);
    }

    fn check_failure(&self) -> Result<()> {
        match &*self.failure.read().expect("mock state lock poisoned") {
            Some(reason) => Err(PoolError::ConnectionFailed(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockPool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoolClient for MockPool {
    async fn this_host(&self) -> Result<HostRef> {
        self.check_failure()?;
        Ok(self.host.clone())
    }

    async fn pools(&self) -> Result<Vec<PoolRecord>> {
        self.check_failure()?;
        Ok(self
            .pools
            .read()
            .map_err(|_| PoolError::QueryFailed("mock state lock poisoned".to_string()))?
            .clone())
    }

    async fn srs_by_name_label(&self, label: &str) -> Result<Vec<SrRef>> {
        self.check_failure()?;
        Ok(self
            .srs
            .read()
            .map_err(|_| PoolError::QueryFailed("mock state lock poisoned".to_string()))?
            .iter()
            .filter(|(name, _)| name == label)
            .map(|(_, sr)| sr.clone())
            .collect())
    }
}

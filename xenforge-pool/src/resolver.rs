//! Storage-repository resolution against a live pool connection.

use tracing::{debug, instrument};

use crate::error::ResolveError;
use crate::traits::PoolClient;
use crate::types::SrRef;

/// Resolve the storage repository the built VM's disks are written to.
///
/// With no name (or an empty one) the pool-wide default SR of the connected
/// host's own pool is used: the host identity is looked up first, then the
/// pool it masters. With a name, the label must match exactly one SR.
#[instrument(skip(client))]
pub async fn resolve_sr(
    client: &dyn PoolClient,
    name: Option<&str>,
) -> Result<SrRef, ResolveError> {
    match name {
        None | Some("") => {
            let host = client.this_host().await.map_err(|source| ResolveError::Pool {
                op: "this_host",
                source,
            })?;
            let pools = client.pools().await.map_err(|source| ResolveError::Pool {
                op: "pools",
                source,
            })?;

            let pool = pools
                .into_iter()
                .find(|pool| pool.master == host)
                .ok_or_else(|| ResolveError::NoDefaultSr(host.clone()))?;

            let sr = pool
                .default_sr
                .ok_or(ResolveError::NoDefaultSr(host))?;

            debug!(sr = %sr, "Resolved pool default SR");
            Ok(sr)
        }
        Some(label) => lookup_unique(client, label).await,
    }
}

/// Resolve the ISO library the install media is served from.
///
/// The name is mandatory; there is no pool-level default for ISO SRs.
#[instrument(skip(client))]
pub async fn resolve_iso_sr(
    client: &dyn PoolClient,
    name: &str,
) -> Result<SrRef, ResolveError> {
    if name.is_empty() {
        return Err(ResolveError::MissingIsoSrName);
    }
    lookup_unique(client, name).await
}

/// Look up an SR by name label, requiring exactly one match.
async fn lookup_unique(client: &dyn PoolClient, label: &str) -> Result<SrRef, ResolveError> {
    let mut srs = client
        .srs_by_name_label(label)
        .await
        .map_err(|source| ResolveError::Pool {
            op: "srs_by_name_label",
            source,
        })?;

    match srs.len() {
        0 => Err(ResolveError::SrNotFound(label.to_string())),
        1 => {
            let sr = srs.remove(0);
            debug!(label, sr = %sr, "Resolved SR by name label");
            Ok(sr)
        }
        count => Err(ResolveError::AmbiguousSrName {
            name: label.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPool;
    use crate::types::HostRef;

    #[tokio::test]
    async fn test_resolve_sr_by_name() {
        let pool = MockPool::new();
        let local = pool.add_sr("Local storage");
        pool.add_sr("NFS ISO library");

        let sr = resolve_sr(&pool, Some("Local storage")).await.unwrap();
        assert_eq!(sr, local);
    }

    #[tokio::test]
    async fn test_resolve_sr_not_found() {
        let pool = MockPool::new();
        pool.add_sr("Local storage");

        let err = resolve_sr(&pool, Some("missing")).await.unwrap_err();
        assert!(matches!(err, ResolveError::SrNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_resolve_sr_ambiguous_name() {
        let pool = MockPool::new();
        pool.add_sr("Local storage");
        pool.add_sr("Local storage");

        let err = resolve_sr(&pool, Some("Local storage")).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::AmbiguousSrName { count: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_sr_defaults_to_pool_default() {
        let pool = MockPool::new();
        let default = pool.add_sr("Local storage");
        pool.add_own_pool(Some(default.clone()));

        assert_eq!(resolve_sr(&pool, None).await.unwrap(), default);
        // An empty name takes the same path as an absent one.
        assert_eq!(resolve_sr(&pool, Some("")).await.unwrap(), default);
    }

    #[tokio::test]
    async fn test_resolve_sr_no_pool_for_host() {
        let pool = MockPool::new();
        let other = pool.add_sr("Local storage");
        pool.add_pool("foreign-pool", HostRef::new("OpaqueRef:other-host"), Some(other));

        let err = resolve_sr(&pool, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::NoDefaultSr(_)));
    }

    #[tokio::test]
    async fn test_resolve_sr_default_unset() {
        let pool = MockPool::new();
        pool.add_own_pool(None);

        let err = resolve_sr(&pool, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::NoDefaultSr(_)));
    }

    #[tokio::test]
    async fn test_resolve_iso_sr() {
        let pool = MockPool::new();
        let iso = pool.add_sr("NFS ISO library");

        let sr = resolve_iso_sr(&pool, "NFS ISO library").await.unwrap();
        assert_eq!(sr, iso);
    }

    #[tokio::test]
    async fn test_resolve_iso_sr_requires_name() {
        let pool = MockPool::new();
        pool.add_sr("NFS ISO library");

        let err = resolve_iso_sr(&pool, "").await.unwrap_err();
        assert!(matches!(err, ResolveError::MissingIsoSrName));
    }

    #[tokio::test]
    async fn test_resolve_iso_sr_uniqueness() {
        let pool = MockPool::new();

        let err = resolve_iso_sr(&pool, "isos").await.unwrap_err();
        assert!(matches!(err, ResolveError::SrNotFound(_)));

        pool.add_sr("isos");
        pool.add_sr("isos");
        let err = resolve_iso_sr(&pool, "isos").await.unwrap_err();
        assert!(matches!(err, ResolveError::AmbiguousSrName { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_connection_errors_propagate_tagged() {
        let pool = MockPool::new();
        pool.add_sr("Local storage");
        pool.set_failure(Some("session timed out"));

        let err = resolve_sr(&pool, Some("Local storage")).await.unwrap_err();
        assert!(err.is_connection());
        assert!(matches!(
            err,
            ResolveError::Pool { op: "srs_by_name_label", .. }
        ));

        let err = resolve_sr(&pool, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Pool { op: "this_host", .. }));

        pool.set_failure(None);
        assert!(resolve_sr(&pool, Some("Local storage")).await.is_ok());
    }
}

//! # XenForge Pool
//!
//! Pool abstraction layer for locating storage resources on a XenServer /
//! XCP-ng pool.
//!
//! A build needs two storage repositories before provisioning starts: one
//! for the virtual machine's disks and one holding the install ISO. This
//! crate resolves configured SR names (or the pool default) into opaque
//! references through the [`PoolClient`] capability trait:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             PoolClient Trait            │
//! │  (this_host, pools, srs_by_name_label)  │
//! └─────────────────────┬───────────────────┘
//!                       │
//!         ┌─────────────┴─────────────┐
//!         ▼                           ▼
//! ┌───────────────────┐     ┌───────────────────┐
//! │   XAPI session    │     │     MockPool      │
//! │  (harness-owned)  │     │    (in-memory)    │
//! └───────────────────┘     └───────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xenforge_pool::{resolve_sr, resolve_iso_sr, MockPool};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = MockPool::new();
//!     let local = pool.add_sr("Local storage");
//!
//!     let sr = resolve_sr(&pool, Some("Local storage")).await.unwrap();
//!     assert_eq!(sr, local);
//! }
//! ```

pub mod error;
pub mod mock;
pub mod resolver;
pub mod traits;
pub mod types;

pub use error::{PoolError, ResolveError};
pub use mock::MockPool;
pub use resolver::{resolve_iso_sr, resolve_sr};
pub use traits::PoolClient;
pub use types::{HostRef, PoolRecord, SrRef};

//! # XenForge Builder
//!
//! The decision core of a XenServer / XCP-ng image build. It turns the raw,
//! user-supplied build specification into a validated, fully-defaulted
//! [`BuildSpec`], verifies install-media checksums, and decides VM retention
//! at teardown. Storage-repository resolution runs through the
//! [`xenforge_pool`] abstraction.
//!
//! The provisioning step sequence, the remote shell channel and the CLI
//! harness live outside this crate; they consume the validated spec and the
//! resolved storage references.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xenforge_builder::{BuildSpec, RawBuilderConfig};
//!
//! let raw = RawBuilderConfig::from_json(template_json)?;
//! let spec = BuildSpec::validate(raw, "centos8")
//!     .map_err(|errs| report_all(&errs))?;
//!
//! let sr = spec.common.resolve_sr(&client).await?;
//! let iso_sr = spec.common.resolve_iso_sr(&client).await?;
//! ```

pub mod checksum;
pub mod config;
pub mod duration;
pub mod error;
pub mod policy;
pub mod sshkey;
pub mod types;

pub use checksum::{
    validate_checksum, ChecksumAlgorithm, ChecksumError, ChecksumParseError, ChecksumSpec,
};
pub use config::{BuildSpec, CommonConfig, IsoSource, RawBuilderConfig, SshConfig};
pub use error::ValidationError;
pub use policy::{should_keep_vm, BuildOutcome};
pub use types::{ArtifactFormat, Firmware, IpDiscoveryMode, RetentionPolicy};

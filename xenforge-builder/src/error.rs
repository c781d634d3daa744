//! Validation error reporting for the defaulting and validation engine.

use thiserror::Error;

use crate::checksum::ChecksumParseError;
use crate::duration::DurationError;
use crate::sshkey::SshKeyError;

/// One violated configuration constraint.
///
/// The engine never stops at the first failure; every violation is reported
/// together so a user can fix them all before re-running.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is unset or empty.
    #[error("{0} must be specified")]
    MissingField(&'static str),

    /// A port range with its bounds out of order.
    #[error("the {0} min port must be less than the max")]
    PortRange(&'static str),

    /// A duration field that does not parse.
    #[error("failed to parse {field}: {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: DurationError,
    },

    /// The configured key file is missing or not a private key.
    #[error("ssh_key_path is invalid: {0}")]
    InvalidSshKey(#[source] SshKeyError),

    /// A string-enumerated field with a value outside its closed set.
    #[error("{field} must be one of {allowed:?}, got '{value}'")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    /// The ISO checksum descriptor is malformed.
    #[error("iso_checksum is invalid: {0}")]
    Checksum(#[source] ChecksumParseError),

    /// More than one ISO source is populated.
    #[error("only one of iso_url, iso_urls or iso_name may be specified")]
    ConflictingIsoSource,

    /// No ISO source is populated.
    #[error("one of iso_url, iso_urls or iso_name must be specified")]
    MissingIsoSource,
}

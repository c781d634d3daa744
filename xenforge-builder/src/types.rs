//! Closed enumerations for the string-typed configuration values.
//!
//! Each wire value parses into a closed enum exactly once, during
//! validation. Code downstream of the validation engine only ever sees the
//! enum, so an out-of-set value cannot reach a build.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error from parsing a closed string-enumerated configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// The rejected input.
    pub value: String,
    /// The accepted spellings.
    pub allowed: &'static [&'static str],
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of {:?}",
            self.value, self.allowed
        )
    }
}

impl std::error::Error for ParseEnumError {}

/// Export format of the build artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// XVA export
    Xva,
    /// Compressed XVA export
    XvaCompressed,
    /// Raw VDI export
    VdiRaw,
    /// VHD VDI export
    VdiVhd,
    /// No artifact is exported
    None,
}

impl ArtifactFormat {
    /// The accepted wire spellings.
    pub const ALL: &'static [&'static str] =
        &["xva", "xva_compressed", "vdi_raw", "vdi_vhd", "none"];

    /// The wire spelling of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xva => "xva",
            Self::XvaCompressed => "xva_compressed",
            Self::VdiRaw => "vdi_raw",
            Self::VdiVhd => "vdi_vhd",
            Self::None => "none",
        }
    }
}

impl Default for ArtifactFormat {
    fn default() -> Self {
        Self::Xva
    }
}

impl FromStr for ArtifactFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xva" => Ok(Self::Xva),
            "xva_compressed" => Ok(Self::XvaCompressed),
            "vdi_raw" => Ok(Self::VdiRaw),
            "vdi_vhd" => Ok(Self::VdiVhd),
            "none" => Ok(Self::None),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When to keep the built VM instead of cleaning it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Leave the VM behind regardless of the build result
    Always,
    /// Always clean the VM up
    Never,
    /// Keep the VM only when the build produced an artifact
    OnSuccess,
}

impl RetentionPolicy {
    /// The accepted wire spellings.
    pub const ALL: &'static [&'static str] = &["always", "never", "on_success"];

    /// The wire spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::OnSuccess => "on_success",
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::Never
    }
}

impl FromStr for RetentionPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "on_success" => Ok(Self::OnSuccess),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy the provisioning sequence uses to learn the VM's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpDiscoveryMode {
    /// Try every available source
    Auto,
    /// Ask the guest tools
    Tools,
    /// Wait for the guest to call back over HTTP
    Http,
}

impl IpDiscoveryMode {
    /// The accepted wire spellings.
    pub const ALL: &'static [&'static str] = &["auto", "tools", "http"];

    /// The wire spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Tools => "tools",
            Self::Http => "http",
        }
    }
}

impl Default for IpDiscoveryMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl FromStr for IpDiscoveryMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "tools" => Ok(Self::Tools),
            "http" => Ok(Self::Http),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for IpDiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Firmware the VM boots with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Firmware {
    /// Legacy BIOS boot
    Bios,
    /// UEFI boot
    Uefi,
}

impl Firmware {
    /// The accepted wire spellings.
    pub const ALL: &'static [&'static str] = &["bios", "uefi"];

    /// The wire spelling of this firmware.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bios => "bios",
            Self::Uefi => "uefi",
        }
    }
}

impl Default for Firmware {
    fn default() -> Self {
        Self::Bios
    }
}

impl FromStr for Firmware {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bios" => Ok(Self::Bios),
            "uefi" => Ok(Self::Uefi),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for Firmware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

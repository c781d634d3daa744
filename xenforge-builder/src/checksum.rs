//! Install-media checksum parsing and verification.
//!
//! A checksum descriptor is either the literal `none` or a hex digest,
//! optionally prefixed with its algorithm (`md5:a2217...`). Without a prefix
//! the algorithm is inferred from the digest length. Descriptors are parsed
//! at configuration time; the file digest is only computed when the
//! downloaded media is verified.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Length of this algorithm's digest in hex characters.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Infer the algorithm from a bare digest's length.
    fn for_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// The wire spelling of this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = ChecksumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ChecksumParseError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing a checksum descriptor at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumParseError {
    /// An empty descriptor; disabling verification takes an explicit `none`.
    #[error("a checksum must be specified, or \"none\" to disable verification")]
    Empty,

    /// The algorithm prefix is not a supported algorithm.
    #[error("unknown checksum algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// A bare digest whose length matches no supported algorithm.
    #[error("can't infer a checksum algorithm from a {0}-character digest")]
    UnknownDigestLength(usize),

    /// An explicit algorithm prefix with a digest of the wrong length.
    #[error("a {algorithm} digest must be {expected} hex characters, got {actual}")]
    WrongLength {
        algorithm: ChecksumAlgorithm,
        expected: usize,
        actual: usize,
    },

    /// The digest contains non-hex characters.
    #[error("checksum digest is not valid hex: {0}")]
    InvalidHex(String),
}

/// Errors from verifying a file against a checksum.
///
/// A malformed descriptor is a configuration-time problem; an I/O failure or
/// digest mismatch only shows up at build time and is fatal to the build.
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error(transparent)]
    Parse(#[from] ChecksumParseError),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checksum mismatch for '{path}': expected {algorithm}:{expected}, got {actual}")]
    Mismatch {
        path: PathBuf,
        algorithm: ChecksumAlgorithm,
        expected: String,
        actual: String,
    },
}

/// A parsed checksum descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumSpec {
    /// Verification disabled with the literal descriptor `none`.
    Disabled,
    /// An expected digest under a specific algorithm.
    Digest {
        algorithm: ChecksumAlgorithm,
        digest: Vec<u8>,
    },
}

impl ChecksumSpec {
    /// Parse a checksum descriptor.
    ///
    /// Accepts `algorithm:digest`, a bare digest whose algorithm is inferred
    /// from its length, or the literal `none`. Input is case-insensitive.
    pub fn parse(descriptor: &str) -> Result<Self, ChecksumParseError> {
        if descriptor.is_empty() {
            return Err(ChecksumParseError::Empty);
        }

        let descriptor = descriptor.to_ascii_lowercase();
        if descriptor == "none" {
            return Ok(Self::Disabled);
        }

        let (algorithm, digest_hex) = match descriptor.split_once(':') {
            Some((prefix, digest_hex)) => {
                let algorithm: ChecksumAlgorithm = prefix.parse()?;
                if digest_hex.len() != algorithm.hex_len() {
                    return Err(ChecksumParseError::WrongLength {
                        algorithm,
                        expected: algorithm.hex_len(),
                        actual: digest_hex.len(),
                    });
                }
                (algorithm, digest_hex)
            }
            None => {
                let algorithm = ChecksumAlgorithm::for_hex_len(descriptor.len())
                    .ok_or(ChecksumParseError::UnknownDigestLength(descriptor.len()))?;
                (algorithm, descriptor.as_str())
            }
        };

        let digest = hex::decode(digest_hex)
            .map_err(|err| ChecksumParseError::InvalidHex(err.to_string()))?;

        Ok(Self::Digest { algorithm, digest })
    }

    /// Compute the file's digest and compare it against the expectation.
    ///
    /// [`ChecksumSpec::Disabled`] always succeeds without touching the file.
    pub fn verify_file(&self, path: &Path) -> Result<(), ChecksumError> {
        let (algorithm, expected) = match self {
            Self::Disabled => return Ok(()),
            Self::Digest { algorithm, digest } => (*algorithm, digest),
        };

        let actual = digest_file(algorithm, path).map_err(|source| ChecksumError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if actual != *expected {
            return Err(ChecksumError::Mismatch {
                path: path.to_path_buf(),
                algorithm,
                expected: hex::encode(expected),
                actual: hex::encode(&actual),
            });
        }

        Ok(())
    }
}

impl fmt::Display for ChecksumSpec {
    /// The wire descriptor, normalized to lowercase with an explicit
    /// algorithm prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("none"),
            Self::Digest { algorithm, digest } => {
                write!(f, "{}:{}", algorithm, hex::encode(digest))
            }
        }
    }
}

impl Serialize for ChecksumSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Parse `descriptor` and verify `path` against it in one step.
pub fn validate_checksum(descriptor: &str, path: &Path) -> Result<(), ChecksumError> {
    ChecksumSpec::parse(descriptor)?.verify_file(path)
}

fn digest_file(algorithm: ChecksumAlgorithm, path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    match algorithm {
        ChecksumAlgorithm::Md5 => {
            let mut context = md5::Context::new();
            let mut buffer = vec![0u8; 64 * 1024];
            loop {
                let n = file.read(&mut buffer)?;
                if n == 0 {
                    break;
                }
                context.consume(&buffer[..n]);
            }
            Ok(context.compute().0.to_vec())
        }
        ChecksumAlgorithm::Sha1 => digest_reader::<Sha1>(&mut file),
        ChecksumAlgorithm::Sha256 => digest_reader::<Sha256>(&mut file),
        ChecksumAlgorithm::Sha512 => digest_reader::<Sha512>(&mut file),
    }
}

fn digest_reader<D: Digest>(reader: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

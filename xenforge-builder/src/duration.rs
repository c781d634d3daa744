//! Human-readable duration parsing and numeric range checks.

use std::time::Duration;

use thiserror::Error;

/// Error from parsing a human-readable duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The string was empty.
    #[error("duration must not be empty")]
    Empty,

    /// The string did not parse as a duration.
    #[error("invalid duration: {0}")]
    Invalid(String),
}

/// Parse a wire-format duration like `5s` or `200m`.
///
/// Every component carries a unit; a bare number is rejected. The result is
/// a non-negative elapsed time by construction.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    humantime::parse_duration(s).map_err(|err| DurationError::Invalid(err.to_string()))
}

/// An inclusive port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub min: u16,
    pub max: u16,
}

impl PortRange {
    /// True when the bounds are ordered (`min <= max`).
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

//! VM retention policy evaluation at build teardown.

use serde::{Deserialize, Serialize};

use crate::types::RetentionPolicy;

/// Terminal state of a build, reported once by the provisioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    /// The step sequence ran to completion and produced an artifact.
    Completed,
    /// The build was cancelled from outside.
    Cancelled,
    /// A step failed and halted the sequence.
    Halted,
}

/// Decide whether the provisioned VM survives teardown.
///
/// Cleanup steps consult this before destroying the VM.
pub fn should_keep_vm(policy: RetentionPolicy, outcome: BuildOutcome) -> bool {
    match policy {
        RetentionPolicy::Always => true,
        RetentionPolicy::Never => false,
        RetentionPolicy::OnSuccess => outcome == BuildOutcome::Completed,
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle phases of a watched build

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle stage of a build-style job
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// Created, not yet scheduled
    #[default]
    New,
    /// Waiting for resources
    Pending,
    /// Executing
    Running,
    /// Finished successfully
    Complete,
    /// Finished unsuccessfully
    Failed,
    /// Could not be executed
    Error,
    /// Stopped by a user
    Cancelled,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::New,
        Phase::Pending,
        Phase::Running,
        Phase::Complete,
        Phase::Failed,
        Phase::Error,
        Phase::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::New => "New",
            Phase::Pending => "Pending",
            Phase::Running => "Running",
            Phase::Complete => "Complete",
            Phase::Failed => "Failed",
            Phase::Error => "Error",
            Phase::Cancelled => "Cancelled",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Phase::Complete)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Phase::Cancelled | Phase::Error | Phase::Failed)
    }

    /// Whether a watcher forwards this phase when its config has no override
    pub fn watched_by_default(&self) -> bool {
        matches!(self, Phase::Complete | Phase::Error | Phase::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown phase: {0}")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;

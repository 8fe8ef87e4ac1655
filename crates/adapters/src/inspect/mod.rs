// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enrichment adapters: logs, event logs, execution host, console links

mod cli;

pub use cli::{CliInspector, DEFAULT_LOG_TAIL};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeInspector, InspectCall};

use async_trait::async_trait;
use bc_core::EventLogEntry;
use thiserror::Error;

use crate::cli::CliError;

/// Errors from enrichment lookups
#[derive(Debug, Error)]
pub enum InspectError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },
    #[error("{0}")]
    Unavailable(String),
}

/// Adapter for looking up details about a resource on demand
#[async_trait]
pub trait Inspector: Clone + Send + Sync + 'static {
    /// Bounded tail of a build's log
    async fn logs(&self, namespace: &str, build: &str) -> Result<String, InspectError>;

    /// Event-log entries whose involved object is `object`
    async fn events(&self, namespace: &str, object: &str)
        -> Result<Vec<EventLogEntry>, InspectError>;

    /// Node a pod was scheduled on
    async fn node_name(&self, namespace: &str, pod: &str) -> Result<String, InspectError>;

    /// Base URL of the web console
    async fn console_url(&self) -> Result<String, InspectError>;
}

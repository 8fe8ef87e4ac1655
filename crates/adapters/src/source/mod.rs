// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote event source adapters

mod cli;

pub use cli::CliEventSource;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeEventSource, SourceCall};

use async_trait::async_trait;
use bc_core::{Build, Notification, ResourceVersion, Scope};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::cli::CliError;

/// Stream of notifications.
///
/// Closes when the remote side ends the watch. A watch that fails outright
/// yields one `Err` before closing.
pub type Subscription = mpsc::Receiver<Result<Notification<Build>, SourceError>>;

/// Errors from listing or subscribing
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("failed to decode {what}: {message}")]
    Decode { what: String, message: String },
    #[error("event source unavailable: {0}")]
    Unavailable(String),
}

/// A watchable resource type of the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceType {
    pub group_version: &'static str,
    pub plural: &'static str,
    pub kind: &'static str,
}

/// OpenShift builds
pub const BUILDS: ResourceType = ResourceType {
    group_version: "build.openshift.io/v1",
    plural: "builds",
    kind: "Build",
};

impl ResourceType {
    /// REST collection path for a scope
    pub fn api_path(&self, scope: &Scope) -> String {
        match scope {
            Scope::Namespace(ns) => format!(
                "/apis/{}/namespaces/{}/{}",
                self.group_version, ns, self.plural
            ),
            Scope::AllNamespaces => format!("/apis/{}/{}", self.group_version, self.plural),
        }
    }
}

/// One logical resource collection returned by a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub kind: String,
    pub resource_version: Option<ResourceVersion>,
}

/// Adapter for the remote resource stream
#[async_trait]
pub trait EventSource: Clone + Send + Sync + 'static {
    /// Namespace the client is configured for
    async fn default_namespace(&self) -> Result<String, SourceError>;

    /// Fetch the current state of a resource type
    async fn list(
        &self,
        resource: &ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Collection>, SourceError>;

    /// Open a watch starting after `version`
    async fn subscribe(
        &self,
        resource: &ResourceType,
        scope: &Scope,
        version: &ResourceVersion,
    ) -> Result<Subscription, SourceError>;
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resumable watch loop
//!
//! ```text
//! Listing ──subscribe──▶ Subscribed
//!    ▲                       │
//!    └──────stream closed────┘
//! ```
//!
//! The loop only returns on a fatal error: a failed lookup, listing or
//! subscription, a stream that reports a failure, or a listing that does
//! not resolve to exactly one collection with a resource version.

use crate::error::WatchError;
use async_trait::async_trait;
use bc_adapters::{EventSource, ResourceType, Subscription};
use bc_core::{Build, Notification, ResourceVersion, Scope};
use std::convert::Infallible;

/// Callback run for each notification, awaited before the next one is read
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    async fn handle(&self, notification: Notification<Build>);
}

enum State {
    Listing,
    Subscribed(Subscription),
}

/// Watch over one resource type in one scope
#[derive(Clone, Debug)]
pub struct WatchLoop<S> {
    source: S,
    resource: ResourceType,
    namespace: String,
    all_namespaces: bool,
}

impl<S: EventSource> WatchLoop<S> {
    pub fn new(source: S, resource: ResourceType) -> Self {
        Self {
            source,
            resource,
            namespace: String::new(),
            all_namespaces: false,
        }
    }

    /// Watch a namespace; empty means the client's default namespace
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Watch every namespace; takes precedence over `in_namespace`
    pub fn across_namespaces(mut self, all: bool) -> Self {
        self.all_namespaces = all;
        self
    }

    pub async fn run<H>(&self, handler: &H) -> Result<Infallible, WatchError>
    where
        H: NotificationHandler + ?Sized,
    {
        let mut state = State::Listing;
        loop {
            state = match state {
                State::Listing => {
                    let scope = self.scope().await?;
                    let version = self.current_version(&scope).await?;
                    tracing::debug!(
                        kind = self.resource.kind,
                        %scope,
                        resource_version = %version,
                        "starting watch"
                    );
                    let stream = self
                        .source
                        .subscribe(&self.resource, &scope, &version)
                        .await?;
                    State::Subscribed(stream)
                }
                State::Subscribed(mut stream) => {
                    while let Some(item) = stream.recv().await {
                        let notification = item?;
                        tracing::trace!(
                            event_type = %notification.event_type,
                            name = %notification.object.metadata.name,
                            "received notification"
                        );
                        handler.handle(notification).await;
                    }
                    tracing::warn!(kind = self.resource.kind, "watch channel closed, resubscribing");
                    State::Listing
                }
            };
        }
    }

    /// Resolved on every pass so a changed client default is picked up
    async fn scope(&self) -> Result<Scope, WatchError> {
        if self.all_namespaces {
            return Ok(Scope::AllNamespaces);
        }
        if !self.namespace.is_empty() {
            return Ok(Scope::Namespace(self.namespace.clone()));
        }
        let namespace = self.source.default_namespace().await?;
        Ok(Scope::Namespace(namespace))
    }

    async fn current_version(&self, scope: &Scope) -> Result<ResourceVersion, WatchError> {
        let mut collections = self.source.list(&self.resource, scope).await?;
        if collections.len() != 1 {
            return Err(WatchError::CollectionCount {
                kind: self.resource.kind.to_string(),
                found: collections.len(),
            });
        }
        collections
            .pop()
            .and_then(|collection| collection.resource_version)
            .ok_or_else(|| WatchError::MissingResourceVersion {
                kind: self.resource.kind.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;

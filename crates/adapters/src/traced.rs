// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::deliver::{DeliveryAdapter, DeliveryError, InboxMessage};
use crate::inspect::{InspectError, Inspector};
use crate::source::{Collection, EventSource, ResourceType, SourceError, Subscription};
use async_trait::async_trait;
use bc_core::{EventLogEntry, ResourceVersion, Scope};
use std::time::Instant;
use tracing::Instrument;

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Wrapper that adds tracing to any EventSource
#[derive(Clone)]
pub struct TracedEventSource<S> {
    inner: S,
}

impl<S> TracedEventSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: EventSource> EventSource for TracedEventSource<S> {
    async fn default_namespace(&self) -> Result<String, SourceError> {
        let result = self.inner.default_namespace().await;
        match &result {
            Ok(namespace) => tracing::debug!(namespace, "resolved default namespace"),
            Err(e) => tracing::error!(error = %e, "default namespace lookup failed"),
        }
        result
    }

    async fn list(
        &self,
        resource: &ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Collection>, SourceError> {
        let span = tracing::info_span!("source.list", kind = resource.kind, %scope);
        async {
            let start = Instant::now();
            let result = self.inner.list(resource, scope).await;
            match &result {
                Ok(collections) => tracing::debug!(
                    collections = collections.len(),
                    elapsed_ms = elapsed_ms(start),
                    "listed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed_ms(start),
                    error = %e,
                    "list failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn subscribe(
        &self,
        resource: &ResourceType,
        scope: &Scope,
        version: &ResourceVersion,
    ) -> Result<Subscription, SourceError> {
        let span = tracing::info_span!(
            "source.subscribe",
            kind = resource.kind,
            %scope,
            resource_version = %version
        );
        async {
            let result = self.inner.subscribe(resource, scope, version).await;
            match &result {
                Ok(_) => tracing::debug!("subscribed"),
                Err(e) => tracing::error!(error = %e, "subscribe failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Inspector
#[derive(Clone)]
pub struct TracedInspector<I> {
    inner: I,
}

impl<I> TracedInspector<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<I: Inspector> Inspector for TracedInspector<I> {
    async fn logs(&self, namespace: &str, build: &str) -> Result<String, InspectError> {
        let span = tracing::info_span!("inspect.logs", namespace, build);
        async {
            let start = Instant::now();
            let result = self.inner.logs(namespace, build).await;
            match &result {
                Ok(logs) => tracing::debug!(
                    bytes = logs.len(),
                    elapsed_ms = elapsed_ms(start),
                    "fetched logs"
                ),
                Err(e) => tracing::warn!(elapsed_ms = elapsed_ms(start), error = %e, "logs failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn events(
        &self,
        namespace: &str,
        object: &str,
    ) -> Result<Vec<EventLogEntry>, InspectError> {
        let span = tracing::info_span!("inspect.events", namespace, object);
        async {
            let start = Instant::now();
            let result = self.inner.events(namespace, object).await;
            match &result {
                Ok(entries) => tracing::debug!(
                    count = entries.len(),
                    elapsed_ms = elapsed_ms(start),
                    "fetched events"
                ),
                Err(e) => {
                    tracing::warn!(elapsed_ms = elapsed_ms(start), error = %e, "events failed")
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn node_name(&self, namespace: &str, pod: &str) -> Result<String, InspectError> {
        let result = self.inner.node_name(namespace, pod).await;
        match &result {
            Ok(node) => tracing::trace!(namespace, pod, node, "resolved node"),
            Err(e) => tracing::warn!(namespace, pod, error = %e, "node lookup failed"),
        }
        result
    }

    async fn console_url(&self) -> Result<String, InspectError> {
        let result = self.inner.console_url().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "console lookup failed");
        }
        result
    }
}

/// Wrapper that adds tracing to any DeliveryAdapter
#[derive(Clone)]
pub struct TracedDeliveryAdapter<D> {
    inner: D,
}

impl<D> TracedDeliveryAdapter<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: DeliveryAdapter> DeliveryAdapter for TracedDeliveryAdapter<D> {
    async fn deliver(&self, token: &str, message: &InboxMessage) -> Result<(), DeliveryError> {
        let span = tracing::info_span!(
            "deliver",
            project = %message.project,
            from = %message.from_address
        );
        async {
            tracing::trace!(subject = %message.subject, "sending");
            let start = Instant::now();
            let result = self.inner.deliver(token, message).await;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed_ms(start), "delivered"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed_ms(start),
                    error = %e,
                    "delivery failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

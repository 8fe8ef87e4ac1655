// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds watcher: watch loop, acceptance filter and dispatcher combined

use crate::dispatcher::Dispatcher;
use crate::error::WatchError;
use crate::event::BuildEvent;
use crate::watch::{NotificationHandler, WatchLoop};
use async_trait::async_trait;
use bc_adapters::{EventSource, Inspector, BUILDS};
use bc_core::{accept, Build, Event, Notification, SharedEvent, WatcherConfig};
use std::convert::Infallible;
use std::sync::Arc;

pub struct BuildsWatcher<S, I> {
    name: String,
    config: WatcherConfig,
    watch: WatchLoop<S>,
    inspector: I,
    dispatcher: Dispatcher,
}

impl<S: EventSource, I: Inspector> BuildsWatcher<S, I> {
    pub fn new(
        name: impl Into<String>,
        config: WatcherConfig,
        source: S,
        inspector: I,
        dispatcher: Dispatcher,
    ) -> Self {
        let watch = WatchLoop::new(source, BUILDS)
            .in_namespace(config.namespace.clone())
            .across_namespaces(config.all_namespaces);
        Self {
            name: name.into(),
            config,
            watch,
            inspector,
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Watch until a fatal error
    pub async fn run(self) -> Result<Infallible, WatchError> {
        tracing::info!(
            watcher = %self.name,
            namespace = %self.config.namespace,
            all_namespaces = self.config.all_namespaces,
            notifiers = ?self.dispatcher.notifier_names().collect::<Vec<_>>(),
            "watching builds"
        );
        self.watch.run(&self).await
    }
}

#[async_trait]
impl<S: EventSource, I: Inspector> NotificationHandler for BuildsWatcher<S, I> {
    async fn handle(&self, notification: Notification<Build>) {
        let event = BuildEvent::new(notification, self.inspector.clone());
        if !accept(&self.config, &event) {
            tracing::trace!(
                watcher = %self.name,
                event_type = %event.event_type(),
                name = event.name(),
                phase = %event.phase(),
                "rejected"
            );
            return;
        }

        tracing::trace!(
            watcher = %self.name,
            event_type = %event.event_type(),
            name = event.name(),
            phase = %event.phase(),
            "accepted"
        );
        let event: SharedEvent = Arc::new(event);
        self.dispatcher.dispatch(event).await;
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;

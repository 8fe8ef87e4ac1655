// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Event` view over a build watch notification

use async_trait::async_trait;
use bc_adapters::Inspector;
use bc_core::{Build, Event, EventLogEntry, Notification, Phase, WatchEventType, BUILD_KIND};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// A build notification plus the inspector used for its lazy fields.
///
/// Equality compares the notification only.
#[derive(Clone)]
pub struct BuildEvent<I> {
    notification: Notification<Build>,
    inspector: I,
}

impl<I> BuildEvent<I> {
    pub fn new(notification: Notification<Build>, inspector: I) -> Self {
        Self {
            notification,
            inspector,
        }
    }

    pub fn build(&self) -> &Build {
        &self.notification.object
    }
}

impl<I> PartialEq for BuildEvent<I> {
    fn eq(&self, other: &Self) -> bool {
        self.notification == other.notification
    }
}

impl<I> fmt::Debug for BuildEvent<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildEvent")
            .field("type", &self.notification.event_type)
            .field("namespace", &self.build().metadata.namespace)
            .field("name", &self.build().metadata.name)
            .field("phase", &self.build().status.phase)
            .finish()
    }
}

#[async_trait]
impl<I: Inspector> Event for BuildEvent<I> {
    fn event_type(&self) -> WatchEventType {
        self.notification.event_type
    }

    fn namespace(&self) -> &str {
        &self.build().metadata.namespace
    }

    fn name(&self) -> &str {
        &self.build().metadata.name
    }

    fn object_type(&self) -> &str {
        BUILD_KIND
    }

    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.build().status.start_timestamp
    }

    fn end_time(&self) -> Option<DateTime<Utc>> {
        self.build().status.completion_timestamp
    }

    fn duration(&self) -> Duration {
        self.build().duration()
    }

    fn phase(&self) -> Phase {
        self.build().status.phase
    }

    fn input(&self) -> String {
        self.build().input()
    }

    fn output(&self) -> String {
        self.build().output()
    }

    async fn logs(&self) -> String {
        match self.inspector.logs(self.namespace(), self.name()).await {
            Ok(logs) => logs,
            Err(e) => format!("Can't get build logs: {}", e),
        }
    }

    async fn events(&self) -> Vec<String> {
        let pod = self.build().pod_name();
        let mut lines = Vec::new();
        let mut entries: Vec<EventLogEntry> = Vec::new();

        match self.inspector.events(self.namespace(), self.name()).await {
            Ok(found) => entries.extend(found),
            Err(e) => lines.push(format!("Can't get build events: {}", e)),
        }
        match self.inspector.events(self.namespace(), &pod).await {
            Ok(found) => entries.extend(found),
            Err(e) => lines.push(format!("Can't get build pod events: {}", e)),
        }

        // Stable sort keeps build events ahead of pod events seen at the same time
        entries.sort_by_key(|entry| entry.last_seen);
        lines.extend(entries.iter().map(ToString::to_string));
        lines
    }

    async fn node_name(&self) -> String {
        let pod = self.build().pod_name();
        match self.inspector.node_name(self.namespace(), &pod).await {
            Ok(node) => node,
            Err(e) => format!("Can't get build node: {}", e),
        }
    }

    async fn console_url(&self) -> String {
        match self.inspector.console_url().await {
            Ok(base) => format!(
                "{}/k8s/ns/{}/builds/{}",
                base.trim_end_matches('/'),
                self.namespace(),
                self.name()
            ),
            Err(e) => format!("Can't get console URL: {}", e),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalized view over one lifecycle transition of a watched resource
//!
//! Filters, dispatchers and notifiers only ever see `dyn Event`, so other
//! resource kinds can be watched by adding another implementation.

use crate::phase::Phase;
use crate::watch::WatchEventType;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Read-only projection of a watch notification.
///
/// The async accessors reach out to external systems. They never fail: an
/// error is returned as a diagnostic string so template rendering can go on.
#[async_trait]
pub trait Event: fmt::Debug + Send + Sync {
    /// Type tag of the raw notification this event was built from
    fn event_type(&self) -> WatchEventType;

    fn namespace(&self) -> &str;

    fn name(&self) -> &str;

    /// Resource kind tag, e.g. `Build`
    fn object_type(&self) -> &str;

    fn start_time(&self) -> Option<DateTime<Utc>>;

    fn end_time(&self) -> Option<DateTime<Utc>>;

    /// Zero until the source has computed it
    fn duration(&self) -> Duration;

    fn phase(&self) -> Phase;

    /// Reference to what the job consumed (e.g. a commit URL), or empty
    fn input(&self) -> String;

    /// Reference to what the job produced (e.g. an image), or empty
    fn output(&self) -> String;

    fn status(&self) -> String {
        self.phase().to_string()
    }

    fn is_success(&self) -> bool {
        self.phase().is_success()
    }

    fn is_failure(&self) -> bool {
        self.phase().is_failure()
    }

    /// Bounded tail of the job's log output
    async fn logs(&self) -> String;

    /// Recent event-log lines for the job and its execution host
    async fn events(&self) -> Vec<String>;

    /// Identifier of the host that executed the job
    async fn node_name(&self) -> String;

    /// Web console link for the job
    async fn console_url(&self) -> String;
}

/// Events are shared between every notifier a watcher fans out to
pub type SharedEvent = Arc<dyn Event>;

/// One entry of a resource's event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogEntry {
    pub component: String,
    pub host: Option<String>,
    pub message: String,
    pub count: u32,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl fmt::Display for EventLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From {}", self.component)?;
        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            write!(f, " on {}", host)?;
        }
        write!(
            f,
            ": {} (seen {} times between {} and {})",
            self.message,
            self.count,
            format_seen(self.first_seen),
            format_seen(self.last_seen),
        )
    }
}

fn format_seen(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeEvent;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Event with canned values, counting how often lazy fields are fetched
    #[derive(Debug, Clone)]
    pub struct FakeEvent {
        pub event_type: WatchEventType,
        pub namespace: String,
        pub name: String,
        pub phase: Phase,
        pub start_time: Option<DateTime<Utc>>,
        pub end_time: Option<DateTime<Utc>>,
        pub duration: Duration,
        pub input: String,
        pub output: String,
        pub logs: String,
        pub events: Vec<String>,
        pub node_name: String,
        pub console_url: String,
        fetches: Arc<AtomicUsize>,
    }

    impl FakeEvent {
        pub fn new(event_type: WatchEventType, phase: Phase) -> Self {
            Self {
                event_type,
                namespace: "ci".to_string(),
                name: "app-1".to_string(),
                phase,
                start_time: None,
                end_time: None,
                duration: Duration::ZERO,
                input: String::new(),
                output: String::new(),
                logs: String::new(),
                events: Vec::new(),
                node_name: String::new(),
                console_url: String::new(),
                fetches: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn named(mut self, namespace: &str, name: &str) -> Self {
            self.namespace = namespace.to_string();
            self.name = name.to_string();
            self
        }

        /// Number of lazy accessor calls made so far
        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn fetched(&self) {
            self.fetches.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Event for FakeEvent {
        fn event_type(&self) -> WatchEventType {
            self.event_type
        }

        fn namespace(&self) -> &str {
            &self.namespace
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn object_type(&self) -> &str {
            "Fake"
        }

        fn start_time(&self) -> Option<DateTime<Utc>> {
            self.start_time
        }

        fn end_time(&self) -> Option<DateTime<Utc>> {
            self.end_time
        }

        fn duration(&self) -> Duration {
            self.duration
        }

        fn phase(&self) -> Phase {
            self.phase
        }

        fn input(&self) -> String {
            self.input.clone()
        }

        fn output(&self) -> String {
            self.output.clone()
        }

        async fn logs(&self) -> String {
            self.fetched();
            self.logs.clone()
        }

        async fn events(&self) -> Vec<String> {
            self.fetched();
            self.events.clone()
        }

        async fn node_name(&self) -> String {
            self.fetched();
            self.node_name.clone()
        }

        async fn console_url(&self) -> String {
            self.fetched();
            self.console_url.clone()
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

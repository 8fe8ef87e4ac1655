// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake inspector for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InspectError, Inspector};
use async_trait::async_trait;
use bc_core::EventLogEntry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded inspector call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectCall {
    Logs { namespace: String, build: String },
    Events { namespace: String, object: String },
    NodeName { namespace: String, pod: String },
    ConsoleUrl,
}

#[derive(Default)]
struct FakeState {
    logs: HashMap<String, String>,
    events: HashMap<String, Vec<EventLogEntry>>,
    nodes: HashMap<String, String>,
    console: Option<String>,
    calls: Vec<InspectCall>,
}

/// Inspector answering from canned data.
///
/// Lookups for anything not registered fail with `Unavailable`.
#[derive(Clone, Default)]
pub struct FakeInspector {
    state: Arc<Mutex<FakeState>>,
}

impl FakeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(self, build: &str, logs: &str) -> Self {
        self.lock().logs.insert(build.to_string(), logs.to_string());
        self
    }

    pub fn with_events(self, object: &str, entries: Vec<EventLogEntry>) -> Self {
        self.lock().events.insert(object.to_string(), entries);
        self
    }

    pub fn with_node(self, pod: &str, node: &str) -> Self {
        self.lock().nodes.insert(pod.to_string(), node.to_string());
        self
    }

    pub fn with_console(self, url: &str) -> Self {
        self.lock().console = Some(url.to_string());
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<InspectCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn missing(what: &str, key: &str) -> InspectError {
    InspectError::Unavailable(format!("no {} for {}", what, key))
}

#[async_trait]
impl Inspector for FakeInspector {
    async fn logs(&self, namespace: &str, build: &str) -> Result<String, InspectError> {
        let mut state = self.lock();
        state.calls.push(InspectCall::Logs {
            namespace: namespace.to_string(),
            build: build.to_string(),
        });
        state
            .logs
            .get(build)
            .cloned()
            .ok_or_else(|| missing("logs", build))
    }

    async fn events(
        &self,
        namespace: &str,
        object: &str,
    ) -> Result<Vec<EventLogEntry>, InspectError> {
        let mut state = self.lock();
        state.calls.push(InspectCall::Events {
            namespace: namespace.to_string(),
            object: object.to_string(),
        });
        state
            .events
            .get(object)
            .cloned()
            .ok_or_else(|| missing("events", object))
    }

    async fn node_name(&self, namespace: &str, pod: &str) -> Result<String, InspectError> {
        let mut state = self.lock();
        state.calls.push(InspectCall::NodeName {
            namespace: namespace.to_string(),
            pod: pod.to_string(),
        });
        state
            .nodes
            .get(pod)
            .cloned()
            .ok_or_else(|| missing("node", pod))
    }

    async fn console_url(&self) -> Result<String, InspectError> {
        let mut state = self.lock();
        state.calls.push(InspectCall::ConsoleUrl);
        state
            .console
            .clone()
            .ok_or_else(|| InspectError::Unavailable("no web console configured".to_string()))
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake event source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Collection, EventSource, ResourceType, SourceError, Subscription};
use async_trait::async_trait;
use bc_core::{Build, Notification, ResourceVersion, Scope};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Recorded source call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    DefaultNamespace,
    List { scope: Scope },
    Subscribe { scope: Scope, version: ResourceVersion },
}

struct Script {
    events: Vec<Notification<Build>>,
    keep_open: bool,
    failure: Option<String>,
}

struct FakeState {
    default_namespace: String,
    collections_per_list: usize,
    resource_versions: bool,
    lists: u64,
    namespace_error: Option<String>,
    list_error: Option<String>,
    scripts: VecDeque<Script>,
    open: Vec<mpsc::Sender<Result<Notification<Build>, SourceError>>>,
    calls: Vec<SourceCall>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
            collections_per_list: 1,
            resource_versions: true,
            lists: 0,
            namespace_error: None,
            list_error: None,
            scripts: VecDeque::new(),
            open: Vec::new(),
            calls: Vec::new(),
        }
    }
}

/// Scripted event source.
///
/// Each `list` returns version `"<n>"` for the n-th listing. Each `subscribe`
/// consumes the next scripted subscription; once they run out, subscribing
/// fails, which ends a watch loop under test.
#[derive(Clone, Default)]
pub struct FakeEventSource {
    state: Arc<Mutex<FakeState>>,
}

impl FakeEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_namespace(self, namespace: &str) -> Self {
        self.lock().default_namespace = namespace.to_string();
        self
    }

    /// Make listings resolve to `count` collections
    pub fn with_collections(self, count: usize) -> Self {
        self.lock().collections_per_list = count;
        self
    }

    /// Make listings carry no resource version
    pub fn without_resource_version(self) -> Self {
        self.lock().resource_versions = false;
        self
    }

    pub fn fail_default_namespace(self, message: &str) -> Self {
        self.lock().namespace_error = Some(message.to_string());
        self
    }

    pub fn fail_list(self, message: &str) -> Self {
        self.lock().list_error = Some(message.to_string());
        self
    }

    /// Queue a subscription that delivers `events` and then closes
    pub fn push_subscription(&self, events: Vec<Notification<Build>>) {
        self.lock().scripts.push_back(Script {
            events,
            keep_open: false,
            failure: None,
        });
    }

    /// Queue a subscription that delivers `events` and then stays open
    pub fn push_open_subscription(&self, events: Vec<Notification<Build>>) {
        self.lock().scripts.push_back(Script {
            events,
            keep_open: true,
            failure: None,
        });
    }

    /// Queue a subscription that delivers `events` and then fails
    pub fn push_failed_subscription(&self, events: Vec<Notification<Build>>, message: &str) {
        self.lock().scripts.push_back(Script {
            events,
            keep_open: false,
            failure: Some(message.to_string()),
        });
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SourceCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn default_namespace(&self) -> Result<String, SourceError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::DefaultNamespace);
        if let Some(message) = &state.namespace_error {
            return Err(SourceError::Unavailable(message.clone()));
        }
        Ok(state.default_namespace.clone())
    }

    async fn list(
        &self,
        resource: &ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Collection>, SourceError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::List {
            scope: scope.clone(),
        });
        if let Some(message) = &state.list_error {
            return Err(SourceError::Unavailable(message.clone()));
        }
        state.lists += 1;
        let version = state
            .resource_versions
            .then(|| ResourceVersion(state.lists.to_string()));
        Ok((0..state.collections_per_list)
            .map(|_| Collection {
                kind: format!("{}List", resource.kind),
                resource_version: version.clone(),
            })
            .collect())
    }

    async fn subscribe(
        &self,
        _resource: &ResourceType,
        scope: &Scope,
        version: &ResourceVersion,
    ) -> Result<Subscription, SourceError> {
        let mut state = self.lock();
        state.calls.push(SourceCall::Subscribe {
            scope: scope.clone(),
            version: version.clone(),
        });
        let script = state
            .scripts
            .pop_front()
            .ok_or_else(|| SourceError::Unavailable("no scripted subscription left".to_string()))?;

        let (tx, rx) = mpsc::channel(script.events.len() + 1);
        for event in script.events {
            let _ = tx.try_send(Ok(event));
        }
        if let Some(message) = script.failure {
            let _ = tx.try_send(Err(SourceError::Unavailable(message)));
        }
        if script.keep_open {
            state.open.push(tx);
        }
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

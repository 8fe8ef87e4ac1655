// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake delivery adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DeliveryAdapter, DeliveryError, InboxMessage};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Recorded delivery
#[derive(Debug, Clone)]
pub struct DeliveryCall {
    pub token: String,
    pub message: InboxMessage,
    pub succeeded: bool,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<DeliveryCall>,
    failing: HashSet<usize>,
}

/// Fake delivery adapter that records every attempt
#[derive(Clone, Default)]
pub struct FakeDeliveryAdapter {
    state: Arc<Mutex<FakeState>>,
    delivered: Arc<Notify>,
}

impl FakeDeliveryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th attempt (zero-based) fail
    pub fn fail_attempt(self, index: usize) -> Self {
        self.lock().failing.insert(index);
        self
    }

    /// Get all recorded attempts, failed ones included
    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.lock().calls.clone()
    }

    /// Subjects of all attempts, in order
    pub fn subjects(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .map(|c| c.message.subject.clone())
            .collect()
    }

    /// Wait until at least `count` attempts were made; false on timeout
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.delivered.notified();
                if self.lock().calls.len() >= count {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DeliveryAdapter for FakeDeliveryAdapter {
    async fn deliver(&self, token: &str, message: &InboxMessage) -> Result<(), DeliveryError> {
        let succeeded = {
            let mut state = self.lock();
            let succeeded = !state.failing.contains(&state.calls.len());
            state.calls.push(DeliveryCall {
                token: token.to_string(),
                message: message.clone(),
                succeeded,
            });
            succeeded
        };
        self.delivered.notify_waiters();

        if succeeded {
            Ok(())
        } else {
            Err(DeliveryError::Status(500))
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

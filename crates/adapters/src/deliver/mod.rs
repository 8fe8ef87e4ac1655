// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound message delivery adapters

mod flowdock;

pub use flowdock::{FlowdockAdapter, DEFAULT_FLOWDOCK_URL};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DeliveryCall, FakeDeliveryAdapter};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from delivery operations
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("inbox API returned HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

/// One message for a team inbox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InboxMessage {
    pub source: String,
    pub from_address: String,
    pub subject: String,
    pub content: String,
    pub from_name: String,
    pub project: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Adapter for the outbound inbox API
#[async_trait]
pub trait DeliveryAdapter: Clone + Send + Sync + 'static {
    /// Make one delivery attempt; no retries
    async fn deliver(&self, token: &str, message: &InboxMessage) -> Result<(), DeliveryError>;
}

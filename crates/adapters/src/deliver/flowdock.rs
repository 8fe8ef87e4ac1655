// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flowdock team-inbox delivery

use super::{DeliveryAdapter, DeliveryError, InboxMessage};
use async_trait::async_trait;

pub const DEFAULT_FLOWDOCK_URL: &str = "https://api.flowdock.com";

/// Posts messages to `<base>/v1/messages/team_inbox/<token>`
#[derive(Clone, Debug)]
pub struct FlowdockAdapter {
    base_url: String,
}

impl Default for FlowdockAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_FLOWDOCK_URL)
    }
}

impl FlowdockAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn inbox_url(&self, token: &str) -> String {
        format!("{}/v1/messages/team_inbox/{}", self.base_url, token)
    }
}

#[async_trait]
impl DeliveryAdapter for FlowdockAdapter {
    async fn deliver(&self, token: &str, message: &InboxMessage) -> Result<(), DeliveryError> {
        let body = serde_json::to_string(message)?;
        let url = self.inbox_url(token);

        tokio::task::spawn_blocking(move || post_json(&url, body))
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
    }
}

fn post_json(url: &str, body: String) -> Result<(), DeliveryError> {
    match ureq::post(url)
        .header("Content-Type", "application/json")
        .send(body)
    {
        Ok(_) => Ok(()),
        Err(ureq::Error::StatusCode(code)) => Err(DeliveryError::Status(code)),
        Err(e) => Err(DeliveryError::Transport(e.to_string())),
    }
}

#[cfg(test)]
#[path = "flowdock_tests.rs"]
mod tests;

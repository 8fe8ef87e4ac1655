// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspector backed by the cluster CLI

use super::{InspectError, Inspector};
use crate::cli::ClusterCli;
use async_trait::async_trait;
use bc_core::EventLogEntry;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Default number of log lines fetched per build
pub const DEFAULT_LOG_TAIL: u32 = 50;

#[derive(Clone, Debug)]
pub struct CliInspector {
    cli: ClusterCli,
    log_tail: u32,
}

impl CliInspector {
    pub fn new(cli: ClusterCli, log_tail: u32) -> Self {
        Self { cli, log_tail }
    }
}

#[async_trait]
impl Inspector for CliInspector {
    async fn logs(&self, namespace: &str, build: &str) -> Result<String, InspectError> {
        let target = format!("build/{}", build);
        let tail = format!("--tail={}", self.log_tail);
        Ok(self
            .cli
            .output(&["logs", &target, "-n", namespace, &tail])
            .await?)
    }

    async fn events(
        &self,
        namespace: &str,
        object: &str,
    ) -> Result<Vec<EventLogEntry>, InspectError> {
        let selector = format!("involvedObject.name={}", object);
        let out = self
            .cli
            .output(&[
                "get",
                "events",
                "-n",
                namespace,
                "--field-selector",
                &selector,
                "-o",
                "json",
            ])
            .await?;
        decode_events(&out)
    }

    async fn node_name(&self, namespace: &str, pod: &str) -> Result<String, InspectError> {
        let out = self
            .cli
            .output(&["get", "pod", pod, "-n", namespace, "-o", "jsonpath={.spec.nodeName}"])
            .await?;
        Ok(out.trim().to_string())
    }

    async fn console_url(&self) -> Result<String, InspectError> {
        let out = self.cli.output(&["whoami", "--show-console"]).await?;
        let url = out.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(InspectError::Unavailable("no web console configured".to_string()));
        }
        Ok(url.to_string())
    }
}

#[derive(Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<RawEvent>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEvent {
    source: RawEventSource,
    reporting_component: Option<String>,
    message: String,
    count: Option<u32>,
    first_timestamp: Option<DateTime<Utc>>,
    last_timestamp: Option<DateTime<Utc>>,
    event_time: Option<DateTime<Utc>>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawEventSource {
    component: Option<String>,
    host: Option<String>,
}

fn decode_events(out: &str) -> Result<Vec<EventLogEntry>, InspectError> {
    let list: EventList = serde_json::from_str(out).map_err(|e| InspectError::Decode {
        what: "event list".to_string(),
        message: e.to_string(),
    })?;
    Ok(list.items.into_iter().map(into_entry).collect())
}

fn into_entry(raw: RawEvent) -> EventLogEntry {
    let component = raw
        .source
        .component
        .or(raw.reporting_component)
        .unwrap_or_default();
    EventLogEntry {
        component,
        host: raw.source.host,
        message: raw.message,
        count: raw.count.unwrap_or(1),
        first_seen: raw.first_timestamp.or(raw.event_time),
        last_seen: raw.last_timestamp.or(raw.event_time),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event source backed by the cluster CLI's raw API access

use super::{Collection, EventSource, ResourceType, SourceError, Subscription};
use crate::cli::ClusterCli;
use async_trait::async_trait;
use bc_core::{Build, Notification, ResourceVersion, Scope, WatchEventType};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::ChildStdout;
use tokio::sync::mpsc;

/// Notifications buffered between the watch process and the consumer
const WATCH_BUFFER: usize = 16;

/// Lists and watches through `<cli> get --raw`
#[derive(Clone, Debug, Default)]
pub struct CliEventSource {
    cli: ClusterCli,
}

impl CliEventSource {
    pub fn new(cli: ClusterCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl EventSource for CliEventSource {
    async fn default_namespace(&self) -> Result<String, SourceError> {
        let out = self
            .cli
            .output(&["config", "view", "--minify", "-o", "jsonpath={..namespace}"])
            .await?;
        Ok(namespace_or_default(&out))
    }

    async fn list(
        &self,
        resource: &ResourceType,
        scope: &Scope,
    ) -> Result<Vec<Collection>, SourceError> {
        let path = resource.api_path(scope);
        let out = self.cli.output(&["get", "--raw", &path]).await?;
        Ok(vec![decode_list(&out)?])
    }

    async fn subscribe(
        &self,
        resource: &ResourceType,
        scope: &Scope,
        version: &ResourceVersion,
    ) -> Result<Subscription, SourceError> {
        let path = format!(
            "{}?watch=1&resourceVersion={}",
            resource.api_path(scope),
            version
        );
        let mut child = self.cli.stream(&["get", "--raw", &path])?;
        let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(SourceError::Unavailable(
                "watch process has no output pipes".to_string(),
            ));
        };
        let cli = self.cli.clone();

        let (tx, rx) = mpsc::channel(WATCH_BUFFER);
        tokio::spawn(async move {
            let errors = tokio::spawn(async move {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf).await;
                buf
            });

            if forward(stdout, &tx).await == StreamEnd::Stopped {
                let _ = child.kill().await;
                return;
            }

            let status = tokio::select! {
                status = child.wait() => status,
                _ = tx.closed() => return,
            };
            match status {
                Ok(status) if status.success() => {}
                Ok(_) => {
                    let stderr = errors.await.unwrap_or_default();
                    let error = cli.failed(&["get", "--raw", &path], &stderr);
                    let _ = tx.send(Err(error.into())).await;
                }
                Err(e) => tracing::warn!(error = %e, "failed to wait for watch process"),
            }
        });

        Ok(rx)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum StreamEnd {
    /// Watch process closed its output
    Eof,
    /// Consumer went away or the server ended the watch
    Stopped,
}

/// Decode watch lines from `stdout` into `tx` until either side stops
async fn forward(
    stdout: ChildStdout,
    tx: &mpsc::Sender<Result<Notification<Build>, SourceError>>,
) -> StreamEnd {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tx.closed() => return StreamEnd::Stopped,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => return StreamEnd::Eof,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read watch stream");
                return StreamEnd::Stopped;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_watch_line(&line) {
            Ok(WatchLine::Event(notification)) => {
                if tx.send(Ok(notification)).await.is_err() {
                    return StreamEnd::Stopped;
                }
            }
            Ok(WatchLine::Ended(message)) => {
                tracing::warn!(reason = %message, "watch ended by server");
                return StreamEnd::Stopped;
            }
            Err(e) => tracing::warn!(error = %e, "skipping watch line"),
        }
    }
}

fn namespace_or_default(out: &str) -> String {
    let ns = out.trim();
    if ns.is_empty() {
        "default".to_string()
    } else {
        ns.to_string()
    }
}

#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    metadata: ListMeta,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMeta {
    resource_version: Option<String>,
}

fn decode_list(out: &str) -> Result<Collection, SourceError> {
    let list: ListEnvelope = serde_json::from_str(out).map_err(|e| SourceError::Decode {
        what: "resource list".to_string(),
        message: e.to_string(),
    })?;
    Ok(Collection {
        kind: list.kind,
        resource_version: list
            .metadata
            .resource_version
            .filter(|v| !v.is_empty())
            .map(ResourceVersion),
    })
}

#[derive(Deserialize)]
struct WatchEnvelope {
    #[serde(rename = "type")]
    event_type: WatchEventType,
    object: serde_json::Value,
}

#[derive(Debug)]
enum WatchLine {
    Event(Notification<Build>),
    /// Server-side error (e.g. version too old); the watch must be restarted
    Ended(String),
}

fn decode_watch_line(line: &str) -> Result<WatchLine, SourceError> {
    let decode_err = |e: serde_json::Error| SourceError::Decode {
        what: "watch event".to_string(),
        message: e.to_string(),
    };
    let envelope: WatchEnvelope = serde_json::from_str(line).map_err(decode_err)?;

    if envelope.event_type == WatchEventType::Error {
        let message = envelope
            .object
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown error")
            .to_string();
        return Ok(WatchLine::Ended(message));
    }

    let kind = envelope.object.get("kind").and_then(|k| k.as_str());
    if let Some(kind) = kind.filter(|k| *k != super::BUILDS.kind) {
        return Err(SourceError::Decode {
            what: "watch event".to_string(),
            message: format!("unexpected kind {}", kind),
        });
    }

    let build: Build = serde_json::from_value(envelope.object).map_err(decode_err)?;
    Ok(WatchLine::Event(Notification::new(envelope.event_type, build)))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template context built from an event

use crate::event::Event;
use crate::template::EventTemplate;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::time::Duration;

/// Variables visible to notification templates.
///
/// Lazy fields are `None` when no template asked for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventContext {
    pub object_type: String,
    pub namespace: String,
    pub name: String,
    pub status: String,
    pub is_success: bool,
    pub is_failure: bool,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,
}

impl EventContext {
    /// Snapshot an event, fetching each lazy field at most once and only
    /// when one of `templates` references it.
    pub async fn collect<E>(event: &E, templates: &[&EventTemplate]) -> Self
    where
        E: Event + ?Sized,
    {
        let wants = |field: &str| templates.iter().any(|t| t.references(field));

        let mut ctx = Self {
            object_type: event.object_type().to_string(),
            namespace: event.namespace().to_string(),
            name: event.name().to_string(),
            status: event.status(),
            is_success: event.is_success(),
            is_failure: event.is_failure(),
            start_time: format_time(event.start_time()),
            end_time: format_time(event.end_time()),
            duration: format_duration(event.duration()),
            input: event.input(),
            output: event.output(),
            ..Self::default()
        };

        if wants("logs") {
            ctx.logs = Some(event.logs().await);
        }
        if wants("events") {
            ctx.events = Some(event.events().await);
        }
        if wants("node_name") {
            ctx.node_name = Some(event.node_name().await);
        }
        if wants("console_url") {
            ctx.console_url = Some(event.console_url().await);
        }
        ctx
    }
}

fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Whole seconds, e.g. `1m 30s`; `0s` when unknown
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(Duration::from_secs(duration.as_secs())).to_string()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

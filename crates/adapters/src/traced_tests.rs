// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::deliver::FakeDeliveryAdapter;
use crate::inspect::{FakeInspector, InspectCall};
use crate::source::{FakeEventSource, SourceCall, BUILDS};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

// =============================================================================
// Tracing output verification tests
// =============================================================================

#[test]
fn traced_source_list_logs_span_and_timing() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedEventSource::new(FakeEventSource::new());
        traced
            .list(&BUILDS, &Scope::Namespace("ci".to_string()))
            .await
    });

    assert_eq!(result.unwrap().len(), 1);
    assert!(logs.contains("source.list"), "Should log span name. Logs:\n{}", logs);
    assert!(logs.contains("ci"), "Should log scope. Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Should log timing. Logs:\n{}", logs);
}

#[test]
fn traced_source_list_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedEventSource::new(FakeEventSource::new().fail_list("forbidden"));
        traced.list(&BUILDS, &Scope::AllNamespaces).await
    });

    assert!(result.is_err());
    assert!(logs.contains("list failed"), "Should log failure. Logs:\n{}", logs);
    assert!(logs.contains("forbidden"), "Should log cause. Logs:\n{}", logs);
}

#[test]
fn traced_inspector_logs_failed_lookup() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedInspector::new(FakeInspector::new());
        traced.logs("ci", "app-1").await
    });

    assert!(result.is_err());
    assert!(logs.contains("inspect.logs"), "Should log span name. Logs:\n{}", logs);
    assert!(logs.contains("logs failed"), "Should log failure. Logs:\n{}", logs);
}

#[test]
fn traced_delivery_logs_outcome_without_token() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedDeliveryAdapter::new(FakeDeliveryAdapter::new());
        let message = InboxMessage {
            project: "ci".to_string(),
            subject: "Build ci/app-1 Complete".to_string(),
            ..InboxMessage::default()
        };
        traced.deliver("secret-token", &message).await
    });

    assert!(result.is_ok());
    assert!(logs.contains("delivered"), "Should log completion. Logs:\n{}", logs);
    assert!(
        !logs.contains("secret-token"),
        "Token must not be logged. Logs:\n{}",
        logs
    );
}

#[test]
fn traced_delivery_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedDeliveryAdapter::new(FakeDeliveryAdapter::new().fail_attempt(0));
        traced.deliver("t", &InboxMessage::default()).await
    });

    assert!(result.is_err());
    assert!(logs.contains("delivery failed"), "Should log failure. Logs:\n{}", logs);
    assert!(logs.contains("HTTP 500"), "Should log cause. Logs:\n{}", logs);
}

// =============================================================================
// Delegation tests - verify traced wrapper delegates to inner adapter
// =============================================================================

#[tokio::test]
async fn traced_source_delegates_subscribe_to_inner() {
    let fake = FakeEventSource::new();
    fake.push_subscription(vec![]);
    let traced = TracedEventSource::new(fake.clone());

    let scope = Scope::Namespace("ci".to_string());
    let version = ResourceVersion::new("42");
    traced.subscribe(&BUILDS, &scope, &version).await.unwrap();

    assert_eq!(fake.calls(), vec![SourceCall::Subscribe { scope, version }]);
}

#[tokio::test]
async fn traced_inspector_delegates_to_inner() {
    let fake = FakeInspector::new().with_node("app-1-build", "node-3");
    let traced = TracedInspector::new(fake.clone());

    assert_eq!(traced.node_name("ci", "app-1-build").await.unwrap(), "node-3");
    assert_eq!(
        fake.calls(),
        vec![InspectCall::NodeName {
            namespace: "ci".to_string(),
            pod: "app-1-build".to_string(),
        }]
    );
}

#[tokio::test]
async fn traced_delivery_delegates_to_inner() {
    let fake = FakeDeliveryAdapter::new();
    let traced = TracedDeliveryAdapter::new(fake.clone());

    traced.deliver("tok", &InboxMessage::default()).await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].token, "tok");
}

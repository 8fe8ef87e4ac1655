// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn entry(host: Option<&str>) -> EventLogEntry {
    EventLogEntry {
        component: "build-controller".to_string(),
        host: host.map(str::to_string),
        message: "Build started".to_string(),
        count: 3,
        first_seen: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        last_seen: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 5, 0).unwrap()),
    }
}

#[test]
fn log_entry_with_host() {
    assert_eq!(
        entry(Some("node-a")).to_string(),
        "From build-controller on node-a: Build started \
         (seen 3 times between 2024-05-01T10:00:00+00:00 and 2024-05-01T10:05:00+00:00)"
    );
}

#[test]
fn log_entry_without_host() {
    let line = entry(None).to_string();
    assert!(line.starts_with("From build-controller: Build started"));
}

#[test]
fn log_entry_with_unknown_times() {
    let mut e = entry(Some(""));
    e.first_seen = None;
    e.last_seen = None;
    assert_eq!(
        e.to_string(),
        "From build-controller: Build started (seen 3 times between unknown and unknown)"
    );
}

#[test]
fn derived_predicates_follow_phase() {
    let complete = FakeEvent::new(WatchEventType::Modified, Phase::Complete);
    assert!(complete.is_success());
    assert!(!complete.is_failure());
    assert_eq!(complete.status(), "Complete");

    let cancelled = FakeEvent::new(WatchEventType::Modified, Phase::Cancelled);
    assert!(!cancelled.is_success());
    assert!(cancelled.is_failure());

    let running = FakeEvent::new(WatchEventType::Modified, Phase::Running);
    assert!(!running.is_success());
    assert!(!running.is_failure());
}

#[tokio::test]
async fn fake_counts_lazy_fetches() {
    let event = FakeEvent::new(WatchEventType::Added, Phase::New);
    assert_eq!(event.fetch_count(), 0);

    let _ = event.logs().await;
    let _ = event.node_name().await;

    assert_eq!(event.fetch_count(), 2);
}

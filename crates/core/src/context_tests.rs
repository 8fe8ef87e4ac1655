// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event::FakeEvent;
use crate::phase::Phase;
use crate::watch::WatchEventType;
use chrono::TimeZone;
use yare::parameterized;

fn template(source: &str) -> EventTemplate {
    EventTemplate::parse("test", source).unwrap()
}

fn complete_event() -> FakeEvent {
    let mut event = FakeEvent::new(WatchEventType::Modified, Phase::Complete);
    event.start_time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single();
    event.end_time = Utc.with_ymd_and_hms(2024, 5, 1, 10, 1, 30).single();
    event.duration = Duration::from_secs(90);
    event.logs = "step 1/3".to_string();
    event.events = vec!["From kubelet: Pulled".to_string()];
    event
}

#[tokio::test]
async fn eager_fields_are_always_present() {
    let event = complete_event();
    let ctx = EventContext::collect(&event, &[&template("{{ name }}")]).await;

    assert_eq!(ctx.object_type, "Fake");
    assert_eq!(ctx.namespace, "ci");
    assert_eq!(ctx.status, "Complete");
    assert!(ctx.is_success);
    assert!(!ctx.is_failure);
    assert_eq!(ctx.start_time, "2024-05-01T10:00:00Z");
    assert_eq!(ctx.end_time, "2024-05-01T10:01:30Z");
    assert_eq!(ctx.duration, "1m 30s");
}

#[tokio::test]
async fn unreferenced_lazy_fields_are_not_fetched() {
    let event = complete_event();
    let ctx = EventContext::collect(&event, &[&template("{{ status }}")]).await;

    assert_eq!(event.fetch_count(), 0);
    assert_eq!(ctx.logs, None);
    assert_eq!(ctx.events, None);
}

#[tokio::test]
async fn referenced_lazy_fields_are_fetched_once() {
    let event = complete_event();
    let subject = template("{{ name }}: {{ logs }}");
    let content = template("{{ logs }}{% for e in events %}{{ e }}{% endfor %}");

    let ctx = EventContext::collect(&event, &[&subject, &content]).await;

    assert_eq!(event.fetch_count(), 2);
    assert_eq!(ctx.logs.as_deref(), Some("step 1/3"));
    assert_eq!(ctx.events, Some(vec!["From kubelet: Pulled".to_string()]));
    assert_eq!(ctx.node_name, None);
}

#[tokio::test]
async fn missing_times_render_empty() {
    let event = FakeEvent::new(WatchEventType::Added, Phase::New);
    let ctx = EventContext::collect(&event, &[]).await;

    assert_eq!(ctx.start_time, "");
    assert_eq!(ctx.end_time, "");
    assert_eq!(ctx.duration, "0s");
}

#[tokio::test]
async fn context_renders_through_template() {
    let event = complete_event();
    let subject = template("{{ object_type }} {{ namespace }}/{{ name }} {{ status }}");
    let ctx = EventContext::collect(&event, &[&subject]).await;

    assert_eq!(subject.render(&ctx).unwrap(), "Fake ci/app-1 Complete");
}

#[parameterized(
    zero = { 0, "0s" },
    seconds = { 42, "42s" },
    minutes = { 90, "1m 30s" },
    hours = { 3723, "1h 2m 3s" },
)]
fn duration_formatting(secs: u64, expected: &str) {
    assert_eq!(format_duration(Duration::from_secs(secs)), expected);
}

#[test]
fn subsecond_precision_is_dropped() {
    assert_eq!(format_duration(Duration::from_millis(1500)), "1s");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn inbox_url_includes_token() {
    let adapter = FlowdockAdapter::new("https://api.example.test/");
    assert_eq!(
        adapter.inbox_url("abc123"),
        "https://api.example.test/v1/messages/team_inbox/abc123"
    );
}

#[test]
fn default_targets_public_api() {
    assert_eq!(
        FlowdockAdapter::default().inbox_url("t"),
        "https://api.flowdock.com/v1/messages/team_inbox/t"
    );
}

#[test]
fn message_body_shape() {
    let message = InboxMessage {
        source: "OpenShift".to_string(),
        from_address: "build+ok@flowdock.com".to_string(),
        subject: "Build ci/app-1 Complete".to_string(),
        content: "<h3>done</h3>".to_string(),
        from_name: "OpenShift".to_string(),
        project: "ci".to_string(),
        tags: vec!["ci".to_string()],
    };

    let json: serde_json::Value = serde_json::to_value(&message).unwrap();
    assert_eq!(json["from_address"], "build+ok@flowdock.com");
    assert_eq!(json["project"], "ci");
    assert_eq!(json["tags"], serde_json::json!(["ci"]));
}

#[test]
fn empty_tags_are_omitted() {
    let json = serde_json::to_value(InboxMessage::default()).unwrap();
    assert!(json.get("tags").is_none());
    assert_eq!(json["subject"], "");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Port 9 on loopback refuses connections
    let adapter = FlowdockAdapter::new("http://127.0.0.1:9");
    let err = adapter
        .deliver("token", &InboxMessage::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)), "{err}");
}

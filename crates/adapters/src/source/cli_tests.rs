// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::source::BUILDS;
use bc_core::Phase;

#[test]
fn api_paths_follow_scope() {
    assert_eq!(
        BUILDS.api_path(&Scope::Namespace("ci".to_string())),
        "/apis/build.openshift.io/v1/namespaces/ci/builds"
    );
    assert_eq!(
        BUILDS.api_path(&Scope::AllNamespaces),
        "/apis/build.openshift.io/v1/builds"
    );
}

#[test]
fn empty_namespace_falls_back_to_default() {
    assert_eq!(namespace_or_default("\n"), "default");
    assert_eq!(namespace_or_default("ci\n"), "ci");
}

#[test]
fn decodes_list_resource_version() {
    let out = r#"{"kind":"BuildList","apiVersion":"build.openshift.io/v1","metadata":{"resourceVersion":"981"},"items":[]}"#;
    let collection = decode_list(out).unwrap();
    assert_eq!(collection.kind, "BuildList");
    assert_eq!(collection.resource_version, Some(ResourceVersion::new("981")));
}

#[test]
fn empty_list_resource_version_is_missing() {
    let out = r#"{"kind":"List","metadata":{"resourceVersion":""}}"#;
    assert_eq!(decode_list(out).unwrap().resource_version, None);
}

#[test]
fn rejects_non_json_list() {
    assert!(matches!(
        decode_list("Error from server"),
        Err(SourceError::Decode { .. })
    ));
}

#[test]
fn decodes_build_notification() {
    let line = r#"{"type":"MODIFIED","object":{"kind":"Build","metadata":{"name":"app-2","namespace":"ci"},"status":{"phase":"Running"}}}"#;
    match decode_watch_line(line).unwrap() {
        WatchLine::Event(n) => {
            assert_eq!(n.event_type, WatchEventType::Modified);
            assert_eq!(n.object.metadata.name, "app-2");
            assert_eq!(n.object.status.phase, Phase::Running);
        }
        other => panic!("unexpected line: {other:?}"),
    }
}

#[test]
fn error_notification_ends_the_watch() {
    let line = r#"{"type":"ERROR","object":{"kind":"Status","status":"Failure","message":"too old resource version: 1 (42)","code":410}}"#;
    match decode_watch_line(line).unwrap() {
        WatchLine::Ended(message) => assert!(message.contains("too old")),
        other => panic!("unexpected line: {other:?}"),
    }
}

#[test]
fn rejects_other_kinds() {
    let line = r#"{"type":"ADDED","object":{"kind":"Pod","metadata":{"name":"p"}}}"#;
    assert!(decode_watch_line(line).is_err());
}

#[cfg(unix)]
mod watch_process {
    use super::*;
    use crate::cli::CliError;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const LIST: &str = r#"{"kind":"BuildList","metadata":{"resourceVersion":"7"}}"#;
    const EVENT: &str = r#"{"type":"ADDED","object":{"kind":"Build","metadata":{"name":"app-1","namespace":"ci"},"status":{"phase":"New"}}}"#;

    /// Write an executable stand-in for the cluster CLI that answers
    /// watch requests with `watch_body`
    fn fake_cli(dir: &TempDir, watch_body: &str) -> PathBuf {
        let path = dir.path().join("oc");
        let script = format!(
            "#!/bin/sh\ncase \"$*\" in\n  *watch=1*)\n{watch_body}\n    ;;\nesac\necho '{LIST}'\n"
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    async fn subscribe(path: PathBuf) -> Subscription {
        let source = CliEventSource::new(ClusterCli::new(path.to_string_lossy()));
        let scope = Scope::Namespace("ci".to_string());
        let collections = source.list(&BUILDS, &scope).await.unwrap();
        let version = collections[0].resource_version.clone().unwrap();
        source.subscribe(&BUILDS, &scope, &version).await.unwrap()
    }

    #[tokio::test]
    async fn failed_watch_process_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = fake_cli(
            &dir,
            "    echo 'Error from server (Forbidden): builds is forbidden' >&2\n    exit 1",
        );

        let mut rx = subscribe(path).await;

        match rx.recv().await {
            Some(Err(SourceError::Cli(CliError::Failed { command, stderr }))) => {
                assert!(command.contains("watch=1&resourceVersion=7"), "{command}");
                assert!(stderr.contains("builds is forbidden"), "{stderr}");
            }
            other => panic!("expected watch failure, got {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn clean_watch_exit_closes_stream() {
        let dir = TempDir::new().unwrap();
        let path = fake_cli(&dir, &format!("    echo '{EVENT}'\n    exit 0"));

        let mut rx = subscribe(path).await;

        let notification = rx.recv().await.unwrap().unwrap();
        assert_eq!(notification.object.metadata.name, "app-1");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn server_error_envelope_closes_stream() {
        let dir = TempDir::new().unwrap();
        let path = fake_cli(
            &dir,
            "    echo '{\"type\":\"ERROR\",\"object\":{\"message\":\"too old resource version\"}}'\n    sleep 5",
        );

        let mut rx = subscribe(path).await;

        assert!(rx.recv().await.is_none());
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box startup checks for buildcastd.
//!
//! Every case here must fail before any cluster call is made, so no `oc`
//! binary is needed.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: [&str; 8] = [
    "NOTIFIERS_DEFAULT_TOKEN",
    "NOTIFIERS_DEFAULT_SOURCE",
    "NOTIFIERS_DEFAULT_FROM_NAME",
    "NOTIFIERS_DEFAULT_FROM_ADDRESS",
    "ENABLE_DEFAULT_BUILDS_WATCHER",
    "DEFAULT_BUILDS_WATCHER_NAMESPACE",
    "ENABLE_ALL_BUILDS_WATCHER",
    "RUST_LOG",
];

/// Daemon command isolated from the caller's environment and config
fn buildcastd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("buildcastd").unwrap();
    cmd.current_dir(dir.path())
        .env("CONFIG_PATH", dir.path())
        .arg("--cli")
        .arg("/nonexistent/oc");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn with_config(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), content).unwrap();
    dir
}

#[test]
fn help_lists_flags() {
    let dir = TempDir::new().unwrap();
    buildcastd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--flowdock-url"))
        .stdout(predicate::str::contains("--log-tail"));
}

#[test]
fn refuses_to_start_without_watchers() {
    let dir = TempDir::new().unwrap();
    buildcastd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No watchers configured"));
}

#[test]
fn missing_config_file_is_only_a_warning() {
    let dir = TempDir::new().unwrap();
    buildcastd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("using environment only"))
        .stderr(predicate::str::contains("No watchers configured"));
}

#[test]
fn unparsable_config_is_fatal() {
    let dir = with_config("[watchers.ci\n");
    buildcastd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn invalid_template_is_fatal() {
    let dir = with_config(
        r#"
[watchers.ci]
namespace = "ci"

[notifiers.default]
token = "t"
subject_template = "{% if %}"
"#,
    );
    buildcastd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("subject template"));
}

#[test]
fn unknown_notifier_is_fatal() {
    let dir = with_config(
        r#"
[watchers.ci]
namespace = "ci"
notifiers = ["nobody"]
"#,
    );
    buildcastd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("watcher ci has no notifiers"));
}

#[test]
fn invalid_boolean_env_is_fatal() {
    let dir = TempDir::new().unwrap();
    buildcastd(&dir)
        .env("ENABLE_ALL_BUILDS_WATCHER", "maybe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENABLE_ALL_BUILDS_WATCHER"));
}

#[test]
fn explicit_config_flag_is_used() {
    let dir = TempDir::new().unwrap();
    let other = with_config("[watchers.ci\n");
    buildcastd(&dir)
        .arg("--config")
        .arg(other.path().join("config.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

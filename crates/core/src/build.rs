// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OpenShift `Build` resource model
//!
//! Only the fields the notifier reads are modelled. Everything is optional on
//! the wire, so every struct defaults.

use crate::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Kind tag reported for build events
pub const BUILD_KIND: &str = "Build";

/// Annotation carrying the name of the pod that executes a build
pub const BUILD_POD_NAME_ANNOTATION: &str = "openshift.io/build.pod-name";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Build {
    pub metadata: ObjectMeta,
    pub spec: BuildSpec,
    pub status: BuildStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub resource_version: Option<String>,
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildSpec {
    pub source: BuildSource,
    pub revision: Option<SourceRevision>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildSource {
    pub git: Option<GitBuildSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitBuildSource {
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceRevision {
    pub git: Option<GitSourceRevision>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitSourceRevision {
    pub commit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildStatus {
    pub phase: Phase,
    pub start_timestamp: Option<DateTime<Utc>>,
    pub completion_timestamp: Option<DateTime<Utc>>,
    /// Nanoseconds, as serialized by the build API
    pub duration: Option<i64>,
    pub output_docker_image_reference: Option<String>,
    pub config: Option<ObjectReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectReference {
    pub name: String,
    pub namespace: Option<String>,
}

impl Build {
    /// Link to the source revision this build was started from, or empty
    pub fn input(&self) -> String {
        let commit = self
            .spec
            .revision
            .as_ref()
            .and_then(|revision| revision.git.as_ref());
        match (commit, self.spec.source.git.as_ref()) {
            (Some(commit), Some(source)) => input_reference(&source.uri, &commit.commit),
            _ => String::new(),
        }
    }

    pub fn output(&self) -> String {
        self.status
            .output_docker_image_reference
            .clone()
            .unwrap_or_default()
    }

    pub fn duration(&self) -> Duration {
        let nanos = self.status.duration.unwrap_or(0).max(0);
        Duration::from_nanos(nanos as u64)
    }

    /// Name of the pod executing this build
    pub fn pod_name(&self) -> String {
        self.metadata
            .annotations
            .get(BUILD_POD_NAME_ANNOTATION)
            .cloned()
            .unwrap_or_else(|| format!("{}-build", self.metadata.name))
    }
}

/// Turn a repository URL and revision into a browsable commit link.
///
/// `git@github.com:org/repo.git` and `https://github.com/org/repo.git` both
/// become `https://github.com/org/repo/commit/<revision>`.
pub fn input_reference(uri: &str, revision: &str) -> String {
    let mut uri = uri.strip_suffix(".git").unwrap_or(uri).to_string();
    if uri.starts_with("git") {
        uri = uri.replacen("git@github.com:", "https://github.com/", 1);
    }
    format!("{}/commit/{}", uri, revision)
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch stream envelope types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a watch notification, orthogonal to the resource's phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WatchEventType {
    Added,
    Modified,
    Deleted,
    Error,
}

impl fmt::Display for WatchEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WatchEventType::Added => "ADDED",
            WatchEventType::Modified => "MODIFIED",
            WatchEventType::Deleted => "DELETED",
            WatchEventType::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// One raw notification from a watch stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification<K> {
    #[serde(rename = "type")]
    pub event_type: WatchEventType,
    pub object: K,
}

impl<K> Notification<K> {
    pub fn new(event_type: WatchEventType, object: K) -> Self {
        Self { event_type, object }
    }
}

/// Opaque position in a resource stream from which a watch can resume
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceVersion(pub String);

impl ResourceVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace scope of a listing or subscription
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Namespace(String),
    AllNamespaces,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Namespace(ns) => write!(f, "namespace {}", ns),
            Scope::AllNamespaces => write!(f, "all namespaces"),
        }
    }
}

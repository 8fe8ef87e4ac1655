// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds watcher configuration

use super::DEFAULT_NOTIFIER_NAME;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one watcher subscribes to and where it sends accepted events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatcherConfig {
    /// Namespace to watch; empty means the client's default namespace
    pub namespace: String,
    /// Watch every namespace. Takes precedence over `namespace`.
    pub all_namespaces: bool,
    /// Names of the notifiers accepted events are fanned out to
    pub notifiers: Vec<String>,
    /// Per-phase forwarding overrides; absent phases are forwarded
    pub watch_for_phase: BTreeMap<Phase, bool>,
}

impl WatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn all_namespaces(mut self) -> Self {
        self.all_namespaces = true;
        self
    }

    pub fn with_notifiers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notifiers = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_phase(mut self, phase: Phase, watch: bool) -> Self {
        self.watch_for_phase.insert(phase, watch);
        self
    }

    /// Explicit forwarding decision for a phase, if any
    pub fn watches_phase(&self, phase: Phase) -> Option<bool> {
        self.watch_for_phase.get(&phase).copied()
    }

    /// Fill in the default notifier and every phase without an override.
    ///
    /// Runs once when configuration is finalized; the filter never consults
    /// defaults on its own.
    pub fn set_defaults(&mut self) {
        if self.notifiers.is_empty() {
            self.notifiers = vec![DEFAULT_NOTIFIER_NAME.to_string()];
        }
        for phase in Phase::ALL {
            self.watch_for_phase
                .entry(phase)
                .or_insert_with(|| phase.watched_by_default());
        }
    }
}

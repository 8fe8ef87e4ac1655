// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-watcher acceptance policy

use crate::config::WatcherConfig;
use crate::event::Event;
use crate::watch::WatchEventType;

/// Decide whether a watcher forwards an event to its notifiers.
///
/// Deleted and error notifications carry no lifecycle transition and are
/// always dropped. Otherwise the phase table is consulted as a list of
/// overrides: only an explicit `false` rejects.
pub fn accept<E>(config: &WatcherConfig, event: &E) -> bool
where
    E: Event + ?Sized,
{
    match event.event_type() {
        WatchEventType::Deleted | WatchEventType::Error => return false,
        WatchEventType::Added | WatchEventType::Modified => {}
    }

    config.watches_phase(event.phase()).unwrap_or(true)
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

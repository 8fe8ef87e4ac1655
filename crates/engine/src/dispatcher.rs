// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of accepted events to a watcher's notifiers

use crate::error::RuntimeError;
use crate::notifier::NotifierHandle;
use crate::registry::NotifierRegistry;
use bc_core::SharedEvent;

/// The notifier queues one watcher sends to, resolved at startup
#[derive(Debug, Clone)]
pub struct Dispatcher {
    watcher: String,
    channels: Vec<NotifierHandle>,
}

impl Dispatcher {
    /// Resolve `names` against the registry.
    ///
    /// Unknown names are skipped; resolving none of them is an error.
    pub fn new(
        watcher: &str,
        names: &[String],
        registry: &NotifierRegistry,
    ) -> Result<Self, RuntimeError> {
        let mut channels = Vec::with_capacity(names.len());
        for name in names {
            match registry.get(name) {
                Some(handle) => channels.push(handle.clone()),
                None => tracing::warn!(watcher, notifier = %name, "unknown notifier, skipping"),
            }
        }

        if channels.is_empty() {
            return Err(RuntimeError::NoNotifierChannels {
                watcher: watcher.to_string(),
                requested: names.to_vec(),
            });
        }

        Ok(Self {
            watcher: watcher.to_string(),
            channels,
        })
    }

    pub fn notifier_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(NotifierHandle::name)
    }

    /// Send `event` to every notifier in configuration order, waiting on
    /// each queue in turn.
    pub async fn dispatch(&self, event: SharedEvent) {
        for channel in &self.channels {
            tracing::trace!(
                watcher = %self.watcher,
                notifier = channel.name(),
                name = event.name(),
                "dispatching"
            );
            if !channel.send(event.clone()).await {
                tracing::error!(
                    watcher = %self.watcher,
                    notifier = channel.name(),
                    "notifier channel closed"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

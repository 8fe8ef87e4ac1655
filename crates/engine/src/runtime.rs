// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime wiring: one task per notifier, one per watcher, fail fast

use crate::dispatcher::Dispatcher;
use crate::error::RuntimeError;
use crate::notifier::Notifier;
use crate::registry::NotifierRegistry;
use crate::watcher::BuildsWatcher;
use bc_adapters::{DeliveryAdapter, EventSource, Inspector};
use bc_core::AppConfig;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Runtime adapter dependencies
pub struct RuntimeDeps<S, I, D> {
    pub source: S,
    pub inspector: I,
    pub delivery: D,
}

/// Check the parts of a configuration that do not need any wiring
pub fn validate(config: &AppConfig) -> Result<(), RuntimeError> {
    if !config.has_watchers() {
        return Err(RuntimeError::NoWatchers);
    }
    if !config.has_notifiers() {
        return Err(RuntimeError::NoNotifiers);
    }
    Ok(())
}

/// Running watchers and notifiers.
///
/// Dropping the runtime aborts every task without draining queues.
pub struct Runtime {
    registry: NotifierRegistry,
    failures: mpsc::Receiver<RuntimeError>,
    tasks: JoinSet<()>,
}

impl Runtime {
    /// Validate and wire everything, then spawn the tasks.
    ///
    /// Nothing is spawned unless every notifier's templates parse and every
    /// watcher resolves at least one notifier.
    pub fn start<S, I, D>(
        config: &AppConfig,
        deps: RuntimeDeps<S, I, D>,
    ) -> Result<Self, RuntimeError>
    where
        S: EventSource,
        I: Inspector,
        D: DeliveryAdapter,
    {
        validate(config)?;

        let mut notifiers = Vec::with_capacity(config.notifiers.len());
        let mut handles = Vec::with_capacity(config.notifiers.len());
        for (name, notifier_config) in &config.notifiers {
            let (notifier, handle) =
                Notifier::new(name.as_str(), notifier_config.clone(), deps.delivery.clone())
                    .map_err(|source| RuntimeError::Notifier {
                        name: name.clone(),
                        source,
                    })?;
            notifiers.push(notifier);
            handles.push(handle);
        }
        let registry: NotifierRegistry = handles.into_iter().collect();

        let mut watchers = Vec::with_capacity(config.watchers.len());
        for (name, watcher_config) in &config.watchers {
            let dispatcher = Dispatcher::new(name, &watcher_config.notifiers, &registry)?;
            watchers.push(BuildsWatcher::new(
                name.as_str(),
                watcher_config.clone(),
                deps.source.clone(),
                deps.inspector.clone(),
                dispatcher,
            ));
        }

        let (failure_tx, failures) = mpsc::channel(watchers.len());
        let mut tasks = JoinSet::new();
        for notifier in notifiers {
            tasks.spawn(notifier.run());
        }
        for watcher in watchers {
            let failure_tx = failure_tx.clone();
            tasks.spawn(async move {
                let name = watcher.name().to_string();
                match watcher.run().await {
                    Ok(never) => match never {},
                    Err(source) => {
                        tracing::error!(watcher = %name, error = %source, "watcher failed");
                        let _ = failure_tx.send(RuntimeError::Watcher { name, source }).await;
                    }
                }
            });
        }

        tracing::info!(
            watchers = config.watchers.len(),
            notifiers = registry.len(),
            "runtime started"
        );
        Ok(Self {
            registry,
            failures,
            tasks,
        })
    }

    pub fn registry(&self) -> &NotifierRegistry {
        &self.registry
    }

    /// Wait for the first fatal watcher error
    pub async fn failed(&mut self) -> RuntimeError {
        self.failures.recv().await.unwrap_or(RuntimeError::Stopped)
    }

    /// Abort every task
    pub fn shutdown(mut self) {
        self.tasks.abort_all();
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;

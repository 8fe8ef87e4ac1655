// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use bc_adapters::{DeliveryError, SourceError};
use bc_core::TemplateError;
use thiserror::Error;

/// Errors that end a watch loop
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("listing {kind} resolved to {found} collections, expected exactly one")]
    CollectionCount { kind: String, found: usize },
    #[error("listing {kind} returned no resource version")]
    MissingResourceVersion { kind: String },
}

/// Errors from a notifier handling one event
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Fatal errors that stop the whole process
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("No watchers configured")]
    NoWatchers,
    #[error("No notifiers configured")]
    NoNotifiers,
    #[error("notifier {name}: {source}")]
    Notifier {
        name: String,
        #[source]
        source: NotifierError,
    },
    #[error("watcher {watcher} has no notifiers among {requested:?}")]
    NoNotifierChannels {
        watcher: String,
        requested: Vec<String>,
    },
    #[error("watcher {name} failed: {source}")]
    Watcher {
        name: String,
        #[source]
        source: WatchError,
    },
    #[error("all watchers stopped")]
    Stopped,
}

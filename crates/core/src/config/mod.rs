// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application configuration
//!
//! Built once at startup from a TOML document plus environment overrides,
//! then finalized with [`AppConfig::set_defaults`]. Immutable afterwards.

mod notifier;
mod watcher;

pub use notifier::{
    NotifierConfig, DEFAULT_CONTENT_TEMPLATE, DEFAULT_FAILURE_FROM_ADDRESS, DEFAULT_FROM_ADDRESS,
    DEFAULT_FROM_NAME, DEFAULT_SOURCE, DEFAULT_SUBJECT_TEMPLATE, DEFAULT_SUCCESS_FROM_ADDRESS,
};
pub use watcher::WatcherConfig;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;

/// Notifier that env overrides apply to and watchers fall back to
pub const DEFAULT_NOTIFIER_NAME: &str = "default";
/// Watcher created by `ENABLE_DEFAULT_BUILDS_WATCHER`
pub const DEFAULT_WATCHER_NAME: &str = "default";
/// Watcher created by `ENABLE_ALL_BUILDS_WATCHER`
pub const ALL_NAMESPACES_WATCHER_NAME: &str = "all";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid boolean for {var}: {value:?}")]
    InvalidBool { var: String, value: String },
}

/// Named watchers and named notifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    #[serde(alias = "builds_watchers")]
    pub watchers: BTreeMap<String, WatcherConfig>,
    pub notifiers: BTreeMap<String, NotifierConfig>,
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn has_watchers(&self) -> bool {
        !self.watchers.is_empty()
    }

    pub fn has_notifiers(&self) -> bool {
        !self.notifiers.is_empty()
    }

    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// The `default` notifier always exists afterwards. Empty values count
    /// as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let notifier = self
            .notifiers
            .entry(DEFAULT_NOTIFIER_NAME.to_string())
            .or_default();
        if let Some(token) = var("NOTIFIERS_DEFAULT_TOKEN") {
            notifier.token = token;
        }
        if let Some(source) = var("NOTIFIERS_DEFAULT_SOURCE") {
            notifier.source = source;
        }
        if let Some(from_name) = var("NOTIFIERS_DEFAULT_FROM_NAME") {
            notifier.from_name = from_name;
        }
        if let Some(from_address) = var("NOTIFIERS_DEFAULT_FROM_ADDRESS") {
            notifier.from_address = from_address;
        }

        if let Some(value) = var("ENABLE_DEFAULT_BUILDS_WATCHER") {
            if parse_bool("ENABLE_DEFAULT_BUILDS_WATCHER", &value)? {
                let namespace = var("DEFAULT_BUILDS_WATCHER_NAMESPACE").unwrap_or_default();
                self.watchers
                    .entry(DEFAULT_WATCHER_NAME.to_string())
                    .or_insert_with(|| WatcherConfig::new().in_namespace(namespace));
            }
        }
        if let Some(value) = var("ENABLE_ALL_BUILDS_WATCHER") {
            if parse_bool("ENABLE_ALL_BUILDS_WATCHER", &value)? {
                self.watchers
                    .entry(ALL_NAMESPACES_WATCHER_NAME.to_string())
                    .or_insert_with(|| WatcherConfig::new().all_namespaces());
            }
        }

        Ok(())
    }

    pub fn set_defaults(&mut self) {
        for notifier in self.notifiers.values_mut() {
            notifier.set_defaults();
        }
        for watcher in self.watchers.values_mut() {
            watcher.set_defaults();
        }
    }

    /// One line per watcher and notifier, safe to log
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} builds watchers and {} notifiers",
            self.watchers.len(),
            self.notifiers.len()
        );
        for (name, watcher) in &self.watchers {
            let scope = if watcher.all_namespaces {
                "all namespaces".to_string()
            } else if watcher.namespace.is_empty() {
                "default namespace".to_string()
            } else {
                format!("namespace {}", watcher.namespace)
            };
            let _ = write!(
                out,
                "\n  - builds watcher {}: {} -> [{}]",
                name,
                scope,
                watcher.notifiers.join(", ")
            );
        }
        for (name, notifier) in &self.notifiers {
            let _ = write!(
                out,
                "\n  - notifier {}: source={} from={} <{}>",
                name, notifier.source, notifier.from_name, notifier.from_address
            );
        }
        out
    }
}

/// Accepts `1`/`0`, `t`/`f` and `true`/`false` in lower, upper and title case
fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

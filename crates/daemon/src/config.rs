// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file lookup and loading

use std::path::{Path, PathBuf};

use bc_core::AppConfig;
use tracing::{debug, warn};

use crate::lifecycle::LifecycleError;
use crate::Args;

pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming the directory that holds `config.toml`
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Pick the configuration file: `--config`, then `$CONFIG_PATH/config.toml`,
/// then `config.toml` in the working directory
pub fn locate(flag: Option<&Path>, config_dir: Option<String>, cwd: &Path) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match config_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) => Path::new(&dir).join(CONFIG_FILE),
        None => cwd.join(CONFIG_FILE),
    }
}

/// Read the file, apply environment overrides and fill defaults.
///
/// An unreadable file only warns; a file that fails to parse is fatal.
pub fn load_from<F>(path: &Path, lookup: F) -> Result<AppConfig, LifecycleError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "reading configuration");
            AppConfig::from_toml(&content).map_err(|source| LifecycleError::Config {
                path: path.to_path_buf(),
                source,
            })?
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "cannot read configuration file, using environment only"
            );
            AppConfig::default()
        }
    };

    config.apply_env(lookup)?;
    config.set_defaults();
    Ok(config)
}

pub fn load(args: &Args) -> Result<AppConfig, LifecycleError> {
    let cwd = std::env::current_dir().unwrap_or_default();
    let path = locate(
        args.config.as_deref(),
        std::env::var(CONFIG_PATH_ENV).ok(),
        &cwd,
    );
    load_from(&path, |name| std::env::var(name).ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

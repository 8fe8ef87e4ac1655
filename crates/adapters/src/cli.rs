// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin wrapper around the cluster command-line client (`oc` or `kubectl`)

use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Errors from running the cluster CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Cluster CLI binary shared by the source and inspector adapters
#[derive(Clone, Debug)]
pub struct ClusterCli {
    binary: String,
}

impl Default for ClusterCli {
    fn default() -> Self {
        Self::new("oc")
    }
}

impl ClusterCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run to completion and return stdout
    pub async fn output(&self, args: &[&str]) -> Result<String, CliError> {
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(self.failed(args, &output.stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Start a long-running command with stdout and stderr piped; killed on drop
    pub fn stream(&self, args: &[&str]) -> Result<Child, CliError> {
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))
    }

    fn spawn_error(&self, source: std::io::Error) -> CliError {
        CliError::Spawn {
            binary: self.binary.clone(),
            source,
        }
    }

    /// Error for a command that exited unsuccessfully
    pub(crate) fn failed(&self, args: &[&str], stderr: &[u8]) -> CliError {
        CliError::Failed {
            command: format!("{} {}", self.binary, args.join(" ")),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

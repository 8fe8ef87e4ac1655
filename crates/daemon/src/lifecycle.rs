// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup: build the adapters and start the runtime

use std::path::PathBuf;

use bc_adapters::{
    CliEventSource, CliInspector, ClusterCli, FlowdockAdapter, TracedDeliveryAdapter,
    TracedEventSource, TracedInspector,
};
use bc_core::{AppConfig, ConfigError};
use bc_engine::{Runtime, RuntimeDeps, RuntimeError};
use thiserror::Error;
use tracing::info;

use crate::Args;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("environment: {0}")]
    Env(#[from] ConfigError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Daemon adapters with tracing wrappers
pub type DaemonDeps = RuntimeDeps<
    TracedEventSource<CliEventSource>,
    TracedInspector<CliInspector>,
    TracedDeliveryAdapter<FlowdockAdapter>,
>;

pub fn adapters(args: &Args) -> DaemonDeps {
    let cli = ClusterCli::new(args.cli.as_str());
    RuntimeDeps {
        source: TracedEventSource::new(CliEventSource::new(cli.clone())),
        inspector: TracedInspector::new(CliInspector::new(cli, args.log_tail)),
        delivery: TracedDeliveryAdapter::new(FlowdockAdapter::new(args.flowdock_url.as_str())),
    }
}

/// Start every notifier and watcher; fails without spawning anything on an
/// invalid configuration
pub fn startup(config: &AppConfig, args: &Args) -> Result<Runtime, LifecycleError> {
    let runtime = Runtime::start(config, adapters(args))?;
    info!(cli = %args.cli, flowdock = %args.flowdock_url, "buildcastd ready");
    Ok(runtime)
}

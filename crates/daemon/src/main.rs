// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! buildcast daemon (buildcastd)
//!
//! Watches OpenShift builds and posts notifications to Flowdock inboxes.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod lifecycle;

use std::path::PathBuf;

use bc_adapters::{DEFAULT_FLOWDOCK_URL, DEFAULT_LOG_TAIL};
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, error, info};

use crate::lifecycle::LifecycleError;

#[derive(Parser, Debug)]
#[command(
    name = "buildcastd",
    version,
    about = "Relay OpenShift build events to Flowdock"
)]
pub struct Args {
    /// Configuration file (default: $CONFIG_PATH/config.toml, then ./config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cluster command-line client used to reach the API
    #[arg(long, default_value = "oc")]
    pub cli: String,

    /// Log lines included in notifications
    #[arg(long, default_value_t = DEFAULT_LOG_TAIL)]
    pub log_tail: u32,

    /// Base URL of the Flowdock API
    #[arg(long, default_value = DEFAULT_FLOWDOCK_URL)]
    pub flowdock_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_logging();

    info!("Starting buildcastd");

    let app_config = match config::load(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    info!("Configured {}", app_config.summary());
    debug!(config = ?app_config, "resolved configuration");

    let mut runtime = match lifecycle::startup(&app_config, &args) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    // No draining on shutdown: nothing is persisted
    let failure = tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
            None
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down...");
            None
        }
        failure = runtime.failed() => Some(failure),
    };
    runtime.shutdown();

    if let Some(failure) = failure {
        error!("Stopping: {}", failure);
        return Err(LifecycleError::from(failure).into());
    }

    info!("buildcastd stopped");
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bc-core: domain types for the buildcast notifier
//!
//! This crate provides:
//! - The `Build` resource model and its lifecycle `Phase`
//! - Watch stream envelopes and the normalized `Event` view
//! - Configuration model, defaulting and environment overrides
//! - The acceptance filter, notification templates and their render context

pub mod build;
pub mod config;
pub mod context;
pub mod event;
pub mod filter;
pub mod phase;
pub mod template;
pub mod watch;

pub use build::{input_reference, Build, BUILD_KIND};
pub use config::{AppConfig, ConfigError, NotifierConfig, WatcherConfig};
pub use context::{format_duration, EventContext};
pub use event::{Event, EventLogEntry, SharedEvent};
pub use filter::accept;
pub use phase::Phase;
pub use template::{EventTemplate, TemplateError};
pub use watch::{Notification, ResourceVersion, Scope, WatchEventType};

#[cfg(any(test, feature = "test-support"))]
pub use event::FakeEvent;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod cli;
pub mod deliver;
pub mod inspect;
pub mod source;
pub mod traced;

pub use cli::{CliError, ClusterCli};
pub use deliver::{
    DeliveryAdapter, DeliveryError, FlowdockAdapter, InboxMessage, DEFAULT_FLOWDOCK_URL,
};
pub use inspect::{CliInspector, InspectError, Inspector, DEFAULT_LOG_TAIL};
pub use source::{
    CliEventSource, Collection, EventSource, ResourceType, SourceError, Subscription, BUILDS,
};
pub use traced::{TracedDeliveryAdapter, TracedEventSource, TracedInspector};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use deliver::{DeliveryCall, FakeDeliveryAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use inspect::{FakeInspector, InspectCall};
#[cfg(any(test, feature = "test-support"))]
pub use source::{FakeEventSource, SourceCall};

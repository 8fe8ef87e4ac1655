// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! buildcast runtime: watch, filter, fan out, notify

mod dispatcher;
mod error;
mod event;
mod notifier;
mod registry;
mod runtime;
mod watch;
mod watcher;

pub use dispatcher::Dispatcher;
pub use error::{NotifierError, RuntimeError, WatchError};
pub use event::BuildEvent;
pub use notifier::{sender_address, Notifier, NotifierHandle};
pub use registry::NotifierRegistry;
pub use runtime::{validate, Runtime, RuntimeDeps};
pub use watch::{NotificationHandler, WatchLoop};
pub use watcher::BuildsWatcher;

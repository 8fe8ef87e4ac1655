// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lookup table of running notifiers, fixed once built

use crate::notifier::NotifierHandle;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct NotifierRegistry {
    handles: BTreeMap<String, NotifierHandle>,
}

impl NotifierRegistry {
    pub fn get(&self, name: &str) -> Option<&NotifierHandle> {
        self.handles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl FromIterator<NotifierHandle> for NotifierRegistry {
    fn from_iter<T: IntoIterator<Item = NotifierHandle>>(iter: T) -> Self {
        let handles = iter
            .into_iter()
            .map(|handle| (handle.name().to_string(), handle))
            .collect();
        Self { handles }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

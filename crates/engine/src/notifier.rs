// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier worker: render each event and hand it to the inbox API

use crate::error::NotifierError;
use bc_adapters::{DeliveryAdapter, InboxMessage};
use bc_core::config::{DEFAULT_FAILURE_FROM_ADDRESS, DEFAULT_SUCCESS_FROM_ADDRESS};
use bc_core::{Event, EventContext, EventTemplate, NotifierConfig, SharedEvent};
use tokio::sync::mpsc;

/// Queue depth per notifier. A dispatcher's send waits until the worker has
/// taken the previous event.
const CHANNEL_CAPACITY: usize = 1;

/// Sending side of a notifier's queue, shared by every watcher that uses it
#[derive(Clone, Debug)]
pub struct NotifierHandle {
    name: String,
    tx: mpsc::Sender<SharedEvent>,
}

impl NotifierHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for room in the queue and enqueue `event`.
    ///
    /// Returns false when the worker is gone.
    pub async fn send(&self, event: SharedEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }
}

/// One configured delivery pipeline and the receiving end of its queue
pub struct Notifier<D> {
    name: String,
    config: NotifierConfig,
    subject: EventTemplate,
    content: EventTemplate,
    delivery: D,
    rx: mpsc::Receiver<SharedEvent>,
}

impl<D: DeliveryAdapter> Notifier<D> {
    /// Parse the templates and open the queue.
    pub fn new(
        name: impl Into<String>,
        config: NotifierConfig,
        delivery: D,
    ) -> Result<(Self, NotifierHandle), NotifierError> {
        let name = name.into();
        let subject = EventTemplate::parse("subject", config.subject_template.as_str())?;
        let content = EventTemplate::parse("content", config.content_template.as_str())?;
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let handle = NotifierHandle {
            name: name.clone(),
            tx,
        };
        let notifier = Self {
            name,
            config,
            subject,
            content,
            delivery,
            rx,
        };
        Ok((notifier, handle))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume events until the queue closes.
    ///
    /// Failures for one event are logged and never stop the loop.
    pub async fn run(mut self) {
        tracing::debug!(notifier = %self.name, "notifier started");
        loop {
            let Some(event) = self.rx.recv().await else {
                tracing::error!(notifier = %self.name, "notifier channel closed");
                break;
            };
            tracing::trace!(
                notifier = %self.name,
                namespace = event.namespace(),
                name = event.name(),
                status = %event.status(),
                "notifying"
            );
            if let Err(e) = self.notify(event.as_ref()).await {
                tracing::error!(
                    notifier = %self.name,
                    namespace = event.namespace(),
                    name = event.name(),
                    error = %e,
                    "failed to send notification"
                );
            }
        }
    }

    /// Render and deliver a single event; one attempt, no retry
    pub async fn notify(&self, event: &dyn Event) -> Result<(), NotifierError> {
        let message = self.message(event).await?;
        self.delivery.deliver(&self.config.token, &message).await?;
        Ok(())
    }

    async fn message(&self, event: &dyn Event) -> Result<InboxMessage, NotifierError> {
        let ctx = EventContext::collect(event, &[&self.subject, &self.content]).await;
        Ok(InboxMessage {
            source: self.config.source.clone(),
            from_address: sender_address(&self.config, event).to_string(),
            subject: self.subject.render(&ctx)?,
            content: self.content.render(&ctx)?,
            from_name: self.config.from_name.clone(),
            project: event.namespace().to_string(),
            tags: self.config.tags.clone(),
        })
    }
}

/// Sender identity: fixed success/failure addresses, else the configured one
pub fn sender_address<'a, E>(config: &'a NotifierConfig, event: &E) -> &'a str
where
    E: Event + ?Sized,
{
    if event.is_success() {
        DEFAULT_SUCCESS_FROM_ADDRESS
    } else if event.is_failure() {
        DEFAULT_FAILURE_FROM_ADDRESS
    } else {
        &config.from_address
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;

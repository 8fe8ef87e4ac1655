// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbox notifier configuration

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SUCCESS_FROM_ADDRESS: &str = "build+ok@flowdock.com";
pub const DEFAULT_FAILURE_FROM_ADDRESS: &str = "build+fail@flowdock.com";
pub const DEFAULT_FROM_ADDRESS: &str = "openshift@example.org";
pub const DEFAULT_FROM_NAME: &str = "OpenShift";
pub const DEFAULT_SOURCE: &str = "OpenShift";
pub const DEFAULT_SUBJECT_TEMPLATE: &str = "{{ object_type }} {{ namespace }}/{{ name }} {{ status }}";
pub const DEFAULT_CONTENT_TEMPLATE: &str = r#"<h3>{{ object_type }} {{ namespace }}/{{ name }}</h3>
<dl>
	<dt>Status</dt>
	<dd>{{ status }}</dd>
	<dt>Start Time</dt>
	<dd>{{ start_time }}</dd>
	<dt>End Time</dt>
	<dd>{{ end_time }}</dd>
	<dt>Duration</dt>
	<dd>{{ duration }}</dd>
	<dt>Input</dt>
	<dd>{{ input }}</dd>
	<dt>Output</dt>
	<dd>{{ output }}</dd>
	<dt>Node</dt>
	<dd>{{ node_name }}</dd>
	<dt>Console</dt>
	<dd>{{ console_url }}</dd>
	<dt>Logs</dt>
	<dd><pre>{{ logs }}</pre></dd>
	<dt>Events</dt>
	<dd>
		<pre>
		{% for line in events %}
		{{ line }}
		{% endfor %}
		</pre>
	</dd>
</dl>"#;

/// Delivery pipeline settings for one notifier
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Inbox API token
    pub token: String,
    pub subject_template: String,
    pub content_template: String,
    /// Sender used for events that are neither successes nor failures
    pub from_address: String,
    pub from_name: String,
    pub source: String,
    pub tags: Vec<String>,
}

impl NotifierConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_templates(mut self, subject: impl Into<String>, content: impl Into<String>) -> Self {
        self.subject_template = subject.into();
        self.content_template = content.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_defaults(&mut self) {
        fill(&mut self.subject_template, DEFAULT_SUBJECT_TEMPLATE);
        fill(&mut self.content_template, DEFAULT_CONTENT_TEMPLATE);
        fill(&mut self.from_address, DEFAULT_FROM_ADDRESS);
        fill(&mut self.from_name, DEFAULT_FROM_NAME);
        fill(&mut self.source, DEFAULT_SOURCE);
    }
}

fn fill(field: &mut String, default: &str) {
    if field.is_empty() {
        *field = default.to_string();
    }
}

// Token is a credential; keep it out of logs.
impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("NotifierConfig")
            .field("token", &token)
            .field("subject_template", &self.subject_template)
            .field("content_template", &self.content_template)
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("source", &self.source)
            .field("tags", &self.tags)
            .finish()
    }
}

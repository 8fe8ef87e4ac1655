// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jinja2-style notification templates.
//!
//! Templates see the event's fields as top-level variables:
//!
//! - `{{ object_type }} {{ namespace }}/{{ name }} {{ status }}`
//! - `{% if is_failure %}...{% endif %}`
//! - `{% for line in events %}{{ line }}{% endfor %}`
//!
//! The set of referenced variables is computed at parse time so callers can
//! skip fetching fields a template never uses.

use minijinja::Environment;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur while parsing or rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("syntax error in {name} template: {message}")]
    Syntax { name: String, message: String },

    #[error("failed to render {name} template: {message}")]
    Render { name: String, message: String },
}

/// A parsed template bound to a name (e.g. `subject`)
#[derive(Debug, Clone)]
pub struct EventTemplate {
    name: String,
    env: Environment<'static>,
    fields: BTreeSet<String>,
}

impl EventTemplate {
    /// Parse a template, failing on syntax errors.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, TemplateError> {
        let name = name.into();
        let syntax_err = |e: minijinja::Error| TemplateError::Syntax {
            name: name.clone(),
            message: e.to_string(),
        };
        let mut env = create_env();
        env.add_template_owned(name.clone(), source.into())
            .map_err(syntax_err)?;
        let fields = env
            .get_template(&name)
            .map_err(syntax_err)?
            .undeclared_variables(false)
            .into_iter()
            .collect();
        Ok(Self { name, env, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the template looks up `field` anywhere
    pub fn references(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Render against any serializable context.
    ///
    /// Unknown variables render as empty strings.
    pub fn render<S: Serialize>(&self, context: &S) -> Result<String, TemplateError> {
        let render_err = |e: minijinja::Error| TemplateError::Render {
            name: self.name.clone(),
            message: e.to_string(),
        };
        self.env
            .get_template(&self.name)
            .map_err(render_err)?
            .render(context)
            .map_err(render_err)
    }
}

fn create_env() -> Environment<'static> {
    // minijinja's default delimiters ({{ }}, {% %}, {# #}) are what we want
    Environment::new()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;

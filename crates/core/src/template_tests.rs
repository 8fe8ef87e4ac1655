// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::{DEFAULT_CONTENT_TEMPLATE, DEFAULT_SUBJECT_TEMPLATE};
use serde::Serialize;

#[derive(Serialize)]
struct Ctx {
    object_type: &'static str,
    namespace: &'static str,
    name: &'static str,
    status: &'static str,
    events: Vec<&'static str>,
}

fn ctx() -> Ctx {
    Ctx {
        object_type: "Build",
        namespace: "ci",
        name: "app-3",
        status: "Failed",
        events: vec!["first", "second"],
    }
}

#[test]
fn renders_default_subject() {
    let tmpl = EventTemplate::parse("subject", DEFAULT_SUBJECT_TEMPLATE).unwrap();
    assert_eq!(tmpl.render(&ctx()).unwrap(), "Build ci/app-3 Failed");
}

#[test]
fn renders_loops_and_conditionals() {
    let tmpl = EventTemplate::parse(
        "content",
        "{% if status == 'Failed' %}broken{% endif %}:{% for e in events %}[{{ e }}]{% endfor %}",
    )
    .unwrap();
    assert_eq!(tmpl.render(&ctx()).unwrap(), "broken:[first][second]");
}

#[test]
fn unknown_variables_render_empty() {
    let tmpl = EventTemplate::parse("subject", "{{ name }}{{ nope }}").unwrap();
    assert_eq!(tmpl.render(&ctx()).unwrap(), "app-3");
}

#[test]
fn syntax_error_names_the_template() {
    let err = EventTemplate::parse("content", "{% for x in %}").unwrap_err();
    match err {
        TemplateError::Syntax { name, .. } => assert_eq!(name, "content"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tracks_referenced_fields() {
    let tmpl = EventTemplate::parse("subject", DEFAULT_SUBJECT_TEMPLATE).unwrap();
    assert!(tmpl.references("name"));
    assert!(tmpl.references("status"));
    assert!(!tmpl.references("logs"));

    let content = EventTemplate::parse("content", DEFAULT_CONTENT_TEMPLATE).unwrap();
    for field in ["logs", "events", "node_name", "console_url", "duration"] {
        assert!(content.references(field), "{field} should be referenced");
    }
    assert!(!content.references("line"));
}

#[test]
fn parsed_template_renders_many_contexts() {
    let tmpl = EventTemplate::parse("subject", DEFAULT_SUBJECT_TEMPLATE).unwrap();
    let copy = tmpl.clone();

    let mut second = ctx();
    second.name = "app-4";
    second.status = "Complete";

    assert_eq!(tmpl.render(&ctx()).unwrap(), "Build ci/app-3 Failed");
    assert_eq!(copy.render(&second).unwrap(), "Build ci/app-4 Complete");
    assert_eq!(tmpl.name(), "subject");
}

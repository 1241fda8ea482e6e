//! Integration tests for the Parse phase: document shape and lenient fields.

use workflow_analyzer::parse::{self, Field};

#[test]
fn parse_example_workflow() {
    let json = include_str!("fixtures/enrich_observable.json");
    let document = parse::parse(json).expect("Should parse successfully");
    let body = document.body().expect("workflow body");
    assert_eq!(body.variables.present().map(Vec::len), Some(3));
    assert_eq!(document.root_actions().map(<[_]>::len), Some(3));
    assert_eq!(document.triggers.present().map(Vec::len), Some(1));
    assert!(document.targets.is_missing());
}

#[test]
fn parse_invalid_json_returns_error() {
    let err = parse::parse("not valid json").unwrap_err();
    assert_eq!(err.code(), "P001");
    assert!(err.message().starts_with("Failed to parse workflow JSON"));
}

#[test]
fn parse_non_object_root_returns_error() {
    for json in [
        "[1, 2, 3]",
        r#"[{ "properties": { "atomic": { "is_atomic": false } } }, [], { "x": 1 }]"#,
        "\"workflow\"",
        "null",
    ] {
        let err = parse::parse(json).unwrap_err();
        assert_eq!(err.code(), "P001", "{}", json);
        assert!(err.message().contains("root must be an object"));
    }
}

#[test]
fn nested_arrays_are_not_read_as_structs() {
    let json = r#"{
        "workflow": [{ "atomic": { "is_atomic": false } }, [], []]
    }"#;
    let document = parse::parse(json).unwrap();
    assert!(matches!(document.workflow, Field::Invalid(_)));

    let json = r#"{
        "workflow": { "properties": [{ "is_atomic": true }] }
    }"#;
    let document = parse::parse(json).unwrap();
    assert!(matches!(document.body().unwrap().properties, Field::Invalid(_)));
}

#[test]
fn malformed_list_elements_drop_only_themselves() {
    let json = r#"{
        "workflow": { "actions": [
            "garbage",
            { "type": "logic.if_else", "blocks": [null, { "type": "corejava.jsonpathquery" }, 3] },
            { "type": "web-service.http_request" }
        ] },
        "triggers": [{ "name": "Daily", "type": "schedule" }, "x"],
        "target_groups": { "g": { "targets": [{ "selected_target_ids": ["t1"] }, 5] } }
    }"#;
    let document = parse::parse(json).unwrap();
    let actions = document.root_actions().unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].children().count(), 1);
    assert_eq!(document.triggers.present().map(Vec::len), Some(1));
    let (_, group) = document.target_groups.present().unwrap().iter().next().unwrap();
    assert_eq!(group.targets.len(), 1);
}

#[test]
fn children_yield_blocks_then_actions() {
    let json = r#"{
        "workflow": { "actions": [{
            "type": "logic.parallel",
            "actions": [{ "properties": { "display_name": "second" } }],
            "blocks": [{ "properties": { "display_name": "first" } }]
        }] }
    }"#;
    let document = parse::parse(json).unwrap();
    let root = &document.root_actions().unwrap()[0];
    let names: Vec<&str> = root.children().map(|a| a.display_name()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn malformed_fields_do_not_fail_parsing() {
    let json = r#"{
        "workflow": {
            "variables": "not a list",
            "actions": [{ "type": 7, "properties": "oops", "blocks": {} }]
        },
        "targets": null,
        "triggers": 12
    }"#;
    let document = parse::parse(json).expect("lenient parse");
    let body = document.body().unwrap();
    assert!(matches!(body.variables, Field::Invalid(_)));
    assert!(document.targets.is_null());
    assert!(matches!(document.triggers, Field::Invalid(_)));

    let action = &document.root_actions().unwrap()[0];
    assert_eq!(action.action_type, None);
    assert_eq!(action.display_name(), "Unnamed Action");
    assert_eq!(action.children().count(), 0);
}

#[test]
fn target_groups_keep_document_order() {
    let json = r#"{
        "target_groups": {
            "zeta": { "name": "Z", "targets": [] },
            "alpha": { "name": "A", "targets": [] }
        }
    }"#;
    let document = parse::parse(json).unwrap();
    let ids: Vec<&str> = document
        .target_groups
        .present()
        .unwrap()
        .iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids, ["zeta", "alpha"]);
}

#[test]
fn unknown_action_properties_are_kept() {
    let json = r#"{
        "workflow": { "actions": [{
            "type": "web-service.http_request",
            "properties": { "display_name": "Call", "method": "POST", "timeout": 30 }
        }] }
    }"#;
    let document = parse::parse(json).unwrap();
    let props = &document.root_actions().unwrap()[0].properties;
    assert_eq!(props.extra.get("method").and_then(|v| v.as_text()), Some("POST"));
    assert!(props.extra.contains_key("timeout"));
    assert!(!props.extra.contains_key("display_name"));
}

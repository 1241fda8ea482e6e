//! Action tree walk: per-type rules, traversal order, atomics, statistics.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use workflow_analyzer::{Bucket, Severity};

fn action(action_type: &str, name: &str, properties: serde_json::Value) -> serde_json::Value {
    let mut props = json!({ "display_name": name });
    if let (Some(p), serde_json::Value::Object(extra)) = (props.as_object_mut(), properties) {
        p.extend(extra);
    }
    json!({ "type": action_type, "base_type": "activity", "properties": props })
}

fn activity_codes(json: &str) -> Vec<&'static str> {
    codes(&analyze(json), Bucket::Activities)
}

#[test]
fn overview_describes_mode() {
    let report = analyze(&with_actions(json!([])));
    let overview = &report.findings(Bucket::Activities)[0];
    assert_eq!(overview.title, "Activities Overview");
    assert!(overview.description.contains("normal workflow"));
}

#[test]
fn overview_describes_atomic_mode() {
    let report = analyze(include_str!("fixtures/minimal_atomic.json"));
    let overview = &report.findings(Bucket::Activities)[0];
    assert_eq!(overview.code, "ACT001");
    assert_eq!(
        overview.description,
        "This is an atomic action, specific checks for atomic activities can be applied here."
    );
    let definition = with_code(&report, Bucket::Properties, "PROP001")[0];
    assert_eq!(definition.description, "Atomic Action");
}

#[test]
fn empty_or_missing_actions_report_no_activities() {
    for json in [with_actions(json!([])), document(json!({}), json!({}))] {
        let report = analyze(&json);
        assert_eq!(codes(&report, Bucket::Activities), ["ACT001", "ACT010"]);
        let total = with_code(&report, Bucket::Statistics, "STAT001")[0];
        assert_eq!(total.description, "0");
        let types = with_code(&report, Bucket::Statistics, "STAT002")[0];
        assert_eq!(types.description, "0");
        assert_eq!(types.more_info.as_deref(), Some("Types: "));
    }
}

#[test]
fn http_request_defaults_warn_about_status_codes() {
    let json = with_actions(json!([action("web-service.http_request", "Call", json!({}))]));
    assert_eq!(activity_codes(&json), ["ACT001", "ACT004"]);
}

#[test]
fn http_request_with_status_codes_checked_fires_generic_rule_only() {
    let json = with_actions(json!([action(
        "web-service.http_request",
        "Call",
        json!({ "continue_on_error_status_code": true })
    )]));
    assert_eq!(activity_codes(&json), ["ACT001", "ACT009"]);
}

#[test]
fn http_request_continue_on_failure_is_informational() {
    let json = with_actions(json!([action(
        "web-service.http_request",
        "Call",
        json!({ "continue_on_failure": true })
    )]));
    let report = analyze(&json);
    assert_eq!(codes(&report, Bucket::Activities), ["ACT001", "ACT003", "ACT004"]);
    assert_eq!(report.findings(Bucket::Activities)[1].severity, Severity::Info);
}

#[test]
fn http_request_ignores_auto_redirect() {
    let json = with_actions(json!([action(
        "web-service.http_request",
        "Call",
        json!({ "allow_auto_redirect": true, "continue_on_error_status_code": true })
    )]));
    assert!(!activity_codes(&json).contains(&"ACT008"));
}

#[test]
fn json_path_query_polarity() {
    let unchecked = with_actions(json!([action("corejava.jsonpathquery", "Query", json!({}))]));
    assert_eq!(activity_codes(&unchecked), ["ACT001", "ACT005"]);

    let checked = with_actions(json!([action(
        "corejava.jsonpathquery",
        "Query",
        json!({ "continue_on_failure": true })
    )]));
    assert_eq!(activity_codes(&checked), ["ACT001", "ACT006"]);
}

#[test]
fn other_types_check_failure_and_redirects() {
    let json = with_actions(json!([action(
        "python3.script",
        "Script",
        json!({ "continue_on_failure": true, "allow_auto_redirect": true })
    )]));
    assert_eq!(activity_codes(&json), ["ACT001", "ACT007", "ACT008"]);
}

#[test]
fn string_flags_use_truthiness() {
    let json = with_actions(json!([action(
        "python3.script",
        "Script",
        json!({ "continue_on_failure": "", "allow_auto_redirect": 1 })
    )]));
    assert_eq!(activity_codes(&json), ["ACT001", "ACT008"]);
}

#[test]
fn runtime_user_without_target_default_warns() {
    let json = with_actions(json!([
        action("python3.script", "Overridden", json!({ "runtime_user": { "override_target_runtime_user": true } })),
        action("python3.script", "Defaulted", json!({ "runtime_user": { "target_default": true } })),
        action("python3.script", "Null User", json!({ "runtime_user": null })),
        action("python3.script", "No User", json!({})),
    ]));
    let report = analyze(&json);
    let titles: Vec<&str> = with_code(&report, Bucket::Activities, "ACT002")
        .iter()
        .map(|f| f.title.as_str())
        .collect();
    assert_eq!(titles, ["Overridden", "Null User"]);
}

#[test]
fn unnamed_action_title() {
    let json = with_actions(json!([{ "type": "corejava.jsonpathquery" }]));
    let report = analyze(&json);
    assert_eq!(report.findings(Bucket::Activities)[1].title, "Unnamed Action");
}

#[test]
fn walk_is_depth_first_blocks_before_actions() {
    let json = with_actions(json!([
        {
            "type": "logic.if_else",
            "properties": { "display_name": "Branch" },
            "actions": [action("corejava.jsonpathquery", "After Blocks", json!({}))],
            "blocks": [{
                "type": "logic.condition_block",
                "properties": { "display_name": "Condition" },
                "actions": [action("corejava.jsonpathquery", "Nested", json!({}))]
            }]
        },
        action("corejava.jsonpathquery", "Sibling", json!({}))
    ]));
    let report = analyze(&json);
    let titles: Vec<&str> = with_code(&report, Bucket::Activities, "ACT005")
        .iter()
        .map(|f| f.title.as_str())
        .collect();
    assert_eq!(titles, ["Nested", "After Blocks", "Sibling"]);

    let total = with_code(&report, Bucket::Statistics, "STAT001")[0];
    assert_eq!(total.description, "5");
    let types = with_code(&report, Bucket::Statistics, "STAT002")[0];
    assert_eq!(types.description, "3");
    assert_eq!(
        types.more_info.as_deref(),
        Some("Types: logic.if_else, logic.condition_block, corejava.jsonpathquery")
    );
}

#[test]
fn atomics_resolve_against_subworkflow_calls() {
    let json = document(
        json!({ "actions": [{
            "type": "workflow.atomic_workflow",
            "base_type": "subworkflow",
            "properties": {
                "display_name": "Create Incident",
                "workflow_id": "definition_workflow_02XYZ",
                "continue_on_failure": false
            }
        }] }),
        json!({ "atomic_workflows": ["definition_workflow_02XYZ", "definition_workflow_03MISSING"] }),
    );
    let report = analyze(&json);
    let atomics = report.findings(Bucket::Atomics);
    assert_eq!(atomics.len(), 2);

    assert_eq!(atomics[0].severity, Severity::Info);
    assert_eq!(atomics[0].title, "Create Incident");
    assert_eq!(atomics[0].description, "Resolved");
    assert_eq!(
        atomics[0].more_info.as_deref(),
        Some("Continue on Failure: No")
    );

    assert_eq!(atomics[1].severity, Severity::Error);
    assert_eq!(atomics[1].title, "definition_workflow_03MISSING");
    assert_eq!(atomics[1].description, "Failed to Resolve");
}

#[test]
fn no_atomics() {
    let report = analyze(&with_actions(json!([])));
    assert_eq!(codes(&report, Bucket::Atomics), ["ATM003"]);
}

#[test]
fn malformed_sibling_actions_do_not_hide_valid_ones() {
    let json = with_actions(json!([
        action("web-service.http_request", "Call", json!({})),
        "garbage",
        {
            "type": "logic.if_else",
            "properties": { "display_name": "Branch" },
            "blocks": [null, action("corejava.jsonpathquery", "Query", json!({})), 7]
        }
    ]));
    let report = analyze(&json);
    assert_eq!(
        codes(&report, Bucket::Activities),
        ["ACT001", "ACT004", "ACT005"]
    );
    let total = with_code(&report, Bucket::Statistics, "STAT001")[0];
    assert_eq!(total.description, "3");
}

#[test]
fn only_garbage_actions_report_no_activities() {
    let report = analyze(&with_actions(json!(["garbage", null, [1]])));
    assert_eq!(codes(&report, Bucket::Activities), ["ACT001", "ACT010"]);
}

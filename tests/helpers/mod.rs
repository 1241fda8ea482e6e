use serde_json::{Map, Value, json};
use workflow_analyzer::{Bucket, Finding, Report};

// =============================================================================
// Document builders
// =============================================================================

/// Minimal valid (non-atomic) document with `workflow_fields` merged into
/// `workflow` and `root_fields` merged into the root.
pub fn document(workflow_fields: Value, root_fields: Value) -> String {
    let mut workflow = Map::new();
    workflow.insert(
        "properties".into(),
        json!({ "atomic": { "is_atomic": false } }),
    );
    if let Value::Object(fields) = workflow_fields {
        workflow.extend(fields);
    }

    let mut root = Map::new();
    root.insert("workflow".into(), Value::Object(workflow));
    if let Value::Object(fields) = root_fields {
        root.extend(fields);
    }
    Value::Object(root).to_string()
}

pub fn with_actions(actions: Value) -> String {
    document(json!({ "actions": actions }), json!({}))
}

pub fn with_variables(variables: Value) -> String {
    document(json!({ "variables": variables }), json!({}))
}

pub fn variable(name: &str, scope: &str, description: &str) -> Value {
    json!({
        "properties": {
            "name": name,
            "scope": scope,
            "description": description,
            "type": "datatype.string",
            "is_required": false
        }
    })
}

// =============================================================================
// Report queries
// =============================================================================

pub fn analyze(json: &str) -> Report {
    workflow_analyzer::analyze(json).expect("analysis should succeed")
}

pub fn codes(report: &Report, bucket: Bucket) -> Vec<&'static str> {
    report.findings(bucket).iter().map(|f| f.code).collect()
}

pub fn with_code<'r>(report: &'r Report, bucket: Bucket, code: &str) -> Vec<&'r Finding> {
    report
        .findings(bucket)
        .iter()
        .filter(|f| f.code == code)
        .collect()
}

use crate::parse::{Document, Trigger};
use crate::report::{Bucket, Finding, Findings};

use super::Context;

/// Summarize declared triggers in one informational finding.
pub fn analyze_triggers(document: &Document, _ctx: &Context<'_>, findings: &mut Findings) {
    let triggers: Vec<String> = document
        .triggers
        .present()
        .map(|list| list.iter().map(describe).collect())
        .unwrap_or_default();

    let description = if triggers.is_empty() {
        "This workflow doesn't have any triggers".to_string()
    } else {
        triggers.join(", ")
    };
    findings.push(Bucket::Triggers, Finding::info("TRG001", "Triggers", description));
}

fn describe(trigger: &Trigger) -> String {
    let or_default = |value: Option<&String>, default: &'static str| {
        value
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };
    format!(
        "{} ({})",
        or_default(trigger.name.as_ref(), "Unnamed Trigger"),
        or_default(trigger.trigger_type.as_ref(), "Unknown Type")
    )
}

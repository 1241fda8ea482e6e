//! Action tree walk, atomic resolution and statistics.

use std::collections::HashMap;

use tracing::debug;

use crate::parse::{Action, Document, Field, HTTP_REQUEST, JSON_PATH_QUERY};
use crate::report::{Bucket, Finding, Findings};

use super::Context;

const CONTINUE_ON_FAILURE_CHECKED: &str = "\"Continue Workflow Execution on Failure\" is checked";
const CONTINUE_ON_FAILURE_REASSURANCE: &str = "Setting continue workflow execution on failure means the \
    workflow will continue running even if this activity fails. It's ok to use this if you're using a \
    Condition Block to do some error handling.";
const HANDLE_STATUS_CODES: &str =
    "You should check this and use a Condition Block to handle HTTP error codes.";

/// A subworkflow call found during the walk, indexed by the called atomic's id.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AtomicCall<'a> {
    display_name: &'a str,
    continue_on_failure: bool,
}

struct Walk<'a, 'f> {
    findings: &'f mut Findings,
    action_count: usize,
    /// Distinct action types in first-seen order.
    action_types: Vec<&'a str>,
    atomic_calls: HashMap<&'a str, AtomicCall<'a>>,
}

impl<'a> Walk<'a, '_> {
    /// Pre-order: a node's rules run before any of its children are visited.
    fn visit(&mut self, action: &'a Action) {
        self.action_count += 1;
        debug!(
            index = self.action_count,
            action_type = action.action_type.as_deref().unwrap_or("<none>"),
            name = action.display_name(),
            "visiting action"
        );

        if action.is_subworkflow() {
            self.record_atomic_call(action);
        }
        check_action(action, self.findings);

        if let Some(action_type) = action.action_type.as_deref() {
            if !self.action_types.contains(&action_type) {
                self.action_types.push(action_type);
            }
        }

        for child in action.children() {
            self.visit(child);
        }
    }

    fn record_atomic_call(&mut self, action: &'a Action) {
        let call = AtomicCall {
            display_name: action.display_name(),
            continue_on_failure: action.properties.continue_on_failure.is_truthy(),
        };
        debug!(
            name = call.display_name,
            continue_on_failure = call.continue_on_failure,
            "subworkflow"
        );
        match action.properties.workflow_id.as_deref() {
            Some(id) => {
                self.atomic_calls.entry(id).or_insert(call);
            }
            None => debug!(name = call.display_name, "subworkflow has no workflow_id"),
        }
    }
}

pub fn analyze_actions(document: &Document, ctx: &Context<'_>, findings: &mut Findings) {
    findings.push(
        Bucket::Activities,
        Finding::info("ACT001", "Activities Overview", ctx.mode_description()),
    );

    let mut walk = Walk {
        findings,
        action_count: 0,
        action_types: Vec::new(),
        atomic_calls: HashMap::new(),
    };

    match document.root_actions() {
        Some(actions) => {
            for action in actions {
                walk.visit(action);
            }
        }
        None => walk.findings.push(
            Bucket::Activities,
            Finding::info("ACT010", "No Activities Found", "N/A"),
        ),
    }
    debug!(
        actions = walk.action_count,
        types = walk.action_types.len(),
        "action walk complete"
    );

    let Walk {
        findings,
        action_count,
        action_types,
        atomic_calls,
    } = walk;

    resolve_atomics(document, &atomic_calls, findings);

    findings.push(
        Bucket::Statistics,
        Finding::info("STAT001", "Total Actions", action_count.to_string()),
    );
    findings.push(
        Bucket::Statistics,
        Finding::info("STAT002", "Unique Action Types", action_types.len().to_string())
            .with_more_info(format!("Types: {}", action_types.join(", "))),
    );
}

/// Per-node rules. Every rule is independent; several may fire for one node.
fn check_action(action: &Action, findings: &mut Findings) {
    let title = action.display_name();
    let props = &action.properties;
    let mut push = |finding: Finding| findings.push(Bucket::Activities, finding);

    let account_key_overridden = match &props.runtime_user {
        Field::Missing => false,
        Field::Present(user) => !user.uses_target_default(),
        Field::Null | Field::Invalid(_) => true,
    };
    if account_key_overridden {
        push(
            Finding::warning("ACT002", title, "Account Key Configuration").with_more_info(
                "Most activities should have their account key set to \"Use Target's Default Account Keys.\" \
                 It's uncommon that a target's account keys should be overridden.",
            ),
        );
    }

    match action.action_type.as_deref() {
        Some(HTTP_REQUEST) => {
            if props.continue_on_failure.is_truthy() {
                push(
                    Finding::info("ACT003", title, CONTINUE_ON_FAILURE_CHECKED).with_more_info(
                        "In most cases, you probably want \"Continue on HTTP error status code\" instead. \
                         If you're using this option intentionally, make sure you're using a Condition \
                         Block to handle failures.",
                    ),
                );
            }
            if !props.continue_on_error_status_code.is_truthy() {
                push(
                    Finding::warning(
                        "ACT004",
                        title,
                        "\"Continue on HTTP error status code\" is not checked",
                    )
                    .with_more_info(HANDLE_STATUS_CODES),
                );
            }
        }
        Some(JSON_PATH_QUERY) => {
            if props.continue_on_failure.is_truthy() {
                push(
                    Finding::info("ACT006", title, CONTINUE_ON_FAILURE_CHECKED)
                        .with_more_info(CONTINUE_ON_FAILURE_REASSURANCE),
                );
            } else {
                push(
                    Finding::warning(
                        "ACT005",
                        title,
                        "\"Continue Workflow Execution on Failure\" is not checked",
                    )
                    .with_more_info(
                        "If the JSON path query you look for isn't found, the activity will fail and your \
                         workflow will fail with it. If you want to avoid this, you can check continue on \
                         failure and use a Condition Block to check if the path query was successful.",
                    ),
                );
            }
        }
        _ => {
            if props.continue_on_failure.is_truthy() {
                push(
                    Finding::info("ACT007", title, CONTINUE_ON_FAILURE_CHECKED)
                        .with_more_info(CONTINUE_ON_FAILURE_REASSURANCE),
                );
            }
            if props.allow_auto_redirect.is_truthy() {
                push(
                    Finding::warning("ACT008", title, "\"Allow Auto Redirect\" is checked").with_more_info(
                        "If you're using a web request, you should check this and use a Condition Block \
                         to handle redirects.",
                    ),
                );
            }
        }
    }

    // Fires for every type, including HTTP requests already checked above.
    if props.continue_on_error_status_code.is_truthy() {
        push(
            Finding::warning(
                "ACT009",
                title,
                "\"Continue on HTTP error status code\" is checked",
            )
            .with_more_info(HANDLE_STATUS_CODES),
        );
    }
}

fn resolve_atomics(
    document: &Document,
    atomic_calls: &HashMap<&str, AtomicCall<'_>>,
    findings: &mut Findings,
) {
    let references = document.atomic_references();
    if references.is_empty() {
        findings.push(
            Bucket::Atomics,
            Finding::info("ATM003", "No Atomic Actions Found", "N/A"),
        );
        return;
    }

    for reference in references {
        match atomic_calls.get(reference.as_str()) {
            Some(call) => findings.push(
                Bucket::Atomics,
                Finding::info("ATM001", call.display_name, "Resolved").with_more_info(format!(
                    "Continue on Failure: {}",
                    if call.continue_on_failure { "Yes" } else { "No" }
                )),
            ),
            None => findings.push(
                Bucket::Atomics,
                Finding::error("ATM002", reference, "Failed to Resolve"),
            ),
        }
    }
}

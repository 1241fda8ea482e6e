//! Variable declarations: required fields, descriptions, naming, globals.

use tracing::debug;

use crate::parse::{Document, Variable};
use crate::report::{Bucket, Finding, Findings};

use super::Context;
use super::naming::{follows_convention, strip_leading_digits, suggest_name};

pub fn analyze_variables(document: &Document, ctx: &Context<'_>, findings: &mut Findings) {
    let body = document.body();

    match body.and_then(|b| b.variables.present()) {
        Some(variables) => {
            for variable in variables {
                check_variable(variable, ctx, findings);
            }
        }
        None => findings.push(
            Bucket::Variables,
            Finding::info("VAR005", "Variables", "No variables defined"),
        ),
    }

    if body.is_some_and(|b| b.variables.is_null()) {
        findings.push(
            Bucket::Variables,
            Finding::error("VAR006", "Global Variables", "Failed").with_more_info(
                "Global variables should not be used in workflows or atomic actions meant to be shared. \
                 Instead, use a \"Set Variables\" activity to copy global variables to local variables \
                 within the workflow. Before exporting, simply remove the global variables so the other \
                 user can select their own",
            ),
        );
    } else {
        findings.push(
            Bucket::Variables,
            Finding::success("VAR006", "Global Variables", "Passed")
                .with_more_info("The workflow does not appear to be using any global variables"),
        );
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Run the per-variable checks. A variable missing a required field gets a
/// single error and no further checks.
fn check_variable(variable: &Variable, ctx: &Context<'_>, findings: &mut Findings) {
    let props = variable.properties.as_ref();
    let name = non_empty(props.and_then(|p| p.name.as_ref()));
    let scope = non_empty(props.and_then(|p| p.scope.as_ref()));
    let description = non_empty(props.and_then(|p| p.description.as_ref()));

    let (Some(name), Some(scope), Some(description), Some(props)) = (name, scope, description, props)
    else {
        let missing: Vec<&str> = [("name", name), ("scope", scope), ("description", description)]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(field, _)| field)
            .collect();
        debug!(?missing, "variable is missing required properties");
        findings.push(
            Bucket::Variables,
            Finding::error(
                "VAR001",
                "Variable Error",
                "One or more required properties are undefined",
            )
            .with_more_info(format!("Missing: {}", missing.join(", "))),
        );
        return;
    };

    let min_len = ctx.config.min_description_length;
    if ctx.config.requires_long_description(scope) && description.chars().count() < min_len {
        findings.push(
            Bucket::Variables,
            Finding::warning(
                "VAR002",
                format!("Variable: {}", name),
                format!(
                    "Variable description is too short for scope \"{}\" for variable: {}",
                    scope, name
                ),
            )
            .with_more_info(format!(
                "The variable description should be at least {} characters for the following scopes: {}",
                min_len,
                ctx.config.description_scopes.join(", ")
            )),
        );
    }

    if !follows_convention(name) {
        let suggested = suggest_name(name, ctx.config);
        if suggested != name {
            findings.push(
                Bucket::Variables,
                Finding::warning(
                    "VAR003",
                    format!("Variable: {}", name),
                    "Variable name does not follow the naming convention. Each word should start with a capital letter.",
                )
                .with_more_info(format!("Current Name: {}\nSuggested Name: {}", name, suggested)),
            );
        }
    }

    findings.push(
        Bucket::Variables,
        Finding::info(
            "VAR004",
            strip_leading_digits(name),
            format!("Type: {}", non_empty(props.data_type.as_ref()).unwrap_or("unknown")),
        )
        .with_more_info(format!(
            "Description: {}\nRequired: {}",
            description,
            if props.is_required.is_truthy() { "Yes" } else { "No" }
        )),
    );
}

//! Top-level metadata: definition type and categories.

use crate::error::AnalyzeError;
use crate::parse::{Document, Field};
use crate::report::{Bucket, Finding, Findings};

use super::mode_description;

/// Record the definition type and categories; returns the atomic flag.
///
/// This is the only pass that can fail: without a boolean
/// `workflow.properties.atomic.is_atomic` the document is not a workflow
/// export and nothing else is analyzed.
pub fn analyze_properties(document: &Document, findings: &mut Findings) -> Result<bool, AnalyzeError> {
    let is_atomic = atomic_flag(document)?;

    findings.push(
        Bucket::Properties,
        Finding::info(
            "PROP001",
            "Definition Type",
            if is_atomic { "Atomic Action" } else { "Workflow" },
        )
        .with_more_info(mode_description(is_atomic)),
    );

    let categories: Vec<String> = document
        .categories
        .present()
        .map(|list| list.iter().map(|c| c.display_name()).collect())
        .unwrap_or_default();
    let description = if categories.is_empty() {
        "This workflow doesn't have any categories".to_string()
    } else {
        categories.join(", ")
    };
    findings.push(Bucket::Properties, Finding::info("PROP002", "Categories", description));

    Ok(is_atomic)
}

fn atomic_flag(document: &Document) -> Result<bool, AnalyzeError> {
    let Some(body) = document.body() else {
        return Err(AnalyzeError::structural(
            "Invalid workflow structure: 'workflow' not found",
        ));
    };
    let Some(properties) = body.properties.present() else {
        return Err(AnalyzeError::structural(
            "Invalid workflow structure: 'properties' not found",
        ));
    };
    let Some(atomic) = properties.atomic.present() else {
        return Err(AnalyzeError::structural(
            "Invalid workflow structure: 'properties.atomic' not found",
        ));
    };
    match atomic.is_atomic {
        Field::Present(flag) => Ok(flag),
        _ => Err(AnalyzeError::structural(
            "Invalid workflow structure: 'properties.atomic.is_atomic' must be a boolean",
        )),
    }
}

//! Rule evaluation phase.
//!
//! The property pass runs first and decides the workflow mode; the remaining
//! passes are independent and each append to their own bucket.

pub mod actions;
pub mod naming;
pub mod properties;
pub mod targets;
pub mod triggers;
pub mod variables;

use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::AnalyzeError;
use crate::parse::{self, Document};
use crate::report::{Findings, Report};

/// Shared inputs for every pass after the property pass.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub is_atomic: bool,
    pub config: &'a AnalyzerConfig,
}

impl Context<'_> {
    pub fn mode_description(&self) -> &'static str {
        mode_description(self.is_atomic)
    }
}

pub(crate) fn mode_description(is_atomic: bool) -> &'static str {
    if is_atomic {
        "This is an atomic action, specific checks for atomic activities can be applied here."
    } else {
        "This is a normal workflow, specific checks for workflow activities can be applied here."
    }
}

/// Analyze a workflow JSON document with the built-in rule set.
pub fn analyze(json: &str) -> Result<Report, AnalyzeError> {
    analyze_with_config(json, &AnalyzerConfig::default())
}

pub fn analyze_with_config(json: &str, config: &AnalyzerConfig) -> Result<Report, AnalyzeError> {
    let document = parse::parse(json)?;
    analyze_document(&document, config)
}

/// Run every pass over an already-parsed document.
pub fn analyze_document(document: &Document, config: &AnalyzerConfig) -> Result<Report, AnalyzeError> {
    let mut findings = Findings::default();

    let is_atomic = properties::analyze_properties(document, &mut findings).inspect_err(|e| {
        warn!(error = %e, "workflow structure not recognized");
    })?;
    debug!(is_atomic, "workflow mode determined");

    let ctx = Context { is_atomic, config };
    variables::analyze_variables(document, &ctx, &mut findings);
    targets::analyze_targets(document, &ctx, &mut findings);
    triggers::analyze_triggers(document, &ctx, &mut findings);
    actions::analyze_actions(document, &ctx, &mut findings);

    let report = findings.into_report();
    debug!(
        success = report.summary.success,
        info = report.summary.info,
        warning = report.summary.warning,
        error = report.summary.error,
        "analysis complete"
    );
    Ok(report)
}

//! HTML rendering of analysis reports.
//!
//! The renderer owns the row-index counter that links each "(details)"
//! toggle to its collapsible block. The counter is never reset, so one
//! renderer can render any number of reports into the same page without
//! repeating an id.

pub mod writer;

use html_escape::encode_text;

use crate::error::AnalyzeError;
use crate::report::{Bucket, Finding, Report, Severity};

pub use writer::MarkupWriter;

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "check",
        Severity::Info => "info",
        Severity::Warning => "exclamation-triangle",
        Severity::Error => "times",
    }
}

/// Escape text content and turn newlines into line breaks.
fn text(value: &str) -> String {
    encode_text(value).replace('\n', "<br />")
}

#[derive(Debug)]
pub struct HtmlRenderer {
    next_row: u64,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self { next_row: 1 }
    }

    fn next_row_index(&mut self) -> u64 {
        let index = self.next_row;
        self.next_row += 1;
        index
    }

    /// Render the summary followed by one table per non-empty bucket.
    pub fn render(&mut self, report: &Report) -> String {
        let mut w = MarkupWriter::new();

        w.open("div", "class=\"analysis-summary\"");
        for severity in Severity::ALL {
            w.element(
                "span",
                &format!("class=\"summary-count {}\"", severity),
                &format!("{}: {}", severity, report.summary.count(severity)),
            );
        }
        w.close();

        for bucket in Bucket::ALL {
            let findings = report.findings(bucket);
            if findings.is_empty() {
                continue;
            }
            self.section(&mut w, bucket, findings);
        }

        w.finish()
    }

    fn section(&mut self, w: &mut MarkupWriter, bucket: Bucket, findings: &[Finding]) {
        w.open("div", "class=\"analysis-section\"");
        w.element("h3", "", bucket.title());
        w.open("table", "class=\"analysis-table\"");
        w.open("thead", "");
        w.open("tr", "");
        w.element("th", "", "Item");
        w.element("th", "", "Details");
        w.close();
        w.close();
        w.open("tbody", "");
        for finding in findings {
            self.row(w, finding);
        }
        w.close();
        w.close();
        w.close();
    }

    fn row(&mut self, w: &mut MarkupWriter, finding: &Finding) {
        w.open("tr", &format!("data-code=\"{}\"", finding.code));
        w.element("td", "class=\"item-row\"", &text(&finding.title));
        w.open("td", &format!("class=\"analyzer-row {}\"", finding.severity));
        w.element(
            "i",
            &format!("class=\"fa fa-fw fa-{} mr-1\"", icon(finding.severity)),
            "",
        );
        w.element("span", "", &text(&finding.description));
        if let Some(more_info) = &finding.more_info {
            let index = self.next_row_index();
            w.line(&format!(
                "<small><a class=\"more-info-toggle\" data-index=\"{}\">(details)</a></small>",
                index
            ));
            w.element(
                "div",
                &format!("id=\"more-info-{}\" class=\"more-info\"", index),
                &text(more_info),
            );
        }
        w.close();
        w.close();
    }

    /// Render a failed analysis as a single message block.
    pub fn render_error(&self, error: &AnalyzeError) -> String {
        let mut w = MarkupWriter::new();
        w.open("div", "class=\"message message-error\"");
        w.element("i", "class=\"fas fa-exclamation-circle\"", "");
        w.element(
            "span",
            "class=\"message-text\"",
            &text(&format!("Error analyzing workflow: {}", error.message())),
        );
        w.finish()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Findings;

    fn report() -> Report {
        let mut findings = Findings::default();
        findings.push(
            Bucket::Variables,
            Finding::warning("VAR003", "Variable: a<b>", "Bad name")
                .with_more_info("Current Name: a<b>\nSuggested Name: A<b>"),
        );
        findings.push(Bucket::Triggers, Finding::info("TRG001", "Triggers", "none"));
        findings.into_report()
    }

    #[test]
    fn escapes_and_breaks_lines() {
        let html = HtmlRenderer::new().render(&report());
        assert!(html.contains("Variable: a&lt;b&gt;"));
        assert!(html.contains("Current Name: a&lt;b&gt;<br />Suggested Name: A&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn skips_empty_sections_and_orders_the_rest() {
        let html = HtmlRenderer::new().render(&report());
        assert!(!html.contains("Workflow Properties"));
        let variables = html.find("<h3>Variables</h3>").unwrap();
        let triggers = html.find("<h3>Triggers</h3>").unwrap();
        assert!(variables < triggers);
    }

    #[test]
    fn row_ids_continue_across_renders() {
        let mut renderer = HtmlRenderer::new();
        let first = renderer.render(&report());
        let second = renderer.render(&report());
        assert!(first.contains("id=\"more-info-1\""));
        assert!(!second.contains("id=\"more-info-1\""));
        assert!(second.contains("id=\"more-info-2\""));
    }
}

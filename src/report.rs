//! Findings, buckets and the aggregated report.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Named group of findings, one per analyzed facet. Declaration order is the
/// order sections are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Properties,
    Variables,
    Triggers,
    Targets,
    Activities,
    Atomics,
    #[serde(rename = "fun")]
    Statistics,
}

impl Bucket {
    pub const ALL: [Bucket; 7] = [
        Bucket::Properties,
        Bucket::Variables,
        Bucket::Triggers,
        Bucket::Targets,
        Bucket::Activities,
        Bucket::Atomics,
        Bucket::Statistics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Bucket::Properties => "Workflow Properties",
            Bucket::Variables => "Variables",
            Bucket::Triggers => "Triggers",
            Bucket::Targets => "Targets",
            Bucket::Activities => "Activities",
            Bucket::Atomics => "Atomic Actions",
            Bucket::Statistics => "Statistics",
        }
    }
}

/// One analysis result. Created once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable rule code, e.g. `VAR003`.
    pub code: &'static str,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

impl Finding {
    pub fn new(
        code: &'static str,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Finding {
            code,
            severity,
            title: title.into(),
            description: description.into(),
            more_info: None,
        }
    }

    pub fn success(code: &'static str, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, Severity::Success, title, description)
    }

    pub fn info(code: &'static str, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, title, description)
    }

    pub fn warning(code: &'static str, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, title, description)
    }

    pub fn error(code: &'static str, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, title, description)
    }

    /// Attach detail text. Empty text means no detail.
    pub fn with_more_info(mut self, more_info: impl Into<String>) -> Self {
        let more_info = more_info.into();
        self.more_info = (!more_info.is_empty()).then_some(more_info);
        self
    }
}

/// Append-only collector the analyzers write into.
#[derive(Debug, Default)]
pub struct Findings {
    buckets: BTreeMap<Bucket, Vec<Finding>>,
}

impl Findings {
    pub fn push(&mut self, bucket: Bucket, finding: Finding) {
        self.buckets.entry(bucket).or_default().push(finding);
    }

    pub fn into_report(self) -> Report {
        let summary = Summary::tally(&self.buckets);
        Report {
            buckets: self.buckets,
            summary,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub success: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl Summary {
    /// Count findings per severity across every bucket.
    pub fn tally(buckets: &BTreeMap<Bucket, Vec<Finding>>) -> Self {
        let mut summary = Summary::default();
        for finding in buckets.values().flatten() {
            match finding.severity {
                Severity::Success => summary.success += 1,
                Severity::Info => summary.info += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Error => summary.error += 1,
            }
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Success => self.success,
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.info + self.warning + self.error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub buckets: BTreeMap<Bucket, Vec<Finding>>,
    pub summary: Summary,
}

impl Report {
    pub fn findings(&self, bucket: Bucket) -> &[Finding] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All findings, bucket by bucket, in insertion order within each bucket.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &Finding)> {
        self.buckets
            .iter()
            .flat_map(|(bucket, findings)| findings.iter().map(move |f| (*bucket, f)))
    }

    pub fn has_errors(&self) -> bool {
        self.summary.error > 0
    }
}

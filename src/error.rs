//! Unified analyzer error type used across all phases.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Structure,
    Config,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Structure => write!(f, "Structure"),
            Phase::Config => write!(f, "Config"),
        }
    }
}

/// Failure that aborts an analysis. Rule violations are never errors; they
/// are reported as findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The input is not a JSON object.
    #[error("[Parse:P001] {0}")]
    Parse(String),
    /// The document parsed but its basic shape is unrecognized.
    #[error("[Structure:S001] {0}")]
    Structural(String),
    /// An analyzer configuration document could not be read.
    #[error("[Config:C001] {0}")]
    Config(String),
}

impl AnalyzeError {
    pub fn parse(message: impl Into<String>) -> Self {
        AnalyzeError::Parse(message.into())
    }

    pub fn structural(message: impl Into<String>) -> Self {
        AnalyzeError::Structural(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        AnalyzeError::Config(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AnalyzeError::Parse(_) => "P001",
            AnalyzeError::Structural(_) => "S001",
            AnalyzeError::Config(_) => "C001",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            AnalyzeError::Parse(_) => Phase::Parse,
            AnalyzeError::Structural(_) => Phase::Structure,
            AnalyzeError::Config(_) => Phase::Config,
        }
    }

    /// The human-readable message without the `[phase:code]` prefix.
    pub fn message(&self) -> &str {
        match self {
            AnalyzeError::Parse(m) | AnalyzeError::Structural(m) | AnalyzeError::Config(m) => m,
        }
    }
}

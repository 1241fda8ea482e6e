//! Analyzer configuration.
//!
//! The defaults reproduce the built-in rule set. A JSON override only needs
//! the keys it changes.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

/// Id of the target group every exported workflow ships with.
pub const DEFAULT_TARGET_GROUP_ID: &str = "target_group_01EJ0TQWPQWBD0qiWqClJKj9FOzwiZRfOFH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Minimum description length, in characters, for `description_scopes`.
    pub min_description_length: usize,
    pub description_scopes: Vec<String>,
    /// Words kept in this exact casing when suggesting variable names.
    pub naming_exceptions: Vec<String>,
    pub default_target_group_id: String,
    /// Target types the default target group contains out of the box.
    pub default_target_types: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_description_length: 10,
            description_scopes: vec!["input".into(), "local".into(), "static".into()],
            naming_exceptions: ["ID", "IDS", "TO", "FROM", "OF", "FOR"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_target_group_id: DEFAULT_TARGET_GROUP_ID.into(),
            default_target_types: vec![
                "web-service.endpoint".into(),
                "email.smtp_endpoint".into(),
            ],
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> Result<Self, AnalyzeError> {
        serde_json::from_str(json)
            .map_err(|e| AnalyzeError::config(format!("Failed to parse analyzer config: {}", e)))
    }

    pub fn requires_long_description(&self, scope: &str) -> bool {
        self.description_scopes.iter().any(|s| s == scope)
    }

    /// The configured spelling of `word` if it is a naming exception.
    pub fn naming_exception(&self, word: &str) -> Option<&str> {
        self.naming_exceptions
            .iter()
            .find(|e| e.eq_ignore_ascii_case(word))
            .map(String::as_str)
    }

    pub fn is_default_target_type(&self, target_type: &str) -> bool {
        self.default_target_types.iter().any(|t| t == target_type)
    }

    /// Default target types as readers know them, e.g.
    /// "HTTP Endpoint and SMTP Endpoint".
    pub fn default_target_types_label(&self) -> String {
        let labels: Vec<&str> = self
            .default_target_types
            .iter()
            .map(|t| target_type_label(t))
            .collect();
        match labels.split_last() {
            None => "none".to_string(),
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }
}

fn target_type_label(target_type: &str) -> &str {
    match target_type {
        "web-service.endpoint" => "HTTP Endpoint",
        "email.smtp_endpoint" => "SMTP Endpoint",
        other => other,
    }
}

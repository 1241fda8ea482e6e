//! Parse phase: JSON → typed workflow document.

pub mod field;
pub mod types;

pub use field::{Field, PropertyValue};
pub use types::*;

use serde::Deserialize;
use serde_json::Value;

use crate::error::AnalyzeError;

/// Deserialize a workflow JSON string into a `Document`.
///
/// Fails only when the text is not JSON or its root is not an object;
/// malformed fields deeper in the document are kept as [`Field::Invalid`]
/// or dropped, and left for the analyzers to report.
pub fn parse(json: &str) -> Result<Document, AnalyzeError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AnalyzeError::parse(format!("Failed to parse workflow JSON: {}", e)))?;
    if !value.is_object() {
        return Err(AnalyzeError::parse(
            "Failed to parse workflow JSON: document root must be an object",
        ));
    }
    Document::deserialize(&value)
        .map_err(|e| AnalyzeError::parse(format!("Failed to parse workflow JSON: {}", e)))
}

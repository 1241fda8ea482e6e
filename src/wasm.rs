//! WASM entry points for browser use.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::analyze;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzeError;
use crate::render::HtmlRenderer;
use crate::report::Report;

/// Analyze a workflow JSON with the built-in rules.
/// Returns the report, or an error object.
#[wasm_bindgen]
pub fn analyze_workflow(json: &str) -> JsValue {
    let result = match analyze::analyze(json) {
        Ok(report) => AnalyzeResult::Report(report),
        Err(e) => AnalyzeResult::Error(ErrorDto::from(e)),
    };
    to_js(&result)
}

/// Stateful analyzer for a page: keeps one configuration and one renderer,
/// so detail toggles stay unique across every report rendered into the page.
#[wasm_bindgen]
pub struct WorkflowAnalyzer {
    config: AnalyzerConfig,
    renderer: HtmlRenderer,
}

#[wasm_bindgen]
impl WorkflowAnalyzer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WorkflowAnalyzer {
        WorkflowAnalyzer {
            config: AnalyzerConfig::default(),
            renderer: HtmlRenderer::new(),
        }
    }

    /// Build an analyzer from a JSON configuration override.
    pub fn with_config(config_json: &str) -> Result<WorkflowAnalyzer, JsValue> {
        let config = AnalyzerConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WorkflowAnalyzer {
            config,
            renderer: HtmlRenderer::new(),
        })
    }

    /// Analyze and render. Returns `{status: "success", html, report}` or
    /// `{status: "error", code, phase, message, html}`.
    pub fn analyze(&mut self, json: &str) -> JsValue {
        let result = match analyze::analyze_with_config(json, &self.config) {
            Ok(report) => PageResult::Success {
                html: self.renderer.render(&report),
                report,
            },
            Err(e) => PageResult::Error {
                html: self.renderer.render_error(&e),
                error: ErrorDto::from(e),
            },
        };
        to_js(&result)
    }
}

impl Default for WorkflowAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize with maps as plain objects so buckets read as `report.buckets.variables`.
fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
}

impl From<AnalyzeError> for ErrorDto {
    fn from(e: AnalyzeError) -> Self {
        ErrorDto {
            code: e.code().into(),
            phase: e.phase().to_string(),
            message: e.message().into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum AnalyzeResult {
    #[serde(rename = "success")]
    Report(Report),
    #[serde(rename = "error")]
    Error(ErrorDto),
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum PageResult {
    #[serde(rename = "success")]
    Success { html: String, report: Report },
    #[serde(rename = "error")]
    Error {
        html: String,
        #[serde(flatten)]
        error: ErrorDto,
    },
}

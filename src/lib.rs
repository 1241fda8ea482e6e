pub mod analyze;
pub mod config;
pub mod error;
pub mod parse;
pub mod render;
pub mod report;
pub mod wasm;

pub use analyze::{analyze, analyze_with_config};
pub use config::AnalyzerConfig;
pub use error::AnalyzeError;
pub use report::{Bucket, Finding, Report, Severity, Summary};

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use workflow_analyzer::render::HtmlRenderer;
use workflow_analyzer::{AnalyzerConfig, Bucket, Report, analyze_with_config};

/// Lint an exported workflow definition
#[derive(Parser)]
#[command(name = "workflow-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON (reads stdin when omitted or `-`)
    workflow_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// JSON file overriding the default rule settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            AnalyzerConfig::from_json(&text)?
        }
        None => AnalyzerConfig::default(),
    };

    let json = read_input(cli.workflow_file.as_ref())?;
    let report = analyze_with_config(&json, &config).context("error analyzing workflow")?;

    match cli.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Html => print!("{}", HtmlRenderer::new().render(&report)),
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read workflow {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read workflow from stdin")?;
            Ok(buf)
        }
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for bucket in Bucket::ALL {
        let findings = report.findings(bucket);
        if findings.is_empty() {
            continue;
        }
        out.push_str(&format!("{}\n", bucket.title()));
        for f in findings {
            out.push_str(&format!(
                "  [{:<7}] {} {}: {}\n",
                f.severity, f.code, f.title, f.description
            ));
            if let Some(more) = &f.more_info {
                for line in more.lines() {
                    out.push_str(&format!("              {}\n", line));
                }
            }
        }
        out.push('\n');
    }
    let s = &report.summary;
    out.push_str(&format!(
        "{} success, {} info, {} warning, {} error\n",
        s.success, s.info, s.warning, s.error
    ));
    out
}

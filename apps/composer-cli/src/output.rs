//! Rendering of command results for stdout.

use crate::error::CliError;

use composer_core::{ProbeResult, ProbeStatus};

use models::{ComposerSubmission, NormalizedResponse};

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable summary and detail lines
    #[default]
    Table,
    /// Compact single-line JSON
    Raw,
}

/// Table prints the summary then one line per detail.
pub fn render_normalized(
    response: &NormalizedResponse,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(response.render()),
        _ => render_value(response, format),
    }
}

/// Typed results have no table form; table and json both pretty-print.
pub fn render_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Raw => serde_json::to_string(value)?,
        OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(value)?,
    })
}

pub fn render_submission(
    submission: &ComposerSubmission,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(format!(
            "Background composer created successfully!\nComposer ID: {}",
            submission.composer_id()
        )),
        _ => render_value(submission, format),
    }
}

pub fn render_probe(results: &[ProbeResult], format: OutputFormat) -> Result<String, CliError> {
    if format != OutputFormat::Table {
        return render_value(&results, format);
    }

    let mut lines = vec![String::from("=== Test Results ===")];
    for result in results {
        lines.push(probe_line(result));
    }

    let count = |status: ProbeStatus| results.iter().filter(|r| r.status == status).count();
    lines.push(String::new());
    lines.push(String::from("=== Summary ==="));
    lines.push(format!(
        "{} succeeded, {} accessible, {} failed ({} total)",
        count(ProbeStatus::Success),
        count(ProbeStatus::Accessible),
        count(ProbeStatus::Error),
        results.len()
    ));

    Ok(lines.join("\n"))
}

fn probe_line(result: &ProbeResult) -> String {
    let (symbol, label) = match result.status {
        ProbeStatus::Success => ("✓", "success"),
        ProbeStatus::Accessible => ("~", "accessible"),
        ProbeStatus::Error => ("✗", "error"),
    };

    let mut line = format!("{symbol} {}: {label}", result.endpoint);
    if let Some(code) = result.status_code {
        line.push_str(&format!(" ({code})"));
    }
    if let Some(error) = &result.error {
        line.push_str(&format!(" - {error}"));
    }
    line
}

//! Payload formatting for stdout.

use ar_report::{AssembledReport, ReportMeta};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,

    /// Human-readable Markdown
    Md,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
        }
    }
}

/// JSON envelope for an assembled report.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub schema_version: &'static str,
    #[serde(flatten)]
    pub meta: &'a ReportMeta,
    pub field_count: usize,
    pub sections: &'a [ar_report::AssembledSection],
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(meta: &'a ReportMeta, report: &'a AssembledReport) -> Self {
        Self {
            schema_version: ar_config::CONFIG_SCHEMA_VERSION,
            meta,
            field_count: report.field_count(),
            sections: &report.sections,
        }
    }
}

/// Markdown rendering of an assembled report.
pub fn report_markdown(meta: &ReportMeta, report: &AssembledReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Assessment Report {}", meta.session_id);
    let _ = writeln!(out);
    let _ = writeln!(out, "- Assessment: {}", meta.assessment_type);
    let _ = writeln!(
        out,
        "- Generated: {}",
        meta.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", section.name);
        let _ = writeln!(out);
        if section.fields.is_empty() {
            let _ = writeln!(out, "_No data recorded._");
            continue;
        }
        let _ = writeln!(out, "| Field | Value | Status |");
        let _ = writeln!(out, "|---|---|---|");
        for field in &section.fields {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                escape_cell(&field.label),
                escape_cell(&field.rendered()),
                field.classification.as_deref().map(escape_cell).unwrap_or_default()
            );
        }
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

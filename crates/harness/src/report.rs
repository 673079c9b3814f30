//! Run reports for humans and pipelines.

use std::io::{self, Write};
use std::str::FromStr;

use admin_conformance_core::{CheckResult, Summary};
use serde::Serialize;

use crate::fixtures::FixtureRecord;
use crate::runner::RunReport;

/// Output format for [`write_report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per check, indented notes, summary line.
    #[default]
    Text,
    /// A single pretty-printed JSON document.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid report format: {s} (expected text or json)")),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [CheckResult],
    summary: Summary,
    success: bool,
    fixtures: &'a [FixtureRecord],
}

/// Write `report` to `out` in the given format.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &RunReport,
    format: ReportFormat,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(out, report),
        ReportFormat::Json => write_json(out, report),
    }
}

fn write_text<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for result in &report.results {
        writeln!(
            out,
            "[{}] {}: {}",
            result.outcome.label(),
            result.name,
            result.message
        )?;
        for note in &result.notes {
            writeln!(out, "    - {note}")?;
        }
    }

    if !report.fixtures.is_empty() {
        writeln!(out)?;
        writeln!(out, "Fixtures left in place: {}", report.fixtures.len())?;
        for fixture in &report.fixtures {
            writeln!(out, "    - {} {} ({})", fixture.kind, fixture.id, fixture.label)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", report.summary())
}

fn write_json<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    let summary = report.summary();
    let document = JsonReport {
        results: &report.results,
        summary,
        success: summary.is_success(),
        fixtures: &report.fixtures,
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}

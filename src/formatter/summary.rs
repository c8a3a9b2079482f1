//! End-of-run summary formatting
//!
//! Renders the per-collection outcomes of an export run as a table, with a
//! totals line underneath. Shown on stdout after the run unless quiet mode
//! is active; the export file itself never contains this table.

use chrono::Local;
use tabled::{builder::Builder, settings::Style};

use crate::export::{CollectionOutcome, ExportSummary};

/// Formatter for the export run summary
pub struct SummaryFormatter {
    /// Show the completion timestamp in the totals line
    show_timestamp: bool,
}

impl SummaryFormatter {
    /// Create a new summary formatter
    pub fn new(show_timestamp: bool) -> Self {
        Self { show_timestamp }
    }

    /// Format the summary as a table plus totals line.
    pub fn format(&self, summary: &ExportSummary) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Collection", "Documents", "Status"]);

        for report in &summary.reports {
            match &report.outcome {
                CollectionOutcome::Exported { documents } => {
                    builder.push_record([
                        report.name.clone(),
                        documents.to_string(),
                        "exported".to_string(),
                    ]);
                }
                CollectionOutcome::Failed { reason } => {
                    builder.push_record([
                        report.name.clone(),
                        "-".to_string(),
                        format!("failed: {reason}"),
                    ]);
                }
            }
        }

        let mut table = builder.build();
        table.with(Style::psql());

        let mut out = table.to_string();
        out.push('\n');
        out.push_str(&self.format_totals(summary));
        out
    }

    /// Format the totals line.
    fn format_totals(&self, summary: &ExportSummary) -> String {
        let failed = summary.failed_collections();
        let mut line = format!(
            "{} collection(s), {} document(s), {} bytes, {} ms",
            summary.reports.len(),
            summary.total_documents,
            summary.file_size_bytes,
            summary.elapsed_ms,
        );

        if failed > 0 {
            line.push_str(&format!(", {failed} failed"));
        }

        if self.show_timestamp {
            line.push_str(&format!(
                ", finished at {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CollectionReport;

    fn sample_summary() -> ExportSummary {
        ExportSummary {
            reports: vec![
                CollectionReport {
                    name: "entradas".to_string(),
                    outcome: CollectionOutcome::Exported { documents: 12 },
                },
                CollectionReport {
                    name: "tickets".to_string(),
                    outcome: CollectionOutcome::Failed {
                        reason: "Unauthorized (code 13)".to_string(),
                    },
                },
            ],
            total_documents: 12,
            file_size_bytes: 4096,
            elapsed_ms: 87,
        }
    }

    #[test]
    fn test_summary_table_contains_outcomes() {
        let formatter = SummaryFormatter::new(false);
        let out = formatter.format(&sample_summary());

        assert!(out.contains("entradas"));
        assert!(out.contains("12"));
        assert!(out.contains("exported"));
        assert!(out.contains("failed: Unauthorized (code 13)"));
    }

    #[test]
    fn test_totals_line_counts_failures() {
        let formatter = SummaryFormatter::new(false);
        let out = formatter.format(&sample_summary());

        assert!(out.contains("2 collection(s), 12 document(s), 4096 bytes, 87 ms, 1 failed"));
    }

    #[test]
    fn test_timestamp_toggle() {
        let formatter = SummaryFormatter::new(true);
        let out = formatter.format(&sample_summary());
        assert!(out.contains("finished at "));
    }
}

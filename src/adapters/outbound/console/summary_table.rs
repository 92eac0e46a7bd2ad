use crate::application::use_cases::{BlockedReport, IngestionOutcome};
use crate::inspection::domain::IngestionStatus;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Renders the end-of-batch tables printed after document uploads
pub struct SummaryTable {
    color: bool,
}

impl SummaryTable {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colours only when stderr is a terminal
    pub fn for_stderr() -> Self {
        Self::new(std::io::stderr().is_terminal())
    }

    fn paint(&self, text: &str, ok: Option<bool>) -> String {
        match (self.color, ok) {
            (true, Some(true)) => text.green().to_string(),
            (true, Some(false)) => text.red().to_string(),
            (true, None) => text.yellow().to_string(),
            (false, _) => text.to_string(),
        }
    }

    fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
        names.map(str::len).max().unwrap_or(0).max("Document".len())
    }

    /// One row per document, in input order
    pub fn ingestion(&self, outcomes: &[IngestionOutcome]) -> String {
        let width = Self::name_width(outcomes.iter().map(|o| o.name.as_str()));
        let mut output = format!("{:<width$}  {:<10}  Message\n", "Document", "Status");
        for outcome in outcomes {
            let (label, ok) = if outcome.timed_out {
                ("timed out".to_string(), None)
            } else {
                let ok = match outcome.record.status {
                    IngestionStatus::Success => Some(true),
                    IngestionStatus::Failed => Some(false),
                    _ => None,
                };
                (outcome.record.status.to_string(), ok)
            };
            output.push_str(&format!(
                "{:<width$}  {}  {}\n",
                outcome.name,
                self.paint(&format!("{:<10}", label), ok),
                outcome.record.message
            ));
        }
        output
    }

    /// Verdict per checked document followed by the offending packages
    pub fn blocked(&self, report: &BlockedReport, skipped: &[String]) -> String {
        let width = Self::name_width(
            report
                .documents
                .iter()
                .map(|d| d.name.as_str())
                .chain(skipped.iter().map(String::as_str)),
        );
        let mut output = format!("{:<width$}  Verdict\n", "Document");
        for document in &report.documents {
            let verdict = if document.check.blocked {
                self.paint("blocked", Some(false))
            } else {
                self.paint("allowed", Some(true))
            };
            output.push_str(&format!("{:<width$}  {}\n", document.name, verdict));
        }
        for name in skipped {
            output.push_str(&format!(
                "{:<width$}  {}\n",
                name,
                self.paint("skipped (not a recognised SBOM)", None)
            ));
        }

        for document in report.offending() {
            output.push_str(&format!("\nBlocked packages in {}:\n", document.name));
            for package in &document.check.packages {
                output.push_str(&format!("  - {}\n", package));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::BlockedDocumentResult;
    use crate::inspection::domain::IngestionRecord;
    use crate::ports::outbound::BlockedCheck;

    #[test]
    fn test_ingestion_table_plain() {
        let outcomes = vec![
            IngestionOutcome {
                index: 0,
                name: "app.cdx.json".to_string(),
                doc_ref: "sha256_a".to_string(),
                record: IngestionRecord {
                    status: IngestionStatus::Success,
                    message: "ingested".to_string(),
                },
                timed_out: false,
            },
            IngestionOutcome {
                index: 1,
                name: "lib.spdx.json".to_string(),
                doc_ref: "sha256_b".to_string(),
                record: IngestionRecord::started(),
                timed_out: true,
            },
        ];
        let table = SummaryTable::new(false).ingestion(&outcomes);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("app.cdx.json"));
        assert!(lines[1].contains("success"));
        assert!(lines[2].contains("timed out"));
    }

    #[test]
    fn test_blocked_table_lists_offending_packages() {
        let report = BlockedReport::from_results(vec![
            BlockedDocumentResult {
                index: 1,
                name: "b.json".to_string(),
                check: BlockedCheck::default(),
            },
            BlockedDocumentResult {
                index: 0,
                name: "a.json".to_string(),
                check: BlockedCheck {
                    blocked: true,
                    packages: vec!["pkg:npm/evil@1.0.0".to_string()],
                },
            },
        ]);
        let table = SummaryTable::new(false).blocked(&report, &["vex.json".to_string()]);
        assert!(table.contains("a.json    blocked"));
        assert!(table.contains("b.json    allowed"));
        assert!(table.contains("vex.json  skipped"));
        assert!(table.contains("Blocked packages in a.json:\n  - pkg:npm/evil@1.0.0"));
        assert!(!table.contains("Blocked packages in b.json"));
    }

    #[test]
    fn test_colour_adds_escape_codes() {
        let coloured = SummaryTable::new(true).paint("ok", Some(true));
        assert!(coloured.contains("\u{1b}["));
    }
}

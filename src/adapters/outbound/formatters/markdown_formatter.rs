use crate::inspection::domain::{HealthReport, ScanResultRow, SecurityAnalysis};
use crate::ports::outbound::AnalysisFormatter;
use crate::shared::Result;

/// Markdown table header for findings
const FINDINGS_TABLE_HEADER: &str = "| Severity | Finding | Location |\n";

/// Markdown table separator line for findings
const FINDINGS_TABLE_SEPARATOR: &str = "|----------|---------|----------|\n";

/// Markdown table header for health report sections
const HEALTH_TABLE_HEADER: &str = "| Section | Score | Summary |\n";

const HEALTH_TABLE_SEPARATOR: &str = "|---------|-------|---------|\n";

/// MarkdownFormatter adapter rendering a finished scan as Markdown
///
/// Diff scans render their security analysis; full scans render the
/// multi-section health report.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn format_score(score: Option<f64>) -> String {
        score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_analysis(&self, output: &mut String, analysis: &SecurityAnalysis) {
        output.push_str("# Kusari Inspector Security Analysis\n\n");
        output.push_str(&format!(
            "**Recommendation:** {}\n\n",
            analysis.recommendation
        ));
        if !analysis.justification.is_empty() {
            output.push_str("## Justification\n\n");
            output.push_str(analysis.justification.trim());
            output.push_str("\n\n");
        }

        output.push_str("## Findings\n\n");
        if analysis.findings.is_empty() {
            output.push_str("No findings.\n");
            return;
        }

        output.push_str(FINDINGS_TABLE_HEADER);
        output.push_str(FINDINGS_TABLE_SEPARATOR);
        for finding in &analysis.findings {
            let location = match (&finding.file, finding.line) {
                (Some(file), Some(line)) => format!("{}:{}", file, line),
                (Some(file), None) => file.clone(),
                _ => String::new(),
            };
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&finding.severity),
                Self::escape_markdown_table_cell(&finding.title),
                Self::escape_markdown_table_cell(&location)
            ));
        }
        output.push('\n');

        for finding in analysis
            .findings
            .iter()
            .filter(|f| !f.description.is_empty())
        {
            output.push_str(&format!("### {}\n\n{}\n\n", finding.title, finding.description.trim()));
        }
    }

    fn render_health_report(&self, output: &mut String, report: &HealthReport) {
        output.push_str("# Kusari Inspector Repository Health Report\n\n");
        output.push_str(&format!(
            "**Overall score:** {}\n\n",
            Self::format_score(report.overall_score)
        ));
        if !report.summary.is_empty() {
            output.push_str(report.summary.trim());
            output.push_str("\n\n");
        }

        output.push_str(HEALTH_TABLE_HEADER);
        output.push_str(HEALTH_TABLE_SEPARATOR);
        for section in &report.sections {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&section.name),
                Self::format_score(section.score),
                Self::escape_markdown_table_cell(&section.summary)
            ));
        }
        output.push('\n');

        for section in report.sections.iter().filter(|s| !s.items.is_empty()) {
            output.push_str(&format!("## {}\n\n", section.name));
            for item in &section.items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }
    }
}

impl AnalysisFormatter for MarkdownFormatter {
    fn format(&self, row: &ScanResultRow) -> Result<String> {
        let mut output = String::new();
        match (&row.health_report, &row.analysis) {
            (Some(report), _) => self.render_health_report(&mut output, report),
            (None, Some(analysis)) => self.render_analysis(&mut output, analysis),
            (None, None) => anyhow::bail!("Scan result contains no analysis to render"),
        }
        Ok(output)
    }
}

use crate::inspection::domain::ScanResultRow;
use crate::shared::Result;

/// AnalysisFormatter port for rendering a finished scan
///
/// Implementations turn the terminal result row (diff analysis or full-scan
/// health report) into text for the user: Markdown, SARIF, etc.
pub trait AnalysisFormatter {
    /// Renders `row`
    ///
    /// # Errors
    /// Returns an error if the row carries no renderable content or
    /// serialization fails
    fn format(&self, row: &ScanResultRow) -> Result<String>;
}

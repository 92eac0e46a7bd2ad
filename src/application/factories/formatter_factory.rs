use crate::adapters::outbound::formatters::{MarkdownFormatter, SarifFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::AnalysisFormatter;

/// Factory for creating analysis formatters
///
/// Keeps the choice of rendering adapter out of the use cases.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use kusari_cli::application::dto::OutputFormat;
    /// use kusari_cli::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Sarif);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn AnalysisFormatter> {
        match format {
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
            OutputFormat::Sarif => Box::new(SarifFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Markdown => "📝 Rendering Markdown report...",
            OutputFormat::Sarif => "📝 Rendering SARIF report...",
        }
    }
}

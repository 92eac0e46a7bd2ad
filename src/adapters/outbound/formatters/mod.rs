/// Formatter adapters for rendering finished scans
mod markdown_formatter;
mod sarif_formatter;

pub use markdown_formatter::MarkdownFormatter;
pub use sarif_formatter::SarifFormatter;

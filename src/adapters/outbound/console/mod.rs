/// Console adapters for terminal interaction
mod browser;
mod progress_reporter;
mod summary_table;
mod workspace_prompt;

pub use browser::SystemBrowser;
pub use progress_reporter::StderrProgressReporter;
pub use summary_table::SummaryTable;
pub use workspace_prompt::ConsoleWorkspacePrompt;

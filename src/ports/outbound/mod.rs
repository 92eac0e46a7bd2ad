/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod analysis_formatter;
pub mod browser_launcher;
pub mod bundle_writer;
pub mod callback_server;
pub mod credential_store;
pub mod oauth_provider;
pub mod output_presenter;
pub mod platform;
pub mod progress_reporter;
pub mod version_control;
pub mod workspace_prompt;
pub mod workspace_store;

pub use analysis_formatter::AnalysisFormatter;
pub use browser_launcher::BrowserLauncher;
pub use bundle_writer::{BundleEntry, BundleWriter};
pub use callback_server::{CallbackServer, CallbackSession};
pub use credential_store::CredentialStore;
pub use oauth_provider::OAuthProvider;
pub use output_presenter::OutputPresenter;
pub use platform::{
    BlobStore, BlockedCheck, BundlePresignRequest, IngestionStatusSource, PresignApi,
    ScanStatusSource, SoftwareCatalog, SoftwareIds, SoftwareLookup, UserDirectory,
};
pub use progress_reporter::ProgressReporter;
pub use version_control::VersionControl;
pub use workspace_prompt::WorkspacePrompt;
pub use workspace_store::WorkspaceStore;

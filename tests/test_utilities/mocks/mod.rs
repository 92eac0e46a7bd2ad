/// Mock implementations for testing
mod mock_blob_store;
mod mock_browser_launcher;
mod mock_credential_store;
mod mock_ingestion_status_source;
mod mock_oauth_provider;
mod mock_presign_api;
mod mock_progress_reporter;
mod mock_scan_status_source;
mod mock_software_catalog;
mod mock_user_directory;
mod mock_workspace_prompt;
mod mock_workspace_store;

pub use mock_blob_store::MockBlobStore;
pub use mock_browser_launcher::MockBrowserLauncher;
pub use mock_credential_store::MockCredentialStore;
pub use mock_ingestion_status_source::MockIngestionStatusSource;
pub use mock_oauth_provider::MockOAuthProvider;
pub use mock_presign_api::MockPresignApi;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_status_source::MockScanStatusSource;
pub use mock_software_catalog::MockSoftwareCatalog;
pub use mock_user_directory::MockUserDirectory;
pub use mock_workspace_prompt::MockWorkspacePrompt;
pub use mock_workspace_store::MockWorkspaceStore;

//! kusari-cli - command-line client for the Kusari security-analysis platform
//!
//! This library logs a developer in to the platform, packages a git repository
//! (or a diff against a revision) into a bundle, submits it for analysis and
//! renders the result. It also uploads standalone SBOM/VEX documents and checks
//! them against the tenant's blocked-package list.
//!
//! # Architecture
//!
//! The library follows a hexagonal (ports and adapters) layout:
//!
//! - **Domain Layer** (`inspection`): Pure types and rules such as tokens, job references and the monorepo heuristic
//! - **Application Layer** (`application`): Use cases orchestrating login, packaging, upload and polling
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports (HTTP, git, tar+bzip2, files, console)
//! - **Shared** (`shared`): Error types, exit codes and file security helpers
//!
//! # Example
//!
//! ```no_run
//! use kusari_cli::prelude::*;
//! use std::path::Path;
//!
//! # async fn run() -> Result<()> {
//! let reporter = StderrProgressReporter::new();
//! let dir = validate_repository(Path::new("."))?;
//! let work_dir = tempfile::TempDir::new()?;
//!
//! // Package the changes since main
//! let builder = BuildBundleUseCase::new(GitCli::new(), TarBz2Writer::new(), &reporter);
//! let bundle = builder.execute(&dir, Some("main"), ScanType::Diff, work_dir.path())?;
//!
//! // Submit and wait for the analysis
//! let client = PlatformClient::new(build_client()?, "https://platform.api.us.kusari.cloud", "token");
//! let poller = ResultPoller::new(client.clone(), &reporter, PollSettings::default());
//! let scan = ScanRepositoryUseCase::new(
//!     client,
//!     HttpBlobStore::new(build_client()?),
//!     poller,
//!     &reporter,
//!     "https://console.us.kusari.cloud",
//! );
//! let outcome = scan.execute(&bundle, true).await?;
//!
//! if let Some(row) = outcome.result {
//!     println!("{}", MarkdownFormatter::new().format(&row)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::TarBz2Writer;
    pub use crate::adapters::outbound::console::{
        ConsoleWorkspacePrompt, StderrProgressReporter, SummaryTable, SystemBrowser,
    };
    pub use crate::adapters::outbound::filesystem::{
        CredentialFileStore, FileSystemWriter, StdoutPresenter, WorkspaceFileStore,
    };
    pub use crate::adapters::outbound::formatters::{MarkdownFormatter, SarifFormatter};
    pub use crate::adapters::outbound::git::GitCli;
    pub use crate::adapters::outbound::network::{
        build_client, tenant_endpoint, CallbackListener, HttpBlobStore, LocalCallbackServer,
        OAuthClient, PlatformClient,
    };
    pub use crate::application::dto::{DocumentType, OutputFormat, ScanRequest, UploadRequest};
    pub use crate::application::use_cases::{
        validate_repository, BlockedPackageChecker, BlockedReport, BuildBundleUseCase, Bundle,
        CheckedDocument, IngestionOutcome, IngestionPoller, LoginUseCase, LogoutUseCase,
        PlatformScope, PollSettings, ResolveWorkspaceUseCase, ResultPoller, ScanOutcome,
        ScanRepositoryUseCase, TrackedDocument, UploadDocumentsUseCase, UploadedDocument,
    };
    pub use crate::inspection::domain::{
        create_sort_string, doc_ref, BundleMetadata, IngestionRecord, IngestionStatus,
        JobReference, PkceChallenge, SbomSubjectReference, ScanResultRow, ScanStatus, ScanType,
        Token, UploadIds, UserInfo, WorkspaceCandidate, WorkspaceSelection, DEFAULT_PROVIDER,
    };
    pub use crate::inspection::services::MonorepoDetector;
    pub use crate::ports::outbound::{
        AnalysisFormatter, BlobStore, BlockedCheck, BrowserLauncher, BundlePresignRequest, BundleWriter,
        CallbackServer, CallbackSession, CredentialStore, IngestionStatusSource, OAuthProvider,
        OutputPresenter, PresignApi, ProgressReporter, ScanStatusSource, SoftwareCatalog,
        SoftwareIds, SoftwareLookup, UserDirectory, VersionControl, WorkspacePrompt,
        WorkspaceStore,
    };
    pub use crate::shared::error::{AuthError, ExitCode, KusariError, PollError, UploadError};
    pub use crate::shared::Result;
}

/// Use cases module containing application business logic orchestration
mod blocked_package_checker;
mod build_bundle;
mod login;
mod resolve_workspace;
mod result_poller;
mod scan_repository;
mod upload_documents;

pub use blocked_package_checker::{
    BlockedDocumentResult, BlockedPackageChecker, BlockedReport, CheckedDocument,
};
pub use build_bundle::{validate_repository, Bundle, BuildBundleUseCase, WORK_DIR_NAME};
pub use login::{LoginUseCase, LogoutUseCase, DEFAULT_LOGIN_TIMEOUT};
pub use resolve_workspace::{PlatformScope, ResolveWorkspaceUseCase};
pub use result_poller::{
    IngestionOutcome, IngestionPoller, PollSettings, ResultPoller, TrackedDocument,
    BATCH_DEADLINE, MAX_CONCURRENT_POLLS,
};
pub use scan_repository::{ScanOutcome, ScanRepositoryUseCase, BUNDLE_CONTENT_TYPE};
pub use upload_documents::{UploadDocumentsUseCase, UploadedDocument, DOCUMENT_CONTENT_TYPE};

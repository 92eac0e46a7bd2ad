pub mod analysis;
pub mod bundle;
pub mod ingestion;
pub mod job;
pub mod pkce;
pub mod sbom_subject;
pub mod token;
pub mod workspace;

pub use analysis::{Finding, HealthReport, HealthSection, ScanResultRow, ScanStatus, SecurityAnalysis};
pub use bundle::{
    BundleMetadata, ScanType, BUNDLE_FILE_NAME, METADATA_FILE_NAME, PATCH_FILE_NAME,
};
pub use ingestion::{IngestionRecord, IngestionStatus};
pub use job::{create_sort_string, doc_ref, JobReference, UploadIds};
pub use pkce::PkceChallenge;
pub use sbom_subject::{SbomFormat, SbomSubjectReference};
pub use token::{Token, DEFAULT_PROVIDER};
pub use workspace::{UserInfo, Workspace, WorkspaceCandidate, WorkspaceSelection};

use crate::inspection::domain::{IngestionRecord, ScanResultRow, ScanType, UserInfo};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

/// UserDirectory port for the platform's user-info endpoint
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Workspaces and tenants visible to the authenticated user
    async fn fetch_user_info(&self) -> Result<UserInfo>;
}

/// Body of the bundle presign request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlePresignRequest {
    pub filename: String,
    pub scan_type: ScanType,
    pub size: u64,
}

/// PresignApi port for obtaining upload targets
///
/// Bundle scans and standalone documents use different endpoints with
/// different contracts, so they stay separate operations.
#[async_trait]
pub trait PresignApi: Send + Sync {
    /// Presigned URL for a repository bundle
    async fn presign_bundle(&self, request: &BundlePresignRequest) -> Result<String>;

    /// Presigned URL for a standalone SBOM/VEX document on `tenant`
    async fn presign_document(&self, tenant: &str, filename: &str) -> Result<String>;
}

/// BlobStore port for uploading bytes to a presigned URL
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// PUTs `body` to `url`; an empty body is a no-op
    async fn put_blob(&self, url: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}

/// ScanStatusSource port for repository scan results
#[async_trait]
pub trait ScanStatusSource: Send + Sync {
    /// All result rows recorded for `sort_key`
    ///
    /// `Ok(None)` means the platform has no record yet (non-200 answer);
    /// `Err` is reserved for transport and decoding failures.
    async fn fetch_scan_results(&self, sort_key: &str) -> Result<Option<Vec<ScanResultRow>>>;
}

/// IngestionStatusSource port for uploaded documents
#[async_trait]
pub trait IngestionStatusSource: Send + Sync {
    /// Latest ingestion record for `doc_ref`, `None` while the platform does
    /// not know the document yet
    async fn fetch_ingestion_status(
        &self,
        tenant: &str,
        doc_ref: &str,
    ) -> Result<Option<IngestionRecord>>;
}

/// Catalog identifiers of an ingested SBOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareIds {
    pub software_id: String,
    pub sbom_id: String,
}

/// Outcome of one software-id lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftwareLookup {
    /// The document is not ingested yet (HTTP 404)
    NotFound,
    Ready(SoftwareIds),
}

/// Blocked-package verdict for one SBOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedCheck {
    pub blocked: bool,
    /// Identifiers (purl or name@version) of the offending packages
    pub packages: Vec<String>,
}

/// SoftwareCatalog port for the tenant's package-policy API
#[async_trait]
pub trait SoftwareCatalog: Send + Sync {
    /// Resolves catalog ids for an SBOM subject
    ///
    /// # Errors
    /// Any answer other than 200 or 404 is an error
    async fn lookup_software_ids(&self, subject: &str, uri: &str) -> Result<SoftwareLookup>;

    async fn check_blocked_packages(&self, ids: &SoftwareIds) -> Result<BlockedCheck>;
}

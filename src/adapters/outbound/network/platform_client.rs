use super::http::check_upload_status;
use crate::inspection::domain::{IngestionRecord, ScanResultRow, UserInfo};
use crate::ports::outbound::{
    BlockedCheck, BundlePresignRequest, IngestionStatusSource, PresignApi, ScanStatusSource,
    SoftwareCatalog, SoftwareIds, SoftwareLookup, UserDirectory,
};
use crate::shared::error::AuthError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Derives a tenant's API endpoint by replacing the first host label of the
/// platform URL with the tenant name.
///
/// `https://platform.api.us.example` + `acme` → `https://acme.api.us.example`.
/// Single-label hosts (`localhost`) are returned unchanged.
pub fn tenant_endpoint(platform_url: &str, tenant: &str) -> Result<String> {
    let mut url = Url::parse(platform_url)
        .map_err(|e| anyhow::anyhow!("Invalid platform URL '{}': {}", platform_url, e))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Platform URL '{}' has no host", platform_url))?
        .to_string();

    if let Some((_, rest)) = host.split_once('.') {
        url.set_host(Some(&format!("{tenant}.{rest}")))
            .map_err(|e| anyhow::anyhow!("Invalid tenant name '{}': {}", tenant, e))?;
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Async client for the analysis platform and its tenant APIs
///
/// Every request carries the bearer token of the current session. Tenant
/// scoped calls without an explicit tenant argument use the tenant bound with
/// [`PlatformClient::with_tenant`].
#[derive(Clone)]
pub struct PlatformClient {
    client: Client,
    platform_url: String,
    access_token: String,
    tenant: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresignResponse {
    presigned_url: String,
}

#[derive(Serialize)]
struct DocumentPresignRequest<'a> {
    filename: &'a str,
}

/// The status endpoint answers with either a list of records or a single one
#[derive(Deserialize)]
#[serde(untagged)]
enum IngestionStatusBody {
    Many(Vec<IngestionRecord>),
    One(IngestionRecord),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SoftwareIdResponse {
    software_id: Value,
    sbom_id: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockedCheckResponse {
    #[serde(default)]
    blocked: bool,
    #[serde(default)]
    blocked_packages: Vec<BlockedPackage>,
}

#[derive(Deserialize)]
struct BlockedPackage {
    #[serde(default)]
    purl: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: Option<String>,
}

impl BlockedPackage {
    fn identifier(&self) -> String {
        match (&self.purl, &self.version) {
            (Some(purl), _) if !purl.is_empty() => purl.clone(),
            (_, Some(version)) if !version.is_empty() => format!("{}@{}", self.name, version),
            _ => self.name.clone(),
        }
    }
}

/// Catalog ids arrive as numbers or strings depending on the deployment
/// Classifies a scan result answer: `true` when rows are attached, `false`
/// while the result is not available yet
fn scan_result_ready(status: StatusCode) -> Result<bool> {
    match status {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND | StatusCode::ACCEPTED => Ok(false),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::SessionRejected {
            status: status.as_u16(),
        }
        .into()),
        other => anyhow::bail!("Scan result lookup returned status code {}", other),
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl PlatformClient {
    pub fn new(client: Client, platform_url: &str, access_token: &str) -> Self {
        Self {
            client,
            platform_url: platform_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            tenant: None,
        }
    }

    pub fn with_tenant(mut self, tenant: &str) -> Self {
        self.tenant = Some(tenant.to_string());
        self
    }

    fn bound_tenant_endpoint(&self) -> Result<String> {
        let tenant = self
            .tenant
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No tenant selected for this request"))?;
        tenant_endpoint(&self.platform_url, tenant)
    }

    async fn post_presign<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<String> {
        tracing::debug!(url, "requesting presigned upload URL");
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        check_upload_status(status, &text)?;

        let parsed: PresignResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Unexpected presign response: {}", e))?;
        Ok(parsed.presigned_url)
    }
}

#[async_trait]
impl UserDirectory for PlatformClient {
    async fn fetch_user_info(&self) -> Result<UserInfo> {
        let url = format!("{}/user", self.platform_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Platform returned status code {} for user info",
                response.status()
            );
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PresignApi for PlatformClient {
    async fn presign_bundle(&self, request: &BundlePresignRequest) -> Result<String> {
        let url = format!("{}/inspector/presign/bundle-upload", self.platform_url);
        self.post_presign(&url, request).await
    }

    async fn presign_document(&self, tenant: &str, filename: &str) -> Result<String> {
        let url = format!(
            "{}/ingestion/presign",
            tenant_endpoint(&self.platform_url, tenant)?
        );
        self.post_presign(&url, &DocumentPresignRequest { filename })
            .await
    }
}

#[async_trait]
impl ScanStatusSource for PlatformClient {
    async fn fetch_scan_results(&self, sort_key: &str) -> Result<Option<Vec<ScanResultRow>>> {
        // sort_key is already escaped; passing it through .query() would escape it twice
        let url = format!(
            "{}/inspector/result/user?sortKey={}",
            self.platform_url, sort_key
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if !scan_result_ready(response.status())? {
            tracing::debug!(status = %response.status(), "scan result not available yet");
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl IngestionStatusSource for PlatformClient {
    async fn fetch_ingestion_status(
        &self,
        tenant: &str,
        doc_ref: &str,
    ) -> Result<Option<IngestionRecord>> {
        let url = format!("{}/ingestion/status", self.platform_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("tenantName", tenant), ("docRef", doc_ref)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            other => anyhow::bail!("Ingestion status returned status code {}", other),
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(match serde_json::from_str(&text)? {
            IngestionStatusBody::One(record) => Some(record),
            IngestionStatusBody::Many(records) => records.into_iter().last(),
        })
    }
}

#[async_trait]
impl SoftwareCatalog for PlatformClient {
    async fn lookup_software_ids(&self, subject: &str, uri: &str) -> Result<SoftwareLookup> {
        let url = format!("{}/pico/v1/software/id", self.bound_tenant_endpoint()?);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("subject", subject), ("uri", uri)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(SoftwareLookup::NotFound),
            other => anyhow::bail!("Software id lookup returned status code {}", other),
        }

        let ids: SoftwareIdResponse = response.json().await?;
        match (id_string(&ids.software_id), id_string(&ids.sbom_id)) {
            (Some(software_id), Some(sbom_id)) => Ok(SoftwareLookup::Ready(SoftwareIds {
                software_id,
                sbom_id,
            })),
            _ => anyhow::bail!("Software id lookup returned incomplete ids"),
        }
    }

    async fn check_blocked_packages(&self, ids: &SoftwareIds) -> Result<BlockedCheck> {
        let url = format!(
            "{}/pico/v1/packages/blocked/check/software/{}/sbom/{}",
            self.bound_tenant_endpoint()?,
            urlencoding::encode(&ids.software_id),
            urlencoding::encode(&ids.sbom_id)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            anyhow::bail!(
                "Blocked package check returned status code {}",
                response.status()
            );
        }

        let body: BlockedCheckResponse = response.json().await?;
        Ok(BlockedCheck {
            blocked: body.blocked || !body.blocked_packages.is_empty(),
            packages: body
                .blocked_packages
                .iter()
                .map(BlockedPackage::identifier)
                .collect(),
        })
    }
}

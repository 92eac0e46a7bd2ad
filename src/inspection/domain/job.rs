use crate::shared::Result;
use reqwest::Url;
use sha2::{Digest, Sha256};

/// Content-addressed identifier of an uploaded blob: `sha256_<hex digest>`
pub fn doc_ref(blob: &[u8]) -> String {
    format!("sha256_{}", hex::encode(Sha256::digest(blob)))
}

/// Builds the URL-escaped sort key the platform uses to locate a scan record.
///
/// Humans are keyed as `cli-user|<user>|<epoch>`, API clients as
/// `cli-api|machine|<epoch>`; full scans append `-full` to the prefix.
pub fn create_sort_string(user_id: &str, epoch: &str, full: bool, is_machine: bool) -> String {
    let actor = if is_machine { "cli-api" } else { "cli-user" };
    let suffix = if full { "-full" } else { "" };
    let user = if is_machine { "machine" } else { user_id };
    urlencoding::encode(&format!("{actor}{suffix}|{user}|{epoch}")).into_owned()
}

/// Identifiers embedded in the path of a presigned bundle upload URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadIds {
    pub workspace_id: String,
    pub user_id: String,
    pub epoch: String,
    pub is_machine: bool,
}

impl UploadIds {
    /// Extracts ids from `/workspace/{W}/user/{human|machine}/{U}/.../{epoch}`.
    ///
    /// The epoch is the last path segment with any file extension removed.
    pub fn from_url(presigned_url: &str) -> Result<Self> {
        let url = Url::parse(presigned_url)
            .map_err(|e| anyhow::anyhow!("Invalid upload URL: {}", e))?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let workspace_id = segment_after(&segments, "workspace")
            .ok_or_else(|| anyhow::anyhow!("workspace id not found in upload URL path"))?;

        let user_pos = segments
            .iter()
            .position(|s| *s == "user")
            .ok_or_else(|| anyhow::anyhow!("user id not found in upload URL path"))?;
        let (is_machine, user_id) = match segments.get(user_pos + 1) {
            Some(&kind @ ("human" | "machine")) => (kind == "machine", segments.get(user_pos + 2)),
            other => (false, other),
        };
        let user_id =
            user_id.ok_or_else(|| anyhow::anyhow!("user id not found in upload URL path"))?;

        let epoch = segments
            .last()
            .map(|last| last.split('.').next().unwrap_or(*last))
            .filter(|epoch| !epoch.is_empty() && *epoch != *user_id)
            .ok_or_else(|| anyhow::anyhow!("epoch not found in upload URL path"))?;

        Ok(Self {
            workspace_id: workspace_id.to_string(),
            user_id: user_id.to_string(),
            epoch: epoch.to_string(),
            is_machine,
        })
    }
}

fn segment_after<'a>(segments: &[&'a str], key: &str) -> Option<&'a str> {
    segments
        .iter()
        .position(|s| *s == key)
        .and_then(|i| segments.get(i + 1).copied())
}

/// Everything needed to find a submitted scan again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReference {
    pub doc_ref: String,
    pub sort_key: String,
    pub epoch: String,
    pub workspace_id: String,
    pub user_id: String,
    pub is_machine: bool,
}

impl JobReference {
    pub fn new(ids: UploadIds, blob: &[u8], full: bool) -> Self {
        let sort_key = create_sort_string(&ids.user_id, &ids.epoch, full, ids.is_machine);
        Self {
            doc_ref: doc_ref(blob),
            sort_key,
            epoch: ids.epoch,
            workspace_id: ids.workspace_id,
            user_id: ids.user_id,
            is_machine: ids.is_machine,
        }
    }

    /// Link to the hosted result in the web console
    pub fn console_url(&self, console_url: &str) -> String {
        format!(
            "{}/workspaces/{}/analysis/users/{}/result/{}",
            console_url.trim_end_matches('/'),
            self.workspace_id,
            self.user_id,
            self.epoch
        )
    }
}

use serde::{Deserialize, Serialize};

/// Name of the metadata entry appended to every bundle
pub const METADATA_FILE_NAME: &str = "kusari-inspector.json";
/// Name of the patch entry appended to diff bundles
pub const PATCH_FILE_NAME: &str = "kusari-inspector.patch";
/// Name of the compressed bundle inside the working directory
pub const BUNDLE_FILE_NAME: &str = "kusari-inspector.tar.bz2";

/// Kind of repository analysis requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    /// Changes between the working tree and a revision
    Diff,
    /// Whole repository risk check
    Full,
}

impl ScanType {
    pub fn is_full(self) -> bool {
        matches!(self, ScanType::Full)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanType::Diff => "diff",
            ScanType::Full => "full",
        }
    }
}

/// Description of a bundle, embedded in the archive as [`METADATA_FILE_NAME`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_name: Option<String>,
    pub current_branch: String,
    pub dir_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_cmd: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default)]
    pub remote: String,
    pub git_dirty: bool,
    pub scan_type: ScanType,
}

impl BundleMetadata {
    /// Diff command recorded for `rev`; the same arguments produce the patch entry
    pub fn diff_args(rev: &str) -> Vec<String> {
        vec![
            "git".to_string(),
            "diff".to_string(),
            "--binary".to_string(),
            rev.to_string(),
        ]
    }
}

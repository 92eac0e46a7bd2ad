use super::OutputFormat;
use crate::inspection::domain::ScanType;
use std::path::PathBuf;

/// Input of a repository scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub dir: PathBuf,
    /// Revision to diff against; `None` for full scans
    pub rev: Option<String>,
    pub scan_type: ScanType,
    pub output_format: OutputFormat,
    /// Whether to poll for the result after uploading
    pub wait: bool,
}

impl ScanRequest {
    pub fn diff(dir: PathBuf, rev: String, output_format: OutputFormat, wait: bool) -> Self {
        Self {
            dir,
            rev: Some(rev),
            scan_type: ScanType::Diff,
            output_format,
            wait,
        }
    }

    pub fn full(dir: PathBuf, wait: bool) -> Self {
        Self {
            dir,
            rev: None,
            scan_type: ScanType::Full,
            output_format: OutputFormat::Markdown,
            wait,
        }
    }
}

use std::path::PathBuf;

/// Kind of standalone document being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentType {
    #[default]
    Sbom,
    Vex,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Sbom => "sbom",
            DocumentType::Vex => "vex",
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sbom" => Ok(DocumentType::Sbom),
            "vex" => Ok(DocumentType::Vex),
            _ => Err(format!(
                "Invalid document type: {}. Please specify 'sbom' or 'vex'",
                s
            )),
        }
    }
}

/// Input of `platform upload`
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub files: Vec<PathBuf>,
    pub document_type: DocumentType,
    pub tag: Option<String>,
    pub software_id: Option<String>,
    pub check_blocked_packages: bool,
    /// Whether to wait for ingestion to finish
    pub wait: bool,
}

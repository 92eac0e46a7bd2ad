use serde::Deserialize;

/// SBOM formats that can be cross-referenced with the platform's software catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbomFormat {
    CycloneDx,
    Spdx,
}

impl SbomFormat {
    /// Detectors in priority order; the first match wins
    pub const DETECTION_ORDER: [SbomFormat; 2] = [SbomFormat::CycloneDx, SbomFormat::Spdx];

    /// Returns `(subject, uri)` when `document` is an SBOM of this format that
    /// carries both values
    pub fn detect(self, document: &[u8]) -> Option<(String, String)> {
        match self {
            SbomFormat::CycloneDx => {
                let bom: CycloneDxHeader = serde_json::from_slice(document).ok()?;
                if bom.bom_format.as_deref() != Some("CycloneDX") {
                    return None;
                }
                let subject = bom.metadata?.component?.name?;
                let uri = bom.serial_number?;
                non_empty(subject, uri)
            }
            SbomFormat::Spdx => {
                let doc: SpdxHeader = serde_json::from_slice(document).ok()?;
                if doc.spdx_id.as_deref() != Some("SPDXRef-DOCUMENT") {
                    return None;
                }
                non_empty(doc.name?, doc.document_namespace?)
            }
        }
    }
}

fn non_empty(subject: String, uri: String) -> Option<(String, String)> {
    if subject.trim().is_empty() || uri.trim().is_empty() {
        None
    } else {
        Some((subject, uri))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxHeader {
    bom_format: Option<String>,
    serial_number: Option<String>,
    metadata: Option<CycloneDxMetadata>,
}

#[derive(Deserialize)]
struct CycloneDxMetadata {
    component: Option<CycloneDxComponent>,
}

#[derive(Deserialize)]
struct CycloneDxComponent {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxHeader {
    #[serde(rename = "SPDXID")]
    spdx_id: Option<String>,
    name: Option<String>,
    document_namespace: Option<String>,
}

/// Identity of an uploaded SBOM, used later for blocked-package lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomSubjectReference {
    pub subject: String,
    pub uri: String,
    pub doc_ref: String,
    pub format: SbomFormat,
}

impl SbomSubjectReference {
    /// Sniffs `document` with each detector in [`SbomFormat::DETECTION_ORDER`].
    ///
    /// `None` means the document cannot be cross-referenced; that is never an error.
    pub fn detect(document: &[u8], doc_ref: &str) -> Option<Self> {
        SbomFormat::DETECTION_ORDER.iter().find_map(|format| {
            format.detect(document).map(|(subject, uri)| Self {
                subject,
                uri,
                doc_ref: doc_ref.to_string(),
                format: *format,
            })
        })
    }
}

use crate::application::dto::UploadRequest;
use crate::inspection::domain::{doc_ref, SbomSubjectReference};
use crate::ports::outbound::{BlobStore, PresignApi, ProgressReporter};
use crate::shared::security::read_upload_document;
use crate::shared::Result;
use anyhow::Context;
use serde::Serialize;

/// Content type of the document wrapper
pub const DOCUMENT_CONTENT_TYPE: &str = "multipart/form-data";

/// JSON body stored for a standalone document
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentWrapper<'a> {
    raw_document: &'a str,
    document_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    software_id: Option<&'a str>,
}

/// One uploaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub doc_ref: String,
    /// Present when the document is a CycloneDX or SPDX SBOM
    pub subject: Option<SbomSubjectReference>,
}

/// UploadDocumentsUseCase - uploads SBOM/VEX files to a tenant
///
/// Every input is validated before the first upload starts.
pub struct UploadDocumentsUseCase<P, B, PR> {
    presign: P,
    blobs: B,
    progress_reporter: PR,
}

impl<P, B, PR> UploadDocumentsUseCase<P, B, PR>
where
    P: PresignApi,
    B: BlobStore,
    PR: ProgressReporter,
{
    pub fn new(presign: P, blobs: B, progress_reporter: PR) -> Self {
        Self {
            presign,
            blobs,
            progress_reporter,
        }
    }

    pub async fn execute(
        &self,
        tenant: &str,
        request: &UploadRequest,
    ) -> Result<Vec<UploadedDocument>> {
        let mut documents = Vec::with_capacity(request.files.len());
        for path in &request.files {
            let bytes = read_upload_document(path)?;
            let text = String::from_utf8(bytes)
                .with_context(|| format!("{} is not a UTF-8 text document", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            documents.push((name, text));
        }

        let mut uploaded = Vec::with_capacity(documents.len());
        for (name, text) in &documents {
            let wrapper = serde_json::to_vec(&DocumentWrapper {
                raw_document: text,
                document_type: request.document_type.as_str(),
                tag: request.tag.as_deref(),
                software_id: request.software_id.as_deref(),
            })?;
            let doc_ref = doc_ref(&wrapper);

            let url = self.presign.presign_document(tenant, name).await?;
            self.blobs
                .put_blob(&url, wrapper, DOCUMENT_CONTENT_TYPE)
                .await
                .with_context(|| format!("Failed to upload {}", name))?;
            self.progress_reporter
                .report(&format!("⬆️  Uploaded {}", name));

            let subject = SbomSubjectReference::detect(text.as_bytes(), &doc_ref);
            if subject.is_none() {
                tracing::debug!(document = %name, "no SBOM subject found");
            }
            uploaded.push(UploadedDocument {
                name: name.clone(),
                doc_ref,
                subject,
            });
        }
        Ok(uploaded)
    }
}

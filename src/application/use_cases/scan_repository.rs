use super::build_bundle::Bundle;
use super::result_poller::ResultPoller;
use crate::inspection::domain::{JobReference, ScanResultRow, UploadIds, BUNDLE_FILE_NAME};
use crate::ports::outbound::{
    BlobStore, BundlePresignRequest, PresignApi, ProgressReporter, ScanStatusSource,
};
use crate::shared::Result;
use anyhow::Context;

/// Content type of repository bundles
pub const BUNDLE_CONTENT_TYPE: &str = "application/x-bzip2";

/// What a submitted scan produced
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub job: JobReference,
    /// Link to the hosted result in the web console
    pub console_link: String,
    /// The finished result, `None` when not waiting
    pub result: Option<ScanResultRow>,
}

/// ScanRepositoryUseCase - submits a bundle and optionally waits for the analysis
///
/// Steps run strictly in order: presign, upload, then poll.
pub struct ScanRepositoryUseCase<P, B, S, PR> {
    presign: P,
    blobs: B,
    poller: ResultPoller<S, PR>,
    progress_reporter: PR,
    console_url: String,
}

impl<P, B, S, PR> ScanRepositoryUseCase<P, B, S, PR>
where
    P: PresignApi,
    B: BlobStore,
    S: ScanStatusSource,
    PR: ProgressReporter,
{
    pub fn new(
        presign: P,
        blobs: B,
        poller: ResultPoller<S, PR>,
        progress_reporter: PR,
        console_url: &str,
    ) -> Self {
        Self {
            presign,
            blobs,
            poller,
            progress_reporter,
            console_url: console_url.to_string(),
        }
    }

    pub async fn execute(&self, bundle: &Bundle, wait: bool) -> Result<ScanOutcome> {
        let scan_type = bundle.metadata.scan_type;
        let url = self
            .presign
            .presign_bundle(&BundlePresignRequest {
                filename: BUNDLE_FILE_NAME.to_string(),
                scan_type,
                size: bundle.size,
            })
            .await?;

        let blob = std::fs::read(&bundle.path)
            .with_context(|| format!("Failed to read {}", bundle.path.display()))?;
        let ids = UploadIds::from_url(&url)?;
        let job = JobReference::new(ids, &blob, scan_type.is_full());

        self.progress_reporter
            .report("⬆️  Uploading bundle for analysis...");
        self.blobs.put_blob(&url, blob, BUNDLE_CONTENT_TYPE).await?;
        tracing::debug!(doc_ref = %job.doc_ref, sort_key = %job.sort_key, "bundle uploaded");

        let console_link = job.console_url(&self.console_url);
        if !wait {
            self.progress_reporter.report_completion(&format!(
                "✅ Submitted. Results will be available at {}",
                console_link
            ));
            return Ok(ScanOutcome {
                job,
                console_link,
                result: None,
            });
        }

        let row = self.poller.poll(&job.sort_key, &console_link).await?;
        self.progress_reporter
            .report(&format!("🔗 View the full result at {}", console_link));
        Ok(ScanOutcome {
            job,
            console_link,
            result: Some(row),
        })
    }
}

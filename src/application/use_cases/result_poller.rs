use crate::inspection::domain::{IngestionRecord, IngestionStatus, ScanResultRow, ScanStatus};
use crate::ports::outbound::{IngestionStatusSource, ProgressReporter, ScanStatusSource};
use crate::shared::error::PollError;
use crate::shared::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Duration;
use tokio::time::Instant;

/// Ceiling on documents polled at the same time
pub const MAX_CONCURRENT_POLLS: usize = 5;

/// Wall-clock bound on a batch of document polls
pub const BATCH_DEADLINE: Duration = Duration::from_secs(15 * 60);

/// Pacing of the single-scan poll loop
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    /// Ten-second interval for up to 15 minutes
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 90,
        }
    }
}

/// ResultPoller - waits for a repository scan to reach a terminal state
pub struct ResultPoller<S, PR> {
    source: S,
    progress_reporter: PR,
    settings: PollSettings,
}

impl<S, PR> ResultPoller<S, PR>
where
    S: ScanStatusSource,
    PR: ProgressReporter,
{
    pub fn new(source: S, progress_reporter: PR, settings: PollSettings) -> Self {
        Self {
            source,
            progress_reporter,
            settings,
        }
    }

    /// Polls `sort_key` until success, failure, or the attempt budget runs out.
    ///
    /// Progress is only reported when the observed status changes. A timeout
    /// carries `check_url` so the user can look the result up later.
    pub async fn poll(&self, sort_key: &str, check_url: &str) -> Result<ScanResultRow> {
        let mut last_status: Option<ScanStatus> = None;

        for attempt in 1..=self.settings.max_attempts {
            let latest = self
                .source
                .fetch_scan_results(sort_key)
                .await?
                .and_then(ScanResultRow::latest);

            if let Some(row) = latest {
                if last_status != Some(row.status) {
                    last_status = Some(row.status);
                    self.progress_reporter
                        .report_status(row.status.description());
                }
                match row.status {
                    ScanStatus::Success => {
                        self.progress_reporter
                            .report_completion("✅ Analysis complete");
                        return Ok(row);
                    }
                    ScanStatus::Failed => {
                        self.progress_reporter.report_error("❌ Analysis failed");
                        return Err(PollError::Failed {
                            message: row.status_meta,
                        }
                        .into());
                    }
                    ScanStatus::Queued | ScanStatus::Processing => {}
                }
            }

            tracing::debug!(attempt, ?last_status, "scan not finished");
            if attempt < self.settings.max_attempts {
                tokio::time::sleep(self.settings.interval).await;
            }
        }

        self.progress_reporter
            .report_error("⏱️  Stopped waiting for the analysis");
        Err(PollError::TimedOut {
            attempts: self.settings.max_attempts,
            check_url: check_url.to_string(),
        }
        .into())
    }
}

/// A document whose ingestion is being awaited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedDocument {
    pub name: String,
    pub doc_ref: String,
}

/// Final state of one document in a batch, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionOutcome {
    pub index: usize,
    pub name: String,
    pub doc_ref: String,
    pub record: IngestionRecord,
    /// The batch deadline passed before a terminal status was seen
    pub timed_out: bool,
}

impl IngestionOutcome {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.record.status == IngestionStatus::Success
    }
}

/// IngestionPoller - follows several uploaded documents at once
///
/// At most [`MAX_CONCURRENT_POLLS`] documents are polled concurrently. A
/// document that fails ingestion or runs out of time is recorded in its
/// outcome; a transport error aborts the whole batch.
pub struct IngestionPoller<I, PR> {
    source: I,
    progress_reporter: PR,
    interval: Duration,
    deadline: Duration,
}

impl<I, PR> IngestionPoller<I, PR>
where
    I: IngestionStatusSource,
    PR: ProgressReporter,
{
    pub fn new(source: I, progress_reporter: PR) -> Self {
        Self {
            source,
            progress_reporter,
            interval: Duration::from_secs(2),
            deadline: BATCH_DEADLINE,
        }
    }

    pub fn with_timing(mut self, interval: Duration, deadline: Duration) -> Self {
        self.interval = interval;
        self.deadline = deadline;
        self
    }

    pub async fn wait_all(
        &self,
        tenant: &str,
        documents: &[TrackedDocument],
    ) -> Result<Vec<IngestionOutcome>> {
        let deadline = Instant::now() + self.deadline;

        let mut outcomes: Vec<IngestionOutcome> = stream::iter(documents.iter().enumerate())
            .map(|(index, document)| self.poll_document(tenant, index, document, deadline))
            .buffer_unordered(MAX_CONCURRENT_POLLS)
            .try_collect()
            .await?;

        outcomes.sort_by_key(|outcome| outcome.index);
        Ok(outcomes)
    }

    async fn poll_document(
        &self,
        tenant: &str,
        index: usize,
        document: &TrackedDocument,
        deadline: Instant,
    ) -> Result<IngestionOutcome> {
        let mut record = IngestionRecord::started();

        loop {
            if let Some(observed) = self
                .source
                .fetch_ingestion_status(tenant, &document.doc_ref)
                .await?
            {
                if record.observe(observed.status, observed.message) {
                    self.progress_reporter
                        .report(&format!("   {}: {}", document.name, record.status));
                }
            }

            let timed_out =
                !record.status.is_terminal() && Instant::now() + self.interval > deadline;
            if record.status.is_terminal() || timed_out {
                return Ok(IngestionOutcome {
                    index,
                    name: document.name.clone(),
                    doc_ref: document.doc_ref.clone(),
                    record,
                    timed_out,
                });
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

use super::result_poller::{BATCH_DEADLINE, MAX_CONCURRENT_POLLS};
use crate::inspection::domain::SbomSubjectReference;
use crate::ports::outbound::{BlockedCheck, ProgressReporter, SoftwareCatalog, SoftwareLookup};
use crate::shared::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::time::Duration;
use tokio::time::Instant;

/// An uploaded SBOM to check against the blocklist
#[derive(Debug, Clone)]
pub struct CheckedDocument {
    pub name: String,
    pub subject: SbomSubjectReference,
}

/// Verdict for one document, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDocumentResult {
    pub index: usize,
    pub name: String,
    pub check: BlockedCheck,
}

/// Aggregate over every checked document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedReport {
    /// True when any document is blocked
    pub blocked: bool,
    pub documents: Vec<BlockedDocumentResult>,
}

impl BlockedReport {
    pub fn from_results(mut documents: Vec<BlockedDocumentResult>) -> Self {
        documents.sort_by_key(|d| d.index);
        Self {
            blocked: documents.iter().any(|d| d.check.blocked),
            documents,
        }
    }

    /// Blocked documents with their offending packages
    pub fn offending(&self) -> impl Iterator<Item = &BlockedDocumentResult> {
        self.documents.iter().filter(|d| d.check.blocked)
    }
}

/// BlockedPackageChecker - resolves catalog ids for ingested SBOMs and checks
/// them against the tenant's blocked-package list
pub struct BlockedPackageChecker<C, PR> {
    catalog: C,
    progress_reporter: PR,
    interval: Duration,
    deadline: Duration,
}

impl<C, PR> BlockedPackageChecker<C, PR>
where
    C: SoftwareCatalog,
    PR: ProgressReporter,
{
    pub fn new(catalog: C, progress_reporter: PR) -> Self {
        Self {
            catalog,
            progress_reporter,
            interval: Duration::from_secs(1),
            deadline: BATCH_DEADLINE,
        }
    }

    pub fn with_timing(mut self, interval: Duration, deadline: Duration) -> Self {
        self.interval = interval;
        self.deadline = deadline;
        self
    }

    pub async fn execute(&self, documents: &[CheckedDocument]) -> Result<BlockedReport> {
        let deadline = Instant::now() + self.deadline;
        self.progress_reporter.report(&format!(
            "🔒 Checking {} document(s) for blocked packages",
            documents.len()
        ));

        let results: Vec<BlockedDocumentResult> = stream::iter(documents.iter().enumerate())
            .map(|(index, document)| self.check_document(index, document, deadline))
            .buffer_unordered(MAX_CONCURRENT_POLLS)
            .try_collect()
            .await?;

        Ok(BlockedReport::from_results(results))
    }

    async fn check_document(
        &self,
        index: usize,
        document: &CheckedDocument,
        deadline: Instant,
    ) -> Result<BlockedDocumentResult> {
        let subject = &document.subject;
        let ids = loop {
            match self
                .catalog
                .lookup_software_ids(&subject.subject, &subject.uri)
                .await?
            {
                SoftwareLookup::Ready(ids) => break ids,
                SoftwareLookup::NotFound if Instant::now() + self.interval <= deadline => {
                    tracing::debug!(document = %document.name, "not ingested yet");
                    tokio::time::sleep(self.interval).await;
                }
                SoftwareLookup::NotFound => anyhow::bail!(
                    "Timed out waiting for {} to be ingested before the blocked package check",
                    document.name
                ),
            }
        };

        let check = self.catalog.check_blocked_packages(&ids).await?;
        tracing::debug!(document = %document.name, blocked = check.blocked, "blocked package check done");
        Ok(BlockedDocumentResult {
            index,
            name: document.name.clone(),
            check,
        })
    }
}

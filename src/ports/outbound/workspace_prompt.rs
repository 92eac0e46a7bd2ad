use crate::inspection::domain::WorkspaceCandidate;
use crate::shared::Result;
use async_trait::async_trait;

/// WorkspacePrompt port for letting the user pick a workspace
///
/// Waiting for the answer must not hold up the async runtime.
#[async_trait]
pub trait WorkspacePrompt: Send + Sync {
    /// Returns the index into `candidates` the user chose
    ///
    /// # Errors
    /// Returns an error if input ends before a valid choice was made
    async fn choose(&self, candidates: &[WorkspaceCandidate]) -> Result<usize>;
}

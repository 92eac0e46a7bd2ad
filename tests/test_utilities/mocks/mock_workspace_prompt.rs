use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock WorkspacePrompt answering with a fixed index
#[derive(Clone)]
pub struct MockWorkspacePrompt {
    answer: usize,
    calls: Arc<AtomicUsize>,
}

impl MockWorkspacePrompt {
    pub fn answering(answer: usize) -> Self {
        Self {
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkspacePrompt for MockWorkspacePrompt {
    async fn choose(&self, _candidates: &[WorkspaceCandidate]) -> Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

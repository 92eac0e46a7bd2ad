use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock UserDirectory returning a fixed user-info body
#[derive(Clone)]
pub struct MockUserDirectory {
    body: String,
    calls: Arc<AtomicUsize>,
}

impl MockUserDirectory {
    /// `body` is the JSON the platform would return for `GET /user`
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn fetch_user_info(&self) -> Result<UserInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_str(&self.body)?)
    }
}

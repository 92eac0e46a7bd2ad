use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::sync::{Arc, Mutex};

/// One recorded PUT
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub url: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Mock BlobStore recording uploads in memory
#[derive(Default, Clone)]
pub struct MockBlobStore {
    puts: Arc<Mutex<Vec<PutRecord>>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put_blob(&self, url: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        self.puts.lock().unwrap().push(PutRecord {
            url: url.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

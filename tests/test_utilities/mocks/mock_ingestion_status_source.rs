use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock IngestionStatusSource answering with a fixed record per docRef
///
/// Unknown documents read as "not known yet".
#[derive(Default, Clone)]
pub struct MockIngestionStatusSource {
    records: HashMap<String, IngestionRecord>,
    failing: Option<String>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockIngestionStatusSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, doc_ref: &str, status: IngestionStatus, message: &str) -> Self {
        self.records.insert(
            doc_ref.to_string(),
            IngestionRecord {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    /// Requests for `doc_ref` fail at the transport level
    pub fn with_transport_error(mut self, doc_ref: &str) -> Self {
        self.failing = Some(doc_ref.to_string());
        self
    }

    /// (tenant, docRef) pairs in request order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl IngestionStatusSource for MockIngestionStatusSource {
    async fn fetch_ingestion_status(
        &self,
        tenant: &str,
        doc_ref: &str,
    ) -> Result<Option<IngestionRecord>> {
        self.requests
            .lock()
            .unwrap()
            .push((tenant.to_string(), doc_ref.to_string()));
        if self.failing.as_deref() == Some(doc_ref) {
            anyhow::bail!("connection reset");
        }
        Ok(self.records.get(doc_ref).cloned())
    }
}

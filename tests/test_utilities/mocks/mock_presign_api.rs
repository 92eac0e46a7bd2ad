use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock PresignApi handing out fixed URLs and recording requests
#[derive(Clone)]
pub struct MockPresignApi {
    url: String,
    bundle_requests: Arc<Mutex<Vec<BundlePresignRequest>>>,
    document_requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockPresignApi {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            bundle_requests: Arc::default(),
            document_requests: Arc::default(),
        }
    }

    pub fn bundle_requests(&self) -> Vec<BundlePresignRequest> {
        self.bundle_requests.lock().unwrap().clone()
    }

    /// (tenant, filename) pairs
    pub fn document_requests(&self) -> Vec<(String, String)> {
        self.document_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PresignApi for MockPresignApi {
    async fn presign_bundle(&self, request: &BundlePresignRequest) -> Result<String> {
        self.bundle_requests.lock().unwrap().push(request.clone());
        Ok(self.url.clone())
    }

    async fn presign_document(&self, tenant: &str, filename: &str) -> Result<String> {
        self.document_requests
            .lock()
            .unwrap()
            .push((tenant.to_string(), filename.to_string()));
        Ok(format!("{}/{}", self.url, filename))
    }
}

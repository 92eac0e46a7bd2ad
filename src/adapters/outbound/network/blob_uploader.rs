use super::http::check_upload_status;
use crate::ports::outbound::BlobStore;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// HttpBlobStore adapter PUTting bytes to presigned storage URLs
///
/// The presigned URL already carries its credentials, so no bearer token is
/// attached.
pub struct HttpBlobStore {
    client: Client,
}

impl HttpBlobStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put_blob(&self, url: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        if body.is_empty() {
            tracing::debug!("skipping upload of empty blob");
            return Ok(());
        }

        tracing::debug!(size = body.len(), content_type, "uploading blob");
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        check_upload_status(status, &text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_body_is_noop() {
        // Unroutable URL: any real request would fail
        let store = HttpBlobStore::new(Client::new());
        store
            .put_blob("http://127.0.0.1:9/never", Vec::new(), "application/x-bzip2")
            .await
            .unwrap();
    }
}

use crate::shared::error::UploadError;
use crate::shared::Result;
use reqwest::StatusCode;
use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 60;

/// Builds the shared async HTTP client with the CLI's user agent
pub fn build_client() -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("kusari-cli/{}", version);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Maps an upload or presign answer onto the status-code policy:
/// 200/204 succeed, 401/403/400 get dedicated errors, anything else is unexpected
pub fn check_upload_status(status: StatusCode, body: &str) -> std::result::Result<(), UploadError> {
    match status {
        StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
        StatusCode::UNAUTHORIZED => Err(UploadError::Unauthorized),
        StatusCode::FORBIDDEN => Err(UploadError::Forbidden),
        StatusCode::BAD_REQUEST => Err(UploadError::BadRequest {
            body: body.trim().to_string(),
        }),
        other => Err(UploadError::UnexpectedStatus {
            status: other.as_u16(),
            body: body.trim().to_string(),
        }),
    }
}

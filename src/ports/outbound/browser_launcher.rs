use crate::shared::Result;

/// BrowserLauncher port for opening the authorization page
///
/// Failure is not fatal to a login: callers print the URL as a fallback.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

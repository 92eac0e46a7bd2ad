use crate::ports::outbound::BrowserLauncher;
use crate::shared::Result;

/// SystemBrowser adapter opening URLs with the platform's default handler
pub struct SystemBrowser;

impl SystemBrowser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        open::that(url).map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))
    }
}

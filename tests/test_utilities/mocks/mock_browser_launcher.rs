use kusari_cli::prelude::*;
use reqwest::Url;
use std::sync::{Arc, Mutex};

/// What the simulated user does once the authorize page opens
#[derive(Clone)]
enum Visit {
    /// Nothing; the login has to time out
    Nothing,
    /// Completes the login, redirecting back with `code` and the given state
    Redirect { code: String, state: Option<String> },
}

/// Mock BrowserLauncher that records URLs and can play the authorization server
#[derive(Clone)]
pub struct MockBrowserLauncher {
    visit: Visit,
    opened: Arc<Mutex<Vec<String>>>,
}

impl MockBrowserLauncher {
    pub fn idle() -> Self {
        Self {
            visit: Visit::Nothing,
            opened: Arc::default(),
        }
    }

    /// Redirects back with `code` and the state from the authorize URL
    pub fn approving(code: &str) -> Self {
        Self {
            visit: Visit::Redirect {
                code: code.to_string(),
                state: None,
            },
            opened: Arc::default(),
        }
    }

    /// Redirects back with `code` but a forged state
    pub fn forging_state(code: &str, state: &str) -> Self {
        Self {
            visit: Visit::Redirect {
                code: code.to_string(),
                state: Some(state.to_string()),
            },
            opened: Arc::default(),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl BrowserLauncher for MockBrowserLauncher {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());

        let Visit::Redirect { code, state } = self.visit.clone() else {
            return Ok(());
        };
        let authorize = Url::parse(url)?;
        let param = |name: &str| {
            authorize
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };
        let state = state.or_else(|| param("state")).unwrap_or_default();
        let redirect_uri = param("redirect_uri").unwrap_or_default();
        let callback = Url::parse_with_params(&redirect_uri, &[("code", code), ("state", state)])?;

        tokio::spawn(async move {
            let _ = reqwest::get(callback).await;
        });
        Ok(())
    }
}

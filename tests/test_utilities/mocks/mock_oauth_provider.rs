use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock OAuthProvider issuing fixed tokens and recording exchanges
#[derive(Default, Clone)]
pub struct MockOAuthProvider {
    client_secret: Option<String>,
    exchanges: Arc<Mutex<Vec<(String, String)>>>,
    client_credential_calls: Arc<AtomicUsize>,
}

impl MockOAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_secret(mut self, secret: &str) -> Self {
        self.client_secret = Some(secret.to_string());
        self
    }

    /// (code, verifier) pairs passed to `exchange_code`
    pub fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn client_credential_calls(&self) -> usize {
        self.client_credential_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    fn authorize_url(&self, pkce: &PkceChallenge, redirect_uri: &str) -> Result<String> {
        Ok(format!(
            "https://auth.example/oauth2/authorize?state={}&code_challenge={}&redirect_uri={}",
            pkce.state,
            pkce.challenge,
            urlencoding::encode(redirect_uri)
        ))
    }

    async fn exchange_code(&self, code: &str, verifier: &str, _redirect_uri: &str) -> Result<Token> {
        self.exchanges
            .lock()
            .unwrap()
            .push((code.to_string(), verifier.to_string()));
        Ok(Token::new(format!("access-for-{code}"), None, None))
    }

    async fn client_credentials(&self) -> Result<Token> {
        self.client_credential_calls.fetch_add(1, Ordering::SeqCst);
        match &self.client_secret {
            Some(_) => Ok(Token::new("machine-token".to_string(), None, None)),
            None => Err(AuthError::AuthFlow("no client secret configured".to_string()).into()),
        }
    }
}

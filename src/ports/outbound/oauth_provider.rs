use crate::inspection::domain::{PkceChallenge, Token};
use crate::shared::Result;
use async_trait::async_trait;

/// OAuthProvider port for the authorization server
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Authorize URL carrying `state` and the S256 challenge of `pkce`
    fn authorize_url(&self, pkce: &PkceChallenge, redirect_uri: &str) -> Result<String>;

    /// Exchanges an authorization code, proving possession with the PKCE verifier
    async fn exchange_code(&self, code: &str, verifier: &str, redirect_uri: &str)
        -> Result<Token>;

    /// Non-interactive login with the configured client secret
    async fn client_credentials(&self) -> Result<Token>;
}

use crate::inspection::domain::{PkceChallenge, Token};
use crate::ports::outbound::OAuthProvider;
use crate::shared::error::AuthError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

const SCOPES: &str = "openid profile email";

/// OAuthClient adapter for the platform's authorization server
///
/// Implements the authorization-code grant with PKCE for interactive logins
/// and the client-credentials grant for CI logins.
pub struct OAuthClient {
    client: Client,
    auth_endpoint: String,
    client_id: String,
    client_secret: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl OAuthClient {
    pub fn new(
        client: Client,
        auth_endpoint: &str,
        client_id: &str,
        client_secret: Option<&str>,
    ) -> Self {
        Self {
            client,
            auth_endpoint: auth_endpoint.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.map(str::to_string),
        }
    }

    fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.auth_endpoint)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Token> {
        let response = self
            .client
            .post(self.token_url())
            .form(form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::AuthFlow(format!(
                "token endpoint returned {}: {}",
                status,
                body.trim()
            ))
            .into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidToken(format!("unreadable token response: {}", e)))?;
        if token.access_token.is_empty() {
            return Err(AuthError::InvalidToken("token response has no access token".into()).into());
        }

        Ok(Token::from_lifetime(
            token.access_token,
            token.refresh_token,
            token.expires_in,
            Utc::now(),
        )?)
    }
}

#[async_trait]
impl OAuthProvider for OAuthClient {
    fn authorize_url(&self, pkce: &PkceChallenge, redirect_uri: &str) -> Result<String> {
        let base = format!("{}/oauth2/authorize", self.auth_endpoint);
        let url = Url::parse_with_params(
            &base,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("scope", SCOPES),
                ("state", pkce.state.as_str()),
                ("code_challenge", pkce.challenge.as_str()),
                ("code_challenge_method", PkceChallenge::METHOD),
            ],
        )
        .map_err(|e| anyhow::anyhow!("Invalid auth endpoint '{}': {}", self.auth_endpoint, e))?;
        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) -> Result<Token> {
        tracing::debug!("exchanging authorization code");
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        self.request_token(&form).await
    }

    async fn client_credentials(&self) -> Result<Token> {
        let secret = self.client_secret.as_deref().ok_or_else(|| {
            AuthError::AuthFlow("client credentials login needs a client secret".into())
        })?;
        tracing::debug!(client_id = %self.client_id, "requesting client credentials token");
        self.request_token(&[
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", secret),
            ("scope", SCOPES),
        ])
        .await
    }
}

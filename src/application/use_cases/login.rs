use crate::inspection::domain::{PkceChallenge, Token, DEFAULT_PROVIDER};
use crate::ports::outbound::{
    BrowserLauncher, CallbackServer, CredentialStore, OAuthProvider, ProgressReporter,
    WorkspaceStore,
};
use crate::shared::error::AuthError;
use crate::shared::Result;
use chrono::Utc;
use std::time::Duration;

/// Default bound on how long the browser login may take
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// LoginUseCase - establishes and reuses platform sessions
///
/// Runs the browser-based authorization-code flow with PKCE, the
/// client-credentials flow for CI, and hands stored tokens to the other
/// commands after checking their expiry.
///
/// # Type Parameters
/// * `O` - OAuthProvider implementation
/// * `CS` - CallbackServer implementation
/// * `C` - CredentialStore implementation
/// * `B` - BrowserLauncher implementation
/// * `PR` - ProgressReporter implementation
pub struct LoginUseCase<O, CS, C, B, PR> {
    oauth: O,
    callback_server: CS,
    credentials: C,
    browser: B,
    progress_reporter: PR,
    timeout: Duration,
}

impl<O, CS, C, B, PR> LoginUseCase<O, CS, C, B, PR>
where
    O: OAuthProvider,
    CS: CallbackServer,
    C: CredentialStore,
    B: BrowserLauncher,
    PR: ProgressReporter,
{
    pub fn new(
        oauth: O,
        callback_server: CS,
        credentials: C,
        browser: B,
        progress_reporter: PR,
    ) -> Self {
        Self {
            oauth,
            callback_server,
            credentials,
            browser,
            progress_reporter,
            timeout: DEFAULT_LOGIN_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Interactive login: browser, local redirect, code exchange, persist
    pub async fn login(&self) -> Result<Token> {
        let pkce = PkceChallenge::generate();
        let session = self.callback_server.start(pkce.state.clone()).await?;
        let authorize_url = self.oauth.authorize_url(&pkce, &session.redirect_uri)?;

        self.progress_reporter
            .report("🌐 Opening your browser to log in...");
        if let Err(e) = self.browser.open(&authorize_url) {
            tracing::debug!("could not open browser: {e:#}");
        }
        self.progress_reporter.report(&format!(
            "   If the browser did not open, visit:\n   {}",
            authorize_url
        ));
        self.progress_reporter
            .report_status("Waiting for the login to complete in the browser...");

        let code = match tokio::time::timeout(self.timeout, session.code).await {
            Ok(outcome) => outcome?,
            Err(_) => {
                return Err(AuthError::AuthFlow(format!(
                    "no login completed within {} seconds",
                    self.timeout.as_secs()
                ))
                .into())
            }
        };

        let token = self
            .oauth
            .exchange_code(&code, &pkce.verifier, &session.redirect_uri)
            .await?;
        self.credentials.save_token(&token, DEFAULT_PROVIDER)?;
        self.progress_reporter.report_completion("✅ Logged in");
        Ok(token)
    }

    /// Non-interactive login with the configured client secret
    pub async fn login_non_interactive(&self) -> Result<Token> {
        let token = self.oauth.client_credentials().await?;
        self.credentials.save_token(&token, DEFAULT_PROVIDER)?;
        tracing::debug!("client credentials token stored");
        Ok(token)
    }

    /// Returns a usable token for a command.
    ///
    /// A stored token that has not expired is reused. Otherwise sessions with a
    /// client secret log in again without interaction; all others fail and
    /// point the user to `kusari auth login`.
    pub async fn acquire_token(&self, non_interactive: bool) -> Result<Token> {
        let failure: anyhow::Error = match self.credentials.load_token(DEFAULT_PROVIDER) {
            Ok(Some(token)) => match token.check_expiry(Utc::now()) {
                Ok(()) => return Ok(token),
                Err(e) => e.into(),
            },
            Ok(None) => AuthError::InvalidToken("no stored session".to_string()).into(),
            Err(e) => e,
        };

        if non_interactive {
            tracing::debug!("stored token unusable ({failure}), using client credentials");
            return self.login_non_interactive().await;
        }
        Err(failure)
    }
}

/// LogoutUseCase - forgets the session and the workspace selection
pub struct LogoutUseCase<C, W> {
    credentials: C,
    workspaces: W,
}

impl<C: CredentialStore, W: WorkspaceStore> LogoutUseCase<C, W> {
    pub fn new(credentials: C, workspaces: W) -> Self {
        Self {
            credentials,
            workspaces,
        }
    }

    pub fn execute(&self) -> Result<()> {
        self.credentials.clear_tokens()?;
        self.workspaces.clear_workspace()
    }
}

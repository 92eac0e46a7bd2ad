use crate::inspection::domain::Token;
use crate::shared::Result;

/// CredentialStore port for persisting bearer tokens
///
/// Tokens are kept per provider name; one token per provider.
pub trait CredentialStore: Send + Sync {
    /// Stores `token` under `provider`, replacing any previous token for it
    ///
    /// # Errors
    /// Returns `AuthError::TokenStorage` if the store cannot be read or written
    fn save_token(&self, token: &Token, provider: &str) -> Result<()>;

    /// Loads the token stored for `provider`, `None` if there is none
    ///
    /// # Errors
    /// Returns `AuthError::TokenStorage` on I/O failure and
    /// `AuthError::InvalidToken` if the store cannot be parsed
    fn load_token(&self, provider: &str) -> Result<Option<Token>>;

    /// Removes every stored token
    fn clear_tokens(&self) -> Result<()>;
}

use crate::shared::error::AuthError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Provider key under which the platform token is stored
pub const DEFAULT_PROVIDER: &str = "kusari";

/// OAuth2 bearer token as persisted in the credential store
///
/// `expiry` of `None` means the provider did not report a lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token,
            token_type: default_token_type(),
            refresh_token,
            expiry,
        }
    }

    /// Builds a token from an `expires_in` lifetime in seconds relative to `now`.
    ///
    /// A lifetime that does not land on a representable instant is rejected
    /// with [`AuthError::InvalidToken`].
    pub fn from_lifetime(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        let expiry = match expires_in {
            Some(secs) => Some(
                TimeDelta::try_seconds(secs)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        AuthError::InvalidToken(format!(
                            "expires_in of {secs} seconds is out of range"
                        ))
                    })?,
            ),
            None => None,
        };
        Ok(Self::new(access_token, refresh_token, expiry))
    }

    /// Fails with [`AuthError::TokenExpired`] once `now` has reached the expiry.
    ///
    /// There is no refresh flow: an expired token is a hard error.
    pub fn check_expiry(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.access_token.is_empty() {
            return Err(AuthError::InvalidToken("access token is empty".to_string()));
        }
        match self.expiry {
            Some(expiry) if expiry <= now => Err(AuthError::TokenExpired),
            _ => Ok(()),
        }
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

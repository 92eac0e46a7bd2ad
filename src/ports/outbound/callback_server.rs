use crate::shared::error::AuthError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;

/// A running redirect endpoint for one login attempt
pub struct CallbackSession {
    /// URI the authorization server must redirect to
    pub redirect_uri: String,
    /// Resolves once with the authorization code or the flow error.
    /// Dropping it stops the endpoint.
    pub code: BoxFuture<'static, std::result::Result<String, AuthError>>,
}

/// CallbackServer port for receiving the OAuth redirect
#[async_trait]
pub trait CallbackServer: Send + Sync {
    /// Starts an endpoint that accepts exactly one callback carrying `expected_state`
    async fn start(&self, expected_state: String) -> Result<CallbackSession>;
}

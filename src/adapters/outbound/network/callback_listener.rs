use crate::ports::outbound::{CallbackServer, CallbackSession};
use crate::shared::error::AuthError;
use crate::shared::Result;
use async_trait::async_trait;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use futures::FutureExt;
use rand::rngs::OsRng;
use rand::RngCore;
use reqwest::Url;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;

/// Ports registered as redirect targets with the authorization server
pub const REDIRECT_PORTS: [u16; 5] = [8009, 8010, 8011, 8012, 8013];
pub const FALLBACK_REDIRECT_PORT: u16 = REDIRECT_PORTS[0];

const CALLBACK_PATH: &str = "/callback";

const SUCCESS_PAGE: &str = "<!DOCTYPE html><html><head><title>Kusari login</title></head>\
<body><h1>Login successful</h1><p>You can close this window and return to the terminal.</p></body></html>";

/// Picks a redirect port with the OS random source, falling back to a fixed
/// port when randomness is unavailable
pub fn draw_redirect_port() -> u16 {
    let mut byte = [0u8; 1];
    match OsRng.try_fill_bytes(&mut byte) {
        Ok(()) => REDIRECT_PORTS[byte[0] as usize % REDIRECT_PORTS.len()],
        Err(e) => {
            tracing::debug!("random port draw failed, using fallback: {e}");
            FALLBACK_REDIRECT_PORT
        }
    }
}

/// Validates the query string of an OAuth redirect.
///
/// Checked in order: a provider `error`, a `state` that does not match exactly,
/// a missing `code`. Returns the authorization code.
pub fn validate_callback(query: &str, expected_state: &str) -> std::result::Result<String, AuthError> {
    let mut error = None;
    let mut error_description = None;
    let mut state = None;
    let mut code = None;
    let url = Url::parse(&format!("http://localhost/?{query}"))
        .map_err(|e| AuthError::AuthFlow(format!("malformed callback: {e}")))?;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => error = Some(value.into_owned()),
            "error_description" => error_description = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "code" => code = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        let detail = match error_description {
            Some(description) => format!("{error}: {description}"),
            None => error,
        };
        return Err(AuthError::AuthFlow(format!("provider returned an error: {detail}")));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::AuthFlow(
            "state mismatch in callback, possible CSRF attempt".to_string(),
        ));
    }
    match code {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err(AuthError::AuthFlow("callback carried no authorization code".to_string())),
    }
}

/// One-shot local HTTP endpoint receiving the OAuth redirect
pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

/// Handle to a spawned listener; dropping it stops the listener task
pub struct PendingCallback {
    receiver: oneshot::Receiver<std::result::Result<String, AuthError>>,
    task: JoinHandle<()>,
}

impl PendingCallback {
    /// Waits for the single callback outcome
    pub async fn code(mut self) -> std::result::Result<String, AuthError> {
        match (&mut self.receiver).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AuthError::AuthFlow(
                "callback listener stopped before a redirect arrived".to_string(),
            )),
        }
    }
}

impl Drop for PendingCallback {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Shared between the callback handler and the serving task
#[derive(Clone)]
struct CallbackState {
    expected_state: Arc<str>,
    outcome: Arc<Mutex<Option<oneshot::Sender<std::result::Result<String, AuthError>>>>>,
    shutdown: Arc<Notify>,
}

impl CallbackState {
    /// Delivers the first outcome and asks the server to stop; later calls are no-ops
    fn settle(&self, outcome: std::result::Result<String, AuthError>) {
        let sender = match self.outcome.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(outcome);
            self.shutdown.notify_one();
        }
    }
}

impl CallbackListener {
    /// Binds the loopback interface; port 0 lets the OS choose
    pub async fn bind(port: u16) -> Result<Self> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            AuthError::AuthFlow(format!("cannot listen on localhost:{port}: {e}"))
        })?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}{}", self.port, CALLBACK_PATH)
    }

    /// Serves requests until one hits the callback path, then hands its
    /// outcome to the returned handle and shuts the server down
    pub fn spawn(self, expected_state: String) -> PendingCallback {
        let (sender, receiver) = oneshot::channel();
        let state = CallbackState {
            expected_state: Arc::from(expected_state),
            outcome: Arc::new(Mutex::new(Some(sender))),
            shutdown: Arc::new(Notify::new()),
        };
        let shutdown = Arc::clone(&state.shutdown);
        let app = Router::new()
            .route(CALLBACK_PATH, get(handle_callback))
            .with_state(state);

        let task = tokio::spawn(async move {
            let result = axum::serve(self.listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await;
            if let Err(e) = result {
                tracing::debug!("callback listener failed: {e}");
            }
        });
        PendingCallback { receiver, task }
    }
}

async fn handle_callback(
    State(state): State<CallbackState>,
    RawQuery(query): RawQuery,
) -> (StatusCode, Html<String>) {
    let outcome = validate_callback(query.as_deref().unwrap_or_default(), &state.expected_state);
    let response = match &outcome {
        Ok(_) => (StatusCode::OK, Html(SUCCESS_PAGE.to_string())),
        Err(e) => (StatusCode::BAD_REQUEST, Html(error_page(e))),
    };
    state.settle(outcome);
    response
}

/// LocalCallbackServer adapter binding a [`CallbackListener`] per login attempt
pub struct LocalCallbackServer {
    port: u16,
}

impl LocalCallbackServer {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

#[async_trait]
impl CallbackServer for LocalCallbackServer {
    async fn start(&self, expected_state: String) -> Result<CallbackSession> {
        let listener = CallbackListener::bind(self.port).await?;
        let redirect_uri = listener.redirect_uri();
        tracing::debug!(%redirect_uri, "callback listener started");
        let pending = listener.spawn(expected_state);
        Ok(CallbackSession {
            redirect_uri,
            code: pending.code().boxed(),
        })
    }
}

fn error_page(error: &AuthError) -> String {
    let message = error
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        "<!DOCTYPE html><html><head><title>Kusari login</title></head>\
<body><h1>Login failed</h1><p>{message}</p><p>Return to the terminal and try again.</p></body></html>"
    )
}

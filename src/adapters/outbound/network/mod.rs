/// Network adapters for the platform, the authorization server and blob storage
mod blob_uploader;
mod callback_listener;
mod http;
mod oauth_client;
mod platform_client;

pub use blob_uploader::HttpBlobStore;
pub use callback_listener::{
    draw_redirect_port, validate_callback, CallbackListener, LocalCallbackServer, PendingCallback,
    FALLBACK_REDIRECT_PORT, REDIRECT_PORTS,
};
pub use http::{build_client, check_upload_status};
pub use oauth_client::OAuthClient;
pub use platform_client::{tenant_endpoint, PlatformClient};

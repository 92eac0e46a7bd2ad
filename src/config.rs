//! Configuration for kusari.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional `kusari.config.yml`, environment, then command-line flags. The
//! result is one [`Settings`] value passed down to every command.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::use_cases::{PlatformScope, PollSettings, DEFAULT_LOGIN_TIMEOUT};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "kusari.config.yml";

pub const DEFAULT_PLATFORM_URL: &str = "https://platform.api.us.kusari.cloud";
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://auth.us.kusari.cloud";
pub const DEFAULT_CONSOLE_URL: &str = "https://console.us.kusari.cloud";
pub const DEFAULT_CLIENT_ID: &str = "4lnk6jccl3hc4lkcudai5lt36u";

const STATE_DIR_NAME: &str = ".kusari";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub platform_url: Option<String>,
    pub auth_endpoint: Option<String>,
    pub console_url: Option<String>,
    pub client_id: Option<String>,
    pub redirect_port: Option<u16>,
    pub login_timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub poll_max_attempts: Option<u32>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty document parses as unit, not as a map
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (field, value) in [
        ("platform_url", &config.platform_url),
        ("auth_endpoint", &config.auth_endpoint),
        ("console_url", &config.console_url),
    ] {
        if let Some(url) = value {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                bail!(
                    "Invalid config: {} must be an http(s) URL, got '{}'.\n\n\
                     💡 Hint: Use a full URL such as \"https://platform.api.us.kusari.cloud\".",
                    field,
                    url
                );
            }
        }
    }
    if config.poll_max_attempts == Some(0) {
        bail!(
            "Invalid config: poll_max_attempts must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default."
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("unknown config field '{}' will be ignored", key);
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values taken from the command line and environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub platform_url: Option<String>,
    pub auth_endpoint: Option<String>,
    pub console_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_port: Option<u16>,
    pub login_timeout_secs: Option<u64>,
    pub state_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform_url: String,
    pub auth_endpoint: String,
    pub console_url: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    /// `None` draws a port from the registered range
    pub redirect_port: Option<u16>,
    pub login_timeout: Duration,
    pub poll: PollSettings,
    pub state_dir: PathBuf,
    pub verbose: bool,
}

impl Settings {
    /// Layers `overrides` over `file` over the built-in defaults
    pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> Result<Self> {
        let file = file.unwrap_or_default();
        let default_poll = PollSettings::default();

        let state_dir = match overrides.state_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .map(|home| home.join(STATE_DIR_NAME))
                .context("Could not determine the home directory for the kusari state files")?,
        };

        Ok(Self {
            platform_url: pick(overrides.platform_url, file.platform_url, DEFAULT_PLATFORM_URL),
            auth_endpoint: pick(overrides.auth_endpoint, file.auth_endpoint, DEFAULT_AUTH_ENDPOINT),
            console_url: pick(overrides.console_url, file.console_url, DEFAULT_CONSOLE_URL),
            client_id: pick(overrides.client_id, file.client_id, DEFAULT_CLIENT_ID),
            client_secret: overrides.client_secret.filter(|s| !s.is_empty()),
            redirect_port: overrides.redirect_port.or(file.redirect_port),
            login_timeout: overrides
                .login_timeout_secs
                .or(file.login_timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_LOGIN_TIMEOUT),
            poll: PollSettings {
                interval: file
                    .poll_interval_secs
                    .map(Duration::from_secs)
                    .unwrap_or(default_poll.interval),
                max_attempts: file.poll_max_attempts.unwrap_or(default_poll.max_attempts),
            },
            state_dir,
            verbose: overrides.verbose,
        })
    }

    /// Sessions with a client secret never prompt
    pub fn is_non_interactive(&self) -> bool {
        self.client_secret.is_some()
    }

    pub fn scope(&self) -> PlatformScope<'_> {
        PlatformScope {
            platform_url: &self.platform_url,
            auth_endpoint: &self.auth_endpoint,
            console_url: &self.console_url,
        }
    }
}

fn pick(flag: Option<String>, file: Option<String>, default: &str) -> String {
    flag.or(file)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

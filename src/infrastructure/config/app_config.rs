//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::api_key::ApiKey;

const APP_NAME: &str = "gifr";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Imgur anonymous upload endpoint.
pub const DEFAULT_IMGUR_ENDPOINT: &str = "https://api.imgur.com/3/upload";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Path of the gifsicle executable.
    #[serde(default = "default_gifsicle_path")]
    pub gifsicle_path: PathBuf,

    /// Directory holding shuffled artifacts.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// File holding the persisted result cache.
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    /// Skip TLS certificate validation when fetching source images.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Prefix that addresses chat commands to the bot.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Imgur configuration.
    #[serde(default)]
    pub imgur: ImgurConfig,
}

/// Imgur credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgurConfig {
    /// Registered application client ID.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// API key sent with each upload.
    #[serde(default = "default_api_key")]
    pub api_key: ApiKey,

    /// Upload endpoint.
    #[serde(default = "default_imgur_endpoint")]
    pub endpoint: String,
}

impl Default for ImgurConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            api_key: default_api_key(),
            endpoint: default_imgur_endpoint(),
        }
    }
}

impl ImgurConfig {
    /// Returns true if the credentials still hold the placeholder values.
    #[must_use]
    pub fn has_placeholder_credentials(&self) -> bool {
        self.client_id == default_client_id() || self.api_key == default_api_key()
    }
}

fn default_gifsicle_path() -> PathBuf {
    PathBuf::from("/usr/bin/gifsicle")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("/tmp/gifr")
}

fn default_true() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_client_id() -> String {
    "***change me***".to_string()
}

fn default_api_key() -> ApiKey {
    ApiKey::new("*** me too ***")
}

fn default_imgur_endpoint() -> String {
    DEFAULT_IMGUR_ENDPOINT.to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(gifsicle_path) = &args.gifsicle_path {
            self.gifsicle_path.clone_from(gifsicle_path);
        }
        if let Some(cache_path) = &args.cache_path {
            self.cache_path.clone_from(cache_path);
        }
        if let Some(state_path) = &args.state_path {
            self.state_path = Some(state_path.clone());
        }
        if let Some(accept_invalid_certs) = args.accept_invalid_certs {
            self.accept_invalid_certs = accept_invalid_certs;
        }
        if let Some(client_id) = &args.imgur_client_id {
            self.imgur.client_id.clone_from(client_id);
        }
        if let Some(api_key) = &args.imgur_api_key {
            self.imgur.api_key = ApiKey::new(api_key.as_str());
        }
    }

    /// Returns default result cache state path.
    #[must_use]
    pub fn default_state_path() -> PathBuf {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
            || std::env::temp_dir().join(APP_NAME).join("state.toml"),
            |dirs| dirs.data_dir().join("state.toml"),
        )
    }

    /// Returns effective state path.
    #[must_use]
    pub fn effective_state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(Self::default_state_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            gifsicle_path: default_gifsicle_path(),
            cache_path: default_cache_path(),
            state_path: None,
            accept_invalid_certs: true,
            http_timeout_secs: default_http_timeout_secs(),
            command_prefix: default_command_prefix(),
            imgur: ImgurConfig::default(),
        }
    }
}

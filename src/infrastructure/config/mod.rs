//! Application configuration.

pub mod api_key;
pub mod app_config;
pub mod args;
pub mod storage;

pub use api_key::ApiKey;
pub use app_config::{AppConfig, ImgurConfig, LogLevel};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, StorageManager};

use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gifr",
    version,
    about = "Randomizes the frame order of animated GIFs",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "GIFR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", env = "GIFR_LOG_PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "GIFR_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Path of the gifsicle executable.
    #[arg(long, value_name = "PATH", env = "GIFR_GIFSICLE_PATH", global = true)]
    pub gifsicle_path: Option<PathBuf>,

    /// Directory holding shuffled artifacts.
    #[arg(long, value_name = "PATH", env = "GIFR_CACHE_PATH", global = true)]
    pub cache_path: Option<PathBuf>,

    /// File holding the persisted result cache.
    #[arg(long, value_name = "PATH", env = "GIFR_STATE_PATH", global = true)]
    pub state_path: Option<PathBuf>,

    /// Skip TLS certificate validation when fetching source images.
    #[arg(long, env = "GIFR_ACCEPT_INVALID_CERTS", global = true)]
    pub accept_invalid_certs: Option<bool>,

    /// Imgur client ID.
    #[arg(long, env = "GIFR_IMGUR_CLIENT_ID", global = true)]
    pub imgur_client_id: Option<String>,

    /// Imgur API key.
    #[arg(long, env = "GIFR_IMGUR_API_KEY", hide_env_values = true, global = true)]
    pub imgur_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Shuffle the frames of an animated image and print the hosted URL.
    Randomize {
        /// Source image URL.
        url: String,
    },
    /// Print N random cache entries as JSON.
    Gimme {
        /// Number of entries.
        count: String,
    },
    /// Print every cache entry as JSON.
    Spew,
    /// Remove one cache entry, or `all` of them.
    Zap {
        /// Source URL or `all`.
        target: String,
    },
    /// Read chat lines from stdin and print the bot's replies.
    Chat,
}

//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Source image download and frame shuffling.
pub mod image;
/// Imgur upload client.
pub mod imgur;
/// Result cache persistence.
pub mod state_store;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use image::{FetcherConfig, GifsicleShuffler, HttpImageFetcher};
pub use imgur::ImgurUploader;
pub use state_store::TomlCacheStore;

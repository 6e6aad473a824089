//! Image handling infrastructure.
//!
//! This module provides:
//! - HTTP download of source images
//! - Frame shuffling through gifsicle

pub mod fetcher;
pub mod gifsicle;

pub use fetcher::{FetcherConfig, HttpImageFetcher};
pub use gifsicle::{GifsicleShuffler, stage_arguments};

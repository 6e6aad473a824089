//! Gifr - randomizes the frame order of animated GIFs.
//!
//! This crate fetches an animated image, reorders its frames through gifsicle,
//! uploads the result to Imgur and remembers the mapping so that repeated
//! requests for the same source are answered from the cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer turning chat commands into replies.
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "gifr";

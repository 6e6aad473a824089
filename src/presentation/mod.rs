//! Presentation layer with chat command parsing and replies.

/// Chat boundary.
pub mod bot;
/// Command parsing.
pub mod commands;

pub use bot::GifrBot;
pub use commands::{CommandParser, GifrCommand};

//! Imgur upload adapter.

mod client;
mod dto;

pub use client::ImgurUploader;

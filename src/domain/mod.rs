//! Domain layer with core entities, frame inspection and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{
    CacheEntry, DecodedImage, FramePermutation, PipelineStage, SourceUrl, content_key,
};
pub use errors::PipelineError;
pub use ports::{CacheStorePort, FrameShufflerPort, ImageFetcherPort, UploaderPort};

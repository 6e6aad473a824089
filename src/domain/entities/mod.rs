//! Domain entities.

mod cache_entry;
mod decoded_image;
mod frame_permutation;
mod pipeline_stage;
mod source_url;

pub use cache_entry::CacheEntry;
pub use decoded_image::DecodedImage;
pub use frame_permutation::FramePermutation;
pub use pipeline_stage::PipelineStage;
pub use source_url::{SourceUrl, content_key};

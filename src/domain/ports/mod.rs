mod cache_store_port;
mod frame_shuffler_port;
mod image_fetcher_port;
mod uploader_port;

pub use cache_store_port::CacheStorePort;
pub use frame_shuffler_port::FrameShufflerPort;
pub use image_fetcher_port::ImageFetcherPort;
pub use uploader_port::UploaderPort;

#[cfg(test)]
pub mod mocks {
    pub use super::cache_store_port::mock::MemoryCacheStore;
    pub use super::frame_shuffler_port::MockFrameShufflerPort;
    pub use super::image_fetcher_port::mock::MockImageFetcher;
    pub use super::uploader_port::MockUploaderPort;
}

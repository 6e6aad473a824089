//! Fetch, shuffle, upload and memoize an animated image.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::RandomizeResponse;
use crate::application::services::ResultCache;
use crate::domain::entities::{DecodedImage, PipelineStage, SourceUrl};
use crate::domain::errors::PipelineError;
use crate::domain::ports::{FrameShufflerPort, ImageFetcherPort, UploaderPort};

/// Runs the randomization pipeline for one source URL at a time.
///
/// Runs hold the result cache's run lock from cache check to recording, so
/// neither another run nor a zap touches the content-addressed artifact in
/// between.
pub struct RandomizeUseCase {
    fetcher: Arc<dyn ImageFetcherPort>,
    shuffler: Arc<dyn FrameShufflerPort>,
    uploader: Arc<dyn UploaderPort>,
    cache: Arc<ResultCache>,
}

impl RandomizeUseCase {
    /// Creates new randomize use case.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetcherPort>,
        shuffler: Arc<dyn FrameShufflerPort>,
        uploader: Arc<dyn UploaderPort>,
        cache: Arc<ResultCache>,
    ) -> Self {
        Self {
            fetcher,
            shuffler,
            uploader,
            cache,
        }
    }

    /// Returns the hosted URL of a frame-shuffled copy of `source`.
    ///
    /// A cached result short-circuits every other stage.
    ///
    /// # Errors
    /// Returns the error of the first stage that failed. Nothing is retried
    /// and no cache entry is written on failure.
    pub async fn execute(&self, source: &SourceUrl) -> Result<RandomizeResponse, PipelineError> {
        let _running = self.cache.exclusive().await;

        let result = self.run(source).await;
        match &result {
            Ok(response) => info!(
                source = %source,
                result = %response.result_url,
                origin = %response.origin,
                "Randomization finished"
            ),
            Err(e) => warn!(source = %source, error = %e, "Randomization failed"),
        }
        debug!(source = %source, stage = %PipelineStage::Done, "Pipeline stage");

        result
    }

    async fn run(&self, source: &SourceUrl) -> Result<RandomizeResponse, PipelineError> {
        enter(source, PipelineStage::CacheCheck);
        if let Some(result_url) = self.cache.lookup(source).await? {
            debug!(source = %source, result = %result_url, "Matched source in cache");
            return Ok(RandomizeResponse::cached(result_url));
        }

        enter(source, PipelineStage::Fetching);
        let bytes = self.fetcher.fetch(source).await?;

        enter(source, PipelineStage::Validating);
        let (image, extra_frames) = tokio::task::spawn_blocking(move || {
            let image = DecodedImage::decode(bytes)?;
            let extra_frames = image.count_frames();
            Ok::<_, PipelineError>((image, extra_frames))
        })
        .await
        .map_err(|e| PipelineError::not_an_image(format!("decode task panicked: {e}")))??;

        if extra_frames == 0 {
            return Err(PipelineError::NotAnimated);
        }
        let frame_count = extra_frames + 1;
        debug!(
            source = %source,
            format = ?image.format(),
            frames = frame_count,
            "Counted frames"
        );

        enter(source, PipelineStage::Transforming);
        let artifact = self
            .shuffler
            .randomize(source, image.into_bytes(), frame_count)
            .await?;

        enter(source, PipelineStage::Uploading);
        let result_url = self.uploader.upload(&artifact, source.as_str()).await?;

        enter(source, PipelineStage::Recording);
        self.cache.insert(source, result_url.clone()).await?;

        Ok(RandomizeResponse::produced(result_url))
    }
}

fn enter(source: &SourceUrl, stage: PipelineStage) {
    debug!(source = %source, stage = %stage, "Pipeline stage");
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tempfile::TempDir;
    use tokio::sync::Notify;

    use super::*;
    use crate::application::dto::{ResultOrigin, ZapOutcome, ZapTarget};
    use crate::application::use_cases::CacheAdminUseCase;
    use crate::domain::ports::mocks::{
        MemoryCacheStore, MockFrameShufflerPort, MockImageFetcher, MockUploaderPort,
    };
    use crate::test_support::{animated_gif, still_png};

    const SOURCE: &str = "https://example.com/dance.gif";
    const LINK: &str = "https://i.imgur.com/abc123.gif";

    struct Harness {
        use_case: RandomizeUseCase,
        fetcher: Arc<MockImageFetcher>,
        store: Arc<MemoryCacheStore>,
        _temp: TempDir,
    }

    fn harness(
        fetcher: MockImageFetcher,
        shuffler: MockFrameShufflerPort,
        uploader: MockUploaderPort,
    ) -> Harness {
        let temp = TempDir::new().unwrap();
        let cache_root = temp.path().join("gifr");
        let fetcher = Arc::new(fetcher);
        let store = Arc::new(MemoryCacheStore::new());
        let cache = Arc::new(ResultCache::new(store.clone(), cache_root));
        let use_case = RandomizeUseCase::new(
            fetcher.clone(),
            Arc::new(shuffler),
            Arc::new(uploader),
            cache,
        );
        Harness {
            use_case,
            fetcher,
            store,
            _temp: temp,
        }
    }

    fn shuffler_writing_artifact(cache_root: PathBuf, times: usize) -> MockFrameShufflerPort {
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler
            .expect_randomize()
            .withf(|source, _, frame_count| source.as_str() == SOURCE && *frame_count == 5)
            .times(times)
            .returning(move |source, image, _| {
                let path = source.artifact_path(&cache_root);
                std::fs::create_dir_all(&cache_root).unwrap();
                std::fs::write(&path, &image).unwrap();
                Ok(path)
            });
        shuffler
    }

    #[tokio::test]
    async fn test_miss_runs_pipeline_and_hit_short_circuits() {
        let temp_root = TempDir::new().unwrap();
        let cache_root = temp_root.path().join("gifr");
        let expected_artifact = SourceUrl::new(SOURCE).artifact_path(&cache_root);

        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(5));
        let shuffler = shuffler_writing_artifact(cache_root.clone(), 1);
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .withf({
                let expected = expected_artifact.clone();
                move |file, seed| file.to_path_buf() == expected && seed.to_string() == SOURCE
            })
            .times(1)
            .returning(|_, _| Ok(LINK.to_string()));

        let h = harness(fetcher, shuffler, uploader);
        let source = SourceUrl::new(SOURCE);

        let first = h.use_case.execute(&source).await.unwrap();
        assert_eq!(first.result_url, LINK);
        assert_eq!(first.origin, ResultOrigin::Pipeline);
        assert!(expected_artifact.exists());
        assert_eq!(
            expected_artifact.file_name().unwrap().to_string_lossy(),
            format!("{}.gif", source.content_key())
        );

        let second = h.use_case.execute(&source).await.unwrap();
        assert_eq!(second.result_url, LINK);
        assert!(second.is_cache_hit());

        assert_eq!(h.fetcher.calls(), 1);
        let stored = h.store.snapshot().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source, SOURCE);
        assert_eq!(stored[0].result, LINK);
    }

    #[tokio::test]
    async fn test_single_frame_is_rejected_without_entry() {
        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(1));
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler.expect_randomize().never();
        let mut uploader = MockUploaderPort::new();
        uploader.expect_upload().never();

        let h = harness(fetcher, shuffler, uploader);

        let result = h.use_case.execute(&SourceUrl::new(SOURCE)).await;

        assert!(matches!(result, Err(PipelineError::NotAnimated)));
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_still_png_is_not_animated() {
        let fetcher = MockImageFetcher::new().with_body(SOURCE, still_png());
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler.expect_randomize().never();

        let h = harness(fetcher, shuffler, MockUploaderPort::new());

        let result = h.use_case.execute(&SourceUrl::new(SOURCE)).await;

        assert!(matches!(result, Err(PipelineError::NotAnimated)));
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let fetcher = MockImageFetcher::new().with_body(SOURCE, &b"<html>nope</html>"[..]);
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler.expect_randomize().never();

        let h = harness(fetcher, shuffler, MockUploaderPort::new());

        let result = h.use_case.execute(&SourceUrl::new(SOURCE)).await;

        assert!(matches!(result, Err(PipelineError::NotAnImage { .. })));
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_pipeline() {
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler.expect_randomize().never();

        let h = harness(MockImageFetcher::new(), shuffler, MockUploaderPort::new());

        let result = h.use_case.execute(&SourceUrl::new(SOURCE)).await;

        assert!(matches!(result, Err(PipelineError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_transform_failure_skips_upload() {
        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(5));
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler
            .expect_randomize()
            .times(1)
            .returning(|_, _, _| Err(PipelineError::transform("gifsicle not found")));
        let mut uploader = MockUploaderPort::new();
        uploader.expect_upload().never();

        let h = harness(fetcher, shuffler, uploader);

        let result = h.use_case.execute(&SourceUrl::new(SOURCE)).await;

        assert!(matches!(result, Err(PipelineError::Transform { .. })));
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_writes_no_entry_and_retries_next_time() {
        let temp_root = TempDir::new().unwrap();
        let cache_root = temp_root.path().join("gifr");

        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(5));
        let shuffler = shuffler_writing_artifact(cache_root, 2);
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .times(2)
            .returning(|_, _| Err(PipelineError::upload(Some(403), r#"{"success":false}"#)));

        let h = harness(fetcher, shuffler, uploader);
        let source = SourceUrl::new(SOURCE);

        for _ in 0..2 {
            let result = h.use_case.execute(&source).await;
            assert!(matches!(
                result,
                Err(PipelineError::Upload {
                    status: Some(403),
                    ..
                })
            ));
        }

        assert_eq!(h.fetcher.calls(), 2);
        assert!(h.store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_shuffler_receives_total_frame_count() {
        let temp_root = TempDir::new().unwrap();
        let cache_root = temp_root.path().join("gifr");
        let received = Arc::new(AtomicUsize::new(0));

        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(5));
        let mut shuffler = MockFrameShufflerPort::new();
        shuffler.expect_randomize().times(1).returning({
            let received = received.clone();
            move |source, _, frame_count| {
                received.store(frame_count, Ordering::SeqCst);
                Ok(source.artifact_path(&cache_root))
            }
        });
        let mut uploader = MockUploaderPort::new();
        uploader
            .expect_upload()
            .returning(|_, _| Ok(LINK.to_string()));

        let h = harness(fetcher, shuffler, uploader);

        h.use_case.execute(&SourceUrl::new(SOURCE)).await.unwrap();

        assert_eq!(received.load(Ordering::SeqCst), 5);
    }

    /// Holds each upload until released and reports whether the artifact
    /// was still on disk.
    struct GatedUploader {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl UploaderPort for GatedUploader {
        async fn upload(&self, file: &Path, _name_seed: &str) -> Result<String, PipelineError> {
            self.started.notify_one();
            self.release.notified().await;
            if file.exists() {
                Ok(LINK.to_string())
            } else {
                Err(PipelineError::upload(None, "artifact missing"))
            }
        }
    }

    #[tokio::test]
    async fn test_zap_all_waits_for_running_randomization() {
        let temp = TempDir::new().unwrap();
        let cache_root = temp.path().join("gifr");
        let artifact = SourceUrl::new(SOURCE).artifact_path(&cache_root);

        let fetcher = MockImageFetcher::new().with_body(SOURCE, animated_gif(5));
        let shuffler = shuffler_writing_artifact(cache_root.clone(), 1);
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let uploader = GatedUploader {
            started: started.clone(),
            release: release.clone(),
        };

        let cache = Arc::new(ResultCache::new(
            Arc::new(MemoryCacheStore::new()),
            cache_root,
        ));
        let use_case = Arc::new(RandomizeUseCase::new(
            Arc::new(fetcher),
            Arc::new(shuffler),
            Arc::new(uploader),
            cache.clone(),
        ));
        let admin = CacheAdminUseCase::new(cache.clone());

        let run = tokio::spawn({
            let use_case = use_case.clone();
            async move { use_case.execute(&SourceUrl::new(SOURCE)).await }
        });
        started.notified().await;

        let zap = tokio::spawn(async move { admin.zap(ZapTarget::All).await });
        tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_millis(150)))
            .await
            .unwrap();
        assert!(!zap.is_finished());

        release.notify_one();

        let response = run.await.unwrap().unwrap();
        assert_eq!(response.result_url, LINK);

        assert_eq!(zap.await.unwrap().unwrap(), ZapOutcome::Cleared);
        assert!(!artifact.exists());
        assert!(cache.list_all().await.unwrap().is_empty());
    }
}

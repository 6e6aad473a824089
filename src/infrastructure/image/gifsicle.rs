//! Frame shuffling through a three-stage gifsicle pipeline.
//!
//! The source stream is piped through `--colors=255`, then `--unoptimize`,
//! then `-O3` with one `#N` frame selector per frame in shuffled order. The
//! stages are chained with real pipes and spawned directly, never through a
//! shell.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, trace};

use crate::domain::entities::{FramePermutation, SourceUrl};
use crate::domain::errors::PipelineError;
use crate::domain::ports::FrameShufflerPort;

const PALETTE_STAGE: &str = "--colors=255";
const UNOPTIMIZE_STAGE: &str = "--unoptimize";
const REORDER_STAGE: &str = "-O3";

/// Returns the argument vectors of the three pipeline stages.
#[must_use]
pub fn stage_arguments(permutation: &FramePermutation) -> [Vec<String>; 3] {
    let mut reorder = vec![REORDER_STAGE.to_string()];
    reorder.extend(permutation.selector_tokens());

    [
        vec![PALETTE_STAGE.to_string()],
        vec![UNOPTIMIZE_STAGE.to_string()],
        reorder,
    ]
}

/// Shuffles frames by running gifsicle and stores results under a cache root.
#[derive(Debug, Clone)]
pub struct GifsicleShuffler {
    executable: PathBuf,
    cache_root: PathBuf,
}

impl GifsicleShuffler {
    /// Creates a shuffler running `executable` and writing into `cache_root`.
    #[must_use]
    pub fn new(executable: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            cache_root: cache_root.into(),
        }
    }

    /// Returns the artifact directory.
    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    fn spawn_stage(
        &self,
        args: &[String],
        stdin: Stdio,
        stdout: Stdio,
    ) -> Result<Child, PipelineError> {
        Command::new(&self.executable)
            .args(args)
            .stdin(stdin)
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    PipelineError::transform(format!(
                        "gifsicle not found at {}",
                        self.executable.display()
                    ))
                } else {
                    PipelineError::transform(format!(
                        "failed to start {}: {e}",
                        self.executable.display()
                    ))
                }
            })
    }

    /// Pipes `image` through the three stages into `destination`.
    async fn run_pipeline(
        &self,
        image: Bytes,
        permutation: &FramePermutation,
        destination: &Path,
    ) -> Result<(), PipelineError> {
        let [palette_args, unoptimize_args, reorder_args] = stage_arguments(permutation);
        trace!(
            executable = %self.executable.display(),
            reorder = ?reorder_args,
            "Spawning gifsicle pipeline"
        );

        let output = fs::File::create(destination)
            .await
            .map_err(|e| {
                PipelineError::transform(format!(
                    "failed to create {}: {e}",
                    destination.display()
                ))
            })?
            .into_std()
            .await;

        let mut palette = self.spawn_stage(&palette_args, Stdio::piped(), Stdio::piped())?;
        let palette_out = take_stdout(&mut palette)?;

        let mut unoptimize = self.spawn_stage(&unoptimize_args, palette_out, Stdio::piped())?;
        let unoptimize_out = take_stdout(&mut unoptimize)?;

        let reorder = self.spawn_stage(&reorder_args, unoptimize_out, Stdio::from(output))?;

        let mut stdin = palette
            .stdin
            .take()
            .ok_or_else(|| PipelineError::transform("gifsicle stdin unavailable"))?;
        let feed = async move {
            let written = stdin.write_all(&image).await;
            drop(stdin);
            written
        };

        let (fed, palette_done, unoptimize_done, reorder_done) = tokio::join!(
            feed,
            palette.wait_with_output(),
            unoptimize.wait_with_output(),
            reorder.wait_with_output(),
        );

        check_stage(PALETTE_STAGE, palette_done)?;
        check_stage(UNOPTIMIZE_STAGE, unoptimize_done)?;
        check_stage(REORDER_STAGE, reorder_done)?;
        fed.map_err(|e| {
            PipelineError::transform(format!("failed to write image to gifsicle: {e}"))
        })?;

        Ok(())
    }
}

fn take_stdout(child: &mut Child) -> Result<Stdio, PipelineError> {
    child
        .stdout
        .take()
        .ok_or_else(|| PipelineError::transform("gifsicle stdout unavailable"))?
        .try_into()
        .map_err(|e| PipelineError::transform(format!("failed to chain gifsicle stages: {e}")))
}

fn check_stage(stage: &str, result: std::io::Result<Output>) -> Result<(), PipelineError> {
    let output = result
        .map_err(|e| PipelineError::transform(format!("gifsicle {stage} did not complete: {e}")))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(PipelineError::transform(format!(
        "gifsicle {stage} exited with {}: {}",
        output.status,
        stderr.trim()
    )))
}

#[async_trait]
impl FrameShufflerPort for GifsicleShuffler {
    async fn randomize(
        &self,
        source: &SourceUrl,
        image: Bytes,
        frame_count: usize,
    ) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.cache_root).await.map_err(|e| {
            PipelineError::transform(format!(
                "failed to create cache directory {}: {e}",
                self.cache_root.display()
            ))
        })?;

        let permutation = FramePermutation::random(frame_count);
        let destination = source.artifact_path(&self.cache_root);

        debug!(
            source = %source,
            frames = frame_count,
            path = %destination.display(),
            "Shuffling frames"
        );

        self.run_pipeline(image, &permutation, &destination).await?;

        debug!(source = %source, path = %destination.display(), "Wrote shuffled artifact");
        Ok(destination)
    }
}

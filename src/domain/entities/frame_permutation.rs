//! Random frame orderings.

use rand::Rng;
use rand::seq::SliceRandom;

/// An ordering of frame indices `[0, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePermutation(Vec<usize>);

impl FramePermutation {
    /// Shuffles `[0, frame_count)` with the given generator.
    ///
    /// Uses Fisher-Yates, so every ordering is equally likely.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(frame_count: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..frame_count).collect();
        order.shuffle(rng);
        Self(order)
    }

    /// Shuffles `[0, frame_count)` with the thread-local generator.
    #[must_use]
    pub fn random(frame_count: usize) -> Self {
        Self::shuffled(frame_count, &mut rand::rng())
    }

    /// Returns the frame indices in playback order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns gifsicle frame selectors (`#3`, `#0`, ...) in playback order.
    #[must_use]
    pub fn selector_tokens(&self) -> Vec<String> {
        self.0.iter().map(|index| format!("#{index}")).collect()
    }
}

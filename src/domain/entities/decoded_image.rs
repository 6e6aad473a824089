//! Validated image bytes and frame counting.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader};

use crate::domain::errors::PipelineError;

/// Raw bytes that were recognized as an image.
///
/// Holds the original encoding untouched, since the transform tool needs
/// the source stream rather than decoded pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    bytes: Bytes,
    format: ImageFormat,
}

impl DecodedImage {
    /// Recognizes `bytes` as an image and validates its header.
    ///
    /// # Errors
    /// Returns [`PipelineError::NotAnImage`] when the format is unknown or the
    /// header cannot be parsed.
    pub fn decode(bytes: Bytes) -> Result<Self, PipelineError> {
        let format = image::guess_format(&bytes).map_err(PipelineError::not_an_image)?;

        match format {
            ImageFormat::Gif => {
                GifDecoder::new(Cursor::new(bytes.as_ref()))
                    .map_err(PipelineError::not_an_image)?;
            }
            other => {
                ImageReader::with_format(Cursor::new(bytes.as_ref()), other)
                    .into_dimensions()
                    .map_err(PipelineError::not_an_image)?;
            }
        }

        Ok(Self { bytes, format })
    }

    /// Returns the detected container format.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Consumes the image and returns the original bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Returns the number of frames after the first one.
    ///
    /// Frames are walked in order until the first one that fails to decode,
    /// so a truncated animation reports the frames that precede the damage.
    /// Zero means the image is not animated. Only GIF is walked; other still
    /// formats always report zero.
    #[must_use]
    pub fn count_frames(&self) -> usize {
        if self.format != ImageFormat::Gif {
            return 0;
        }

        let Ok(decoder) = GifDecoder::new(Cursor::new(self.bytes.as_ref())) else {
            return 0;
        };

        let readable = decoder
            .into_frames()
            .take_while(Result::is_ok)
            .count();

        readable.saturating_sub(1)
    }
}

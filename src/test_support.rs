//! Image fixtures shared by unit tests.

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{Frame, ImageFormat, Rgba, RgbaImage};

/// Encodes a tiny GIF with `frame_count` distinctly colored frames.
pub fn animated_gif(frame_count: usize) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        let frames = (0..frame_count).map(|i| {
            let shade = u8::try_from((i * 40) % 256).unwrap_or(0);
            Frame::new(RgbaImage::from_pixel(
                4,
                4,
                Rgba([shade, 0, 255 - shade, 255]),
            ))
        });
        encoder
            .encode_frames(frames)
            .expect("failed to encode test gif");
    }
    buffer
}

/// Encodes a single-frame PNG.
pub fn still_png() -> Vec<u8> {
    let mut buffer = Vec::new();
    RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("failed to encode test png");
    buffer
}

//! PNG decoding into RGBA8 images.

use image::codecs::png::PngDecoder;
use image::io::Limits;
use image::{imageops, DynamicImage, ImageResult, RgbaImage};
use std::io::Cursor;

/// Total allocation allowed for a single decode context.
const DECODE_MEMORY_LIMIT: u64 = 512 * 1024 * 1024;

/// Decode a PNG byte buffer into an RGBA8 image.
///
/// With `vflip`, the raster comes out top-to-bottom reversed; mipmap levels
/// resampled from it inherit the orientation.
pub fn decode_png(bytes: &[u8], vflip: bool) -> ImageResult<RgbaImage> {
    let mut limits = Limits::default();
    limits.max_alloc = Some(DECODE_MEMORY_LIMIT);

    let decoder = PngDecoder::with_limits(Cursor::new(bytes), limits)?;
    let mut image = DynamicImage::from_decoder(decoder)?.into_rgba8();
    if vflip {
        imageops::flip_vertical_in_place(&mut image);
    }
    Ok(image)
}

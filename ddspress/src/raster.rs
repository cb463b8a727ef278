//! Padded RGBA8 rasters and the mipmap work unit.
//!
//! Every decoded or resampled image level is stored with its row stride and
//! row count rounded up to the next multiple of 4 so that reblocking into
//! 4x4 tiles never indexes out of bounds. The unpadded dimensions are kept
//! alongside; padding pixels are transparent black.

use crate::ERROR_FILE_INDEX;
use image::RgbaImage;

/// Round a dimension up to the next multiple of 4.
pub fn pad_dimension(value: u32) -> u32 {
    value.div_ceil(4) * 4
}

/// One image level as a contiguous, block-padded RGBA8 buffer.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    padded_width: u32,
    padded_height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Copy an RGBA image into a block-padded buffer.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let padded_width = pad_dimension(width);
        let padded_height = pad_dimension(height);

        let stride = padded_width as usize * 4;
        let src_stride = width as usize * 4;
        let mut data = vec![0u8; stride * padded_height as usize];

        let src = image.as_raw();
        for row in 0..height as usize {
            let dst = row * stride;
            data[dst..dst + src_stride]
                .copy_from_slice(&src[row * src_stride..(row + 1) * src_stride]);
        }

        Self {
            width,
            height,
            padded_width,
            padded_height,
            data,
        }
    }

    /// Width in pixels, excluding padding columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, excluding padding rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padded_width(&self) -> u32 {
        self.padded_width
    }

    pub fn padded_height(&self) -> u32 {
        self.padded_height
    }

    /// The padded pixel buffer, `padded_width * padded_height * 4` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value at padded coordinates `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y * self.padded_width + x) as usize * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }
}

/// Work unit produced by the decode stage: one padded raster per mipmap
/// level, level 0 at full resolution.
#[derive(Debug)]
pub struct MipmapImage {
    pub file_index: usize,
    pub levels: Vec<Raster>,
}

impl MipmapImage {
    /// Sentinel unit for a file that already failed upstream.
    pub fn error() -> Self {
        Self {
            file_index: ERROR_FILE_INDEX,
            levels: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.file_index == ERROR_FILE_INDEX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_pad_dimension() {
        assert_eq!(pad_dimension(1), 4);
        assert_eq!(pad_dimension(4), 4);
        assert_eq!(pad_dimension(5), 8);
        assert_eq!(pad_dimension(17), 20);
        assert_eq!(pad_dimension(256), 256);
    }

    #[test]
    fn test_from_rgba_pads_to_multiple_of_four() {
        let image = RgbaImage::new(17, 9);
        let raster = Raster::from_rgba(&image);

        assert_eq!(raster.width(), 17);
        assert_eq!(raster.height(), 9);
        assert_eq!(raster.padded_width(), 20);
        assert_eq!(raster.padded_height(), 12);
        assert_eq!(raster.data().len(), 20 * 12 * 4);
    }

    #[test]
    fn test_from_rgba_exact_multiple_keeps_size() {
        let image = RgbaImage::new(16, 8);
        let raster = Raster::from_rgba(&image);

        assert_eq!(raster.padded_width(), 16);
        assert_eq!(raster.padded_height(), 8);
    }

    #[test]
    fn test_from_rgba_copies_pixels() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        image.put_pixel(2, 1, Rgba([50, 60, 70, 80]));

        let raster = Raster::from_rgba(&image);
        assert_eq!(raster.pixel(0, 0), [10, 20, 30, 40]);
        assert_eq!(raster.pixel(2, 1), [50, 60, 70, 80]);
    }

    #[test]
    fn test_from_rgba_padding_is_transparent_black() {
        let mut image = RgbaImage::new(3, 3);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([255, 255, 255, 255]);
        }

        let raster = Raster::from_rgba(&image);
        assert_eq!(raster.pixel(3, 0), [0, 0, 0, 0]);
        assert_eq!(raster.pixel(0, 3), [0, 0, 0, 0]);
        assert_eq!(raster.pixel(3, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_error_unit() {
        let unit = MipmapImage::error();
        assert!(unit.is_error());
        assert!(unit.levels.is_empty());
    }
}

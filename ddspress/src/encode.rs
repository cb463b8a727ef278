//! BC1/BC7 block compression dispatch.
//!
//! The format is bound when the encoder is constructed, and BC7 effort
//! parameters are built exactly once from the quality level, so the per-file
//! hot path is a straight call into the block kernel.

use crate::blocks::{BlockGrid, BlockImage};
use crate::format::{Quality, TextureFormat};
use crate::ERROR_FILE_INDEX;
use intel_tex_2::{bc1, bc7, RgbaSurface};

/// Work unit produced by the encode stage: one opaque byte buffer per
/// mipmap level, `block_count * bytes_per_block` each.
#[derive(Debug)]
pub struct EncodedImage {
    pub file_index: usize,
    pub format: TextureFormat,
    pub levels: Vec<Vec<u8>>,
}

impl EncodedImage {
    pub fn error(format: TextureFormat) -> Self {
        Self {
            file_index: ERROR_FILE_INDEX,
            format,
            levels: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.file_index == ERROR_FILE_INDEX
    }
}

enum Kernel {
    Bc1,
    Bc7(bc7::EncodeSettings),
}

/// Block encoder shared by all pipeline workers.
pub struct BlockEncoder {
    format: TextureFormat,
    kernel: Kernel,
}

impl BlockEncoder {
    /// Bind the format and build its effort parameters.
    ///
    /// Quality selects the BC7 parameter set; the BC1 kernel has no effort
    /// parameters and ignores it.
    pub fn new(format: TextureFormat, quality: Quality) -> Self {
        let kernel = match format {
            TextureFormat::Bc1 => Kernel::Bc1,
            TextureFormat::Bc7 => Kernel::Bc7(bc7_settings(quality)),
        };
        Self { format, kernel }
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Compress every level of a block image.
    pub fn encode(&self, image: &BlockImage) -> EncodedImage {
        EncodedImage {
            file_index: image.file_index,
            format: self.format,
            levels: image
                .levels
                .iter()
                .map(|grid| self.encode_grid(grid))
                .collect(),
        }
    }

    fn encode_grid(&self, grid: &BlockGrid) -> Vec<u8> {
        // Tiles are consecutive 4x4 surfaces, so the whole level can be
        // handed to the kernel as one 4-pixel-wide column: kernel block
        // order then equals tile order.
        let block_count = grid.block_count();
        let surface = RgbaSurface {
            data: grid.tiles(),
            width: 4,
            height: block_count as u32 * 4,
            stride: 16,
        };

        let mut output = vec![0u8; block_count * self.format.bytes_per_block()];
        match &self.kernel {
            Kernel::Bc1 => bc1::compress_blocks_into(&surface, &mut output),
            Kernel::Bc7(settings) => bc7::compress_blocks_into(settings, &surface, &mut output),
        }
        output
    }
}

fn bc7_settings(quality: Quality) -> bc7::EncodeSettings {
    match quality.level() {
        0 => bc7::alpha_ultra_fast_settings(),
        1 => bc7::alpha_very_fast_settings(),
        2 => bc7::alpha_fast_settings(),
        3 | 4 => bc7::alpha_basic_settings(),
        _ => bc7::alpha_slow_settings(),
    }
}

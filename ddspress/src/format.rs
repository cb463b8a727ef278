//! Texture format, quality and filter definitions.

use image::imageops::FilterType;
use std::fmt;

/// DDS block compression format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// BC1/DXT1 compression (8 bytes per block, RGB only)
    Bc1,
    /// BC7 compression (16 bytes per block, full RGBA, much slower)
    Bc7,
}

impl TextureFormat {
    /// Size in bytes of one encoded 4x4 block.
    pub fn bytes_per_block(self) -> usize {
        match self {
            TextureFormat::Bc1 => 8,
            TextureFormat::Bc7 => 16,
        }
    }

    /// FourCC code stored in the DDS pixel format.
    ///
    /// BC7 is a DX10-class format: the pixel format carries `DX10` and the
    /// real format lives in the header extension.
    pub fn four_cc(self) -> [u8; 4] {
        match self {
            TextureFormat::Bc1 => *b"DXT1",
            TextureFormat::Bc7 => *b"DX10",
        }
    }

    /// True when the DDS file needs the 20-byte DXT10 header extension.
    pub fn has_dx10_header(self) -> bool {
        matches!(self, TextureFormat::Bc7)
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureFormat::Bc1 => write!(f, "BC1"),
            TextureFormat::Bc7 => write!(f, "BC7"),
        }
    }
}

/// Resampling filter used when generating mipmap levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeFilter {
    Nearest,
    Bilinear,
    Bicubic,
    Area,
    Lanczos,
}

impl ResizeFilter {
    /// The resampling kernel backing this filter.
    pub fn kernel(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
            ResizeFilter::Area => FilterType::Gaussian,
            ResizeFilter::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Encoder effort level.
///
/// Quality only affects BC7, where it selects the encoder parameter set
/// built once at pipeline construction. The BC1 kernel has no effort
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Highest accepted quality level.
    pub const MAX: u8 = 6;

    /// Create a quality level, rejecting values above [`Quality::MAX`].
    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of mipmap levels for a full chain, the base level included.
///
/// `floor(log2(max(width, height))) + 1`, so a 17x9 image has 5 levels and
/// a 1x1 image has exactly 1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - largest.leading_zeros()
}

/// Dimension of `base` at mipmap level `level`, never below 1.
pub fn mip_dimension(base: u32, level: u32) -> u32 {
    (base >> level).max(1)
}

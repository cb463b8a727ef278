//! DDS header construction and serialization.

use crate::dds::types::*;
use crate::format::TextureFormat;

impl DdsHeader {
    /// Create a header for the given dimensions and format.
    ///
    /// # Arguments
    ///
    /// * `width` - Texture width in pixels (unpadded)
    /// * `height` - Texture height in pixels (unpadded)
    /// * `mipmap_count` - Number of mipmap levels (1 = no mipmaps)
    /// * `format` - Compression format (BC1 or BC7)
    pub fn new(width: u32, height: u32, mipmap_count: u32, format: TextureFormat) -> Self {
        let blocks_wide = width.div_ceil(4);
        let blocks_high = height.div_ceil(4);
        let pitch_or_linear_size = blocks_wide * blocks_high * format.bytes_per_block() as u32;

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT | DDSD_LINEARSIZE;
        if mipmap_count > 1 {
            flags |= DDSD_MIPMAPCOUNT;
        }

        let mut caps = DDSCAPS_TEXTURE;
        if mipmap_count > 1 {
            caps |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
        }

        DdsHeader {
            magic: *b"DDS ",
            size: 124,
            flags,
            height,
            width,
            pitch_or_linear_size,
            depth: 0,
            mipmap_count,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat {
                size: 32,
                flags: DDPF_FOURCC,
                fourcc: format.four_cc(),
                rgb_bit_count: 0,
                r_bit_mask: 0,
                g_bit_mask: 0,
                b_bit_mask: 0,
                a_bit_mask: 0,
            },
            caps,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Serialize magic plus header to exactly 128 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(128);

        bytes.extend_from_slice(&self.magic);

        bytes.extend_from_slice(&self.size.to_le_bytes());
        bytes.extend_from_slice(&self.flags.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.pitch_or_linear_size.to_le_bytes());
        bytes.extend_from_slice(&self.depth.to_le_bytes());
        bytes.extend_from_slice(&self.mipmap_count.to_le_bytes());

        for &val in &self.reserved1 {
            bytes.extend_from_slice(&val.to_le_bytes());
        }

        bytes.extend_from_slice(&self.pixel_format.size.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.flags.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.fourcc);
        bytes.extend_from_slice(&self.pixel_format.rgb_bit_count.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.r_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.g_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.b_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.a_bit_mask.to_le_bytes());

        bytes.extend_from_slice(&self.caps.to_le_bytes());
        bytes.extend_from_slice(&self.caps2.to_le_bytes());
        bytes.extend_from_slice(&self.caps3.to_le_bytes());
        bytes.extend_from_slice(&self.caps4.to_le_bytes());
        bytes.extend_from_slice(&self.reserved2.to_le_bytes());

        bytes
    }
}

impl Dx10Extension {
    /// Extension values for BC7 2D textures.
    pub fn bc7() -> Self {
        Dx10Extension {
            dxgi_format: DXGI_FORMAT_BC7_UNORM,
            resource_dimension: D3D10_RESOURCE_DIMENSION_TEXTURE2D,
            misc_flag: 0,
            array_size: 1,
            misc_flags2: 0,
        }
    }

    /// Serialize to exactly 20 bytes.
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut bytes = [0u8; 20];
        bytes[0..4].copy_from_slice(&self.dxgi_format.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.resource_dimension.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.misc_flag.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.array_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.misc_flags2.to_le_bytes());
        bytes
    }
}

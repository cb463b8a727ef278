//! DDS header structures and flag constants.

/// DDS file header (124 bytes plus the 4-byte magic).
///
/// Field layout per the Microsoft DDS specification:
/// https://docs.microsoft.com/en-us/windows/win32/direct3ddds/dds-header
#[repr(C)]
#[derive(Debug, Clone)]
pub struct DdsHeader {
    /// Magic number: "DDS " (0x20534444)
    pub magic: [u8; 4],
    /// Size of structure (124 bytes)
    pub size: u32,
    /// Flags indicating which fields are valid
    pub flags: u32,
    /// Surface height in pixels (unpadded)
    pub height: u32,
    /// Surface width in pixels (unpadded)
    pub width: u32,
    /// Linear size of the base surface
    pub pitch_or_linear_size: u32,
    /// Depth for volume textures
    pub depth: u32,
    /// Number of mipmap levels
    pub mipmap_count: u32,
    /// Reserved
    pub reserved1: [u32; 11],
    /// Pixel format structure (32 bytes)
    pub pixel_format: DdsPixelFormat,
    /// Surface complexity capabilities
    pub caps: u32,
    /// Additional capabilities
    pub caps2: u32,
    /// Unused
    pub caps3: u32,
    /// Unused
    pub caps4: u32,
    /// Unused
    pub reserved2: u32,
}

/// DDS pixel format structure (32 bytes).
#[repr(C)]
#[derive(Debug, Clone)]
pub struct DdsPixelFormat {
    /// Size of structure (32 bytes)
    pub size: u32,
    /// Pixel format flags
    pub flags: u32,
    /// FourCC code (e.g., "DXT1", "DX10")
    pub fourcc: [u8; 4],
    /// RGB bit count
    pub rgb_bit_count: u32,
    /// Red bit mask
    pub r_bit_mask: u32,
    /// Green bit mask
    pub g_bit_mask: u32,
    /// Blue bit mask
    pub b_bit_mask: u32,
    /// Alpha bit mask
    pub a_bit_mask: u32,
}

/// DDS_HEADER_DXT10 extension (20 bytes), required for DX10-class formats.
#[repr(C)]
#[derive(Debug, Clone)]
pub struct Dx10Extension {
    pub dxgi_format: u32,
    pub resource_dimension: u32,
    pub misc_flag: u32,
    pub array_size: u32,
    pub misc_flags2: u32,
}

// DDS header flags (DDSD_*)
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
pub const DDSD_LINEARSIZE: u32 = 0x80000;

// DDS pixel format flags (DDPF_*)
pub const DDPF_FOURCC: u32 = 0x4;

// DDS caps flags (DDSCAPS_*)
pub const DDSCAPS_COMPLEX: u32 = 0x8;
pub const DDSCAPS_MIPMAP: u32 = 0x400000;
pub const DDSCAPS_TEXTURE: u32 = 0x1000;

// DXT10 extension values
pub const DXGI_FORMAT_BC7_UNORM: u32 = 98;
pub const D3D10_RESOURCE_DIMENSION_TEXTURE2D: u32 = 3;

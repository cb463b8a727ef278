//! DDS (DirectDraw Surface) container serialization.
//!
//! A DDS file starts with the 4-byte magic `"DDS "` followed by a 124-byte
//! header. DX10-class formats (BC7 here) add a 20-byte header extension
//! before the compressed surface data. Mipmap levels follow concatenated,
//! largest first.

mod header;
mod types;

pub use types::{DdsHeader, DdsPixelFormat, Dx10Extension};

//! ddspress - Batch PNG to DDS texture conversion
//!
//! This library converts collections of PNG images into block-compressed
//! DDS texture files (BC1 or BC7), optionally with full mipmap chains.
//! Conversion runs through a bounded multi-stage streaming pipeline designed
//! for throughput on many-core machines.
//!
//! # High-Level API
//!
//! ```ignore
//! use ddspress::{convert_files, ConvertOptions, TextureFormat};
//!
//! let files = vec![(src_png.into(), dst_dds.into())];
//! let options = ConvertOptions::new(TextureFormat::Bc7).with_verbose(true);
//! let summary = convert_files(files, &options).await?;
//! println!("{}/{} files converted", summary.written, summary.total);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Load -> Decode PNG + Mipmaps -> Reblock 4x4 -> Encode BC1/BC7 -> Write DDS
//! ```
//!
//! Loading is serial and ordered; every later stage runs in parallel across
//! files. A token budget bounds the number of files in flight, so peak
//! memory stays constant regardless of how many inputs are queued. Failed
//! files are isolated: they surface one error line each and never stop the
//! run.

pub mod blocks;
pub mod dds;
pub mod encode;
pub mod format;
pub mod mipmap;
pub mod pipeline;
pub mod png;
pub mod raster;

pub use format::{mip_dimension, mip_level_count, Quality, ResizeFilter, TextureFormat};
pub use pipeline::{convert_files, ConvertOptions, ConvertSummary, PipelineError};

/// File index reserved for work units whose source file has already failed.
///
/// Units carrying this index flow through the remaining pipeline stages
/// without triggering any computation or output.
pub const ERROR_FILE_INDEX: usize = usize::MAX;

/// Version of the ddspress library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

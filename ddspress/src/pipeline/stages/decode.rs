//! Decode stage: PNG bytes to a padded mipmap pyramid.

use crate::format::{ResizeFilter, TextureFormat};
use crate::pipeline::registry::{FileMetadata, FileRegistry};
use crate::pipeline::stages::RawFile;
use crate::pipeline::ErrorSink;
use crate::raster::MipmapImage;
use crate::{mipmap, png};
use std::sync::Arc;
use tracing::debug;

/// Decode-time settings fixed at pipeline construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DecodeConfig {
    pub vflip: bool,
    pub mipmaps: bool,
    pub filter: ResizeFilter,
    pub format: TextureFormat,
}

/// Decode a raw PNG buffer and build its mipmap pyramid.
///
/// Records the slot metadata on success. An empty buffer means the load
/// stage already reported a failure, so the sentinel is returned silently.
pub(crate) async fn decode(
    raw: RawFile,
    registry: &Arc<FileRegistry>,
    config: DecodeConfig,
    errors: &ErrorSink,
) -> MipmapImage {
    if raw.bytes.is_empty() {
        return MipmapImage::error();
    }

    let index = raw.file_index;
    let source = registry.slot(index).source.clone();

    let decoded = tokio::task::spawn_blocking(move || {
        let base = png::decode_png(&raw.bytes, config.vflip)?;
        let (width, height) = base.dimensions();
        let levels = mipmap::build_pyramid(base, config.mipmaps, config.filter);
        Ok::<_, image::ImageError>((width, height, levels))
    })
    .await;

    match decoded {
        Ok(Ok((width, height, levels))) => {
            registry.slot(index).set_metadata(FileMetadata {
                width,
                height,
                mipmap_count: levels.len() as u32,
                format: config.format,
            });
            debug!(
                file_index = index,
                width,
                height,
                levels = levels.len(),
                "decoded PNG"
            );
            MipmapImage {
                file_index: index,
                levels,
            }
        }
        Ok(Err(err)) => {
            errors.push(format!("PNG decoding error {}: {err}", source.display()));
            MipmapImage::error()
        }
        Err(join_err) => {
            errors.push(format!(
                "PNG decoding error {}: task panicked: {join_err}",
                source.display()
            ));
            MipmapImage::error()
        }
    }
}

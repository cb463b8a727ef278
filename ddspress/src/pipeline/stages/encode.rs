//! Encode stage: 4x4 tiles to BC1/BC7 blocks.

use crate::blocks::BlockImage;
use crate::encode::{BlockEncoder, EncodedImage};
use crate::pipeline::registry::FileRegistry;
use crate::pipeline::ErrorSink;
use std::sync::Arc;
use tracing::debug;

/// Compress every level of a block image with the shared encoder.
///
/// The kernel is assumed infallible on valid 4x4 input; a panic inside it
/// is caught at the blocking-task boundary and converted into an error push
/// plus a sentinel unit.
pub(crate) async fn encode(
    blocks: BlockImage,
    encoder: &Arc<BlockEncoder>,
    registry: &Arc<FileRegistry>,
    errors: &ErrorSink,
) -> EncodedImage {
    if blocks.is_error() {
        return EncodedImage::error(encoder.format());
    }

    let index = blocks.file_index;
    let shared = Arc::clone(encoder);
    let encoded = tokio::task::spawn_blocking(move || shared.encode(&blocks)).await;

    match encoded {
        Ok(image) => {
            debug!(
                file_index = index,
                format = %image.format,
                levels = image.levels.len(),
                "encoded image"
            );
            image
        }
        Err(join_err) => {
            errors.push(format!(
                "{} encoding error {}: {join_err}",
                encoder.format(),
                registry.slot(index).source.display()
            ));
            EncodedImage::error(encoder.format())
        }
    }
}

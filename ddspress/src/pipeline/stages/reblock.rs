//! Reblock stage: padded rasters to 4x4 tile buffers.

use crate::blocks::{BlockGrid, BlockImage};
use crate::pipeline::registry::FileRegistry;
use crate::pipeline::ErrorSink;
use crate::raster::MipmapImage;
use std::sync::Arc;

pub(crate) async fn reblock(
    image: MipmapImage,
    registry: &Arc<FileRegistry>,
    errors: &ErrorSink,
) -> BlockImage {
    if image.is_error() {
        return BlockImage::error();
    }

    let index = image.file_index;
    let reblocked = tokio::task::spawn_blocking(move || BlockImage {
        file_index: image.file_index,
        levels: image.levels.iter().map(BlockGrid::from_raster).collect(),
    })
    .await;

    match reblocked {
        Ok(blocks) => blocks,
        Err(join_err) => {
            errors.push(format!(
                "Pixel block conversion error {}: task panicked: {join_err}",
                registry.slot(index).source.display()
            ));
            BlockImage::error()
        }
    }
}

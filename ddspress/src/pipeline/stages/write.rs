//! Write stage: serialize encoded images to DDS files.

use crate::dds::{DdsHeader, Dx10Extension};
use crate::encode::EncodedImage;
use crate::pipeline::registry::FileRegistry;
use crate::pipeline::ErrorSink;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Write one DDS file: magic + header (+ DXT10 extension for BC7) + levels.
///
/// Sentinel units are skipped. On a write error the partial file may remain
/// on disk; the source is untouched either way.
pub(crate) async fn write(
    encoded: EncodedImage,
    registry: &Arc<FileRegistry>,
    errors: &ErrorSink,
    written: &Arc<AtomicUsize>,
) {
    if encoded.is_error() {
        return;
    }

    let slot = registry.slot(encoded.file_index);
    let Some(metadata) = slot.metadata() else {
        errors.push(format!(
            "DDS writing error {}: missing image metadata",
            slot.destination.display()
        ));
        return;
    };

    let header = DdsHeader::new(
        metadata.width,
        metadata.height,
        metadata.mipmap_count,
        encoded.format,
    );

    let result = async {
        let mut file = tokio::fs::File::create(&slot.destination).await?;
        file.write_all(&header.to_bytes()).await?;
        if encoded.format.has_dx10_header() {
            file.write_all(&Dx10Extension::bc7().to_bytes()).await?;
        }
        for level in &encoded.levels {
            file.write_all(level).await?;
        }
        file.flush().await
    }
    .await;

    match result {
        Ok(()) => {
            written.fetch_add(1, Ordering::AcqRel);
            debug!(
                file_index = encoded.file_index,
                destination = %slot.destination.display(),
                "wrote DDS file"
            );
        }
        Err(err) => {
            errors.push(format!(
                "DDS writing error {}: {err}",
                slot.destination.display()
            ));
        }
    }
}

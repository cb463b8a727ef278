//! Load stage: read source file bytes.

use crate::pipeline::registry::FileRegistry;
use crate::pipeline::ErrorSink;

/// Work unit produced by the load stage.
///
/// Empty `bytes` means the load already failed; the unit still flows so the
/// slot is consumed downstream and progress accounting stays consistent.
pub(crate) struct RawFile {
    pub bytes: Vec<u8>,
    pub file_index: usize,
}

/// Read the bytes of slot `index`.
///
/// Called from the single driver task, so reads happen one at a time and
/// units enter the pipeline in registry order.
pub(crate) async fn load(registry: &FileRegistry, index: usize, errors: &ErrorSink) -> RawFile {
    let slot = registry.slot(index);
    let bytes = match tokio::fs::read(&slot.source).await {
        Ok(bytes) if bytes.is_empty() => {
            errors.push(format!(
                "File loading error {}: file is empty",
                slot.source.display()
            ));
            Vec::new()
        }
        Ok(bytes) => bytes,
        Err(err) => {
            errors.push(format!(
                "File loading error {}: {err}",
                slot.source.display()
            ));
            Vec::new()
        }
    };

    RawFile {
        bytes,
        file_index: index,
    }
}

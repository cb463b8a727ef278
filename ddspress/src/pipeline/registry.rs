//! Shared per-file registry.
//!
//! One slot per input job, created before the pipeline starts and indexed by
//! the `file_index` carried inside every work unit. The metadata of slot `i`
//! is written once by the decode stage and read by the writer for the same
//! `i`; no two in-flight units share an index, so there is no contention.

use crate::format::TextureFormat;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Image properties recorded by the decode stage.
#[derive(Debug, Clone, Copy)]
pub struct FileMetadata {
    pub width: u32,
    pub height: u32,
    pub mipmap_count: u32,
    pub format: TextureFormat,
}

/// One input job: source, destination, and write-once metadata.
#[derive(Debug)]
pub struct FileSlot {
    pub source: PathBuf,
    pub destination: PathBuf,
    metadata: OnceLock<FileMetadata>,
}

impl FileSlot {
    fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
            metadata: OnceLock::new(),
        }
    }

    /// Record the decoded image properties. Written once per slot.
    pub fn set_metadata(&self, metadata: FileMetadata) {
        let _ = self.metadata.set(metadata);
    }

    /// Metadata, if the decode stage reached this slot.
    pub fn metadata(&self) -> Option<&FileMetadata> {
        self.metadata.get()
    }
}

/// Ordered, shared registry of every input job.
#[derive(Debug)]
pub struct FileRegistry {
    slots: Vec<FileSlot>,
}

impl FileRegistry {
    pub fn new(files: Vec<(PathBuf, PathBuf)>) -> Self {
        Self {
            slots: files
                .into_iter()
                .map(|(source, destination)| FileSlot::new(source, destination))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> &FileSlot {
        &self.slots[index]
    }
}

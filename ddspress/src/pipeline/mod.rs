//! Bounded multi-stage conversion pipeline.
//!
//! # Architecture
//!
//! ```text
//! Load -> Decode PNG + Mipmaps -> Reblock 4x4 -> Encode BC1/BC7 -> Write DDS
//! ```
//!
//! A single driver task performs the Load stage serially and in submission
//! order. Before reading each file it acquires one token from a semaphore
//! sized to the in-flight budget, then spawns a task that carries the unit
//! through the remaining stages; the token is released when the unit exits
//! the writer. Slow encoders therefore throttle loading automatically, and
//! peak memory is bounded by the token budget rather than the input count.
//!
//! Per-file failures are pushed onto a shared error channel and replaced by
//! sentinel units that flow through the remaining stages without computing
//! anything, so one bad file never stops the run.

mod error;
mod progress;
pub mod registry;
mod stages;

pub use error::PipelineError;
pub use registry::{FileMetadata, FileRegistry, FileSlot};

use crate::encode::BlockEncoder;
use crate::format::{Quality, ResizeFilter, TextureFormat};
use stages::DecodeConfig;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::debug;

/// Multi-producer handle onto the error channel.
///
/// The channel is the only sink through which stages report recoverable
/// failures. Pushing never blocks; a closed channel drops the message.
#[derive(Clone)]
pub(crate) struct ErrorSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ErrorSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    pub(crate) fn push(&self, message: String) {
        let _ = self.tx.send(message);
    }
}

/// Conversion settings, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    format: TextureFormat,
    quality: Quality,
    parallelism: usize,
    tokens: Option<usize>,
    mipmaps: bool,
    vflip: bool,
    filter: ResizeFilter,
    verbose: bool,
}

impl ConvertOptions {
    /// Defaults: hardware parallelism, `2 x parallelism` tokens, mipmaps
    /// enabled, no flip, Lanczos filter, quiet.
    pub fn new(format: TextureFormat) -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self {
            format,
            quality: Quality::default(),
            parallelism,
            tokens: None,
            mipmaps: true,
            vflip: false,
            filter: ResizeFilter::Lanczos,
            verbose: false,
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Override the in-flight budget (defaults to `2 x parallelism`).
    pub fn with_tokens(mut self, tokens: usize) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn without_mipmaps(mut self) -> Self {
        self.mipmaps = false;
        self
    }

    pub fn with_vflip(mut self, vflip: bool) -> Self {
        self.vflip = vflip;
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Enable the live progress reporter.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The effective in-flight budget.
    pub fn tokens(&self) -> usize {
        self.tokens.unwrap_or(2 * self.parallelism)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.parallelism == 0 {
            return Err(PipelineError::InvalidConfig(
                "parallelism must be positive".to_string(),
            ));
        }
        if self.tokens() == 0 {
            return Err(PipelineError::InvalidConfig(
                "token budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Number of input files.
    pub total: usize,
    /// Files that produced a DDS on disk.
    pub written: usize,
    /// Files dropped by a per-file error.
    pub failed: usize,
}

/// Convert every `(source, destination)` pair to a DDS file.
///
/// Runs on the ambient tokio runtime; size its worker threads to the wanted
/// CPU parallelism. Per-file failures are reported (progress reporter when
/// verbose, stderr drain otherwise) and reflected in the summary; only
/// invalid configuration or runtime-level failures return `Err`.
pub async fn convert_files(
    files: Vec<(PathBuf, PathBuf)>,
    options: &ConvertOptions,
) -> Result<ConvertSummary, PipelineError> {
    options.validate()?;

    let total = files.len();
    let registry = Arc::new(FileRegistry::new(files));
    let encoder = Arc::new(BlockEncoder::new(options.format, options.quality));
    let decode_config = DecodeConfig {
        vflip: options.vflip,
        mipmaps: options.mipmaps,
        filter: options.filter,
        format: options.format,
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let errors = ErrorSink::new(tx);
    let attempted = Arc::new(AtomicUsize::new(0));
    let written = Arc::new(AtomicUsize::new(0));
    let budget = Arc::new(Semaphore::new(options.tokens()));

    debug!(
        total,
        format = %options.format,
        tokens = options.tokens(),
        "starting conversion pipeline"
    );

    let (reporter, mut local_rx) = if options.verbose {
        let handle = tokio::spawn(progress::report(total, Arc::clone(&attempted), rx));
        (Some(handle), None)
    } else {
        (None, Some(rx))
    };

    let mut units = JoinSet::new();
    for index in 0..registry.len() {
        let permit = Arc::clone(&budget)
            .acquire_owned()
            .await
            .map_err(|err| PipelineError::Internal(format!("token budget closed: {err}")))?;

        // Serial-ordered load: one read at a time, registry order.
        let raw = stages::load(&registry, index, &errors).await;

        let registry = Arc::clone(&registry);
        let encoder = Arc::clone(&encoder);
        let errors = errors.clone();
        let attempted = Arc::clone(&attempted);
        let written = Arc::clone(&written);
        units.spawn(async move {
            let _permit = permit;
            let mip = stages::decode(raw, &registry, decode_config, &errors).await;
            let blocks = stages::reblock(mip, &registry, &errors).await;
            let encoded = stages::encode(blocks, &encoder, &registry, &errors).await;
            stages::write(encoded, &registry, &errors, &written).await;
            attempted.fetch_add(1, Ordering::AcqRel);
        });
    }

    while let Some(joined) = units.join_next().await {
        if let Err(err) = joined {
            // Keep accounting consistent so the reporter still terminates.
            errors.push(format!("Internal error: conversion task failed: {err}"));
            attempted.fetch_add(1, Ordering::AcqRel);
        }
    }

    drop(errors);
    if let Some(handle) = reporter {
        handle
            .await
            .map_err(|err| PipelineError::Internal(format!("progress reporter failed: {err}")))?;
    }
    if let Some(rx) = local_rx.as_mut() {
        while let Ok(message) = rx.try_recv() {
            eprintln!("{message}");
        }
    }

    let written = written.load(Ordering::Acquire);
    debug!(total, written, "conversion pipeline finished");
    Ok(ConvertSummary {
        total,
        written,
        failed: total - written,
    })
}

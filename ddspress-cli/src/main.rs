//! ddspress CLI - batch PNG to DDS conversion.
//!
//! Collects PNG files from a file or directory argument, mirrors the source
//! tree into the output directory, and runs the conversion pipeline on a
//! runtime sized to the requested thread count.
//!
//! Diagnostics go through `tracing` to stderr (`RUST_LOG` controls the
//! filter); the progress line owns stdout so the two never interleave.

mod error;

use clap::{Parser, ValueEnum};
use ddspress::{convert_files, ConvertOptions, Quality, ResizeFilter, TextureFormat};
use error::CliError;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// BC1/DXT1: 8 bytes per block, opaque textures
    Bc1,
    /// BC7: 16 bytes per block, full RGBA, much slower
    Bc7,
}

impl From<FormatArg> for TextureFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Bc1 => TextureFormat::Bc1,
            FormatArg::Bc7 => TextureFormat::Bc7,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    Nearest,
    Bilinear,
    Bicubic,
    Area,
    Lanczos,
}

impl From<FilterArg> for ResizeFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::Nearest => ResizeFilter::Nearest,
            FilterArg::Bilinear => ResizeFilter::Bilinear,
            FilterArg::Bicubic => ResizeFilter::Bicubic,
            FilterArg::Area => ResizeFilter::Area,
            FilterArg::Lanczos => ResizeFilter::Lanczos,
        }
    }
}

#[derive(Parser)]
#[command(name = "ddspress")]
#[command(version = ddspress::VERSION)]
#[command(about = "Batch PNG to DDS texture converter", long_about = None)]
struct Cli {
    /// PNG file or directory to convert (directories are searched recursively)
    input: PathBuf,

    /// Output directory (defaults to writing next to each input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Block compression format
    #[arg(long, value_enum, default_value = "bc7")]
    format: FormatArg,

    /// Encoder quality level (0 = fastest, 6 = slowest; BC7 only)
    #[arg(long, default_value_t = 3)]
    quality: u8,

    /// Skip mipmap generation
    #[arg(long)]
    no_mipmaps: bool,

    /// Flip images vertically while decoding
    #[arg(long)]
    vflip: bool,

    /// Mipmap resampling filter
    #[arg(long, value_enum, default_value = "lanczos")]
    filter: FilterArg,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Maximum files in flight (defaults to 2x threads)
    #[arg(long)]
    tokens: Option<usize>,

    /// Print live progress and per-file errors
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        err.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let quality = Quality::new(cli.quality).ok_or_else(|| {
        CliError::Config(format!("quality must be between 0 and {}", Quality::MAX))
    })?;
    let threads = cli.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
    });
    if threads == 0 {
        return Err(CliError::Config("--threads must be positive".to_string()));
    }

    let files = collect_files(&cli.input, cli.output.as_deref())?;
    if files.is_empty() {
        return Err(CliError::NoInputs(cli.input));
    }

    let mut options = ConvertOptions::new(cli.format.into())
        .with_quality(quality)
        .with_parallelism(threads)
        .with_vflip(cli.vflip)
        .with_filter(cli.filter.into())
        .with_verbose(cli.verbose);
    if cli.no_mipmaps {
        options = options.without_mipmaps();
    }
    if let Some(tokens) = cli.tokens {
        options = options.with_tokens(tokens);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let summary = runtime
        .block_on(convert_files(files, &options))
        .map_err(CliError::Pipeline)?;
    tracing::info!(
        total = summary.total,
        written = summary.written,
        failed = summary.failed,
        "conversion finished"
    );

    if summary.written == 0 && summary.total > 0 {
        return Err(CliError::AllFailed {
            total: summary.total,
        });
    }
    Ok(())
}

/// Collect `(source, destination)` pairs for a file or directory input.
///
/// Directory inputs are searched recursively for `.png` files (extension
/// match is case-insensitive) and sorted so runs are deterministic. The
/// destination mirrors the source tree under `output`, swapping the
/// extension for `.dds`; parent directories are created up front.
fn collect_files(
    input: &Path,
    output: Option<&Path>,
) -> Result<Vec<(PathBuf, PathBuf)>, CliError> {
    let mut sources = Vec::new();
    if input.is_dir() {
        collect_png_sources(input, &mut sources)?;
        sources.sort();
    } else {
        sources.push(input.to_path_buf());
    }

    let mut files = Vec::with_capacity(sources.len());
    for source in sources {
        let destination = match output {
            Some(output_dir) => {
                let relative = if input.is_dir() {
                    source.strip_prefix(input).unwrap_or(&source)
                } else {
                    Path::new(source.file_name().unwrap_or(source.as_os_str()))
                };
                output_dir.join(relative).with_extension("dds")
            }
            None => source.with_extension("dds"),
        };

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|error| CliError::OutputDir {
                    path: parent.to_path_buf(),
                    error,
                })?;
            }
        }
        files.push((source, destination));
    }
    Ok(files)
}

fn collect_png_sources(dir: &Path, sources: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let entries = std::fs::read_dir(dir).map_err(|error| CliError::Walk {
        path: dir.to_path_buf(),
        error,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_png_sources(&path, sources)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
        {
            sources.push(path);
        }
    }
    Ok(())
}

//! CLI error handling with user-friendly messages.

use ddspress::PipelineError;
use std::fmt;
use std::path::PathBuf;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Invalid argument combination or value
    Config(String),
    /// No PNG files found under the input path
    NoInputs(PathBuf),
    /// Failed to walk the input directory
    Walk { path: PathBuf, error: std::io::Error },
    /// Failed to create an output directory
    OutputDir { path: PathBuf, error: std::io::Error },
    /// Failed to build the tokio runtime
    Runtime(std::io::Error),
    /// The pipeline refused to run
    Pipeline(PipelineError),
    /// Every input file failed to convert
    AllFailed { total: usize },
}

impl CliError {
    /// Exit the process with an error message and a non-zero code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::NoInputs(path) => {
                write!(f, "No PNG files found under '{}'", path.display())
            }
            CliError::Walk { path, error } => {
                write!(f, "Failed to read directory '{}': {}", path.display(), error)
            }
            CliError::OutputDir { path, error } => {
                write!(
                    f,
                    "Failed to create output directory '{}': {}",
                    path.display(),
                    error
                )
            }
            CliError::Runtime(error) => write!(f, "Failed to start runtime: {}", error),
            CliError::Pipeline(error) => write!(f, "Conversion failed: {}", error),
            CliError::AllFailed { total } => {
                write!(f, "All {} input files failed to convert", total)
            }
        }
    }
}

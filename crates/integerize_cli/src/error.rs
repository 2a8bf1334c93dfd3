//! CLI error types.

use integerize_core::config::ConfigError;
use integerize_core::types::{IntegerizeError, ValidationError};
use integerize_core::verify::VerificationError;
use thiserror::Error;

/// Errors raised by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A job or configuration file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File being parsed
        path: String,
        /// Parser message
        message: String,
    },

    /// A command-line or environment value is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine rejected the job.
    #[error(transparent)]
    Integerize(#[from] IntegerizeError),

    /// A produced result does not meet its controls.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// Serialising the results failed.
    #[error("Failed to serialise results: {0}")]
    Serialise(#[from] serde_json::Error),

    /// Some jobs of a batch failed; their errors are in the output.
    #[error("{failed} of {total} batch jobs failed")]
    BatchFailures {
        /// Jobs that returned an error
        failed: usize,
        /// Jobs in the batch
        total: usize,
    },
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::InvalidArgument(err.to_string())
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

//! Error types for the f1tel CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Input not found: {0}")]
    InputNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to write output {0}")]
    OutputWrite(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InputNotFound(_) => 2,
            CliError::InvalidConfiguration(_) => 3,
            CliError::OutputWrite(_) => 4,
            CliError::IoError(_) | CliError::JsonError(_) => 1,
        }
    }
}

/// Exit code for any error returned by a command.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    error.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

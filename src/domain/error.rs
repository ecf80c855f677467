//! Domain error types

use thiserror::Error;

/// Error when an unknown task status string is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid status: \"{input}\". Valid statuses are: OPEN, PAUSE, CONTINUE, IMPORTANT, CLOSE")]
pub struct InvalidStatusError {
    pub input: String,
}

/// Error when a stopped session accumulated no data.
/// The assembler refuses to emit an artifact with no payload.
#[derive(Debug, Clone, Error)]
#[error("Recording for task {task_id} produced no data")]
pub struct EmptyRecording {
    pub task_id: u64,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Profile file not found
    #[error("Profile file not found: {path}")]
    ConfigNotFound { path: String },

    /// Profile parsing error
    #[error("Failed to parse profile: {message}")]
    ConfigParse { message: String },

    /// Profile validation error
    #[error("Profile validation failed: {message}")]
    ConfigValidation { message: String },

    /// Source construction error
    #[error("Failed to build source '{source_id}': {message}")]
    SourceBuild { source_id: String, message: String },

    /// Session execution error
    #[error("Session execution failed: {message}")]
    SessionExecution { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

#[allow(dead_code)]
impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    pub fn source_build(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceBuild {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    pub fn session_execution(message: impl Into<String>) -> Self {
        Self::SessionExecution {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, CliError>;

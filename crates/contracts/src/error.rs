//! Layered error definitions
//!
//! Categorized by source: config / source / replay / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum BridgeError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Source unavailable
    #[error("position source '{source_id}' unavailable: {message}")]
    SourceUnavailable { source_id: String, message: String },

    /// Snapshot read error
    #[error("snapshot read failed for source '{source_id}': {message}")]
    SnapshotRead { source_id: String, message: String },

    // ===== Replay Errors =====
    /// Replay recording load error
    #[error("replay load error for '{path}': {message}")]
    ReplayLoad { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source-unavailable error
    pub fn source_unavailable(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create snapshot-read error
    pub fn snapshot_read(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SnapshotRead {
            source_id: source_id.into(),
            message: message.into(),
        }
    }

    /// Create replay-load error
    pub fn replay_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReplayLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

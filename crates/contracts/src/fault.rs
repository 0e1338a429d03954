//! PositionFault - error record delivered to fault callbacks

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a delivered fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCode {
    /// The source handle is gone or refuses to answer
    SourceUnavailable,

    /// A snapshot read failed while handling a change notification
    SnapshotRead,
}

/// Error record passed to fault callbacks.
///
/// Mirrors the shape of [`PositionFix`](crate::PositionFix) deliveries: the
/// consumer gets an owned value with a machine-checkable code and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFault {
    /// Fault category
    pub code: FaultCode,

    /// Human-readable description
    pub message: String,
}

impl PositionFault {
    /// Create a fault with the given code and message.
    pub fn new(code: FaultCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a source-unavailable fault.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::new(FaultCode::SourceUnavailable, message)
    }

    /// Create a snapshot-read fault.
    pub fn snapshot_read(message: impl Into<String>) -> Self {
        Self::new(FaultCode::SnapshotRead, message)
    }
}

impl fmt::Display for PositionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_code() {
        let fault = PositionFault::snapshot_read("store poisoned");
        assert_eq!(fault.code, FaultCode::SnapshotRead);
        assert_eq!(fault.message, "store poisoned");

        let fault = PositionFault::source_unavailable("gone");
        assert_eq!(fault.code, FaultCode::SourceUnavailable);
    }

    #[test]
    fn test_display_includes_message() {
        let fault = PositionFault::snapshot_read("boom");
        assert!(fault.to_string().contains("boom"));
    }
}

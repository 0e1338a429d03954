//! PositionSource trait - position data source abstraction
//!
//! Defines a unified interface for position sources, decoupling the bridge
//! from concrete sensor implementations. Supports unified handling of mock,
//! replay and externally fed sources.

use std::sync::Arc;

use crate::{BridgeError, FieldSet, PositionFault, PositionFix, PositionSnapshot};

/// Change-notification callback type
///
/// When a source updates one or more tracked fields, it announces the set of
/// changed fields through this callback. Uses `Arc` to allow callback sharing
/// across multiple contexts.
pub type ChangeCallback = Arc<dyn Fn(FieldSet) + Send + Sync>;

/// Success callback type for fix deliveries.
pub type FixCallback = Arc<dyn Fn(PositionFix) + Send + Sync>;

/// Fault callback type for error deliveries.
pub type FaultCallback = Arc<dyn Fn(PositionFault) + Send + Sync>;

/// Position data source trait
///
/// Abstracts the common behavior of mock, replay and externally fed sources.
/// All position sources implement this trait for use by the bridge.
///
/// # Design Principles
///
/// 1. **Decoupling**: the source knows nothing about pending requests or
///    watches; it only announces changes
/// 2. **Snapshot read**: consumers pull a full snapshot after a notification
///    instead of decoding per-field payloads
/// 3. **Idempotent listen**: calling `listen` while already listening
///    registers no additional callbacks
///
/// # Example
///
/// ```ignore
/// let source: Arc<dyn PositionSource> = build_source();
/// source.listen(Arc::new(|changed| {
///     println!("changed fields: {changed}");
/// }));
/// let snapshot = source.read_snapshot()?;
/// source.stop();
/// ```
pub trait PositionSource: Send + Sync {
    /// Get source ID
    fn source_id(&self) -> &str;

    /// Read the current values of all tracked fields.
    ///
    /// # Errors
    /// Returns [`BridgeError::SnapshotRead`] when the source cannot produce a
    /// consistent snapshot, or [`BridgeError::SourceUnavailable`] when the
    /// backing handle is gone.
    fn read_snapshot(&self) -> Result<PositionSnapshot, BridgeError>;

    /// Register the change-notification callback.
    ///
    /// When the source updates tracked fields, it calls the callback with the
    /// set of changed fields. If already listening, repeated calls are
    /// idempotent (won't register multiple callbacks).
    fn listen(&self, callback: ChangeCallback);

    /// Stop emitting change notifications.
    ///
    /// For generator sources this stops the background thread. Must not be
    /// called from inside the change callback; sources may join their emitter
    /// thread here.
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}

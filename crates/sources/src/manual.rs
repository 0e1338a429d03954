//! Manual position source
//!
//! Hand-driven `PositionSource` for tests and externally fed deployments:
//! the owner stages values and decides when a change notification fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use contracts::{BridgeError, ChangeCallback, FieldSet, PositionSnapshot, PositionSource};
use tracing::trace;

use crate::store::SharedPositionStore;

/// Hand-driven position source.
///
/// `update` stages values and announces them in one step; `stage` and `emit`
/// split the two for tests that need to control ordering. `fail_next_read`
/// makes the next snapshot read fail, for exercising fault delivery.
pub struct ManualPositionSource {
    source_id: String,
    store: Arc<SharedPositionStore>,
    listening: Arc<AtomicBool>,
    callback: Mutex<Option<ChangeCallback>>,
    fail_next_read: AtomicBool,
}

impl ManualPositionSource {
    /// Create a manual source with all values at zero.
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            store: Arc::new(SharedPositionStore::new()),
            listening: Arc::new(AtomicBool::new(false)),
            callback: Mutex::new(None),
            fail_next_read: AtomicBool::new(false),
        }
    }

    /// Stage the listed fields from `snapshot` without announcing them.
    pub fn stage(&self, snapshot: &PositionSnapshot, fields: FieldSet) {
        self.store.apply(snapshot, fields);
    }

    /// Announce a change for the given fields.
    pub fn emit(&self, changed: FieldSet) {
        let callback = self.callback.lock().unwrap().clone();
        match callback {
            Some(cb) if self.is_listening() => cb(changed),
            _ => trace!(source_id = %self.source_id, "emit with no listener"),
        }
    }

    /// Stage and announce in one step.
    pub fn update(&self, snapshot: &PositionSnapshot, fields: FieldSet) {
        self.stage(snapshot, fields);
        self.emit(fields);
    }

    /// Make the next `read_snapshot` call fail.
    pub fn fail_next_read(&self) {
        self.fail_next_read.store(true, Ordering::SeqCst);
    }
}

impl PositionSource for ManualPositionSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn read_snapshot(&self) -> Result<PositionSnapshot, BridgeError> {
        if self.fail_next_read.swap(false, Ordering::SeqCst) {
            return Err(BridgeError::snapshot_read(
                &self.source_id,
                "injected read failure",
            ));
        }
        self.store
            .try_snapshot()
            .map_err(|msg| BridgeError::snapshot_read(&self.source_id, msg))
    }

    fn listen(&self, callback: ChangeCallback) {
        // Idempotent: the first registered callback wins
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }
        *self.callback.lock().unwrap() = Some(callback);
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
        self.callback.lock().unwrap().take();
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

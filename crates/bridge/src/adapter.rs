//! PositionBridge - one-shot and watch delivery over a position source

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use contracts::{
    BridgeError, FaultCallback, FieldSet, FixCallback, PositionFault, PositionField, PositionFix,
    PositionSnapshot, PositionSource, RequestOptions,
};
use tracing::{debug, trace, warn};

use crate::metrics::BridgeMetrics;
use crate::rounding::{round_to, ALTITUDE_DECIMALS, COORDINATE_DECIMALS, SPEED_DECIMALS};

/// Callback pair held by one delivery slot
#[derive(Clone)]
struct Delivery {
    on_fix: FixCallback,
    on_fault: Option<FaultCallback>,
}

/// Mutable bridge state: the accumulated fix and the two delivery slots
#[derive(Default)]
struct SlotState {
    fix: PositionFix,
    pending: Option<Delivery>,
    watch: Option<Delivery>,
}

struct Inner {
    source: Arc<dyn PositionSource>,
    state: Mutex<SlotState>,
    armed: AtomicBool,
    metrics: Arc<BridgeMetrics>,
}

/// Bridges a [`PositionSource`] to one-shot and watch consumers.
///
/// Each bridge instance owns its own fix record and delivery slots; multiple
/// independent bridges can run in one process. At most one pending one-shot
/// and one watch registration exist per bridge at a time; a newer registration
/// silently replaces the older one.
///
/// The bridge arms the source subscription when either registration style is
/// requested and tears it down on [`clear_watch`](Self::clear_watch) (unless a
/// one-shot is still pending) or [`shutdown`](Self::shutdown). A pending
/// one-shot that never sees a change notification never resolves; there is no
/// timeout.
pub struct PositionBridge {
    inner: Arc<Inner>,
}

impl PositionBridge {
    /// Bind a bridge to its source.
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(SlotState::default()),
                armed: AtomicBool::new(false),
                metrics: Arc::new(BridgeMetrics::new()),
            }),
        }
    }

    /// ID of the bound source.
    pub fn source_id(&self) -> &str {
        self.inner.source.source_id()
    }

    /// Request a single fix.
    ///
    /// `on_fix` is invoked exactly once, on the next change notification from
    /// the source. A second request issued before the first resolves replaces
    /// it; the replaced callbacks are never invoked. `options` is accepted for
    /// API compatibility and does not affect delivery.
    pub fn get_current_position(
        &self,
        on_fix: FixCallback,
        on_fault: Option<FaultCallback>,
        options: RequestOptions,
    ) {
        trace!(source_id = %self.source_id(), options = ?options, "one-shot registered");

        {
            let mut state = self.inner.state.lock().unwrap();
            if state.pending.is_some() {
                debug!(source_id = %self.source_id(), "replacing unresolved one-shot request");
            }
            state.pending = Some(Delivery { on_fix, on_fault });
        }

        self.arm();
    }

    /// Register a continuous watch.
    ///
    /// `on_fix` is invoked once per change notification until
    /// [`clear_watch`](Self::clear_watch). A second registration replaces the
    /// first. `options` is accepted for API compatibility and does not affect
    /// delivery.
    pub fn watch_position(
        &self,
        on_fix: FixCallback,
        on_fault: Option<FaultCallback>,
        options: RequestOptions,
    ) {
        trace!(source_id = %self.source_id(), options = ?options, "watch registered");

        {
            let mut state = self.inner.state.lock().unwrap();
            if state.watch.is_some() {
                debug!(source_id = %self.source_id(), "replacing active watch");
            }
            state.watch = Some(Delivery { on_fix, on_fault });
        }

        self.arm();
    }

    /// Drop the watch registration.
    ///
    /// Tears down the source subscription unless a one-shot request is still
    /// pending. Calling without an active watch is a no-op. Must not be called
    /// from inside a delivery callback; the source may join its emitter thread
    /// while stopping.
    pub fn clear_watch(&self) {
        let keep_armed = {
            let mut state = self.inner.state.lock().unwrap();
            if state.watch.take().is_some() {
                debug!(source_id = %self.source_id(), "watch cleared");
            }
            state.pending.is_some()
        };

        if !keep_armed {
            self.disarm();
        }
    }

    /// Drop both delivery slots and tear down the source subscription.
    pub fn shutdown(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            state.pending = None;
            state.watch = None;
        }
        self.disarm();
        debug!(source_id = %self.source_id(), "bridge shut down");
    }

    /// Copy of the accumulated fix record.
    pub fn last_fix(&self) -> PositionFix {
        self.inner.state.lock().unwrap().fix
    }

    /// Whether a watch registration is active.
    pub fn is_watching(&self) -> bool {
        self.inner.state.lock().unwrap().watch.is_some()
    }

    /// Shared delivery metrics.
    pub fn metrics(&self) -> Arc<BridgeMetrics> {
        self.inner.metrics.clone()
    }

    /// Arm the source subscription (idempotent).
    fn arm(&self) {
        if self.inner.armed.swap(true, Ordering::SeqCst) {
            return;
        }

        debug!(source_id = %self.source_id(), "arming source subscription");

        let inner = Arc::clone(&self.inner);
        self.inner.source.listen(Arc::new(move |changed| {
            Inner::on_change(&inner, changed);
        }));
    }

    /// Tear down the source subscription (idempotent).
    fn disarm(&self) {
        if self.inner.armed.swap(false, Ordering::SeqCst) {
            debug!(source_id = %self.source_id(), "disarming source subscription");
            self.inner.source.stop();
        }
    }
}

impl Inner {
    /// Handle one change notification from the source.
    fn on_change(inner: &Arc<Inner>, changed: FieldSet) {
        if !inner.armed.load(Ordering::Relaxed) {
            return;
        }

        inner.metrics.record_notification();
        trace!(changed = %changed, "change notification received");

        let snapshot = match inner.source.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(source_id = %inner.source.source_id(), error = %e, "snapshot read failed");
                let fault = match &e {
                    BridgeError::SourceUnavailable { .. } => {
                        PositionFault::source_unavailable(e.to_string())
                    }
                    _ => PositionFault::snapshot_read(e.to_string()),
                };
                Self::deliver_fault(inner, fault);
                return;
            }
        };

        // Update under the lock, deliver outside it so callbacks may
        // re-register without deadlocking.
        let (fix, pending, watch) = {
            let mut state = inner.state.lock().unwrap();
            apply_changed(&mut state.fix, &snapshot, changed);
            (state.fix, state.pending.take(), state.watch.clone())
        };

        if let Some(delivery) = pending {
            inner.metrics.record_one_shot_fix();
            trace!("delivering one-shot fix");
            (delivery.on_fix)(fix);
        }

        if let Some(delivery) = watch {
            inner.metrics.record_watch_fix();
            trace!("delivering watch fix");
            (delivery.on_fix)(fix);
        }
    }

    /// Deliver a fault to the pending one-shot (consuming it) and the watch.
    fn deliver_fault(inner: &Arc<Inner>, fault: PositionFault) {
        let (pending, watch) = {
            let mut state = inner.state.lock().unwrap();
            (state.pending.take(), state.watch.clone())
        };

        for delivery in pending.into_iter().chain(watch) {
            inner.metrics.record_fault();
            match delivery.on_fault {
                Some(on_fault) => on_fault(fault.clone()),
                None => warn!(fault = %fault, "fault dropped: no fault callback registered"),
            }
        }
    }
}

/// Copy the announced fields from the snapshot into the fix, rounding to the
/// fixed decimal precision.
fn apply_changed(fix: &mut PositionFix, snapshot: &PositionSnapshot, changed: FieldSet) {
    if changed.contains(PositionField::Latitude) {
        fix.latitude = round_to(snapshot.latitude, COORDINATE_DECIMALS);
    }
    if changed.contains(PositionField::Longitude) {
        fix.longitude = round_to(snapshot.longitude, COORDINATE_DECIMALS);
    }
    if changed.contains(PositionField::Altitude) {
        fix.altitude = round_to(snapshot.altitude, ALTITUDE_DECIMALS);
    }
    if changed.contains(PositionField::Speed) {
        fix.speed = round_to(snapshot.speed, SPEED_DECIMALS);
    }
}

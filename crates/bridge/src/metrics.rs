//! Delivery metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Bridge delivery metrics
#[derive(Debug, Default)]
pub struct BridgeMetrics {
    /// Change notifications received from the source
    pub notifications_received: AtomicU64,

    /// One-shot fixes delivered
    pub one_shot_fixes: AtomicU64,

    /// Watch fixes delivered
    pub watch_fixes: AtomicU64,

    /// Faults delivered (or dropped for lack of a fault callback)
    pub faults: AtomicU64,
}

impl BridgeMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change notification
    pub fn record_notification(&self) {
        self.notifications_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delivered one-shot fix
    pub fn record_one_shot_fix(&self) {
        self.one_shot_fixes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a delivered watch fix
    pub fn record_watch_fix(&self) {
        self.watch_fixes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fault delivery
    pub fn record_fault(&self) {
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> BridgeMetricsSnapshot {
        BridgeMetricsSnapshot {
            notifications_received: self.notifications_received.load(Ordering::Relaxed),
            one_shot_fixes: self.one_shot_fixes.load(Ordering::Relaxed),
            watch_fixes: self.watch_fixes.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeMetricsSnapshot {
    /// Change notifications received from the source
    pub notifications_received: u64,

    /// One-shot fixes delivered
    pub one_shot_fixes: u64,

    /// Watch fixes delivered
    pub watch_fixes: u64,

    /// Faults delivered
    pub faults: u64,
}

//! Delivery metrics recording
//!
//! Prometheus-facing counters plus an in-memory aggregator for the
//! end-of-session summary.

use contracts::{FaultCode, PositionFix};
use metrics::{counter, gauge, histogram};

/// Record a change notification from a source
pub fn record_notification(source_id: &str) {
    counter!(
        "position_bridge_notifications_total",
        "source_id" => source_id.to_string()
    )
    .increment(1);
}

/// Record a delivered fix
///
/// `kind` is `"one_shot"` or `"watch"`.
pub fn record_fix_delivered(source_id: &str, kind: &str, fix: &PositionFix) {
    counter!(
        "position_bridge_fixes_total",
        "source_id" => source_id.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);

    gauge!("position_bridge_last_latitude").set(fix.latitude);
    gauge!("position_bridge_last_longitude").set(fix.longitude);
    gauge!("position_bridge_last_speed").set(fix.speed);
}

/// Record a delivered fault
pub fn record_fault(source_id: &str, code: FaultCode) {
    counter!(
        "position_bridge_faults_total",
        "source_id" => source_id.to_string(),
        "code" => format!("{code:?}")
    )
    .increment(1);
}

/// Record the interval between consecutive watch fixes
pub fn record_fix_interval_ms(interval_ms: f64) {
    histogram!("position_bridge_fix_interval_ms").record(interval_ms);
}

/// Running statistics (count / mean / min / max)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one value
    pub fn record(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            self.min = value;
            self.max = value;
        } else {
            self.mean += (value - self.mean) / self.count as f64;
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Number of recorded values
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Summary of the recorded values
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            count: self.count,
            mean: self.mean,
            min: if self.count > 0 { self.min } else { 0.0 },
            max: if self.count > 0 { self.max } else { 0.0 },
        }
    }
}

/// Immutable statistics summary
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Delivery aggregator
///
/// Aggregates deliveries in memory so the CLI can print a summary without
/// scraping the prometheus endpoint.
#[derive(Debug, Clone, Default)]
pub struct DeliveryAggregator {
    /// One-shot fixes delivered
    pub one_shot_fixes: u64,

    /// Watch fixes delivered
    pub watch_fixes: u64,

    /// Faults delivered
    pub faults: u64,

    /// Inter-fix interval statistics (milliseconds)
    pub interval_stats: RunningStats,
}

impl DeliveryAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a one-shot fix delivery
    pub fn record_one_shot(&mut self) {
        self.one_shot_fixes += 1;
    }

    /// Record a watch fix delivery, with the interval since the previous one
    pub fn record_watch(&mut self, interval_ms: Option<f64>) {
        self.watch_fixes += 1;
        if let Some(interval_ms) = interval_ms {
            self.interval_stats.record(interval_ms);
            record_fix_interval_ms(interval_ms);
        }
    }

    /// Record a fault delivery
    pub fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// Total fixes delivered
    pub fn total_fixes(&self) -> u64 {
        self.one_shot_fixes + self.watch_fixes
    }

    /// Summary for printing
    pub fn summary(&self) -> DeliverySummary {
        DeliverySummary {
            one_shot_fixes: self.one_shot_fixes,
            watch_fixes: self.watch_fixes,
            faults: self.faults,
            interval: self.interval_stats.summary(),
        }
    }
}

/// Aggregated delivery summary
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliverySummary {
    pub one_shot_fixes: u64,
    pub watch_fixes: u64,
    pub faults: u64,
    pub interval: StatsSummary,
}

//! Mock position source
//!
//! Implements the `PositionSource` trait, generates a synthetic track.
//! Used for development and demos without positioning hardware.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use contracts::{
    BridgeError, ChangeCallback, FieldSet, PositionField, PositionSnapshot, PositionSource,
};
use tracing::{debug, trace};

use crate::store::SharedPositionStore;

/// Mock source configuration
#[derive(Debug, Clone)]
pub struct MockSourceConfig {
    /// Update rate (Hz)
    pub update_hz: f64,
    /// Starting values
    pub start: PositionSnapshot,
    /// Coordinate increment per tick (degrees)
    pub step_deg: f64,
    /// Baseline speed (m/s)
    pub speed_mps: f64,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            update_hz: 10.0,
            start: PositionSnapshot {
                latitude: 48.9917,
                longitude: 8.4011,
                altitude: 0.0,
                speed: 0.0,
            },
            step_deg: 0.0001,
            speed_mps: 5.0,
        }
    }
}

/// Mock position source
///
/// Advances a synthetic track at the configured rate in a background thread.
/// Each tick updates latitude, longitude and speed; altitude changes every
/// eighth tick. Changes are announced through the registered callback, same
/// as a hardware-backed source would.
pub struct MockPositionSource {
    source_id: String,
    config: MockSourceConfig,
    store: Arc<SharedPositionStore>,
    listening: Arc<AtomicBool>,
}

impl MockPositionSource {
    /// Create a new mock source
    pub fn new(source_id: String, config: MockSourceConfig) -> Self {
        let store = Arc::new(SharedPositionStore::with_values(config.start));
        Self {
            source_id,
            config,
            store,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a mock source with default configuration
    pub fn with_defaults(source_id: String) -> Self {
        Self::new(source_id, MockSourceConfig::default())
    }

    /// Values and change set for the given tick
    fn generate_tick(config: &MockSourceConfig, tick: u64) -> (PositionSnapshot, FieldSet) {
        let drift = tick as f64 * config.step_deg;
        let mut changed = FieldSet::from(PositionField::Latitude)
            | PositionField::Longitude
            | PositionField::Speed;

        let snapshot = PositionSnapshot {
            latitude: config.start.latitude + drift,
            longitude: config.start.longitude + drift,
            altitude: config.start.altitude + (tick / 8) as f64 * 0.25,
            speed: config.speed_mps + (tick % 5) as f64 * 0.1,
        };

        if tick % 8 == 0 {
            changed.insert(PositionField::Altitude);
        }

        (snapshot, changed)
    }
}

impl PositionSource for MockPositionSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn read_snapshot(&self) -> Result<PositionSnapshot, BridgeError> {
        self.store
            .try_snapshot()
            .map_err(|msg| BridgeError::snapshot_read(&self.source_id, msg))
    }

    fn listen(&self, callback: ChangeCallback) {
        // Idempotent: if already listening, don't start again
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let source_id = self.source_id.clone();
        let config = self.config.clone();
        let store = self.store.clone();
        let listening = self.listening.clone();

        let interval = Duration::from_secs_f64(1.0 / config.update_hz);

        thread::spawn(move || {
            let mut tick: u64 = 0;

            debug!(
                source_id = %source_id,
                update_hz = config.update_hz,
                "mock source started"
            );

            while listening.load(Ordering::Relaxed) {
                tick += 1;

                let (snapshot, changed) = MockPositionSource::generate_tick(&config, tick);
                store.apply(&snapshot, changed);

                callback(changed);

                trace!(
                    source_id = %source_id,
                    tick,
                    changed = %changed,
                    "mock update announced"
                );

                thread::sleep(interval);
            }

            debug!(source_id = %source_id, "mock source stopped");
        });
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

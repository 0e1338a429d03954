//! Replay position source - play back a recorded track
//!
//! Reads a JSONL recording and replays position updates at their original
//! timing. Fields present in a record form the change set for that update.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use contracts::{
    BridgeError, ChangeCallback, FieldSet, PositionField, PositionSnapshot, PositionSource,
};
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::store::SharedPositionStore;

/// Replay configuration
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Playback speed multiplier (1.0 = original timing)
    pub speed_multiplier: f64,

    /// Restart from the beginning when the recording ends
    pub loop_playback: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            loop_playback: false,
        }
    }
}

/// One line of a JSONL recording
///
/// Absent fields were not updated at this timestamp.
#[derive(Debug, Clone, Deserialize)]
struct ReplayRecord {
    /// Seconds from an arbitrary recording epoch
    timestamp: f64,

    #[serde(default)]
    latitude: Option<f64>,

    #[serde(default)]
    longitude: Option<f64>,

    #[serde(default)]
    altitude: Option<f64>,

    #[serde(default)]
    speed: Option<f64>,
}

impl ReplayRecord {
    /// Fields carried by this record
    fn changed_fields(&self) -> FieldSet {
        let mut changed = FieldSet::EMPTY;
        if self.latitude.is_some() {
            changed.insert(PositionField::Latitude);
        }
        if self.longitude.is_some() {
            changed.insert(PositionField::Longitude);
        }
        if self.altitude.is_some() {
            changed.insert(PositionField::Altitude);
        }
        if self.speed.is_some() {
            changed.insert(PositionField::Speed);
        }
        changed
    }

    /// Carried values, zeros where absent (masked by `changed_fields`)
    fn values(&self) -> PositionSnapshot {
        PositionSnapshot {
            latitude: self.latitude.unwrap_or(0.0),
            longitude: self.longitude.unwrap_or(0.0),
            altitude: self.altitude.unwrap_or(0.0),
            speed: self.speed.unwrap_or(0.0),
        }
    }
}

/// Replay position source
#[derive(Debug)]
pub struct ReplayPositionSource {
    source_id: String,
    records: Vec<ReplayRecord>,
    config: ReplayConfig,
    store: Arc<SharedPositionStore>,
    listening: Arc<AtomicBool>,
    thread_handle: Mutex<Option<JoinHandle<()>>>,
}

impl ReplayPositionSource {
    /// Load a recording from a JSONL file
    pub fn load(path: &Path, source_id: String, config: ReplayConfig) -> Result<Self, BridgeError> {
        let file = File::open(path)
            .map_err(|e| BridgeError::replay_load(path.display().to_string(), e.to_string()))?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| BridgeError::replay_load(path.display().to_string(), e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: ReplayRecord = serde_json::from_str(&line).map_err(|e| {
                BridgeError::replay_load(
                    path.display().to_string(),
                    format!("line {}: {e}", line_no + 1),
                )
            })?;
            records.push(record);
        }

        // Play back in timestamp order
        records.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        info!(
            source_id = %source_id,
            records = records.len(),
            "loaded replay recording"
        );

        Ok(Self {
            source_id,
            records,
            config,
            store: Arc::new(SharedPositionStore::new()),
            listening: Arc::new(AtomicBool::new(false)),
            thread_handle: Mutex::new(None),
        })
    }

    /// Number of records in the recording
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl PositionSource for ReplayPositionSource {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn read_snapshot(&self) -> Result<PositionSnapshot, BridgeError> {
        self.store
            .try_snapshot()
            .map_err(|msg| BridgeError::snapshot_read(&self.source_id, msg))
    }

    fn listen(&self, callback: ChangeCallback) {
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let listening = self.listening.clone();
        let source_id = self.source_id.clone();
        let records = self.records.clone();
        let store = self.store.clone();
        let speed = self.config.speed_multiplier.max(0.001);
        let loop_playback = self.config.loop_playback;

        let handle = thread::spawn(move || {
            debug!(source_id = %source_id, "replay thread started");

            loop {
                if records.is_empty() {
                    warn!(source_id = %source_id, "no records to replay");
                    break;
                }

                let start_time = Instant::now();
                let first_timestamp = records[0].timestamp;

                for record in &records {
                    if !listening.load(Ordering::Relaxed) {
                        debug!(source_id = %source_id, "replay stopped");
                        return;
                    }

                    // Honor original timing, scaled by the speed multiplier
                    let record_offset = record.timestamp - first_timestamp;
                    let target_elapsed = Duration::from_secs_f64(record_offset / speed);
                    let actual_elapsed = start_time.elapsed();

                    if target_elapsed > actual_elapsed {
                        thread::sleep(target_elapsed - actual_elapsed);
                    }

                    let changed = record.changed_fields();
                    if changed.is_empty() {
                        trace!(source_id = %source_id, timestamp = record.timestamp, "record carries no fields");
                        continue;
                    }

                    store.apply(&record.values(), changed);
                    callback(changed);
                }

                if !loop_playback {
                    info!(source_id = %source_id, "replay completed");
                    break;
                }

                debug!(source_id = %source_id, "looping replay");
            }

            listening.store(false, Ordering::SeqCst);
        });

        *self.thread_handle.lock().unwrap() = Some(handle);
    }

    fn stop(&self) {
        self.listening.store(false, Ordering::SeqCst);

        // Wait for the replay thread to wind down
        if let Some(handle) = self.thread_handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }
}

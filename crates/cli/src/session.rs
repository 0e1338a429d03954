//! Watch session - coordinates source, bridge and consumer loop.
//!
//! Builds the configured source, registers an initial one-shot fix plus a
//! watch, and drains deliveries from a channel until a stop condition is hit.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bridge::PositionBridge;
use contracts::{
    BridgeProfile, PositionFault, PositionFix, PositionSnapshot, PositionSource, RequestOptions,
    SourceKind,
};
use observability::{DeliveryAggregator, DeliverySummary};
use sources::{MockPositionSource, MockSourceConfig, ReplayConfig, ReplayPositionSource};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The bridge profile
    pub profile: BridgeProfile,

    /// Maximum number of fixes to receive (None = unlimited)
    pub max_fixes: Option<u64>,

    /// Session timeout (None = no timeout)
    pub timeout: Option<Duration>,

    /// Skip the initial one-shot fix request
    pub skip_initial_fix: bool,

    /// Append received fixes to this file as JSONL
    pub output: Option<PathBuf>,
}

/// Statistics from a completed session
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Total fixes received (one-shot + watch)
    pub fixes_received: u64,

    /// Faults received
    pub faults_received: u64,

    /// Session duration
    pub duration: Duration,

    /// Aggregated delivery summary
    pub delivery: DeliverySummary,
}

impl SessionStats {
    /// Fixes per second over the session
    pub fn fix_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.fixes_received as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Session Summary ===\n");
        println!("  Duration: {:.2}s", self.duration.as_secs_f64());
        println!(
            "  Fixes: {} ({} one-shot, {} watch)",
            self.fixes_received, self.delivery.one_shot_fixes, self.delivery.watch_fixes
        );
        println!("  Faults: {}", self.faults_received);
        println!("  Rate: {:.2} fixes/s", self.fix_rate());

        let interval = self.delivery.interval;
        if interval.count > 0 {
            println!(
                "  Watch interval: mean {:.1}ms, min {:.1}ms, max {:.1}ms",
                interval.mean, interval.min, interval.max
            );
        }
        println!();
    }
}

/// Delivery event forwarded from bridge callbacks into the consumer loop
enum SessionEvent {
    OneShotFix(PositionFix),
    WatchFix(PositionFix),
    Fault(PositionFault),
}

/// Watch session orchestrator
pub struct WatchSession {
    config: SessionConfig,
}

impl WatchSession {
    /// Create a new session with the given configuration
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run the session to completion
    pub async fn run(self) -> Result<SessionStats> {
        let profile = &self.config.profile;
        let source = build_source(profile)?;
        let source_id = profile.source.id.clone();
        let bridge = PositionBridge::new(source.clone());

        let (tx, mut rx) = mpsc::channel::<SessionEvent>(profile.delivery.queue_capacity);

        if !self.config.skip_initial_fix {
            let fix_tx = tx.clone();
            let fault_tx = tx.clone();
            bridge.get_current_position(
                Arc::new(move |fix| forward(&fix_tx, SessionEvent::OneShotFix(fix))),
                Some(Arc::new(move |fault| {
                    forward(&fault_tx, SessionEvent::Fault(fault))
                })),
                RequestOptions::default(),
            );
        }

        let fix_tx = tx.clone();
        let fault_tx = tx.clone();
        bridge.watch_position(
            Arc::new(move |fix| forward(&fix_tx, SessionEvent::WatchFix(fix))),
            Some(Arc::new(move |fault| {
                forward(&fault_tx, SessionEvent::Fault(fault))
            })),
            RequestOptions::default(),
        );
        drop(tx);

        info!(
            source_id = %source_id,
            max_fixes = ?self.config.max_fixes,
            timeout = ?self.config.timeout,
            "watch session started"
        );

        let started = Instant::now();
        let mut aggregator = DeliveryAggregator::new();
        let mut last_watch_at: Option<Instant> = None;
        let mut writer = match self.config.output.as_deref() {
            Some(path) => Some(open_output(path)?),
            None => None,
        };

        let deadline = self
            .config
            .timeout
            .map(|timeout| tokio::time::Instant::now() + timeout);
        let timeout_fut = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(timeout_fut);

        // Detects a replay source running out of records
        let mut source_poll = tokio::time::interval(Duration::from_millis(250));

        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else {
                        info!("delivery channel closed, ending session");
                        break;
                    };

                    self.handle_event(
                        event,
                        &source_id,
                        &mut aggregator,
                        &mut last_watch_at,
                        writer.as_mut(),
                    )?;

                    if let Some(max_fixes) = self.config.max_fixes {
                        if aggregator.total_fixes() >= max_fixes {
                            info!(fixes = aggregator.total_fixes(), "fix limit reached");
                            break;
                        }
                    }
                }
                _ = source_poll.tick() => {
                    if !source.is_listening() {
                        info!("source stopped emitting, ending session");
                        break;
                    }
                }
                _ = &mut timeout_fut => {
                    info!("session timeout reached");
                    break;
                }
            }
        }

        bridge.shutdown();

        if let Some(writer) = writer.as_mut() {
            writer.flush().context("Failed to flush output file")?;
        }

        let summary = aggregator.summary();
        Ok(SessionStats {
            fixes_received: aggregator.total_fixes(),
            faults_received: summary.faults,
            duration: started.elapsed(),
            delivery: summary,
        })
    }

    fn handle_event(
        &self,
        event: SessionEvent,
        source_id: &str,
        aggregator: &mut DeliveryAggregator,
        last_watch_at: &mut Option<Instant>,
        writer: Option<&mut BufWriter<File>>,
    ) -> Result<()> {
        match event {
            SessionEvent::OneShotFix(fix) => {
                aggregator.record_one_shot();
                observability::record_fix_delivered(source_id, "one_shot", &fix);
                info!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    altitude = fix.altitude,
                    speed = fix.speed,
                    "initial fix"
                );
                write_fix(writer, &fix)?;
            }
            SessionEvent::WatchFix(fix) => {
                let interval_ms = last_watch_at.map(|at| at.elapsed().as_secs_f64() * 1000.0);
                *last_watch_at = Some(Instant::now());
                aggregator.record_watch(interval_ms);
                observability::record_fix_delivered(source_id, "watch", &fix);
                info!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    altitude = fix.altitude,
                    speed = fix.speed,
                    "watch fix"
                );
                write_fix(writer, &fix)?;
            }
            SessionEvent::Fault(fault) => {
                aggregator.record_fault();
                observability::record_fault(source_id, fault.code);
                warn!(code = ?fault.code, message = %fault.message, "fault delivered");
            }
        }
        Ok(())
    }
}

/// Forward a delivery into the session channel without blocking the source thread
fn forward(tx: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
    match tx.try_send(event) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            warn!("delivery queue full, event dropped");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            // Session loop already ended
        }
    }
}

/// Build the configured position source
pub fn build_source(profile: &BridgeProfile) -> Result<Arc<dyn PositionSource>> {
    let source_id = profile.source.id.clone();

    match profile.source.kind {
        SourceKind::Mock => {
            let mock = profile.effective_mock();
            let config = MockSourceConfig {
                update_hz: mock.update_hz,
                start: PositionSnapshot {
                    latitude: mock.start_latitude,
                    longitude: mock.start_longitude,
                    altitude: mock.start_altitude,
                    speed: 0.0,
                },
                step_deg: mock.step_deg,
                speed_mps: mock.speed_mps,
            };
            Ok(Arc::new(MockPositionSource::new(source_id, config)))
        }
        SourceKind::Replay => {
            let replay = profile
                .replay()
                .context("replay settings missing from profile")?;
            let config = ReplayConfig {
                speed_multiplier: replay.speed_multiplier,
                loop_playback: replay.loop_playback,
            };
            let source = ReplayPositionSource::load(&replay.path, source_id, config)
                .with_context(|| {
                    format!("Failed to load replay recording {}", replay.path.display())
                })?;
            Ok(Arc::new(source))
        }
    }
}

fn open_output(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_fix(writer: Option<&mut BufWriter<File>>, fix: &PositionFix) -> Result<()> {
    if let Some(writer) = writer {
        serde_json::to_writer(&mut *writer, fix).context("Failed to serialize fix")?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

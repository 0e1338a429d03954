//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Profile info for JSON output
#[derive(Serialize)]
struct ProfileInfo {
    version: String,
    source: SourceInfo,
    delivery: DeliveryInfo,
}

#[derive(Serialize)]
struct SourceInfo {
    id: String,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mock: Option<MockInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replay: Option<ReplayInfo>,
}

#[derive(Serialize)]
struct MockInfo {
    update_hz: f64,
    start_latitude: f64,
    start_longitude: f64,
    start_altitude: f64,
    step_deg: f64,
    speed_mps: f64,
}

#[derive(Serialize)]
struct ReplayInfo {
    path: String,
    speed_multiplier: f64,
    loop_playback: bool,
}

#[derive(Serialize)]
struct DeliveryInfo {
    queue_capacity: usize,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading profile info");

    if !args.config.exists() {
        anyhow::bail!("Profile file not found: {}", args.config.display());
    }

    let profile = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load profile from {}", args.config.display()))?;

    if args.json {
        let info = build_profile_info(&profile, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize profile info")?;
        println!("{}", json);
    } else {
        print_profile_info(&profile, args);
    }

    Ok(())
}

fn build_profile_info(profile: &contracts::BridgeProfile, args: &InfoArgs) -> ProfileInfo {
    let mock = if args.tuning && profile.source.kind == contracts::SourceKind::Mock {
        let mock = profile.effective_mock();
        Some(MockInfo {
            update_hz: mock.update_hz,
            start_latitude: mock.start_latitude,
            start_longitude: mock.start_longitude,
            start_altitude: mock.start_altitude,
            step_deg: mock.step_deg,
            speed_mps: mock.speed_mps,
        })
    } else {
        None
    };

    let replay = profile.replay().map(|replay| ReplayInfo {
        path: replay.path.display().to_string(),
        speed_multiplier: replay.speed_multiplier,
        loop_playback: replay.loop_playback,
    });

    ProfileInfo {
        version: format!("{:?}", profile.version),
        source: SourceInfo {
            id: profile.source.id.clone(),
            kind: format!("{:?}", profile.source.kind),
            mock,
            replay,
        },
        delivery: DeliveryInfo {
            queue_capacity: profile.delivery.queue_capacity,
        },
    }
}

fn print_profile_info(profile: &contracts::BridgeProfile, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Position Bridge Profile                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📡 Source");
    println!("   ├─ Version: {:?}", profile.version);
    println!("   ├─ Id: {}", profile.source.id);
    println!("   └─ Kind: {:?}", profile.source.kind);

    match profile.source.kind {
        contracts::SourceKind::Mock => {
            let mock = profile.effective_mock();
            if args.tuning {
                println!("\n🛰  Mock Tuning");
                println!("   ├─ Update rate: {} Hz", mock.update_hz);
                println!(
                    "   ├─ Start: ({}, {}) at {} m",
                    mock.start_latitude, mock.start_longitude, mock.start_altitude
                );
                println!("   ├─ Step: {} deg/tick", mock.step_deg);
                println!("   └─ Speed: {} m/s", mock.speed_mps);
            } else {
                println!("\n🛰  Mock source at {} Hz", mock.update_hz);
            }
        }
        contracts::SourceKind::Replay => {
            if let Some(replay) = profile.replay() {
                println!("\n🛰  Replay");
                println!("   ├─ Recording: {}", replay.path.display());
                println!("   ├─ Speed: {}x", replay.speed_multiplier);
                println!(
                    "   └─ Loop: {}",
                    if replay.loop_playback { "yes" } else { "no" }
                );
            }
        }
    }

    println!("\n📬 Delivery");
    println!("   └─ Queue capacity: {}", profile.delivery.queue_capacity);

    println!();
}

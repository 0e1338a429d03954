//! `run` command implementation.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::session::{SessionConfig, WatchSession};

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading profile");

    // Validate profile path
    if !args.config.exists() {
        anyhow::bail!("Profile file not found: {}", args.config.display());
    }

    // Load and parse profile
    let profile = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load profile from {}", args.config.display()))?;

    info!(
        source_id = %profile.source.id,
        kind = ?profile.source.kind,
        queue_capacity = profile.delivery.queue_capacity,
        "Profile loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - profile is valid, exiting");
        print_profile_summary(&profile);
        return Ok(());
    }

    // Initialize metrics endpoint (optional)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!("Metrics endpoint available on port {}", args.metrics_port);
    }

    // Build session configuration
    let session_config = SessionConfig {
        profile,
        max_fixes: if args.max_fixes == 0 {
            None
        } else {
            Some(args.max_fixes)
        },
        timeout: if args.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(args.timeout))
        },
        skip_initial_fix: args.skip_initial_fix,
        output: args.output.clone(),
    };

    // Create and run session
    let session = WatchSession::new(session_config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting watch session...");

    // Run session with shutdown signal
    tokio::select! {
        result = session.run() => {
            match result {
                Ok(stats) => {
                    info!(
                        fixes = stats.fixes_received,
                        faults = stats.faults_received,
                        duration_secs = stats.duration.as_secs_f64(),
                        rate = format!("{:.2}", stats.fix_rate()),
                        "Session completed successfully"
                    );

                    // Print detailed statistics
                    stats.print_summary();
                }
                Err(e) => {
                    return Err(e).context("Session execution failed");
                }
            }
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping session...");
        }
    }

    info!("Position Bridge finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print profile summary for dry-run mode
fn print_profile_summary(profile: &contracts::BridgeProfile) {
    println!("\n=== Profile Summary ===\n");
    println!("Source:");
    println!("  Id: {}", profile.source.id);
    println!("  Kind: {:?}", profile.source.kind);

    match profile.source.kind {
        contracts::SourceKind::Mock => {
            let mock = profile.effective_mock();
            println!(
                "  Mock: {} Hz from ({}, {})",
                mock.update_hz, mock.start_latitude, mock.start_longitude
            );
        }
        contracts::SourceKind::Replay => {
            if let Some(replay) = profile.replay() {
                println!(
                    "  Replay: {} at {}x{}",
                    replay.path.display(),
                    replay.speed_multiplier,
                    if replay.loop_playback { ", looping" } else { "" }
                );
            }
        }
    }

    println!("\nDelivery:");
    println!("  Queue capacity: {}", profile.delivery.queue_capacity);
    println!();
}

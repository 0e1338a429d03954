//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Position Bridge - geolocation-style delivery over pluggable position sources
#[derive(Parser, Debug)]
#[command(
    name = "position-bridge",
    author,
    version,
    about = "Position bridge: one-shot and watch fix delivery",
    long_about = "Bridges a position source (mock generator or recorded trace) to\n\
                  geolocation-style consumers.\n\n\
                  Takes an initial one-shot fix, then watches the source and streams\n\
                  every delivered fix to the log (and optionally to a JSONL file)."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "POSITION_BRIDGE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "POSITION_BRIDGE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a watch session against the configured source
    Run(RunArgs),

    /// Validate a profile file without running
    Validate(ValidateArgs),

    /// Display profile information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to profile file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "bridge.toml",
        env = "POSITION_BRIDGE_CONFIG"
    )]
    pub config: PathBuf,

    /// Maximum number of fixes to receive (0 = unlimited)
    #[arg(long, default_value = "0", env = "POSITION_BRIDGE_MAX_FIXES")]
    pub max_fixes: u64,

    /// Session timeout in seconds (0 = no timeout)
    #[arg(long, default_value = "0", env = "POSITION_BRIDGE_TIMEOUT")]
    pub timeout: u64,

    /// Skip the initial one-shot fix request
    #[arg(long)]
    pub skip_initial_fix: bool,

    /// Append received fixes to this file as JSONL
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Validate the profile and exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "POSITION_BRIDGE_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to profile file to validate
    #[arg(short, long, default_value = "bridge.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to profile file
    #[arg(short, long, default_value = "bridge.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed source tuning
    #[arg(long)]
    pub tuning: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

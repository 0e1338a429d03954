//! BridgeProfile - Config Loader output
//!
//! Describes a complete bridge deployment: which source to run, how it is
//! tuned, and how deliveries are buffered on the consumer side.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileVersion {
    #[default]
    V1,
}

/// Complete bridge deployment profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BridgeProfile {
    /// Profile version
    #[serde(default)]
    pub version: ProfileVersion,

    /// Source definition
    #[validate(nested)]
    pub source: SourceProfile,

    /// Consumer-side delivery settings
    #[serde(default)]
    #[validate(nested)]
    pub delivery: DeliveryProfile,
}

/// Source definition: identity, kind and kind-specific tuning
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SourceProfile {
    /// Unique identifier, used in logs and fault messages
    #[validate(length(min = 1, message = "source id cannot be empty"))]
    pub id: String,

    /// Source kind
    pub kind: SourceKind,

    /// Mock tuning (defaults apply when absent)
    #[serde(default)]
    #[validate(nested)]
    pub mock: Option<MockProfile>,

    /// Replay settings (required when kind = replay)
    #[serde(default)]
    #[validate(nested)]
    pub replay: Option<ReplayProfile>,
}

/// Source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Synthetic generator
    Mock,
    /// JSONL recording playback
    Replay,
}

/// Mock source tuning
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MockProfile {
    /// Update rate (Hz)
    #[serde(default = "default_update_hz")]
    #[validate(range(min = 0.001, message = "update_hz must be > 0"))]
    pub update_hz: f64,

    /// Starting latitude (degrees)
    #[serde(default = "default_start_latitude")]
    pub start_latitude: f64,

    /// Starting longitude (degrees)
    #[serde(default = "default_start_longitude")]
    pub start_longitude: f64,

    /// Starting altitude (meters)
    #[serde(default)]
    pub start_altitude: f64,

    /// Coordinate increment per tick (degrees)
    #[serde(default = "default_step_deg")]
    pub step_deg: f64,

    /// Baseline speed (m/s)
    #[serde(default = "default_speed_mps")]
    pub speed_mps: f64,
}

impl Default for MockProfile {
    fn default() -> Self {
        Self {
            update_hz: default_update_hz(),
            start_latitude: default_start_latitude(),
            start_longitude: default_start_longitude(),
            start_altitude: 0.0,
            step_deg: default_step_deg(),
            speed_mps: default_speed_mps(),
        }
    }
}

/// Replay source settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplayProfile {
    /// Path to the JSONL recording
    pub path: PathBuf,

    /// Playback speed multiplier (1.0 = original timing)
    #[serde(default = "default_speed_multiplier")]
    #[validate(range(min = 0.001, message = "speed_multiplier must be > 0"))]
    pub speed_multiplier: f64,

    /// Restart from the beginning when the recording ends
    #[serde(default)]
    pub loop_playback: bool,
}

/// Consumer-side delivery settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeliveryProfile {
    /// Capacity of the fix channel between bridge callbacks and the consumer loop
    #[serde(default = "default_queue_capacity")]
    #[validate(range(min = 1, message = "queue_capacity must be >= 1"))]
    pub queue_capacity: usize,
}

impl Default for DeliveryProfile {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_update_hz() -> f64 {
    10.0
}

fn default_start_latitude() -> f64 {
    48.9917
}

fn default_start_longitude() -> f64 {
    8.4011
}

fn default_step_deg() -> f64 {
    0.0001
}

fn default_speed_mps() -> f64 {
    5.0
}

fn default_speed_multiplier() -> f64 {
    1.0
}

fn default_queue_capacity() -> usize {
    64
}

impl BridgeProfile {
    /// Mock tuning with defaults applied when the table is absent.
    pub fn effective_mock(&self) -> MockProfile {
        self.source.mock.clone().unwrap_or_default()
    }

    /// Replay settings, when configured.
    pub fn replay(&self) -> Option<&ReplayProfile> {
        self.source.replay.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_profile() -> BridgeProfile {
        BridgeProfile {
            version: ProfileVersion::V1,
            source: SourceProfile {
                id: "gnss0".into(),
                kind: SourceKind::Mock,
                mock: None,
                replay: None,
            },
            delivery: DeliveryProfile::default(),
        }
    }

    #[test]
    fn test_effective_mock_falls_back_to_defaults() {
        let profile = minimal_profile();
        let mock = profile.effective_mock();
        assert_eq!(mock.update_hz, 10.0);
        assert_eq!(mock.step_deg, 0.0001);
    }

    #[test]
    fn test_minimal_json_profile() {
        let json = r#"{ "source": { "id": "gnss0", "kind": "mock" } }"#;
        let profile: BridgeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.version, ProfileVersion::V1);
        assert_eq!(profile.source.kind, SourceKind::Mock);
        assert_eq!(profile.delivery.queue_capacity, 64);
    }

    #[test]
    fn test_derive_validation_rejects_empty_id() {
        let mut profile = minimal_profile();
        profile.source.id = String::new();
        assert!(validator::Validate::validate(&profile).is_err());
    }

    #[test]
    fn test_derive_validation_rejects_zero_rate() {
        let mut profile = minimal_profile();
        profile.source.mock = Some(MockProfile {
            update_hz: 0.0,
            ..Default::default()
        });
        assert!(validator::Validate::validate(&profile).is_err());
    }
}

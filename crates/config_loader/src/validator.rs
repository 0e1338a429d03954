//! Profile validation
//!
//! Validation rules:
//! - field-level constraints from the derive (non-empty id, positive rates)
//! - replay table present when kind = replay
//! - kind-specific table matches the declared kind
//! - replay path non-empty

use contracts::{BridgeError, BridgeProfile, SourceKind};
use validator::Validate;

/// Validate a BridgeProfile
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(profile: &BridgeProfile) -> Result<(), BridgeError> {
    validate_field_constraints(profile)?;
    validate_kind_tables(profile)?;
    validate_replay_path(profile)?;
    Ok(())
}

/// Run the derive-level field constraints
fn validate_field_constraints(profile: &BridgeProfile) -> Result<(), BridgeError> {
    profile
        .validate()
        .map_err(|e| BridgeError::config_validation("profile", e.to_string().replace('\n', "; ")))
}

/// Check the kind-specific table matches the declared kind
fn validate_kind_tables(profile: &BridgeProfile) -> Result<(), BridgeError> {
    match profile.source.kind {
        SourceKind::Replay => {
            if profile.source.replay.is_none() {
                return Err(BridgeError::config_validation(
                    "source.replay",
                    "replay table is required when source.kind is replay",
                ));
            }
            if profile.source.mock.is_some() {
                return Err(BridgeError::config_validation(
                    "source.mock",
                    "mock table present but source.kind is replay",
                ));
            }
        }
        SourceKind::Mock => {
            if profile.source.replay.is_some() {
                return Err(BridgeError::config_validation(
                    "source.replay",
                    "replay table present but source.kind is mock",
                ));
            }
        }
    }
    Ok(())
}

/// Check the replay path is usable
fn validate_replay_path(profile: &BridgeProfile) -> Result<(), BridgeError> {
    if let Some(replay) = profile.replay() {
        if replay.path.as_os_str().is_empty() {
            return Err(BridgeError::config_validation(
                "source.replay.path",
                "replay path cannot be empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        BridgeProfile, DeliveryProfile, MockProfile, ProfileVersion, ReplayProfile, SourceProfile,
    };
    use std::path::PathBuf;

    fn mock_profile() -> BridgeProfile {
        BridgeProfile {
            version: ProfileVersion::V1,
            source: SourceProfile {
                id: "gnss0".into(),
                kind: SourceKind::Mock,
                mock: Some(MockProfile::default()),
                replay: None,
            },
            delivery: DeliveryProfile::default(),
        }
    }

    fn replay_profile() -> BridgeProfile {
        BridgeProfile {
            version: ProfileVersion::V1,
            source: SourceProfile {
                id: "trace".into(),
                kind: SourceKind::Replay,
                mock: None,
                replay: Some(ReplayProfile {
                    path: PathBuf::from("route.jsonl"),
                    speed_multiplier: 1.0,
                    loop_playback: false,
                }),
            },
            delivery: DeliveryProfile::default(),
        }
    }

    #[test]
    fn test_valid_mock_profile() {
        assert!(validate(&mock_profile()).is_ok());
    }

    #[test]
    fn test_valid_replay_profile() {
        assert!(validate(&replay_profile()).is_ok());
    }

    #[test]
    fn test_empty_source_id() {
        let mut profile = mock_profile();
        profile.source.id = String::new();
        let result = validate(&profile);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("id"), "got: {err}");
    }

    #[test]
    fn test_zero_update_rate() {
        let mut profile = mock_profile();
        profile.source.mock = Some(MockProfile {
            update_hz: 0.0,
            ..Default::default()
        });
        let result = validate(&profile);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("update_hz"), "got: {err}");
    }

    #[test]
    fn test_replay_kind_without_table() {
        let mut profile = replay_profile();
        profile.source.replay = None;
        let result = validate(&profile);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("replay table is required"), "got: {err}");
    }

    #[test]
    fn test_mock_kind_with_replay_table() {
        let mut profile = mock_profile();
        profile.source.replay = Some(ReplayProfile {
            path: PathBuf::from("route.jsonl"),
            speed_multiplier: 1.0,
            loop_playback: false,
        });
        let result = validate(&profile);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("source.kind is mock"), "got: {err}");
    }

    #[test]
    fn test_empty_replay_path() {
        let mut profile = replay_profile();
        profile.source.replay = Some(ReplayProfile {
            path: PathBuf::new(),
            speed_multiplier: 1.0,
            loop_playback: false,
        });
        let result = validate(&profile);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }
}

//! Profile parsing
//!
//! Supports TOML (primary) and JSON formats.

use contracts::{BridgeError, BridgeProfile};

/// Profile file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML profile
pub fn parse_toml(content: &str) -> Result<BridgeProfile, BridgeError> {
    toml::from_str(content).map_err(|e| BridgeError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON profile
pub fn parse_json(content: &str) -> Result<BridgeProfile, BridgeError> {
    serde_json::from_str(content).map_err(|e| BridgeError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a profile in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<BridgeProfile, BridgeError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SourceKind;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[source]
id = "gnss0"
kind = "mock"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.source.id, "gnss0");
        assert_eq!(profile.source.kind, SourceKind::Mock);
        assert!(profile.source.mock.is_none());
    }

    #[test]
    fn test_parse_toml_replay() {
        let content = r#"
[source]
id = "trace"
kind = "replay"

[source.replay]
path = "route.jsonl"
speed_multiplier = 2.0
loop_playback = true
"#;
        let profile = parse_toml(content).unwrap();
        assert_eq!(profile.source.kind, SourceKind::Replay);
        let replay = profile.replay().unwrap();
        assert_eq!(replay.speed_multiplier, 2.0);
        assert!(replay.loop_playback);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "source": {
                "id": "gnss0",
                "kind": "mock",
                "mock": { "update_hz": 20.0 }
            },
            "delivery": { "queue_capacity": 32 }
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.effective_mock().update_hz, 20.0);
        assert_eq!(profile.delivery.queue_capacity, 32);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}

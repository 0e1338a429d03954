//! # Config Loader
//!
//! Profile loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON profile files
//! - Validate profile legality
//! - Produce a `BridgeProfile`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let profile = ConfigLoader::load_from_path(Path::new("bridge.toml")).unwrap();
//! println!("Source: {}", profile.source.id);
//! ```

mod parser;
mod validator;

pub use contracts::BridgeProfile;
pub use parser::ConfigFormat;

use contracts::BridgeError;
use std::path::Path;

/// Profile loader
///
/// Provides static methods to load a profile from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a profile from a file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<BridgeProfile, BridgeError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a profile from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<BridgeProfile, BridgeError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize a BridgeProfile to a TOML string
    pub fn to_toml(profile: &BridgeProfile) -> Result<String, BridgeError> {
        toml::to_string_pretty(profile)
            .map_err(|e| BridgeError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a BridgeProfile to a JSON string
    pub fn to_json(profile: &BridgeProfile) -> Result<String, BridgeError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| BridgeError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer profile format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, BridgeError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            BridgeError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            BridgeError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read profile file content
    fn read_file(path: &Path) -> Result<String, BridgeError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate profile content
    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<BridgeProfile, BridgeError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }
}

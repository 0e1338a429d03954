//! RequestOptions - registration options

use serde::{Deserialize, Serialize};

/// Options accepted by one-shot and watch registrations.
///
/// The shape follows the W3C geolocation options object. Delivery is driven
/// solely by source change notifications, so none of these fields currently
/// influence when or whether a callback fires; they are accepted for API
/// compatibility and recorded in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Request best-effort high accuracy from the source
    #[serde(default)]
    pub enable_high_accuracy: bool,

    /// Maximum time to wait for a fix, in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum acceptable age of a cached fix, in milliseconds
    #[serde(default)]
    pub maximum_age_ms: Option<u64>,
}

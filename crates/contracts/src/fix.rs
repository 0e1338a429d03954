//! PositionFix - Bridge output
//!
//! Fixed-precision position record delivered to consumers.

use serde::{Deserialize, Serialize};

/// Position record delivered to one-shot and watch callbacks.
///
/// Only `latitude`, `longitude`, `altitude` and `speed` are ever updated from
/// source data; the remaining fields stay at their zero defaults. The bridge
/// hands every callback its own copy, so holding on to a fix after the
/// callback returns is safe.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionFix {
    /// Latitude in degrees, rounded to 4 decimal places
    pub latitude: f64,

    /// Longitude in degrees, rounded to 4 decimal places
    pub longitude: f64,

    /// Altitude in meters, rounded to 2 decimal places
    pub altitude: f64,

    /// Horizontal accuracy in meters (never populated by shipped sources)
    pub accuracy: f64,

    /// Vertical accuracy in meters (never populated by shipped sources)
    pub altitude_accuracy: f64,

    /// Heading in degrees (never populated by shipped sources)
    pub heading: f64,

    /// Speed in m/s, rounded to 4 decimal places
    pub speed: f64,
}

/// Raw source values for the tracked fields, unrounded.
///
/// Returned by [`PositionSource::read_snapshot`](crate::PositionSource::read_snapshot).
/// The bridge copies announced fields out of a snapshot into its fix record,
/// applying the fixed decimal precision on the way.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Altitude in meters
    pub altitude: f64,

    /// Speed in m/s
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_defaults_to_zero() {
        let fix = PositionFix::default();
        assert_eq!(fix.latitude, 0.0);
        assert_eq!(fix.longitude, 0.0);
        assert_eq!(fix.altitude, 0.0);
        assert_eq!(fix.accuracy, 0.0);
        assert_eq!(fix.altitude_accuracy, 0.0);
        assert_eq!(fix.heading, 0.0);
        assert_eq!(fix.speed, 0.0);
    }

    #[test]
    fn test_fix_serializes_all_fields() {
        let fix = PositionFix {
            latitude: 48.1234,
            ..Default::default()
        };
        let json = serde_json::to_value(&fix).unwrap();
        assert_eq!(json["latitude"], 48.1234);
        assert_eq!(json["altitude_accuracy"], 0.0);
    }
}

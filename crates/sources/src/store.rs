//! Shared position store
//!
//! Mutex-guarded staging area between a producer (mock thread, replay thread,
//! external feed) and the snapshot reads issued by the bridge.

use std::sync::Mutex;

use contracts::{FieldSet, PositionField, PositionSnapshot};

/// Mutex-guarded store of the four tracked position values.
#[derive(Debug, Default)]
pub struct SharedPositionStore {
    values: Mutex<PositionSnapshot>,
}

impl SharedPositionStore {
    /// Create a store with all values at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given values.
    pub fn with_values(snapshot: PositionSnapshot) -> Self {
        Self {
            values: Mutex::new(snapshot),
        }
    }

    /// Set the latitude (degrees).
    pub fn set_latitude(&self, val: f64) {
        self.values.lock().unwrap().latitude = val;
    }

    /// Set the longitude (degrees).
    pub fn set_longitude(&self, val: f64) {
        self.values.lock().unwrap().longitude = val;
    }

    /// Set the altitude (meters).
    pub fn set_altitude(&self, val: f64) {
        self.values.lock().unwrap().altitude = val;
    }

    /// Set the speed (m/s).
    pub fn set_speed(&self, val: f64) {
        self.values.lock().unwrap().speed = val;
    }

    /// Copy the listed fields from `snapshot` into the store.
    pub fn apply(&self, snapshot: &PositionSnapshot, fields: FieldSet) {
        let mut values = self.values.lock().unwrap();
        for field in fields.iter() {
            match field {
                PositionField::Latitude => values.latitude = snapshot.latitude,
                PositionField::Longitude => values.longitude = snapshot.longitude,
                PositionField::Altitude => values.altitude = snapshot.altitude,
                PositionField::Speed => values.speed = snapshot.speed,
            }
        }
    }

    /// Read a consistent copy of all four values.
    ///
    /// Fails when a producer panicked while holding the lock; callers surface
    /// this as a snapshot-read fault.
    pub fn try_snapshot(&self) -> Result<PositionSnapshot, String> {
        self.values
            .lock()
            .map(|values| *values)
            .map_err(|_| "position store lock poisoned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_and_snapshot() {
        let store = SharedPositionStore::new();
        store.set_latitude(48.5);
        store.set_longitude(8.25);
        store.set_altitude(115.0);
        store.set_speed(13.9);

        let snapshot = store.try_snapshot().unwrap();
        assert_eq!(snapshot.latitude, 48.5);
        assert_eq!(snapshot.longitude, 8.25);
        assert_eq!(snapshot.altitude, 115.0);
        assert_eq!(snapshot.speed, 13.9);
    }

    #[test]
    fn test_apply_only_touches_listed_fields() {
        let store = SharedPositionStore::with_values(PositionSnapshot {
            latitude: 1.0,
            longitude: 2.0,
            altitude: 3.0,
            speed: 4.0,
        });

        let update = PositionSnapshot {
            latitude: 10.0,
            longitude: 20.0,
            altitude: 30.0,
            speed: 40.0,
        };
        store.apply(
            &update,
            FieldSet::from(PositionField::Latitude) | PositionField::Speed,
        );

        let snapshot = store.try_snapshot().unwrap();
        assert_eq!(snapshot.latitude, 10.0);
        assert_eq!(snapshot.longitude, 2.0);
        assert_eq!(snapshot.altitude, 3.0);
        assert_eq!(snapshot.speed, 40.0);
    }
}

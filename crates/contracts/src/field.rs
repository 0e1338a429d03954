//! PositionField / FieldSet - change-notification payload
//!
//! A source announces which of the tracked fields changed; the bridge applies
//! only those fields from the next snapshot read.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// One of the four position fields a source can update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionField {
    Latitude,
    Longitude,
    Altitude,
    Speed,
}

impl PositionField {
    /// All tracked fields, in declaration order.
    pub const ALL: [PositionField; 4] = [
        PositionField::Latitude,
        PositionField::Longitude,
        PositionField::Altitude,
        PositionField::Speed,
    ];

    /// Field name as it appears in logs and replay records.
    pub fn name(self) -> &'static str {
        match self {
            PositionField::Latitude => "latitude",
            PositionField::Longitude => "longitude",
            PositionField::Altitude => "altitude",
            PositionField::Speed => "speed",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for PositionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of changed fields carried by a change notification.
///
/// Small bitset over [`PositionField`]; cheap to copy and pass through
/// callbacks.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet(u8);

impl FieldSet {
    /// The empty set.
    pub const EMPTY: FieldSet = FieldSet(0);

    /// Set containing every tracked field.
    pub fn all() -> Self {
        PositionField::ALL.into_iter().collect()
    }

    /// Whether `field` is in the set.
    #[inline]
    pub fn contains(self, field: PositionField) -> bool {
        self.0 & field.bit() != 0
    }

    /// Add `field` to the set.
    #[inline]
    pub fn insert(&mut self, field: PositionField) {
        self.0 |= field.bit();
    }

    /// Copy of the set with `field` added.
    #[inline]
    pub fn with(self, field: PositionField) -> Self {
        FieldSet(self.0 | field.bit())
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of fields in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the contained fields in declaration order.
    pub fn iter(self) -> impl Iterator<Item = PositionField> {
        PositionField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl From<PositionField> for FieldSet {
    fn from(field: PositionField) -> Self {
        FieldSet(field.bit())
    }
}

impl FromIterator<PositionField> for FieldSet {
    fn from_iter<I: IntoIterator<Item = PositionField>>(iter: I) -> Self {
        let mut set = FieldSet::EMPTY;
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl BitOr for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: FieldSet) -> FieldSet {
        FieldSet(self.0 | rhs.0)
    }
}

impl BitOr<PositionField> for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: PositionField) -> FieldSet {
        self.with(rhs)
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(field.name())?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldSet({self})")
    }
}

//! Planar locations and the distance/travel-time model.

use std::fmt;

/// A point on the plane, in kilometres.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Euclidean distance rounded up to whole kilometres.
    pub fn distance_to(&self, other: &Location) -> i64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt().ceil() as i64
    }
}

/// Minutes needed to cover `distance_km` at `speed_kmh`, rounded up.
#[inline]
pub fn travel_minutes(distance_km: i64, speed_kmh: i64) -> i64 {
    debug_assert!(speed_kmh > 0);
    (distance_km * 60 + speed_kmh - 1).div_euclid(speed_kmh)
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location{}", self)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

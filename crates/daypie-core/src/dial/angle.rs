//! Time-of-day <-> dial angle mapping.
//!
//! The dial covers 24 hours in 360 degrees: 0° is midnight at the top,
//! angles grow clockwise. Every whole minute lands on a quarter degree, so
//! the conversions below are exact for minute-level input.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// 360 / 1440, exactly representable.
pub const DEGREES_PER_MINUTE: f64 = 0.25;

/// 1440 / 360, exactly representable.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// A wall-clock moment within a day. Date and seconds are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Take hours and minutes from any chrono time-like value.
    pub fn of<T: Timelike>(time: &T) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
        }
    }

    /// Minutes since midnight. Widened so out-of-range fields cannot overflow.
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }

    /// Dial angle for this time. No bounds are applied, so `24:00` yields 360.
    pub fn angle(&self) -> f64 {
        self.total_minutes() as f64 * DEGREES_PER_MINUTE
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parse `HH:MM` with hours 0-23 and minutes 0-59.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "time".to_string(),
            message: format!("expected HH:MM, got '{s}'"),
        };
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u32 = h.parse().map_err(|_| invalid())?;
        let minutes: u32 = m.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self { hours, minutes })
    }
}

/// A point in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a time of day to its dial angle in `[0, 360)`.
///
/// Only hours and minutes are read; seconds are ignored.
pub fn time_to_angle<T: Timelike>(time: &T) -> f64 {
    TimeOfDay::of(time).angle()
}

/// Wrap any angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert a dial angle back to a timestamp on `base`.
///
/// The angle is wrapped first, so negative input counts back from midnight.
/// Minutes are floored; seconds and sub-seconds are zero.
pub fn angle_to_time(angle: f64, base: NaiveDate) -> NaiveDateTime {
    let minutes = (normalize_angle(angle) * MINUTES_PER_DEGREE).floor() as i64;
    let minutes = minutes.clamp(0, MINUTES_PER_DAY as i64 - 1);
    base.and_time(NaiveTime::MIN) + Duration::minutes(minutes)
}

/// Point on a circle for a dial angle.
///
/// Rotated by -90° so that angle 0 points up instead of right.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point {
        x: cx + radius * rad.cos(),
        y: cy + radius * rad.sin(),
    }
}

/// Dial angle of a point relative to the dial center, inverse of
/// [`polar_to_cartesian`] for any radius. The center itself maps to 0.
pub fn cartesian_to_angle(cx: f64, cy: f64, x: f64, y: f64) -> f64 {
    let dx = x - cx;
    let dy = y - cy;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    normalize_angle(dy.atan2(dx).to_degrees() + 90.0)
}

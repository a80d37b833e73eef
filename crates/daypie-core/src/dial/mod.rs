//! Dial geometry.
//!
//! This module provides:
//! - Bidirectional time-of-day <-> angle mapping on a 24-hour dial
//! - Polar/cartesian conversion with 0° pointing up
//! - Pie-wedge path strings, label placement and hour markers

mod angle;
mod arc;

pub use angle::{
    angle_to_time, cartesian_to_angle, normalize_angle, polar_to_cartesian, time_to_angle, Point,
    TimeOfDay, DEGREES_PER_MINUTE, MINUTES_PER_DAY, MINUTES_PER_DEGREE,
};
pub use arc::{describe_arc, hour_markers, label_position, now_hand, HourMarker, LabelPlacement, TextAnchor};
pub(crate) use arc::fmt_num;

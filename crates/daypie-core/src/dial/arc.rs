//! Arc paths, label placement, hour markers and the current-time hand.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::angle::{polar_to_cartesian, time_to_angle, Point};
use crate::slice::Slice;

/// Round to three decimals and render without trailing noise.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // also folds -0
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

/// Build a filled pie-wedge path: center, arc start, clockwise sweep, close.
///
/// The large-arc flag is set when the span exceeds 180°. Angles are used as
/// given; a backwards range (`end < start`) is not reordered. A span of a
/// full turn or more is split in two half arcs, since an SVG arc whose
/// endpoints coincide draws nothing.
pub fn describe_arc(cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let start = polar_to_cartesian(cx, cy, radius, start_angle);
    let end = polar_to_cartesian(cx, cy, radius, end_angle);
    let r = fmt_num(radius);

    if end_angle - start_angle >= 360.0 {
        let mid = polar_to_cartesian(cx, cy, radius, start_angle + 180.0);
        return format!(
            "M {cx} {cy} L {sx} {sy} A {r} {r} 0 0 1 {mx} {my} A {r} {r} 0 0 1 {sx} {sy} Z",
            cx = fmt_num(cx),
            cy = fmt_num(cy),
            sx = fmt_num(start.x),
            sy = fmt_num(start.y),
            mx = fmt_num(mid.x),
            my = fmt_num(mid.y),
        );
    }

    let large_arc = if end_angle - start_angle > 180.0 { 1 } else { 0 };
    format!(
        "M {cx} {cy} L {sx} {sy} A {r} {r} 0 {large_arc} 1 {ex} {ey} Z",
        cx = fmt_num(cx),
        cy = fmt_num(cy),
        sx = fmt_num(start.x),
        sy = fmt_num(start.y),
        ex = fmt_num(end.x),
        ey = fmt_num(end.y),
    )
}

/// Horizontal text alignment for a label, matching SVG `text-anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Labels near the vertical axis are centered, others lean away from it.
    pub fn for_angle(angle: f64) -> Self {
        let a = super::angle::normalize_angle(angle);
        if a < 10.0 || a > 350.0 || (170.0..=190.0).contains(&a) {
            Self::Middle
        } else if a < 180.0 {
            Self::Start
        } else {
            Self::End
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub point: Point,
    pub angle: f64,
    pub anchor: TextAnchor,
}

/// Where to put a slice's label: at its mid angle, `ratio * radius` from
/// the center. Slices narrower than `min_span` get no label.
pub fn label_position(
    cx: f64,
    cy: f64,
    radius: f64,
    slice: &Slice,
    ratio: f64,
    min_span: f64,
) -> Option<LabelPlacement> {
    if slice.span() < min_span {
        return None;
    }
    let angle = slice.mid_angle();
    Some(LabelPlacement {
        point: polar_to_cartesian(cx, cy, radius * ratio, angle),
        angle,
        anchor: TextAnchor::for_angle(angle),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourMarker {
    pub hour: u32,
    pub angle: f64,
    pub point: Point,
}

/// One marker per hour, 15° apart, starting with 0 at the top.
pub fn hour_markers(cx: f64, cy: f64, radius: f64) -> Vec<HourMarker> {
    (0..24)
        .map(|hour| {
            let angle = hour as f64 * 15.0;
            HourMarker {
                hour,
                angle,
                point: polar_to_cartesian(cx, cy, radius, angle),
            }
        })
        .collect()
}

/// Tip of the current-time hand and its angle.
pub fn now_hand<T: Timelike>(cx: f64, cy: f64, radius: f64, current_time: &T) -> (Point, f64) {
    let angle = time_to_angle(current_time);
    (polar_to_cartesian(cx, cy, radius, angle), angle)
}

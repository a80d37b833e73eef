//! Slice builder: one day's events -> a gap-filling cover of the dial.
//!
//! Uncovered time is emitted as explicit empty slices so a renderer never
//! has to special-case gaps. The builder never fails: overlapping,
//! zero-length and backwards events all produce best-effort geometry.

use serde::{Deserialize, Serialize};

use crate::dial::time_to_angle;
use crate::event::DialEvent;

/// Fill for slices that carry no event.
pub const EMPTY_SLICE_COLOR: &str = "#E5E7EB";

/// How events whose end time-of-day precedes their start (23:00-01:00) are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvernightPolicy {
    /// Emit the backwards range as-is (`end_angle < start_angle`).
    #[default]
    Preserve,
    /// Emit `[start, 360)` and `[0, end)` pieces of the same event.
    SplitAtMidnight,
}

/// One angular wedge of the dial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub start_angle: f64,
    pub end_angle: f64,
    pub event: Option<DialEvent>,
    pub is_empty: bool,
    pub color: String,
}

impl Slice {
    pub fn empty(start_angle: f64, end_angle: f64, color: impl Into<String>) -> Self {
        Self {
            start_angle,
            end_angle,
            event: None,
            is_empty: true,
            color: color.into(),
        }
    }

    pub fn occupied(event: &DialEvent, start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle,
            end_angle,
            color: event.color.clone(),
            event: Some(event.clone()),
            is_empty: false,
        }
    }

    /// Signed angular width; negative for uncorrected backwards ranges.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.span() / 2.0
    }
}

/// A piece of an event placed on the dial.
struct Placement<'a> {
    event: &'a DialEvent,
    start_angle: f64,
    end_angle: f64,
}

/// Builds slices for a single day.
#[derive(Debug, Clone)]
pub struct SliceBuilder {
    empty_color: String,
    overnight: OvernightPolicy,
}

impl SliceBuilder {
    /// Create a builder with the neutral empty color and [`OvernightPolicy::Preserve`]
    pub fn new() -> Self {
        Self {
            empty_color: EMPTY_SLICE_COLOR.to_string(),
            overnight: OvernightPolicy::Preserve,
        }
    }

    pub fn with_empty_color(mut self, color: impl Into<String>) -> Self {
        self.empty_color = color.into();
        self
    }

    pub fn with_overnight_policy(mut self, policy: OvernightPolicy) -> Self {
        self.overnight = policy;
        self
    }

    /// Partition the dial into occupied and empty slices.
    ///
    /// Events are sorted by their full start timestamp and swept with an
    /// angle cursor starting at 0. A gap before an event becomes an empty
    /// slice; the event itself becomes an occupied slice; the cursor moves
    /// to the event's end angle. Whatever remains after the last event up
    /// to 360 is one final empty slice.
    ///
    /// Overlapping events are neither merged nor reordered, and zero-width
    /// events are still emitted.
    pub fn build(&self, events: &[DialEvent]) -> Vec<Slice> {
        if events.is_empty() {
            return vec![Slice::empty(0.0, 360.0, self.empty_color.as_str())];
        }

        let placements = match self.overnight {
            OvernightPolicy::Preserve => place_preserving(events),
            OvernightPolicy::SplitAtMidnight => place_split(events),
        };

        let mut slices = Vec::with_capacity(placements.len() * 2 + 1);
        let mut current_angle = 0.0;

        for placement in &placements {
            if placement.start_angle > current_angle {
                slices.push(Slice::empty(
                    current_angle,
                    placement.start_angle,
                    self.empty_color.as_str(),
                ));
            }
            slices.push(Slice::occupied(
                placement.event,
                placement.start_angle,
                placement.end_angle,
            ));
            current_angle = placement.end_angle;
        }

        if current_angle < 360.0 {
            slices.push(Slice::empty(current_angle, 360.0, self.empty_color.as_str()));
        }

        tracing::debug!(
            events = events.len(),
            slices = slices.len(),
            policy = ?self.overnight,
            "built dial slices"
        );
        slices
    }
}

impl Default for SliceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn place_preserving(events: &[DialEvent]) -> Vec<Placement<'_>> {
    let mut sorted: Vec<&DialEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_at);
    sorted
        .into_iter()
        .map(|event| Placement {
            event,
            start_angle: time_to_angle(&event.start_at),
            end_angle: time_to_angle(&event.end_at),
        })
        .collect()
}

fn place_split(events: &[DialEvent]) -> Vec<Placement<'_>> {
    let mut placements = Vec::with_capacity(events.len() + 1);
    for event in events {
        let start_angle = time_to_angle(&event.start_at);
        let end_angle = time_to_angle(&event.end_at);

        if event.duration_minutes() >= 24 * 60 {
            placements.push(Placement {
                event,
                start_angle: 0.0,
                end_angle: 360.0,
            });
        } else if end_angle < start_angle {
            placements.push(Placement {
                event,
                start_angle,
                end_angle: 360.0,
            });
            // An end at exactly midnight leaves nothing for the next morning.
            if end_angle > 0.0 {
                placements.push(Placement {
                    event,
                    start_angle: 0.0,
                    end_angle,
                });
            }
        } else {
            placements.push(Placement {
                event,
                start_angle,
                end_angle,
            });
        }
    }
    placements.sort_by(|a, b| {
        a.start_angle
            .total_cmp(&b.start_angle)
            .then_with(|| a.event.start_at.cmp(&b.event.start_at))
    });
    placements
}

/// Convenience function to build slices with default settings
pub fn build_slices(events: &[DialEvent]) -> Vec<Slice> {
    SliceBuilder::new().build(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> DialEvent {
        DialEvent::new(id, id, start, end, "#FF0000", EventType::Hard)
    }

    fn angles(slices: &[Slice]) -> Vec<(f64, f64, bool)> {
        slices
            .iter()
            .map(|s| (s.start_angle, s.end_angle, s.is_empty))
            .collect()
    }

    #[test]
    fn empty_day_is_one_full_empty_slice() {
        let slices = build_slices(&[]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].start_angle, 0.0);
        assert_eq!(slices[0].end_angle, 360.0);
        assert!(slices[0].is_empty);
        assert!(slices[0].event.is_none());
        assert_eq!(slices[0].color, EMPTY_SLICE_COLOR);
    }

    #[test]
    fn single_event_is_framed_by_gaps() {
        let slices = build_slices(&[event("a", at(1, 9, 0), at(1, 10, 0))]);
        assert_eq!(
            angles(&slices),
            vec![(0.0, 135.0, true), (135.0, 150.0, false), (150.0, 360.0, true)]
        );
        assert_eq!(slices[1].color, "#FF0000");
        assert_eq!(slices[1].event.as_ref().map(|e| e.id.as_str()), Some("a"));
    }

    #[test]
    fn adjacent_events_get_no_gap_slice() {
        let slices = build_slices(&[
            event("b", at(1, 10, 0), at(1, 11, 0)),
            event("a", at(1, 9, 0), at(1, 10, 0)),
        ]);
        assert_eq!(
            angles(&slices),
            vec![
                (0.0, 135.0, true),
                (135.0, 150.0, false),
                (150.0, 165.0, false),
                (165.0, 360.0, true)
            ]
        );
        assert_eq!(slices[1].event.as_ref().unwrap().id, "a");
        assert_eq!(slices[2].event.as_ref().unwrap().id, "b");
    }

    #[test]
    fn event_from_midnight_has_no_leading_gap() {
        let slices = build_slices(&[event("sleep", at(1, 0, 0), at(1, 7, 0))]);
        assert_eq!(angles(&slices), vec![(0.0, 105.0, false), (105.0, 360.0, true)]);
    }

    #[test]
    fn overlapping_events_are_layered_not_merged() {
        let slices = build_slices(&[
            event("a", at(1, 9, 0), at(1, 11, 0)),
            event("b", at(1, 10, 0), at(1, 12, 0)),
        ]);
        assert_eq!(
            angles(&slices),
            vec![
                (0.0, 135.0, true),
                (135.0, 165.0, false),
                (150.0, 180.0, false),
                (180.0, 360.0, true)
            ]
        );
    }

    #[test]
    fn zero_length_event_is_kept() {
        let slices = build_slices(&[event("z", at(1, 12, 0), at(1, 12, 0))]);
        assert_eq!(
            angles(&slices),
            vec![(0.0, 180.0, true), (180.0, 180.0, false), (180.0, 360.0, true)]
        );
        assert_eq!(slices[1].span(), 0.0);
    }

    #[test]
    fn sort_uses_full_timestamp() {
        // Previous day's 22:00 sorts before today's 08:00 despite the larger angle.
        let slices = build_slices(&[
            event("today", at(2, 8, 0), at(2, 9, 0)),
            event("yesterday", at(1, 22, 0), at(1, 23, 0)),
        ]);
        let ids: Vec<_> = slices
            .iter()
            .filter_map(|s| s.event.as_ref().map(|e| e.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["yesterday", "today"]);
    }

    #[test]
    fn preserve_keeps_backwards_range() {
        let slices = build_slices(&[event("night", at(1, 23, 0), at(2, 1, 0))]);
        assert_eq!(
            angles(&slices),
            vec![(0.0, 345.0, true), (345.0, 15.0, false), (15.0, 360.0, true)]
        );
        assert!(slices[1].span() < 0.0);
    }

    #[test]
    fn split_at_midnight_produces_two_pieces() {
        let builder = SliceBuilder::new().with_overnight_policy(OvernightPolicy::SplitAtMidnight);
        let slices = builder.build(&[
            event("night", at(1, 23, 0), at(2, 1, 0)),
            event("work", at(1, 9, 0), at(1, 10, 0)),
        ]);
        assert_eq!(
            angles(&slices),
            vec![
                (0.0, 15.0, false),
                (15.0, 135.0, true),
                (135.0, 150.0, false),
                (150.0, 345.0, true),
                (345.0, 360.0, false)
            ]
        );
        assert_eq!(slices[0].event.as_ref().unwrap().id, "night");
        assert_eq!(slices[4].event.as_ref().unwrap().id, "night");
    }

    #[test]
    fn split_end_at_midnight_reaches_full_circle() {
        let builder = SliceBuilder::new().with_overnight_policy(OvernightPolicy::SplitAtMidnight);
        let slices = builder.build(&[event("late", at(1, 22, 0), at(2, 0, 0))]);
        assert_eq!(angles(&slices), vec![(0.0, 330.0, true), (330.0, 360.0, false)]);
    }

    #[test]
    fn split_whole_day_covers_dial() {
        let builder = SliceBuilder::new().with_overnight_policy(OvernightPolicy::SplitAtMidnight);
        let slices = builder.build(&[event("trip", at(1, 9, 0), at(2, 9, 0))]);
        assert_eq!(angles(&slices), vec![(0.0, 360.0, false)]);
    }

    #[test]
    fn custom_empty_color() {
        let slices = SliceBuilder::new()
            .with_empty_color("#101010")
            .build(&[event("a", at(1, 9, 0), at(1, 10, 0))]);
        assert_eq!(slices[0].color, "#101010");
        assert_eq!(slices[2].color, "#101010");
    }
}

//! Click dispatch for dial slices.
//!
//! A click on an occupied slice opens its event; a click on an empty slice
//! offers the hour under the slice's middle for creating something new.

use chrono::Timelike;

use crate::dial::{normalize_angle, time_to_angle};
use crate::event::DialEvent;
use crate::slice::Slice;

/// What a click on a slice resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliceClick<'a> {
    Event(&'a DialEvent),
    /// Hour of day, 0-23
    TimeSlot(u32),
}

/// Receiver for resolved dial clicks.
pub trait DialInteraction {
    fn on_event_click(&mut self, event: &DialEvent);
    fn on_time_slot_click(&mut self, hour: u32);
}

impl Slice {
    /// Hour of day under the slice's mid angle.
    pub fn hour(&self) -> u32 {
        let hour = (normalize_angle(self.mid_angle()) / 360.0 * 24.0).floor() as u32;
        hour.min(23)
    }

    pub fn click(&self) -> SliceClick<'_> {
        match &self.event {
            Some(event) => SliceClick::Event(event),
            None => SliceClick::TimeSlot(self.hour()),
        }
    }

    /// Whether `angle` lies inside this slice. Backwards ranges wrap
    /// through midnight; zero-width slices contain nothing.
    pub fn contains(&self, angle: f64) -> bool {
        let angle = normalize_angle(angle);
        if self.start_angle <= self.end_angle {
            self.start_angle <= angle && angle < self.end_angle
        } else {
            angle >= self.start_angle || angle < self.end_angle
        }
    }
}

/// Resolve a click on `slice` and hand it to `handler`.
pub fn dispatch_click<H: DialInteraction + ?Sized>(slice: &Slice, handler: &mut H) {
    match slice.click() {
        SliceClick::Event(event) => handler.on_event_click(event),
        SliceClick::TimeSlot(hour) => handler.on_time_slot_click(hour),
    }
}

/// Topmost slice under `angle`. Slices are drawn in order, so when ranges
/// overlap the later slice wins.
pub fn slice_at_angle(slices: &[Slice], angle: f64) -> Option<&Slice> {
    slices.iter().rev().find(|s| s.contains(angle))
}

/// Slice under the current-time hand.
pub fn current_slice<'a, T: Timelike>(slices: &'a [Slice], current_time: &T) -> Option<&'a Slice> {
    slice_at_angle(slices, time_to_angle(current_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::slice::build_slices;
    use chrono::{NaiveDate, NaiveTime};

    fn event(id: &str, (sh, sm): (u32, u32), (eh, em): (u32, u32)) -> DialEvent {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DialEvent::new(
            id,
            id,
            day.and_hms_opt(sh, sm, 0).unwrap(),
            day.and_hms_opt(eh, em, 0).unwrap(),
            "#0000FF",
            EventType::Soft,
        )
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        hours: Vec<u32>,
    }

    impl DialInteraction for Recorder {
        fn on_event_click(&mut self, event: &DialEvent) {
            self.events.push(event.id.clone());
        }

        fn on_time_slot_click(&mut self, hour: u32) {
            self.hours.push(hour);
        }
    }

    #[test]
    fn hour_from_mid_angle() {
        assert_eq!(Slice::empty(0.0, 135.0, "#fff").hour(), 4);
        assert_eq!(Slice::empty(150.0, 360.0, "#fff").hour(), 17);
        assert_eq!(Slice::empty(0.0, 360.0, "#fff").hour(), 12);
        assert_eq!(Slice::empty(359.5, 360.0, "#fff").hour(), 23);
    }

    #[test]
    fn dispatch_routes_by_slice_kind() {
        let slices = build_slices(&[event("focus", (9, 0), (10, 0))]);
        let mut recorder = Recorder::default();
        for slice in &slices {
            dispatch_click(slice, &mut recorder);
        }
        assert_eq!(recorder.events, vec!["focus".to_string()]);
        assert_eq!(recorder.hours, vec![4, 17]);
    }

    #[test]
    fn click_resolution() {
        let slices = build_slices(&[event("focus", (9, 0), (10, 0))]);
        assert_eq!(slices[0].click(), SliceClick::TimeSlot(4));
        match slices[1].click() {
            SliceClick::Event(e) => assert_eq!(e.id, "focus"),
            other => panic!("expected event click, got {other:?}"),
        }
    }

    #[test]
    fn later_slice_wins_on_overlap() {
        let slices = build_slices(&[event("a", (9, 0), (11, 0)), event("b", (10, 0), (12, 0))]);
        let hit = slice_at_angle(&slices, 155.0).unwrap();
        assert_eq!(hit.event.as_ref().unwrap().id, "b");
        let hit = slice_at_angle(&slices, 140.0).unwrap();
        assert_eq!(hit.event.as_ref().unwrap().id, "a");
        assert!(slice_at_angle(&slices, 200.0).unwrap().is_empty);
    }

    #[test]
    fn zero_width_slice_is_never_hit() {
        let slices = build_slices(&[event("z", (12, 0), (12, 0))]);
        let hit = slice_at_angle(&slices, 180.0).unwrap();
        assert!(hit.is_empty);
        assert_eq!(hit.start_angle, 180.0);
    }

    #[test]
    fn backwards_slice_wraps_through_midnight() {
        let slice = Slice::occupied(&event("n", (23, 0), (1, 0)), 345.0, 15.0);
        assert!(slice.contains(350.0));
        assert!(slice.contains(5.0));
        assert!(!slice.contains(180.0));
    }

    #[test]
    fn current_slice_follows_the_clock() {
        let slices = build_slices(&[event("focus", (9, 0), (10, 0))]);
        let now = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        let hit = current_slice(&slices, &now).unwrap();
        assert_eq!(hit.event.as_ref().unwrap().id, "focus");
        let now = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert!(current_slice(&slices, &now).unwrap().is_empty);
    }
}

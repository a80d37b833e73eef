//! Calendar events as handed over by the data layer, and the normalized
//! shape the slice builder consumes.
//!
//! The data layer delivers three scheduling variants (anchor, hard, soft),
//! each with its own fields. Recurrence has already been materialized into
//! concrete start/end instants. [`ScheduledEvent::normalize`] reduces any
//! variant to a [`DialEvent`].

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::dial::TimeOfDay;
use crate::error::ValidationError;

/// Scheduling variant of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Fixed daily anchor (sleep, meals)
    Anchor,
    /// Rigid calendar block
    Hard,
    /// Flexible goal-based slot
    Soft,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anchor => "anchor",
            Self::Hard => "hard",
            Self::Soft => "soft",
        }
    }
}

/// Fields shared by every event variant. Timestamps are ISO-8601 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBase {
    pub id: String,
    pub title: String,
    pub start_at: String,
    pub end_at: String,
    /// `#RRGGBB`
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorEvent {
    #[serde(flatten)]
    pub base: EventBase,
    /// Routine the anchor belongs to, e.g. "sleep" or "lunch".
    #[serde(default)]
    pub routine: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardEvent {
    #[serde(flatten)]
    pub base: EventBase,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftEvent {
    #[serde(flatten)]
    pub base: EventBase,
    /// Minutes the flexible slot aims to fill.
    #[serde(default)]
    pub goal_minutes: u32,
}

/// An event as delivered by the data layer, tagged by `event_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "lowercase")]
pub enum ScheduledEvent {
    Anchor(AnchorEvent),
    Hard(HardEvent),
    Soft(SoftEvent),
}

impl ScheduledEvent {
    pub fn base(&self) -> &EventBase {
        match self {
            Self::Anchor(e) => &e.base,
            Self::Hard(e) => &e.base,
            Self::Soft(e) => &e.base,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Self::Anchor(_) => EventType::Anchor,
            Self::Hard(_) => EventType::Hard,
            Self::Soft(_) => EventType::Soft,
        }
    }

    /// Reduce to the minimal shape the slice builder needs.
    ///
    /// Only unparsable timestamps are rejected. Backwards and zero-length
    /// ranges pass through untouched.
    pub fn normalize(&self) -> Result<DialEvent, ValidationError> {
        let base = self.base();
        let start_at = parse_wall_clock(&base.start_at).ok_or_else(|| {
            ValidationError::InvalidTimestamp {
                event_id: base.id.clone(),
                field: "start_at",
                value: base.start_at.clone(),
            }
        })?;
        let end_at = parse_wall_clock(&base.end_at).ok_or_else(|| {
            ValidationError::InvalidTimestamp {
                event_id: base.id.clone(),
                field: "end_at",
                value: base.end_at.clone(),
            }
        })?;

        Ok(DialEvent {
            id: base.id.clone(),
            title: base.title.clone(),
            start_at,
            end_at,
            color: base.color.clone(),
            event_type: self.event_type(),
        })
    }
}

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// An explicit offset is kept as stated (no timezone conversion); naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` and the space-separated form are accepted.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = value.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// The event shape consumed by the slice builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialEvent {
    pub id: String,
    pub title: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub color: String,
    pub event_type: EventType,
}

impl DialEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_at: NaiveDateTime,
        end_at: NaiveDateTime,
        color: impl Into<String>,
        event_type: EventType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_at,
            end_at,
            color: color.into(),
            event_type,
        }
    }

    pub fn start_time(&self) -> TimeOfDay {
        TimeOfDay::of(&self.start_at)
    }

    pub fn end_time(&self) -> TimeOfDay {
        TimeOfDay::of(&self.end_at)
    }

    /// End time-of-day falls before the start time-of-day, e.g. 23:00-01:00.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time() < self.start_time()
    }

    /// Get duration in minutes (negative for backwards ranges)
    pub fn duration_minutes(&self) -> i64 {
        (self.end_at - self.start_at).num_minutes()
    }
}

/// Normalize a batch, dropping only events whose timestamps cannot be parsed.
pub fn normalize_events(events: &[ScheduledEvent]) -> Vec<DialEvent> {
    events
        .iter()
        .filter_map(|event| match event.normalize() {
            Ok(dial_event) => Some(dial_event),
            Err(e) => {
                tracing::warn!(error = %e, "dropping event from dial");
                None
            }
        })
        .collect()
}

/// Parse a JSON array of events one element at a time and normalize it.
///
/// Elements that do not match any event shape are dropped with a warning,
/// so one bad record never costs the rest of the day.
///
/// # Errors
///
/// Returns an error only if `json` is not a JSON array.
pub fn parse_events(json: &str) -> Result<Vec<DialEvent>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let events: Vec<ScheduledEvent> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed event");
                None
            }
        })
        .collect();
    Ok(normalize_events(&events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn deserializes_tagged_variants() {
        let json = r##"[
            {"event_type": "anchor", "id": "a1", "title": "Sleep", "start_at": "2024-01-01T00:00:00",
             "end_at": "2024-01-01T07:00:00", "color": "#334455", "routine": "sleep"},
            {"event_type": "hard", "id": "h1", "title": "Standup", "start_at": "2024-01-01T09:00:00",
             "end_at": "2024-01-01T09:15:00", "color": "#FF0000", "location": "Room 4"},
            {"event_type": "soft", "id": "s1", "title": "Reading", "start_at": "2024-01-01T20:00:00",
             "end_at": "2024-01-01T21:00:00", "color": "#00FF00", "goal_minutes": 45}
        ]"##;
        let events: Vec<ScheduledEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_type(), EventType::Anchor);
        match &events[1] {
            ScheduledEvent::Hard(h) => assert_eq!(h.location.as_deref(), Some("Room 4")),
            other => panic!("expected hard event, got {other:?}"),
        }
        match &events[2] {
            ScheduledEvent::Soft(s) => assert_eq!(s.goal_minutes, 45),
            other => panic!("expected soft event, got {other:?}"),
        }
    }

    #[test]
    fn hard_event_location_is_optional() {
        let json = r##"{"event_type": "hard", "id": "h", "title": "T", "start_at": "2024-01-01T09:00",
            "end_at": "2024-01-01T10:00", "color": "#000000"}"##;
        let event: ScheduledEvent = serde_json::from_str(json).unwrap();
        let dial = event.normalize().unwrap();
        assert_eq!(dial.event_type, EventType::Hard);
        assert_eq!(dial.duration_minutes(), 60);
    }

    #[test]
    fn offset_timestamps_keep_their_wall_clock() {
        let dt = parse_wall_clock("2024-01-01T09:30:00+09:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (9, 30));
        let dt = parse_wall_clock("2024-01-01T23:15:00Z").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (23, 15));
    }

    #[test]
    fn accepts_naive_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_wall_clock("2024-01-01T09:00:00"), Some(expected));
        assert_eq!(parse_wall_clock("2024-01-01T09:00"), Some(expected));
        assert_eq!(parse_wall_clock("2024-01-01 09:00"), Some(expected));
        assert_eq!(parse_wall_clock("2024-01-01 09:00:00"), Some(expected));
        assert!(parse_wall_clock("yesterday").is_none());
    }

    #[test]
    fn backwards_range_is_accepted() {
        let event = ScheduledEvent::Hard(HardEvent {
            base: EventBase {
                id: "night".into(),
                title: "Night shift".into(),
                start_at: "2024-01-01T23:00:00".into(),
                end_at: "2024-01-02T01:00:00".into(),
                color: "#123456".into(),
            },
            location: None,
        });
        let dial = event.normalize().unwrap();
        assert!(dial.crosses_midnight());
        assert_eq!(dial.duration_minutes(), 120);
    }

    #[test]
    fn normalize_events_drops_only_unparsable() {
        let good = ScheduledEvent::Soft(SoftEvent {
            base: EventBase {
                id: "ok".into(),
                title: "Walk".into(),
                start_at: "2024-01-01T12:00:00".into(),
                end_at: "2024-01-01T12:00:00".into(),
                color: "#00AA00".into(),
            },
            goal_minutes: 30,
        });
        let bad = ScheduledEvent::Anchor(AnchorEvent {
            base: EventBase {
                id: "bad".into(),
                title: "Lunch".into(),
                start_at: "noon".into(),
                end_at: "2024-01-01T13:00:00".into(),
                color: "#AA0000".into(),
            },
            routine: "lunch".into(),
        });
        let err = bad.normalize().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidTimestamp { field: "start_at", .. }
        ));

        let events = normalize_events(&[good, bad]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ok");
        assert_eq!(events[0].duration_minutes(), 0);
    }

    #[test]
    fn parse_events_keeps_valid_events_in_a_mixed_batch() {
        let json = r##"[
            {"event_type": "hard", "id": "m1", "title": "Meeting", "start_at": "2024-01-01T09:00:00",
             "end_at": "2024-01-01T10:00:00", "color": "#FF0000"},
            {"event_type": "soft", "id": "s1", "title": "Reading", "start_at": "2024-01-01T20:00:00",
             "end_at": "2024-01-01T21:00:00", "color": "#00FF00"},
            {"event_type": "anchor", "id": "a1", "title": "Sleep", "start_at": "2024-01-01T00:00:00",
             "end_at": "2024-01-01T07:00:00", "color": "#334455"},
            {"event_type": "meeting", "id": "x1", "title": "Unknown kind"},
            42
        ]"##;
        let events = parse_events(json).unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["m1", "s1", "a1"]);
        assert_eq!(events[1].event_type, EventType::Soft);
    }

    #[test]
    fn parse_events_rejects_non_array_payload() {
        assert!(parse_events(r#"{"id": "m1"}"#).is_err());
        assert!(parse_events("not json").is_err());
    }
}

//! SVG rendering of a day dial.

use chrono::Timelike;
use svg::node::element::{Circle, Group, Line, Path, Text};
use svg::Document;

use crate::config::DialConfig;
use crate::dial::{describe_arc, fmt_num, hour_markers, label_position, now_hand};
use crate::slice::Slice;

/// Draws slices, hour labels and the current-time hand into an SVG document.
#[derive(Debug, Clone)]
pub struct DialRenderer {
    size: f64,
    radius: f64,
    label_ratio: f64,
    hour_label_ratio: f64,
    min_label_span: f64,
    show_hour_labels: bool,
    background: String,
    slice_stroke: String,
    now_hand_color: String,
}

impl DialRenderer {
    pub fn new(size: f64, radius: f64) -> Self {
        Self::from_config(&DialConfig::default()).with_geometry(size, radius)
    }

    pub fn from_config(config: &DialConfig) -> Self {
        Self {
            size: config.dial.size as f64,
            radius: config.dial.radius,
            label_ratio: config.dial.label_ratio,
            hour_label_ratio: config.dial.hour_label_ratio,
            min_label_span: config.dial.min_label_span,
            show_hour_labels: config.dial.show_hour_labels,
            background: config.colors.background.clone(),
            slice_stroke: config.colors.slice_stroke.clone(),
            now_hand_color: config.colors.now_hand.clone(),
        }
    }

    pub fn with_geometry(mut self, size: f64, radius: f64) -> Self {
        self.size = size;
        self.radius = radius;
        self
    }

    pub fn with_hour_labels(mut self, show: bool) -> Self {
        self.show_hour_labels = show;
        self
    }

    fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// Render `slices` in order; later slices paint over earlier ones.
    pub fn render<T: Timelike>(&self, slices: &[Slice], current_time: Option<&T>) -> Document {
        let c = self.center();

        let mut wedges = Group::new().set("class", "slices");
        for slice in slices {
            let mut path = Path::new()
                .set("d", describe_arc(c, c, self.radius, slice.start_angle, slice.end_angle))
                .set("fill", slice.color.as_str())
                .set("stroke", self.slice_stroke.as_str())
                .set("stroke-width", 1);
            if let Some(event) = &slice.event {
                path = path
                    .set("data-event-id", event.id.as_str())
                    .set("data-event-type", event.event_type.as_str());
            } else {
                path = path.set("data-hour", slice.hour());
            }
            wedges = wedges.add(path);
        }

        let mut labels = Group::new().set("class", "labels").set("font-size", 11);
        for slice in slices {
            let Some(event) = &slice.event else { continue };
            let Some(place) = label_position(c, c, self.radius, slice, self.label_ratio, self.min_label_span)
            else {
                continue;
            };
            labels = labels.add(
                Text::new(event.title.as_str())
                    .set("x", fmt_num(place.point.x))
                    .set("y", fmt_num(place.point.y))
                    .set("text-anchor", place.anchor.as_str())
                    .set("dominant-baseline", "middle"),
            );
        }

        let mut document = Document::new()
            .set("viewBox", (0, 0, self.size, self.size))
            .set("width", self.size)
            .set("height", self.size)
            .add(
                Circle::new()
                    .set("cx", c)
                    .set("cy", c)
                    .set("r", self.size / 2.0)
                    .set("fill", self.background.as_str()),
            )
            .add(wedges)
            .add(labels);

        if self.show_hour_labels {
            let mut hours = Group::new().set("class", "hours").set("font-size", 10);
            for marker in hour_markers(c, c, self.radius * self.hour_label_ratio) {
                hours = hours.add(
                    Text::new(marker.hour.to_string())
                        .set("x", fmt_num(marker.point.x))
                        .set("y", fmt_num(marker.point.y))
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
            document = document.add(hours);
        }

        if let Some(time) = current_time {
            let (tip, _) = now_hand(c, c, self.radius, time);
            document = document.add(
                Line::new()
                    .set("class", "now")
                    .set("x1", c)
                    .set("y1", c)
                    .set("x2", fmt_num(tip.x))
                    .set("y2", fmt_num(tip.y))
                    .set("stroke", self.now_hand_color.as_str())
                    .set("stroke-width", 2),
            );
        }

        document
    }

    pub fn render_to_string<T: Timelike>(&self, slices: &[Slice], current_time: Option<&T>) -> String {
        self.render(slices, current_time).to_string()
    }
}

impl Default for DialRenderer {
    fn default() -> Self {
        Self::from_config(&DialConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DialEvent, EventType};
    use crate::slice::build_slices;
    use chrono::{NaiveDate, NaiveTime};

    fn focus() -> DialEvent {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DialEvent::new(
            "focus-1",
            "Deep work",
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(12, 0, 0).unwrap(),
            "#FF0000",
            EventType::Hard,
        )
    }

    #[test]
    fn empty_day_renders_one_wedge() {
        let svg = DialRenderer::new(200.0, 80.0)
            .with_hour_labels(false)
            .render_to_string::<NaiveTime>(&build_slices(&[]), None);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("data-hour=\"12\""));
        assert!(!svg.contains("class=\"now\""));
    }

    #[test]
    fn event_slices_carry_ids_and_labels() {
        let svg = DialRenderer::default()
            .render_to_string::<NaiveTime>(&build_slices(&[focus()]), None);
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("data-event-id=\"focus-1\""));
        assert!(svg.contains("data-event-type=\"hard\""));
        assert!(svg.contains("Deep work"));
        assert!(svg.contains("fill=\"#FF0000\""));
    }

    #[test]
    fn hour_labels_and_now_hand() {
        let now = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        let svg = DialRenderer::new(200.0, 80.0).render_to_string(&build_slices(&[]), Some(&now));
        assert!(svg.contains("class=\"hours\""));
        assert_eq!(svg.matches("<text").count(), 24);
        // 06:00 points right: tip at (100 + 80, 100)
        assert!(svg.contains("x2=\"180\""));
        assert!(svg.contains("y2=\"100\""));
    }
}

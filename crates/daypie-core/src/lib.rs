//! # Daypie Core Library
//!
//! This library provides the geometry core of the Daypie day planner: a
//! 24-hour radial chart where calendar events become pie slices. The CLI
//! binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Dial**: pure time-of-day <-> angle mapping (0° = midnight, at the
//!   top, clockwise) plus arc paths, label placement and hour markers
//! - **Slices**: sorts one day's events and fills the gaps, producing a
//!   gap-free cover of the dial
//! - **Interaction**: resolves slice clicks to events or empty hours
//! - **Render**: SVG output of a dial
//!
//! Everything here is a pure function of its inputs. Events and the current
//! time are passed in on every call; nothing is cached between calls.
//!
//! ## Key Components
//!
//! - [`SliceBuilder`]: event list -> ordered slices
//! - [`DialEvent`]: the normalized event shape the builder consumes
//! - [`DialRenderer`]: slices -> SVG document
//! - [`DialConfig`]: TOML configuration

pub mod clock;
pub mod config;
pub mod dial;
pub mod error;
pub mod event;
pub mod interaction;
pub mod render;
pub mod slice;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::DialConfig;
pub use dial::{
    angle_to_time, cartesian_to_angle, describe_arc, polar_to_cartesian, time_to_angle, Point,
    TimeOfDay,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use event::{normalize_events, parse_events, DialEvent, EventType, ScheduledEvent};
pub use interaction::{current_slice, dispatch_click, slice_at_angle, DialInteraction, SliceClick};
pub use render::DialRenderer;
pub use slice::{build_slices, OvernightPolicy, Slice, SliceBuilder, EMPTY_SLICE_COLOR};

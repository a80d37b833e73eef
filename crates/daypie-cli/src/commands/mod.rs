pub mod angle;
pub mod arc;
pub mod click;
pub mod config;
pub mod render;
pub mod slices;
pub mod watch;

use std::path::Path;

use clap::ValueEnum;
use daypie_core::dial::{angle_to_time, TimeOfDay};
use daypie_core::{parse_events, DialConfig, DialEvent, OvernightPolicy, SliceBuilder};

/// Overnight policy as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Preserve,
    Split,
}

impl From<PolicyArg> for OvernightPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Preserve => OvernightPolicy::Preserve,
            PolicyArg::Split => OvernightPolicy::SplitAtMidnight,
        }
    }
}

/// Read a JSON array of events and normalize it. Malformed records and
/// events with unparsable timestamps are dropped with a warning.
pub fn read_events(path: &Path) -> Result<Vec<DialEvent>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Ok(parse_events(&content)?)
}

/// Slice builder from config, with an optional policy override.
pub fn slice_builder(config: &DialConfig, policy: Option<PolicyArg>) -> SliceBuilder {
    let builder = config.slice_builder();
    match policy {
        Some(policy) => builder.with_overnight_policy(policy.into()),
        None => builder,
    }
}

/// `HH:MM` for a slice boundary; the closing 360° edge reads `24:00`.
pub fn boundary_label(angle: f64) -> String {
    if angle >= 360.0 {
        return "24:00".to_string();
    }
    let base = chrono::NaiveDate::MIN;
    TimeOfDay::of(&angle_to_time(angle, base)).to_string()
}

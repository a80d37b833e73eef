use std::path::PathBuf;

use clap::Args;
use daypie_core::{
    cartesian_to_angle, dispatch_click, slice_at_angle, DialConfig, DialEvent, DialInteraction,
};

use super::{read_events, slice_builder, PolicyArg};

#[derive(Args)]
pub struct ClickArgs {
    /// JSON file with an array of events
    pub file: PathBuf,
    /// Click at a dial angle in degrees
    #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["index", "at"])]
    pub angle: Option<f64>,
    /// Click the slice at this position in draw order
    #[arg(long, conflicts_with = "at")]
    pub index: Option<usize>,
    /// Click at pixel coordinates "x,y" on the configured canvas
    #[arg(long)]
    pub at: Option<String>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

/// Prints what a click resolved to.
struct StdoutDispatcher;

impl DialInteraction for StdoutDispatcher {
    fn on_event_click(&mut self, event: &DialEvent) {
        println!("event {} {}", event.id, event.title);
    }

    fn on_time_slot_click(&mut self, hour: u32) {
        println!("slot {hour}");
    }
}

fn parse_point(value: &str) -> Result<(f64, f64), Box<dyn std::error::Error>> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{value}'"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

pub fn run(args: ClickArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = DialConfig::load_or_default();
    let events = read_events(&args.file)?;
    let slices = slice_builder(&config, args.policy).build(&events);

    let slice = if let Some(index) = args.index {
        slices
            .get(index)
            .ok_or_else(|| format!("slice index {index} out of range (0..{})", slices.len()))?
    } else {
        let angle = match (args.angle, args.at.as_deref()) {
            (Some(angle), _) => angle,
            (None, Some(at)) => {
                let (x, y) = parse_point(at)?;
                let c = config.dial.size as f64 / 2.0;
                cartesian_to_angle(c, c, x, y)
            }
            (None, None) => return Err("one of --angle, --index or --at is required".into()),
        };
        slice_at_angle(&slices, angle).ok_or_else(|| format!("no slice at {angle}°"))?
    };

    dispatch_click(slice, &mut StdoutDispatcher);
    Ok(())
}

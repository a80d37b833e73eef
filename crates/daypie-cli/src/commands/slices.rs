use std::path::PathBuf;

use clap::Args;
use daypie_core::DialConfig;

use super::{boundary_label, read_events, slice_builder, PolicyArg};

#[derive(Args)]
pub struct SlicesArgs {
    /// JSON file with an array of events
    pub file: PathBuf,
    /// Override the configured overnight policy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SlicesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = DialConfig::load_or_default();
    let events = read_events(&args.file)?;
    let slices = slice_builder(&config, args.policy).build(&events);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&slices)?);
        return Ok(());
    }

    for (i, slice) in slices.iter().enumerate() {
        let what = match &slice.event {
            Some(event) => format!("{} [{}] {}", event.id, event.event_type.as_str(), event.title),
            None => "empty".to_string(),
        };
        println!(
            "{i:>3}  {:>6.2} -> {:>6.2}  {}-{}  {}  {what}",
            slice.start_angle,
            slice.end_angle,
            boundary_label(slice.start_angle),
            boundary_label(slice.end_angle),
            slice.color,
        );
    }
    Ok(())
}

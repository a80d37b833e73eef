use std::path::PathBuf;

use clap::Args;
use daypie_core::{Clock, DialConfig, DialRenderer, SystemClock, TimeOfDay};

use super::{read_events, slice_builder, PolicyArg};

#[derive(Args)]
pub struct RenderArgs {
    /// JSON file with an array of events (omit for an empty day)
    pub file: Option<PathBuf>,
    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub out: Option<PathBuf>,
    /// Current time as HH:MM (defaults to the system clock)
    #[arg(long, conflicts_with = "no_now")]
    pub now: Option<String>,
    /// Leave out the current-time hand
    #[arg(long)]
    pub no_now: bool,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

pub fn run(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = DialConfig::load_or_default();
    let events = match &args.file {
        Some(path) => read_events(path)?,
        None => Vec::new(),
    };
    let slices = slice_builder(&config, args.policy).build(&events);

    let now = if args.no_now {
        None
    } else {
        match args.now.as_deref() {
            Some(value) => {
                let t: TimeOfDay = value.parse()?;
                chrono::NaiveTime::from_hms_opt(t.hours, t.minutes, 0)
            }
            None => Some(SystemClock.now().time()),
        }
    };

    let svg = DialRenderer::from_config(&config).render_to_string(&slices, now.as_ref());
    match args.out {
        Some(path) => {
            std::fs::write(&path, svg)?;
            tracing::info!(path = %path.display(), slices = slices.len(), "wrote dial");
        }
        None => println!("{svg}"),
    }
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use daypie_core::{current_slice, time_to_angle, Clock, DialConfig, SystemClock, TimeOfDay};

use super::{read_events, slice_builder, PolicyArg};

#[derive(Args)]
pub struct WatchArgs {
    /// JSON file with an array of events
    pub file: PathBuf,
    /// Seconds between refreshes (defaults to clock.refresh_secs)
    #[arg(long)]
    pub interval: Option<u64>,
    /// Stop after this many refreshes
    #[arg(long)]
    pub count: Option<u64>,
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
}

/// Re-sample the clock on a fixed cadence and report what the now hand points at.
pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = DialConfig::load_or_default();
    let events = read_events(&args.file)?;
    let slices = slice_builder(&config, args.policy).build(&events);
    let period = Duration::from_secs(args.interval.unwrap_or(config.clock.refresh_secs).max(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let mut ticker = tokio::time::interval(period);
        let mut ticks = 0u64;
        loop {
            ticker.tick().await;
            let now = SystemClock.now();
            let what = match current_slice(&slices, &now).and_then(|s| s.event.as_ref()) {
                Some(event) => format!("{} ({})", event.title, event.id),
                None => "free".to_string(),
            };
            println!("{}  {:>6.2}°  {what}", TimeOfDay::of(&now), time_to_angle(&now));

            ticks += 1;
            if args.count.is_some_and(|count| ticks >= count) {
                break;
            }
        }
    });
    Ok(())
}

use chrono::NaiveDate;
use clap::Subcommand;
use daypie_core::{angle_to_time, Clock, SystemClock, TimeOfDay};

#[derive(Subcommand)]
pub enum AngleAction {
    /// Dial angle for a time of day
    To {
        /// Time as HH:MM
        time: String,
    },
    /// Time of day for a dial angle
    From {
        /// Angle in degrees (wrapped into 0-360)
        #[arg(allow_negative_numbers = true)]
        angle: f64,
        /// Date to attach (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: AngleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AngleAction::To { time } => {
            let time: TimeOfDay = time.parse()?;
            println!("{}", time.angle());
        }
        AngleAction::From { angle, date } => {
            let date = date.unwrap_or_else(|| SystemClock.now().date());
            let time = angle_to_time(angle, date);
            println!("{}", time.format("%Y-%m-%dT%H:%M:%S"));
        }
    }
    Ok(())
}

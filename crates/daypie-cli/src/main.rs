use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "daypie-cli", version, about = "Daypie 24-hour dial CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert between times of day and dial angles
    Angle {
        #[command(subcommand)]
        action: commands::angle::AngleAction,
    },
    /// Print the pie-wedge path between two angles
    Arc(commands::arc::ArcArgs),
    /// Build and list the slices for a day of events
    Slices(commands::slices::SlicesArgs),
    /// Resolve a click on the dial to an event or an empty hour
    Click(commands::click::ClickArgs),
    /// Render a day of events as an SVG dial
    Render(commands::render::RenderArgs),
    /// Follow the current time around the dial
    Watch(commands::watch::WatchArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Angle { action } => commands::angle::run(action),
        Commands::Arc(args) => commands::arc::run(args),
        Commands::Slices(args) => commands::slices::run(args),
        Commands::Click(args) => commands::click::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

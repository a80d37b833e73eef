use clap::Args;
use daypie_core::describe_arc;

#[derive(Args)]
pub struct ArcArgs {
    /// Start angle in degrees
    #[arg(allow_negative_numbers = true)]
    pub start: f64,
    /// End angle in degrees
    #[arg(allow_negative_numbers = true)]
    pub end: f64,
    #[arg(long, default_value_t = 100.0)]
    pub radius: f64,
    /// Center x (defaults to the radius)
    #[arg(long)]
    pub cx: Option<f64>,
    /// Center y (defaults to the radius)
    #[arg(long)]
    pub cy: Option<f64>,
}

pub fn run(args: ArcArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cx = args.cx.unwrap_or(args.radius);
    let cy = args.cy.unwrap_or(args.radius);
    println!("{}", describe_arc(cx, cy, args.radius, args.start, args.end));
    Ok(())
}

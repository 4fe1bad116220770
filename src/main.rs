use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use boxsim::core::Simulation;
use boxsim::io;

/// Event-driven hard-disc particle simulator.
///
/// Loads a scenario description, resolves every collision in chronological
/// order up to the configured duration, and prints the final state.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the scenario description file.
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let scenario = io::load_scenario(&args.input)?;
    let mut sim = Simulation::new(scenario.width, scenario.duration, scenario.particles)?;
    sim.run()?;
    print!("{}", io::format_report(&sim));
    Ok(())
}

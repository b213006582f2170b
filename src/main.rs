use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use realms::{
    engine::{Engine, EnginePhase},
    render::{MapView, ReportView, StatusLine},
    scenario::ScenarioLoader,
    SimConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Civilization simulator with a written chronicle")]
struct Cli {
    /// Years to simulate [default: 10]
    #[arg(short, long)]
    years: Option<u32>,

    /// Random seed; a fresh one is chosen and printed when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only print the final report
    #[arg(short, long)]
    quiet: bool,

    /// Width and height of the square map [default: 20]
    #[arg(short, long)]
    map_size: Option<usize>,

    /// Number of founding civilizations [default: 2]
    #[arg(short, long)]
    civilizations: Option<usize>,

    /// Scenario YAML file; command-line flags override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, log_level) = match &cli.scenario {
        Some(path) => {
            let scenario = ScenarioLoader::new(".").load(path)?;
            (scenario.to_config(), scenario.logging.level)
        }
        None => (SimConfig::default(), "info".to_string()),
    };
    if let Some(years) = cli.years {
        config.years = years;
    }
    if let Some(map_size) = cli.map_size {
        config.map_size = map_size;
    }
    if let Some(civilizations) = cli.civilizations {
        config.civilizations = civilizations;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.quiet = cli.quiet || cli.json;

    let level = if config.quiet { "warn" } else { log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = *config.seed.get_or_insert_with(rand::random);
    if !cli.json {
        println!("Using seed {seed}");
    }

    let mut engine = Engine::new(&config).context("Failed to set up the simulation")?;
    let days_per_year = config.calendar.days_per_year().max(1);
    while !matches!(engine.phase(), EnginePhase::Terminated(_)) {
        let summary = engine.tick()?;
        if config.quiet || summary.termination.is_some() || summary.day % days_per_year != 0 {
            continue;
        }
        println!("{}", "-".repeat(60));
        println!(
            "{}",
            MapView {
                world: engine.world(),
                civilizations: engine.civilizations(),
            }
        );
        println!("Civilization Status:");
        for civ in engine.civilizations() {
            println!("  {}", StatusLine(civ));
        }
    }
    let report = engine.into_report();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", ReportView(&report));
    }
    Ok(())
}

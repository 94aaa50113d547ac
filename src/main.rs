//! # Run the simulation with defaults (5000 iterations)
//! context-freeze
//!
//! # Run from a config file with a fixed seed
//! context-freeze --config config/default.toml --seed 42
//!
//! # Quick run
//! context-freeze --iterations 100

use anyhow::{Context, Result};
use clap::Parser;

use context_freeze::{SimulationConfig, SimulationEngine, TokenCounter};

#[derive(Parser)]
#[command(name = "context-freeze")]
#[command(about = "Token cost simulation for frozen decision-context artifacts")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the iteration count
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Seed the sampler for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => SimulationConfig::default(),
    };
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    // Fatal if the encoding data cannot be loaded: every cost in the
    // simulation is denominated in its tokens.
    let counter = TokenCounter::cl100k().context("initializing token counter")?;
    let engine = SimulationEngine::new(config, counter)?;

    println!("\n=== INIT PHASE ===");
    println!(
        "Artifact tokens (full context): {}",
        engine.artifact().tokens()
    );
    println!("--------------------------------");

    let result = engine.run();

    println!("\n=== EXECUTION PHASE ===\n");
    for trace in &result.traces {
        println!("Iteration {}", trace.index + 1);
        println!("{}", trace.delta_text);
        println!("-> {}", trace.output);
        println!();
    }
    println!("--------------------------------");

    println!("\n{}", result.summary());

    Ok(())
}

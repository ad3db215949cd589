use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hexcell_core::{init_logging, AppConfig};
use hexcell_lib::Simulation;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "run")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Generations to step before exiting
    #[arg(short, long, default_value_t = 500)]
    generations: u64,

    /// Seed for the random number generator, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Rule file to start from instead of a random rule
    #[arg(long, conflicts_with = "load_random")]
    load: Option<PathBuf>,

    /// Start from a random rule out of the library
    #[arg(long)]
    load_random: bool,

    /// Mutate the rule every N generations
    #[arg(long)]
    mutate_every: Option<u64>,

    /// Save the final rule into the library
    #[arg(long)]
    save: bool,

    /// Write the final generation as a JSON frame
    #[arg(long)]
    frame_out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    /// Step a single rule
    Run,
    /// Print the starting rule and exit
    Describe,
    /// Step with a fresh random rule after each rule's allotted generations
    Explore,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    if matches!(args.mode, Mode::Explore) {
        config.run.auto_advance = true;
    }

    let mut sim = Simulation::new(config)?;
    if let Some(path) = &args.load {
        sim.load_rule(path)?;
        tracing::info!(path = %path.display(), "Loaded rule");
    } else if args.load_random {
        let path = sim.load_random_rule()?;
        tracing::info!(path = %path.display(), "Loaded random rule");
    }

    if matches!(args.mode, Mode::Describe) {
        println!("{}", sim.rules());
        return Ok(());
    }

    for generation in 1..=args.generations {
        sim.step();
        if let Some(every) = args.mutate_every.filter(|n| *n > 0) {
            if generation % every == 0 {
                let mutation = sim.mutate_rule();
                tracing::info!(?mutation, generation, "Rule mutated");
            }
        }
    }

    let metrics = sim.metrics();
    tracing::info!(
        generations = metrics.generation_count(),
        rules = metrics.rule_count(),
        mutations = metrics.mutation_count(),
        avg_step_us = metrics.average_step().as_micros() as u64,
        "Run finished"
    );
    for (state, count) in sim.histogram().iter().enumerate() {
        println!("state {state}: {count} cells");
    }

    if args.save {
        let path = sim.save_rule()?;
        println!("Rule saved to {}", path.display());
    }
    if let Some(path) = &args.frame_out {
        sim.export_frame(path)?;
        println!("Frame written to {}", path.display());
    }

    Ok(())
}

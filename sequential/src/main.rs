use std::time::Instant;

use anyhow::Context;
use shared::config::SequentialConfig;
use shared::output::{save, write_final_generation};
use shared::{evolve, Generations, DEFAULT_SEED};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start = Instant::now();

    let args: Vec<String> = std::env::args().collect();
    let config = SequentialConfig::from_args(&args)?;
    log::debug!("{config:?}");

    let generations =
        Generations::seeded(config.size, DEFAULT_SEED).context("failed to set up the board")?;
    let evolution = evolve(generations, config.max_generations);

    save(&config.output, |out| {
        write_final_generation(out, evolution.generations, &evolution.grid)
    })?;

    println!("Time taken: {:.6} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

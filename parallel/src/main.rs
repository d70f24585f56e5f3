use std::time::Instant;

use anyhow::Context;
use shared::config::ParallelConfig;
use shared::output::{save, write_grid};
use shared::{Grid, ParallelEngine, DEFAULT_SEED};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = ParallelConfig::from_args(&args)?;
    log::debug!("{config:?}");

    let grid = Grid::seeded(config.size, DEFAULT_SEED).context("failed to set up the board")?;

    let start = Instant::now();
    let evolution = ParallelEngine::new(config.threads)
        .run(grid, config.max_generations)
        .context("failed to run the workers")?;
    let elapsed = start.elapsed();

    if evolution.converged {
        println!("No change detected at iteration {}", evolution.generations);
    }
    println!("Total iterations completed: {}", evolution.generations);
    println!("Total time: {:.6} seconds", elapsed.as_secs_f64());

    save(&config.output, |out| write_grid(out, &evolution.grid))?;
    Ok(())
}

use log::{info, trace};

use crate::error::LifeError;
use crate::grid::Grid;
use crate::rule::Neighborhood;

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    /// The current grid after the last generation.
    pub grid: Grid,
    /// Number of generations computed, including the one that found no change.
    pub generations: usize,
    /// True when the run stopped because a generation changed nothing.
    pub converged: bool,
}

/// Compute the next generation of `current` into `next`.
///
/// `current` is only read. Returns whether any interior cell changed.
pub fn compute_generation(current: &Grid, next: &mut Grid) -> bool {
    assert_eq!(current.size(), next.size(), "generation pair size mismatch");

    let mut changed = false;
    for row in 1..=current.size() {
        let before = current.interior_row(row);
        let after = next.interior_row_mut(row);
        for (col, (slot, &old)) in after.iter_mut().zip(before).enumerate() {
            let state = current.evolve(row, col + 1);
            changed |= state != old;
            *slot = state;
        }
    }
    changed
}

/// The current/next double buffer.
#[derive(Debug, Clone)]
pub struct Generations {
    current: Grid,
    next: Grid,
}

impl Generations {
    /// Seed the current grid and start the next grid as an identical copy.
    pub fn seeded(size: usize, seed: u64) -> Result<Self, LifeError> {
        let current = Grid::seeded(size, seed)?;
        let mut next = Grid::new(size)?;
        next.clone_from(&current);
        Ok(Generations { current, next })
    }

    pub fn from_grid(grid: Grid) -> Self {
        let next = grid.clone();
        Generations {
            current: grid,
            next,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Exchange the roles of the two grids. No cells are copied.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Advance the grid by one step. Returns whether anything changed.
    pub fn advance(&mut self) -> bool {
        let changed = compute_generation(&self.current, &mut self.next);
        self.swap();
        changed
    }

    pub fn into_current(self) -> Grid {
        self.current
    }
}

/// Run generations until `max_generations` is reached or one changes nothing.
pub fn evolve(mut generations: Generations, max_generations: usize) -> Evolution {
    let mut generation = 0;
    let mut changed = true;

    while generation < max_generations && changed {
        changed = generations.advance();
        generation += 1;
        trace!("generation {generation}: changed={changed}");
    }

    if changed {
        info!("stopped after {generation} generations without converging");
    } else {
        info!("no change detected at generation {generation}");
    }

    Evolution {
        grid: generations.into_current(),
        generations: generation,
        converged: !changed,
    }
}

//! A live cell dies if it has fewer than two live neighbors.
//! A live cell with two or three live neighbors lives on to the next generation.
//! A live cell with more than three live neighbors dies.
//! A dead cell will be brought back to live if it has exactly three live neighbors.
//!
//! The board is a fixed square surrounded by a ring of ghost cells that are
//! always dead, so cells on the edge see nothing beyond it.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod output;
pub mod parallel;
pub mod rule;

pub use engine::{compute_generation, evolve, Evolution, Generations};
pub use error::LifeError;
pub use grid::{CellState, Grid, DEFAULT_SEED};
pub use parallel::ParallelEngine;

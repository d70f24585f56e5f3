//! Data-parallel evolution on a fixed pool of worker threads.
//!
//! Every worker owns a contiguous band of interior rows for the whole run.
//! A generation proceeds in two phases separated by a [`Barrier`]:
//!
//! 1. each worker computes its band from the current buffer into the next
//!    buffer and adds its local change count to a shared counter;
//! 2. the barrier leader alone swaps the buffers, takes and resets the
//!    counter and decides whether the run has converged, while the others
//!    wait on a second barrier.
//!
//! The cells live in atomics so that both buffers can be shared by reference.
//! The barrier orders all cell accesses, so relaxed loads and stores suffice.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{mpsc, Barrier};
use std::thread;

use log::{debug, info, trace};

use crate::engine::Evolution;
use crate::error::LifeError;
use crate::grid::CellState::{self, Alive, Dead};
use crate::grid::Grid;
use crate::rule::Neighborhood;

/// Padded rows `start..end` handled by `worker` out of `workers`.
///
/// Rows are split into contiguous bands whose lengths differ by at most one.
/// With more workers than rows, the trailing workers get empty bands.
pub fn row_band(worker: usize, workers: usize, size: usize) -> Range<usize> {
    let base = size / workers;
    let extra = size % workers;
    let start = 1 + worker * base + worker.min(extra);
    let len = base + usize::from(worker < extra);
    start..start + len
}

/// A padded grid whose cells can be written through a shared reference.
struct SharedGrid {
    size: usize,
    cells: Vec<AtomicU8>,
}

impl SharedGrid {
    fn from_grid(grid: Grid) -> Self {
        let (size, cells) = grid.into_padded();
        let cells = cells
            .into_iter()
            .map(|cell| AtomicU8::new(cell as u8))
            .collect();
        SharedGrid { size, cells }
    }

    /// A second buffer with the same contents.
    fn duplicate(&self) -> Result<Self, LifeError> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(self.cells.len())
            .map_err(|_| LifeError::Allocation { size: self.size })?;
        cells.extend(
            self.cells
                .iter()
                .map(|cell| AtomicU8::new(cell.load(Ordering::Relaxed))),
        );
        Ok(SharedGrid {
            size: self.size,
            cells,
        })
    }

    fn into_grid(self) -> Grid {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| match cell.into_inner() {
                0 => Dead,
                _ => Alive,
            })
            .collect();
        Grid::from_padded(self.size, cells)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * (self.size + 2) + col
    }

    fn store(&self, row: usize, col: usize, state: CellState) {
        self.cells[self.index(row, col)].store(state as u8, Ordering::Relaxed);
    }
}

impl Neighborhood for SharedGrid {
    fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, row: usize, col: usize) -> CellState {
        match self.cells[self.index(row, col)].load(Ordering::Relaxed) {
            0 => Dead,
            _ => Alive,
        }
    }
}

/// State shared by every worker of one run.
struct SharedState {
    grids: [SharedGrid; 2],
    /// Index into `grids` of the current generation.
    current: AtomicUsize,
    changed: AtomicUsize,
    generation: AtomicUsize,
    converged: AtomicBool,
}

impl SharedState {
    fn running(&self, max_generations: usize) -> bool {
        self.generation.load(Ordering::Acquire) < max_generations
            && !self.converged.load(Ordering::Acquire)
    }

    fn work(&self, rows: Range<usize>, barrier: &Barrier, max_generations: usize) {
        while self.running(max_generations) {
            let current = self.current.load(Ordering::Acquire);
            let source = &self.grids[current];
            let target = &self.grids[current ^ 1];

            let mut local_changes = 0;
            for row in rows.clone() {
                for col in 1..=source.size {
                    let state = source.evolve(row, col);
                    if state != source.cell(row, col) {
                        local_changes += 1;
                    }
                    target.store(row, col, state);
                }
            }
            self.changed.fetch_add(local_changes, Ordering::AcqRel);

            if barrier.wait().is_leader() {
                let changed = self.changed.swap(0, Ordering::AcqRel);
                self.current.store(current ^ 1, Ordering::Release);
                let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
                trace!("generation {generation}: {changed} cells changed");
                if changed == 0 {
                    info!("no change detected at generation {generation}");
                    self.converged.store(true, Ordering::Release);
                }
            }
            barrier.wait();
        }
    }
}

/// Runs generations on `threads` workers.
#[derive(Debug, Clone, Copy)]
pub struct ParallelEngine {
    threads: NonZeroUsize,
}

impl ParallelEngine {
    pub fn new(threads: NonZeroUsize) -> Self {
        ParallelEngine { threads }
    }

    pub fn threads(&self) -> usize {
        self.threads.get()
    }

    /// Number of workers actually started for a `size`-row grid.
    ///
    /// Never more than one worker per row.
    pub fn workers_for(&self, size: usize) -> usize {
        self.threads().min(size).max(1)
    }

    /// Evolve `grid` until `max_generations` or convergence, whichever comes first.
    ///
    /// Produces the same result as [`crate::engine::evolve`] for any thread count.
    pub fn run(&self, grid: Grid, max_generations: usize) -> Result<Evolution, LifeError> {
        let size = grid.size();
        let workers = self.workers_for(size);
        if workers < self.threads() {
            debug!("capping {} threads to {workers}, one per row", self.threads());
        }

        let first = SharedGrid::from_grid(grid);
        let second = first.duplicate()?;
        let state = SharedState {
            grids: [first, second],
            current: AtomicUsize::new(0),
            changed: AtomicUsize::new(0),
            generation: AtomicUsize::new(0),
            converged: AtomicBool::new(false),
        };
        let barrier = Barrier::new(workers);

        debug!("starting {workers} workers on a {size}x{size} grid");
        thread::scope(|scope| {
            // Workers hold until every one of them exists. If a spawn fails the
            // senders are dropped and the started workers return without
            // touching the barrier.
            let mut starts = Vec::with_capacity(workers);
            for worker in 0..workers {
                let rows = row_band(worker, workers, size);
                trace!("worker {worker} owns rows {rows:?}");
                let (start, started) = mpsc::channel::<()>();
                let state = &state;
                let barrier = &barrier;
                thread::Builder::new()
                    .name(format!("life-worker-{worker}"))
                    .spawn_scoped(scope, move || {
                        if started.recv().is_ok() {
                            state.work(rows, barrier, max_generations);
                        }
                    })
                    .map_err(|source| LifeError::Spawn { worker, source })?;
                starts.push(start);
            }
            for start in starts {
                let _ = start.send(());
            }
            Ok::<(), LifeError>(())
        })?;

        let generations = state.generation.load(Ordering::Acquire);
        let converged = state.converged.load(Ordering::Acquire);
        if !converged {
            info!("stopped after {generations} generations without converging");
        }
        let [first, second] = state.grids;
        let (current, spare) = match state.current.into_inner() {
            0 => (first, second),
            _ => (second, first),
        };
        drop(spare);
        let grid = current.into_grid();

        Ok(Evolution {
            grid,
            generations,
            converged,
        })
    }
}

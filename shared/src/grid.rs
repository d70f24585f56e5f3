use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::LifeError;
use crate::grid::CellState::{Alive, Dead};
use crate::rule::Neighborhood;

/// Seed used for the initial population when none is given.
pub const DEFAULT_SEED: u64 = 52;

#[repr(u8)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn as_char(self) -> char {
        match self {
            Dead => '0',
            Alive => '1',
        }
    }
}

/// A square grid of `size * size` cells surrounded by one ring of ghost cells.
///
/// Cells are stored row-major in a single buffer of `(size + 2)^2` entries.
/// The ghost ring is dead from allocation onwards and nothing writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocate an all-dead grid.
    pub fn new(size: usize) -> Result<Self, LifeError> {
        if size == 0 {
            return Err(LifeError::Validation {
                name: "size",
                value: size.to_string(),
            });
        }
        let len = size
            .checked_add(2)
            .and_then(|stride| stride.checked_mul(stride))
            .ok_or(LifeError::Allocation { size })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| LifeError::Allocation { size })?;
        cells.resize(len, Dead);

        Ok(Grid { size, cells })
    }

    /// Allocate a grid and fill its interior from `seed`.
    pub fn seeded(size: usize, seed: u64) -> Result<Self, LifeError> {
        let mut grid = Grid::new(size)?;
        grid.randomize(seed);
        Ok(grid)
    }

    /// Replace every interior cell with a coin flip drawn from `seed`.
    ///
    /// The same seed always yields the same population, on every platform.
    pub fn randomize(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for row in 1..=self.size {
            for cell in self.interior_row_mut(row) {
                *cell = if rng.random_bool(0.5) { Alive } else { Dead };
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn stride(&self) -> usize {
        self.size + 2
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.stride() + col
    }

    /// State at a padded coordinate; ghost coordinates read as dead.
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[self.index(row, col)]
    }

    /// Set an interior cell. Panics on ghost or out-of-range coordinates.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        assert!(
            (1..=self.size).contains(&row) && (1..=self.size).contains(&col),
            "({row}, {col}) is not an interior cell of a {0}x{0} grid",
            self.size
        );
        let index = self.index(row, col);
        self.cells[index] = state;
    }

    /// Interior cells of padded row `row`, without the ghost columns.
    pub fn interior_row(&self, row: usize) -> &[CellState] {
        let start = self.index(row, 1);
        &self.cells[start..start + self.size]
    }

    pub(crate) fn interior_row_mut(&mut self, row: usize) -> &mut [CellState] {
        let start = self.index(row, 1);
        let size = self.size;
        &mut self.cells[start..start + size]
    }

    /// Take the padded buffer, ghost ring included.
    pub(crate) fn into_padded(self) -> (usize, Vec<CellState>) {
        (self.size, self.cells)
    }

    /// Rebuild a grid from a padded buffer taken with [`Grid::into_padded`].
    pub(crate) fn from_padded(size: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), (size + 2) * (size + 2));
        Grid { size, cells }
    }

    pub fn interior_rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        (1..=self.size).map(move |row| self.interior_row(row))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Alive).count()
    }

    /// True while the ghost ring is intact.
    pub fn ghosts_are_dead(&self) -> bool {
        let edge = self.size + 1;
        (0..=edge).all(|i| {
            self.get(0, i) == Dead
                && self.get(edge, i) == Dead
                && self.get(i, 0) == Dead
                && self.get(i, edge) == Dead
        })
    }
}

impl Neighborhood for Grid {
    fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, row: usize, col: usize) -> CellState {
        self.get(row, col)
    }
}

/// Snapshot encoding: `1`/`0` per cell, each followed by a space, one row per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.interior_rows() {
            for cell in row {
                write!(f, "{} ", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the snapshot encoding. Blank lines are skipped.
impl FromStr for Grid {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (number, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| match token {
                    "0" => Ok(Dead),
                    "1" => Ok(Alive),
                    other => Err(LifeError::Parse {
                        line: number + 1,
                        reason: format!("unexpected cell `{other}`"),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push((number + 1, row));
        }

        let size = rows.len();
        if size == 0 {
            return Err(LifeError::Parse {
                line: 0,
                reason: "no rows".to_string(),
            });
        }

        let mut grid = Grid::new(size)?;
        for (row_index, (line, row)) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(LifeError::Parse {
                    line,
                    reason: format!("expected {size} cells, found {}", row.len()),
                });
            }
            grid.interior_row_mut(row_index + 1).copy_from_slice(&row);
        }
        Ok(grid)
    }
}

use crate::grid::CellState::{self, Alive, Dead};

/// Offsets of the 8 cells surrounding a cell.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Apply Game of Life rules to a single cell.
pub fn next_state(state: CellState, alive_neighbors: u8) -> CellState {
    match (state, alive_neighbors) {
        (Alive, 2..=3) => Alive, // Survives
        (Dead, 3) => Alive,      // Becomes alive
        _ => Dead,               // Dies or remains dead
    }
}

/// Read access to a padded grid, shared by the sequential and parallel engines.
///
/// Coordinates are padded: interior cells live in `1..=size()`, and rows or
/// columns `0` and `size() + 1` are ghost cells that always read as dead.
/// Only interior coordinates may be passed to the provided methods.
pub trait Neighborhood {
    /// Logical (unpadded) edge length.
    fn size(&self) -> usize;

    fn cell(&self, row: usize, col: usize) -> CellState;

    /// Count the number of alive neighbors for an interior cell.
    fn alive_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dr, dc)| {
                let neighbor_row = row.wrapping_add_signed(dr);
                let neighbor_col = col.wrapping_add_signed(dc);
                self.cell(neighbor_row, neighbor_col) as u8
            })
            .sum()
    }

    /// State of an interior cell in the following generation.
    fn evolve(&self, row: usize, col: usize) -> CellState {
        next_state(self.cell(row, col), self.alive_neighbors(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alive_cell_survives_with_two_or_three_neighbors() {
        for n in 0..=8 {
            let expected = if n == 2 || n == 3 { Alive } else { Dead };
            assert_eq!(next_state(Alive, n), expected, "alive with {n} neighbors");
        }
    }

    #[test]
    fn dead_cell_is_born_with_exactly_three_neighbors() {
        for n in 0..=8 {
            let expected = if n == 3 { Alive } else { Dead };
            assert_eq!(next_state(Dead, n), expected, "dead with {n} neighbors");
        }
    }
}

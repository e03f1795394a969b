//! The B3/S23 transition rule

use std::sync::OnceLock;

/// The number of permutations for a 3x3 grid of cells
const PERMUTATIONS: usize = 1 << 9;
type NeighborhoodIndex = [bool; PERMUTATIONS];

/// Bit of the center cell within a 9-bit neighborhood
pub const CENTER: usize = 0b000_010_000;

/// Bit for the cell at `(d_row, d_col)` from the center, each offset in `-1..=1`
///
/// Bits are laid out row-major, so the top-left neighbor is bit 0 and the
/// bottom-right neighbor is bit 8.
#[inline]
pub fn neighborhood_bit(d_row: i64, d_col: i64) -> usize {
    debug_assert!((-1..=1).contains(&d_row) && (-1..=1).contains(&d_col));
    1 << ((d_row + 1) * 3 + (d_col + 1))
}

/// Whether a cell is alive in the next generation, given its current state
/// and the number of live cells around it
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_index`] once and storing the result
pub fn get_index() -> &'static NeighborhoodIndex {
    static CELL: OnceLock<NeighborhoodIndex> = OnceLock::new();
    CELL.get_or_init(generate_index)
}

/// Creates a lookup table for the Game of Life ruleset
///
/// The table is indexed by a 9-bit number representing a cell and its neighbors
/// (see [`neighborhood_bit`]). Returns whether the center cell should be alive
/// in its arrangement.
pub fn generate_index() -> NeighborhoodIndex {
    let mut indices = [false; PERMUTATIONS];
    for (i, next) in indices.iter_mut().enumerate() {
        let neighbors = (i & !CENTER).count_ones() as u8;
        *next = next_state(i & CENTER != 0, neighbors);
    }
    indices
}

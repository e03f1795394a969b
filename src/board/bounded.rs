use super::{Board, LiveCells};
use crate::{CellPos, Window, rule};
use std::ops::{Range, RangeInclusive};

/// A fixed-size board storing every cell
///
/// Cells beyond the edge are permanently dead and do not wrap around. Each
/// generation visits every cell, which makes this the reference to check
/// [`SparseBoard`](super::SparseBoard) against rather than a fast engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBoard {
    rows: usize,
    cols: usize,
    // row-major
    cells: Vec<bool>,
}

impl BoundedBoard {
    /// Creates an all-dead board of `rows` by `cols` cells
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` does not fit in a `usize`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows.checked_mul(cols).expect("board size overflows usize");
        Self {
            rows,
            cols,
            cells: vec![false; len],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index into `cells` for `(row, col)`, or [`None`] if it is off the board
    fn index(&self, row: i64, col: i64) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Packs the 3x3 neighborhood around `(row, col)` of `cells` into bits,
    /// see [`rule::neighborhood_bit`]
    fn neighborhood(&self, cells: &[bool], row: i64, col: i64) -> usize {
        let mut hood = 0;
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                let alive = self
                    .index(row + d_row, col + d_col)
                    .is_some_and(|idx| cells[idx]);
                if alive {
                    hood |= rule::neighborhood_bit(d_row, d_col);
                }
            }
        }
        hood
    }
}

/// Intersects an inclusive span of coordinates with `0..len`
fn clip(span: Option<RangeInclusive<i64>>, len: usize) -> Option<Range<usize>> {
    let span = span?;
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = (*span.start()).max(0);
    let end = span.end().saturating_add(1).min(len);
    (start < end).then(|| start as usize..end as usize)
}

impl Board for BoundedBoard {
    fn get_cell(&self, row: i64, col: i64) -> bool {
        self.index(row, col).is_some_and(|idx| self.cells[idx])
    }

    fn set_cell(&mut self, row: i64, col: i64, alive: bool) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = alive;
        }
    }

    fn update(&mut self) {
        let old = self.cells.clone();
        let index = rule::get_index();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let hood = self.neighborhood(&old, row as i64, col as i64);
                self.cells[row * self.cols + col] = index[hood];
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn live_cells(&self) -> LiveCells<'_> {
        let cols = self.cols;
        Box::new(
            self.cells
                .iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(idx, _)| CellPos::new((idx / cols) as i64, (idx % cols) as i64)),
        )
    }

    fn live_cells_in(&self, window: Window) -> LiveCells<'_> {
        let (Some(rows), Some(cols)) = (
            clip(window.rows(), self.rows),
            clip(window.cols(), self.cols),
        ) else {
            return Box::new(std::iter::empty());
        };
        Box::new(rows.flat_map(move |row| {
            let start = row * self.cols;
            cols.clone()
                .filter(move |&col| self.cells[start + col])
                .map(move |col| CellPos::new(row as i64, col as i64))
        }))
    }

    fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(rows: usize, cols: usize, alive: &[(i64, i64)]) -> BoundedBoard {
        let mut board = BoundedBoard::new(rows, cols);
        board.initialize(alive.iter().copied().map(CellPos::from));
        board
    }

    fn alive(board: &BoundedBoard) -> Vec<(i64, i64)> {
        board.live_cells().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    #[should_panic(expected = "board size overflows usize")]
    fn oversized_board_panics() {
        BoundedBoard::new(usize::MAX, 2);
    }

    #[test]
    fn out_of_range_cells_are_dead_and_unwritable() {
        let mut board = BoundedBoard::new(3, 4);
        for (row, col) in [(-1, 0), (0, -1), (3, 0), (0, 4), (i64::MAX, i64::MIN)] {
            board.set_cell(row, col, true);
            assert!(!board.get_cell(row, col));
        }

        assert_eq!(board.population(), 0);
    }

    #[test]
    fn set_and_clear_cells() {
        let mut board = BoundedBoard::new(3, 4);
        board.set_cell(2, 3, true);
        board.set_cell(0, 0, true);
        assert!(board.get_cell(2, 3));
        assert_eq!(alive(&board), vec![(0, 0), (2, 3)]);

        board.set_cell(2, 3, false);
        assert_eq!(alive(&board), vec![(0, 0)]);

        board.clear();
        assert_eq!(board.population(), 0);
        assert_eq!((board.rows(), board.cols()), (3, 4));
    }

    #[test]
    fn empty_board_stays_empty() {
        let mut board = BoundedBoard::new(5, 5);
        board.update();

        assert_eq!(board.population(), 0);
    }

    #[test]
    fn lone_cell_dies() {
        let mut board = board_with(5, 5, &[(2, 2)]);
        board.update();

        assert_eq!(board.population(), 0);
    }

    #[test]
    fn block_is_still() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut board = board_with(4, 4, &block);
        board.update();

        assert_eq!(alive(&board), block.to_vec());
    }

    #[test]
    fn glider_moves_diagonally() {
        let mut board = board_with(8, 8, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        for _ in 0..4 {
            board.update();
        }

        assert_eq!(alive(&board), vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn edges_do_not_wrap() {
        // a blinker along the top edge can only grow downwards
        let mut board = board_with(4, 5, &[(0, 1), (0, 2), (0, 3)]);
        board.update();
        assert_eq!(alive(&board), vec![(0, 2), (1, 2)]);

        board.update();
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn window_is_clipped_to_the_board() {
        let board = board_with(3, 3, &[(0, 0), (1, 2), (2, 1)]);
        let in_window: Vec<_> = board
            .live_cells_in(Window::new(-5, 1, 10, 10))
            .map(|c| (c.row, c.col))
            .collect();
        assert_eq!(in_window, vec![(1, 2), (2, 1)]);

        assert_eq!(board.live_cells_in(Window::new(3, 0, 8, 8)).count(), 0);
        assert_eq!(board.live_cells_in(Window::new(i64::MIN, i64::MIN, 8, 8)).count(), 0);
    }

    #[test]
    fn bitmap_covers_the_padded_window() {
        let board = board_with(2, 10, &[(0, 0), (1, 9)]);
        let bitmap = board.bitmap(Window::new(0, 0, 3, 2));

        // width 3 pads to 8, so (1, 9) stays out of view
        assert_eq!(bitmap.width(), 8);
        assert_eq!(bitmap.as_bytes(), &[0b1, 0]);

        let bitmap = board.bitmap(Window::new(0, 0, 10, 2));
        assert_eq!(bitmap.as_bytes(), &[0b1, 0, 0, 0b10]);
    }
}

use super::{Board, LiveCells};
use crate::{CellPos, Window, rule};
use log::trace;
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

/// Live columns keyed by row; a row is only present while it has live cells
type LiveRows = BTreeMap<i64, BTreeSet<i64>>;
/// Live-neighbor tallies of a single row, keyed by column
type RowTallies = BTreeMap<i64, u8>;

/// Work done by a single [`SparseBoard::step`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Live cells after the step
    pub population: usize,
    /// Distinct rows that held at least one neighbor tally
    pub rows_touched: usize,
    /// Total neighbor tally increments, at most 8 per live cell
    pub neighbor_increments: usize,
}

/// A board spanning the whole `i64` plane which only stores live cells
///
/// The plane has edges at `i64::MIN` and `i64::MAX` in both directions: cells
/// past them do not exist, so the board never wraps around.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SparseBoard {
    rows: LiveRows,
}

impl SparseBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one generation, reporting how much work it took
    ///
    /// Rows are visited in ascending order while a trailing window of
    /// neighbor tallies is kept for the rows around the current one. Once a row
    /// falls behind the window no later live row can touch it, so its births
    /// are decided and its tallies dropped. The cost grows with the number of
    /// live cells, never with how far apart they are.
    pub fn step(&mut self) -> GenerationStats {
        let mut stats = GenerationStats::default();
        let mut counts = NeighborCounts::default();
        let mut next = LiveRows::new();
        // highest row whose live cells have been tallied
        let mut counted_through: Option<i64> = None;

        for (&row, cols) in &self.rows {
            // tallies on `row` come from live rows `row - 1 ..= row + 1`
            for source in [row.checked_sub(1), Some(row), row.checked_add(1)]
                .into_iter()
                .flatten()
            {
                if counted_through.is_some_and(|done| source <= done) {
                    continue;
                }
                if let Some(live) = self.rows.get(&source) {
                    stats.neighbor_increments += counts.accumulate(source, live);
                }
                counted_through = Some(source);
            }

            if let Some(limit) = row.checked_sub(1) {
                while let Some((done_row, tallies)) = counts.pop_below(limit) {
                    stats.rows_touched += 1;
                    births(&self.rows, done_row, &tallies, &mut next);
                }
            }

            let survivors: BTreeSet<i64> = cols
                .iter()
                .copied()
                .filter(|&col| rule::next_state(true, counts.get(row, col)))
                .collect();
            if !survivors.is_empty() {
                next.entry(row).or_default().extend(survivors);
            }
        }

        while let Some((done_row, tallies)) = counts.pop_first() {
            stats.rows_touched += 1;
            births(&self.rows, done_row, &tallies, &mut next);
        }

        self.rows = next;
        stats.population = self.population();
        stats
    }

    /// Number of rows holding at least one live cell
    pub fn live_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Adds every dead cell of `row` with exactly three live neighbors to `next`
fn births(old: &LiveRows, row: i64, tallies: &RowTallies, next: &mut LiveRows) {
    let was_alive = |col: &i64| old.get(&row).is_some_and(|cols| cols.contains(col));
    let mut born = tallies
        .iter()
        .filter(|&(col, &n)| !was_alive(col) && rule::next_state(false, n))
        .map(|(&col, _)| col)
        .peekable();
    if born.peek().is_some() {
        next.entry(row).or_default().extend(born);
    }
}

/// Scratch tallies of live neighbors, only alive for one generation
#[derive(Debug, Default)]
struct NeighborCounts {
    rows: BTreeMap<i64, RowTallies>,
}

impl NeighborCounts {
    /// Adds the cells of one live row to its neighbors' tallies
    ///
    /// Returns the number of tallies incremented.
    fn accumulate(&mut self, row: i64, cols: &BTreeSet<i64>) -> usize {
        let mut increments = 0;
        for &col in cols {
            for neighbor in CellPos::new(row, col).neighbors() {
                *self
                    .rows
                    .entry(neighbor.row)
                    .or_default()
                    .entry(neighbor.col)
                    .or_insert(0) += 1;
                increments += 1;
            }
        }
        increments
    }

    fn get(&self, row: i64, col: i64) -> u8 {
        self.rows
            .get(&row)
            .and_then(|tallies| tallies.get(&col))
            .copied()
            .unwrap_or(0)
    }

    /// Removes the lowest row if it lies strictly below `limit`
    fn pop_below(&mut self, limit: i64) -> Option<(i64, RowTallies)> {
        let entry = self.rows.first_entry()?;
        if *entry.key() < limit {
            Some(entry.remove_entry())
        } else {
            None
        }
    }

    fn pop_first(&mut self) -> Option<(i64, RowTallies)> {
        self.rows.pop_first()
    }
}

impl Board for SparseBoard {
    fn get_cell(&self, row: i64, col: i64) -> bool {
        self.rows.get(&row).is_some_and(|cols| cols.contains(&col))
    }

    fn set_cell(&mut self, row: i64, col: i64, alive: bool) {
        if alive {
            self.rows.entry(row).or_default().insert(col);
        } else if let Entry::Occupied(mut entry) = self.rows.entry(row) {
            entry.get_mut().remove(&col);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }

    fn update(&mut self) {
        let stats = self.step();
        trace!("sparse generation: {:?}", stats);
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn live_cells(&self) -> LiveCells<'_> {
        Box::new(
            self.rows
                .iter()
                .flat_map(|(&row, cols)| cols.iter().map(move |&col| CellPos::new(row, col))),
        )
    }

    fn live_cells_in(&self, window: Window) -> LiveCells<'_> {
        let (Some(rows), Some(cols)) = (window.rows(), window.cols()) else {
            return Box::new(std::iter::empty());
        };
        Box::new(self.rows.range(rows).flat_map(move |(&row, live)| {
            live.range(cols.clone())
                .map(move |&col| CellPos::new(row, col))
        }))
    }

    fn population(&self) -> usize {
        self.rows.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<CellPos> for SparseBoard {
    fn from_iter<I: IntoIterator<Item = CellPos>>(iter: I) -> Self {
        let mut board = Self::new();
        for cell in iter {
            board.set_cell(cell.row, cell.col, true);
        }
        board
    }
}

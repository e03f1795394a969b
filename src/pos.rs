use std::{
    cmp::Ordering,
    ops::Sub,
};

/// Offsets of the 8 cells surrounding a cell, in row-major order
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: i64,
    pub col: i64,
}
impl CellPos {
    #[inline]
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
    #[inline]
    pub fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Adds an offset, returning [`None`] if either coordinate leaves the `i64` range
    #[inline]
    pub fn checked_offset(self, d_row: i64, d_col: i64) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    /// The neighbors of this cell that exist inside the `i64` plane
    ///
    /// Cells on the edge of the coordinate range have fewer than 8 neighbors,
    /// the plane does not wrap around.
    pub fn neighbors(self) -> impl Iterator<Item = CellPos> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.checked_offset(dr, dc))
    }
}
impl Default for CellPos {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i64, i64)> for CellPos {
    #[inline]
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}
impl PartialOrd for CellPos {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for CellPos {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: compare rows first, then columns within a row
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.col, &other.col))
    }
}
impl Sub for CellPos {
    type Output = CellPos;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row - rhs.row,
            col: self.col - rhs.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_row_major() {
        let mut cells = vec![
            CellPos::new(1, 0),
            CellPos::new(0, 5),
            CellPos::new(-3, 9),
            CellPos::new(0, -2),
        ];
        cells.sort();

        assert_eq!(
            cells,
            vec![
                CellPos::new(-3, 9),
                CellPos::new(0, -2),
                CellPos::new(0, 5),
                CellPos::new(1, 0),
            ]
        );
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = CellPos::new(10, -10).neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&CellPos::new(10, -10)));
        assert!(neighbors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn neighbors_clip_at_the_coordinate_edge() {
        let corner = CellPos::new(i64::MAX, i64::MIN);
        let neighbors: Vec<_> = corner.neighbors().collect();

        assert_eq!(
            neighbors,
            vec![
                CellPos::new(i64::MAX - 1, i64::MIN),
                CellPos::new(i64::MAX - 1, i64::MIN + 1),
                CellPos::new(i64::MAX, i64::MIN + 1),
            ]
        );
    }
}

//! Packed monochrome snapshots of a rectangular region of a board

use crate::CellPos;
use std::ops::RangeInclusive;

/// A rectangular region of a board, anchored at its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub row: i64,
    pub col: i64,
    pub width: usize,
    pub height: usize,
}
impl Window {
    #[inline]
    pub fn new(row: i64, col: i64, width: usize, height: usize) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    #[inline]
    pub fn origin(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }

    /// The same window with its width rounded up to a whole number of bytes
    ///
    /// Widths too close to `usize::MAX` to round up are cut down to the
    /// largest multiple of 8 instead.
    pub fn padded_to_bytes(self) -> Self {
        Self {
            width: padded_width(self.width),
            ..self
        }
    }

    /// Rows covered by this window, clipped at the edge of the `i64` range
    ///
    /// Returns [`None`] for a window with no height.
    pub fn rows(&self) -> Option<RangeInclusive<i64>> {
        span(self.row, self.height)
    }

    /// Columns covered by this window, clipped at the edge of the `i64` range
    ///
    /// Returns [`None`] for a window with no width.
    pub fn cols(&self) -> Option<RangeInclusive<i64>> {
        span(self.col, self.width)
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        match (self.rows(), self.cols()) {
            (Some(rows), Some(cols)) => rows.contains(&cell.row) && cols.contains(&cell.col),
            _ => false,
        }
    }
}

fn padded_width(width: usize) -> usize {
    width.checked_next_multiple_of(8).unwrap_or(usize::MAX - 7)
}

fn span(start: i64, len: usize) -> Option<RangeInclusive<i64>> {
    let last_offset = len.checked_sub(1)?;
    let last = start.saturating_add(i64::try_from(last_offset).unwrap_or(i64::MAX));
    Some(start..=last)
}

/// A 1-bit-per-cell image of a [`Window`]
///
/// Rows are stored top to bottom, each packed into `width / 8` bytes. Within a
/// row, bit `k` of byte `b` (least significant bit first) is window column
/// `8 * b + k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}
impl Bitmap {
    /// Creates an all-dead bitmap, rounding `width` up to a multiple of 8
    ///
    /// # Panics
    ///
    /// Panics if the buffer size does not fit in a `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let width = padded_width(width);
        let len = (width / 8)
            .checked_mul(height)
            .expect("bitmap size overflows usize");
        Self {
            width,
            height,
            bytes: vec![0; len],
        }
    }

    /// Renders the live cells of `window` into a new bitmap
    ///
    /// The window is padded to a whole number of bytes first, cells outside of
    /// the padded window are ignored.
    pub fn render<I>(window: Window, cells: I) -> Self
    where
        I: IntoIterator<Item = CellPos>,
    {
        let window = window.padded_to_bytes();
        let mut bitmap = Self::new(window.width, window.height);
        for cell in cells.into_iter().filter(|&cell| window.contains(cell)) {
            let rel = cell - window.origin();
            bitmap.set(rel.row as usize, rel.col as usize);
        }
        bitmap
    }

    /// The width in cells, always a multiple of 8
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.width / 8
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Whether the window-relative cell `(row, col)` is alive
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.bytes[row * self.bytes_per_row() + col / 8] & (1 << (col % 8)) != 0
    }

    /// Marks the window-relative cell `(row, col)` alive
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside of the bitmap.
    pub fn set(&mut self, row: usize, col: usize) {
        assert!(row < self.height && col < self.width, "cell outside of bitmap");
        let idx = row * self.bytes_per_row() + col / 8;
        self.bytes[idx] |= 1 << (col % 8);
    }
}

impl std::fmt::Display for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                write!(f, "{}", if self.get(row, col) { '█' } else { ' ' })?;
            }
        }
        Ok(())
    }
}

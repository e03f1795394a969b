//! The board abstraction shared by every grid model

mod bounded;
mod sparse;

pub use self::bounded::BoundedBoard;
pub use self::sparse::{GenerationStats, SparseBoard};

use crate::{Bitmap, BoardResult, CellPos, CoordinateList, PositionCodec, Window};
use log::{debug, warn};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// A lazy row-major walk over live cells
pub type LiveCells<'a> = Box<dyn Iterator<Item = CellPos> + 'a>;

/// A Game of Life board following the B3/S23 rule
///
/// Cells are addressed as `(row, col)`, with rows growing downwards. Reading
/// or writing a cell the board cannot hold is never an error: reads return
/// `false` and writes are ignored.
pub trait Board {
    fn get_cell(&self, row: i64, col: i64) -> bool;
    fn set_cell(&mut self, row: i64, col: i64, alive: bool);

    /// Advances the whole board by one generation
    ///
    /// Every cell's next state is computed from the board as it was before
    /// the call, never from cells already updated in this generation.
    fn update(&mut self);

    /// Kills every cell
    fn clear(&mut self);

    /// Every live cell in ascending row-major order
    ///
    /// Each call starts over from the first live cell.
    fn live_cells(&self) -> LiveCells<'_>;

    /// The live cells inside `window`, in ascending row-major order
    fn live_cells_in(&self, window: Window) -> LiveCells<'_> {
        Box::new(self.live_cells().filter(move |&cell| window.contains(cell)))
    }

    fn population(&self) -> usize {
        self.live_cells().count()
    }

    /// Whether both boards hold exactly the same live cells
    ///
    /// Board dimensions are not compared, so an empty [`BoundedBoard`] matches
    /// an empty [`SparseBoard`].
    fn matches(&self, other: &dyn Board) -> bool {
        self.live_cells().eq(other.live_cells())
    }

    /// Renders `window` into a new bitmap, see [`Bitmap::render`]
    fn bitmap(&self, window: Window) -> Bitmap {
        let window = window.padded_to_bytes();
        Bitmap::render(window, self.live_cells_in(window))
    }

    /// Replaces the board's contents with `cells`
    fn initialize<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = CellPos>,
        Self: Sized,
    {
        self.clear();
        for cell in cells {
            self.set_cell(cell.row, cell.col, true);
        }
    }

    /// Clears the board, then fills it from a coordinate list file
    ///
    /// The board is cleared before the file is opened, so on error it is left
    /// empty rather than in its previous state. The whole file is parsed
    /// before any cell is set, so a malformed line also leaves it empty.
    fn load_board<P: AsRef<Path>>(&mut self, path: P) -> BoardResult<()>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        self.clear();

        let file = File::open(path).inspect_err(|err| {
            warn!("failed to open board file {}: {}", path.display(), err);
        })?;
        let cells = CoordinateList.decode(BufReader::new(file))?;
        debug!("loaded {} cells from {}", cells.len(), path.display());

        for cell in cells {
            self.set_cell(cell.row, cell.col, true);
        }
        Ok(())
    }

    /// Writes every live cell to a coordinate list file, in row-major order
    fn write_board<P: AsRef<Path>>(&self, path: P) -> BoardResult<()>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::create(path)?;
        CoordinateList.encode(BufWriter::new(file), self.live_cells())?;
        debug!("wrote {} cells to {}", self.population(), path.display());
        Ok(())
    }
}

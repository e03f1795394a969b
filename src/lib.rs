//! Core library for Conway's Game of Life boards.
//!
//! Two boards implement [`Board`]: [`BoundedBoard`], a small fixed-size grid,
//! and [`SparseBoard`], which only stores live cells and spans the whole `i64`
//! plane.

pub mod bitmap;
pub mod board;
pub mod enc;
pub mod error;
pub mod pos;
pub mod rule;

pub use bitmap::{Bitmap, Window};
pub use board::{Board, BoundedBoard, GenerationStats, SparseBoard};
pub use enc::{CoordinateList, PositionCodec};
pub use error::{BoardError, BoardResult};
pub use pos::CellPos;

use crate::{BoardError, BoardResult, CellPos};
use regex::Regex;
use std::io::{BufRead, Write};
use std::sync::OnceLock;

pub trait PositionCodec {
    /// Writes `cells` to `out` in the order they are given
    fn encode<W, I>(&self, out: W, cells: I) -> BoardResult<()>
    where
        W: Write,
        I: IntoIterator<Item = CellPos>;

    /// Reads every cell from `input`, failing on the first malformed entry
    fn decode<R: BufRead>(&self, input: R) -> BoardResult<Vec<CellPos>>;
}

/// One live cell per line, written as `(column,row)`
///
/// Blank lines are ignored when decoding, and whitespace is allowed around
/// the parentheses and both numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoordinateList;

impl CoordinateList {
    fn line_pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r"^\s*\(\s*([+-]?\d+)\s*,\s*([+-]?\d+)\s*\)\s*$")
                .expect("cell line pattern is valid")
        })
    }

    /// Parses a single non-blank line into a cell
    ///
    /// Returns [`None`] if the line is not a `(column,row)` pair of `i64`s.
    pub fn parse_line(line: &str) -> Option<CellPos> {
        let (_, [col, row]) = Self::line_pattern().captures(line)?.extract();
        Some(CellPos {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        })
    }
}

impl PositionCodec for CoordinateList {
    fn encode<W, I>(&self, mut out: W, cells: I) -> BoardResult<()>
    where
        W: Write,
        I: IntoIterator<Item = CellPos>,
    {
        // NOTE: column comes first on disk
        for cell in cells {
            writeln!(out, "({},{})", cell.col, cell.row)?;
        }
        out.flush()?;
        Ok(())
    }

    fn decode<R: BufRead>(&self, input: R) -> BoardResult<Vec<CellPos>> {
        let mut cells = Vec::new();
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_line(&line) {
                Some(cell) => cells.push(cell),
                None => {
                    return Err(BoardError::Malformed {
                        line: i + 1,
                        content: line,
                    });
                }
            }
        }
        Ok(cells)
    }
}

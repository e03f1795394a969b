use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed cell on line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

pub type BoardResult<T> = ::std::result::Result<T, BoardError>;

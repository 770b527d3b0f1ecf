use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "minifb")]
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("unexpected cell {found:?} at line {line}, column {column}")]
    ParseGrid {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedGrid {
        line: usize,
        expected: usize,
        found: usize,
    },
}

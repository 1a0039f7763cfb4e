use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced at construction, parsing and validation boundaries.
///
/// Shape violations inside the arithmetic hot path (elementwise ops,
/// neuron responses on mismatched grids) are programming errors and
/// panic instead; see `math::grid`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("row of length {actual} does not match grid width {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("target grid must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("invalid numeric value {token:?} on line {line}")]
    Parse { line: usize, token: String },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

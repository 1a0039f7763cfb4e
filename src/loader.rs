//! Whitespace-separated matrix text files.
//!
//! One row per line, values split on whitespace, no header; row and
//! column counts are inferred from the file. Blank lines carry no row
//! and are skipped.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::math::grid::Grid;

/// Reads and parses a matrix file.
pub fn load_grid(path: &Path) -> Result<Grid<f64>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_grid(&text)
}

/// Parses matrix text. An empty file yields the empty sentinel grid;
/// callers validate emptiness at their own boundary.
pub fn parse_grid(text: &str) -> Result<Grid<f64>> {
    let mut grid = Grid::empty();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| Error::Parse {
                line: index + 1,
                token: token.to_string(),
            })?;
            row.push(value);
        }
        grid.push_row(row)?;
    }

    Ok(grid)
}

/// Polarizes a binary input image for training: cells equal to 1
/// become 1.0, everything else −1.0. The symmetric encoding keeps
/// zero-valued pixels from contributing nothing to the responses.
pub fn polarize(grid: &Grid<f64>) -> Grid<f64> {
    grid.map(|value| if value == 1.0 { 1.0 } else { -1.0 })
}

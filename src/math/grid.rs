use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;
use std::ops::Sub;

use crate::error::{Error, Result};

/// A rectangular container: `rows` rows of `cols` cells each.
///
/// The cell type is generic so the same container serves plain numeric
/// matrices, nested matrices and grids of neurons. A zero-row grid is a
/// valid sentinel (rows are appended while parsing); every other
/// constructor rejects empty dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<T>>,
}

impl<T> Grid<T> {
    /// The empty sentinel grid. Grows through `push_row`.
    pub fn empty() -> Grid<T> {
        Grid {
            rows: 0,
            cols: 0,
            data: vec![],
        }
    }

    /// Appends a row, fixing the grid width on the first append.
    pub fn push_row(&mut self, row: Vec<T>) -> Result<()> {
        if row.is_empty() {
            return Err(Error::EmptyGrid);
        }
        if self.rows > 0 && row.len() != self.cols {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                actual: row.len(),
            });
        }
        self.cols = row.len();
        self.rows += 1;
        self.data.push(row);
        Ok(())
    }

    /// Builds a grid from prepared rows, checking rectangularity.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Grid<T>> {
        let mut grid = Grid::empty();
        for row in rows {
            grid.push_row(row)?;
        }
        if grid.is_empty() {
            return Err(Error::EmptyGrid);
        }
        Ok(grid)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == 0 || self.rows == self.cols
    }
}

impl<T: Clone> Grid<T> {
    /// A `rows` × `cols` grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Grid<T>> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid);
        }
        Ok(Grid {
            rows,
            cols,
            data: vec![vec![value; cols]; rows],
        })
    }
}

impl Grid<f64> {
    pub fn map<F>(&self, functor: F) -> Grid<f64>
    where
        F: Fn(f64) -> f64,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Elementwise multiplication by a scalar.
    pub fn scale(&self, factor: f64) -> Grid<f64> {
        self.map(|x| x * factor)
    }

    /// Sum of every cell squared, folded row by row.
    pub fn sum_of_squares(&self) -> f64 {
        self.data
            .iter()
            .map(|row| row.iter().map(|x| x * x).sum::<f64>())
            .sum()
    }
}

impl Sub for Grid<f64> {
    type Output = Grid<f64>;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!(
                "grids are of incorrect sizes: {}x{} vs {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            );
        }

        let mut res = self;
        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] -= rhs.data[i][j];
            }
        }
        res
    }
}

/// Picks `count` distinct indices uniformly from `[0, pool)` by
/// shuffling the full index range and keeping a prefix. `count` is
/// clamped to `pool`; the sample is never padded.
pub fn sample_distinct_indices(
    rng: &mut dyn RngCore,
    pool: usize,
    count: usize,
) -> HashSet<usize> {
    let mut indices: Vec<usize> = (0..pool).collect();
    indices.shuffle(rng);
    indices.truncate(count.min(pool));
    indices.into_iter().collect()
}

/// Recombination of two equally shaped values. `ratio` is the share of
/// genes the child takes from `self`; the remainder comes from `other`.
pub trait Crossover {
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore, ratio: f64) -> Self;
}

/// Leaf case: a numeric grid. `floor(total_cells × ratio) + 1` cell
/// positions (clamped to the cell count) are taken verbatim from
/// `self`, every other cell from `other`. Cells are never blended.
impl Crossover for Grid<f64> {
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore, ratio: f64) -> Self {
        assert_eq!(self.rows, other.rows, "crossover on grids of different heights");
        assert_eq!(self.cols, other.cols, "crossover on grids of different widths");

        let total = self.rows * self.cols;
        let take = ((total as f64 * ratio) as usize + 1).min(total);
        let keep = sample_distinct_indices(rng, total, take);

        let mut res = self.clone();
        for i in 0..self.rows {
            for j in 0..self.cols {
                if !keep.contains(&(i * self.cols + j)) {
                    res.data[i][j] = other.data[i][j];
                }
            }
        }
        res
    }
}

/// Structural case: a grid of crossable cells. Each cell recombines
/// with its counterpart; index sampling is independent per cell, there
/// is no shared mask across the grid.
impl<T: Crossover> Crossover for Grid<T> {
    fn crossover(&self, other: &Self, rng: &mut dyn RngCore, ratio: f64) -> Self {
        assert_eq!(self.rows, other.rows, "crossover on grids of different heights");
        assert_eq!(self.cols, other.cols, "crossover on grids of different widths");

        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(ours, theirs)| {
                    ours.iter()
                        .zip(theirs.iter())
                        .map(|(a, b)| a.crossover(b, rng, ratio))
                        .collect()
                })
                .collect(),
        }
    }
}

//! Intensity ordering of grid pixels
//!
//! An [`IntensityOrder`] is a permutation of flattened pixel indices sorted
//! ascending by value. The flood algorithms walk it back-to-front, so the
//! "water level" falls from the brightest pixel to the darkest.

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Ascending argsort of a grid's values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityOrder {
    shape: (usize, usize),
    indices: Vec<usize>,
}

impl IntensityOrder {
    /// Compute the ascending order of `grid`
    ///
    /// The sort is stable, so equal values keep increasing index order.
    pub fn from_grid(grid: &Grid) -> Self {
        let data = grid.data();
        let mut indices: Vec<usize> = (0..data.len()).collect();
        indices.sort_by(|&a, &b| data[a].total_cmp(&data[b]));
        IntensityOrder {
            shape: grid.shape(),
            indices,
        }
    }

    /// Wrap a precomputed order, checking it against `grid`
    ///
    /// # Errors
    ///
    /// * `Error::ShapeMismatch` if the length differs from the pixel count
    /// * `Error::InvalidParameter` if `indices` is not a permutation of the
    ///   pixel indices or is not ascending by value
    pub fn from_indices(grid: &Grid, indices: Vec<usize>) -> Result<Self> {
        if indices.len() != grid.len() {
            return Err(Error::length_mismatch("intensity order", grid.len(), indices.len()));
        }

        let mut seen = vec![false; grid.len()];
        for &index in &indices {
            if index >= grid.len() || seen[index] {
                return Err(Error::InvalidParameter(format!(
                    "intensity order is not a permutation: index {}",
                    index
                )));
            }
            seen[index] = true;
        }

        check_ascending(grid, &indices)?;

        Ok(IntensityOrder {
            shape: grid.shape(),
            indices,
        })
    }

    /// `(nx, ny)` of the grid this order was built for
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if the order is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Ascending indices
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Indices from the highest value down
    pub fn descending(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().rev().copied()
    }

    /// Check that this order sorts `grid`
    ///
    /// An order taken from another grid of the same shape is caught by the
    /// value check.
    ///
    /// # Errors
    ///
    /// * `Error::ShapeMismatch` when the shapes differ
    /// * `Error::InvalidParameter` when `grid` is not ascending along the order
    pub fn check_grid(&self, grid: &Grid) -> Result<()> {
        if self.shape != grid.shape() || self.indices.len() != grid.len() {
            return Err(Error::ShapeMismatch {
                name: "intensity order",
                expected: vec![grid.nx(), grid.ny()],
                actual: vec![self.shape.0, self.shape.1],
            });
        }
        check_ascending(grid, &self.indices)
    }
}

fn check_ascending(grid: &Grid, indices: &[usize]) -> Result<()> {
    match indices
        .windows(2)
        .find(|w| grid.value(w[0]) > grid.value(w[1]))
    {
        Some(w) => Err(Error::InvalidParameter(format!(
            "intensity order is not ascending: {} before {}",
            w[0], w[1]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_ascending() {
        let grid = Grid::from_data(2, 2, vec![3.0, 1.0, 4.0, 1.0]).unwrap();
        let order = IntensityOrder::from_grid(&grid);
        assert_eq!(order.as_slice(), &[1, 3, 0, 2]);
        assert_eq!(order.descending().collect::<Vec<_>>(), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_from_indices_validation() {
        let grid = Grid::from_data(1, 3, vec![0.5, 0.1, 0.9]).unwrap();

        assert!(IntensityOrder::from_indices(&grid, vec![1, 0, 2]).is_ok());
        assert!(matches!(
            IntensityOrder::from_indices(&grid, vec![1, 0]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(matches!(
            IntensityOrder::from_indices(&grid, vec![1, 1, 2]),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            IntensityOrder::from_indices(&grid, vec![1, 0, 3]),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            IntensityOrder::from_indices(&grid, vec![0, 1, 2]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_check_grid() {
        let small = Grid::new(2, 2).unwrap();
        let large = Grid::new(3, 3).unwrap();
        let order = IntensityOrder::from_grid(&small);
        assert!(order.check_grid(&small).is_ok());
        assert!(order.check_grid(&large).is_err());

        // Same pixel count, different shape
        let tall = Grid::new(4, 1).unwrap();
        assert!(matches!(order.check_grid(&tall), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_check_grid_stale_order() {
        let old = Grid::from_data(1, 2, vec![1.0, 9.0]).unwrap();
        let new = Grid::from_data(1, 2, vec![9.0, 1.0]).unwrap();
        let order = IntensityOrder::from_grid(&old);
        assert!(matches!(order.check_grid(&new), Err(Error::InvalidParameter(_))));
        assert!(IntensityOrder::from_grid(&new).check_grid(&new).is_ok());
    }
}

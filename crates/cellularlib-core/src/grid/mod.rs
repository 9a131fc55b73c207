//! Grid - 2D intensity image
//!
//! `Grid` is an `nx x ny` array of `f64` values. A pixel is addressed either
//! by its coordinates `(ix, iy)` or by the flattened index `ix * ny + iy`;
//! every algorithm in cellularlib works on flattened indices.
//!
//! # Examples
//!
//! ```
//! use cellularlib_core::Grid;
//!
//! let grid = Grid::from_fn(3, 4, |ix, iy| (ix * 10 + iy) as f64).unwrap();
//! assert_eq!(grid.shape(), (3, 4));
//! assert_eq!(grid.get(2, 1).unwrap(), 21.0);
//! assert_eq!(grid.index(2, 1), 9);
//! assert_eq!(grid.coords(9), (2, 1));
//! ```

mod direction;

pub use direction::Direction;

use crate::error::{Error, Result};

/// Pixel count of an `nx x ny` buffer
///
/// Zero extents and products that overflow `usize` are
/// `Error::InvalidDimension`.
pub(crate) fn pixel_count(nx: usize, ny: usize) -> Result<usize> {
    match nx.checked_mul(ny) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidDimension { nx, ny }),
    }
}

/// Immutable-by-convention 2D grid of real intensities
///
/// # Memory Layout
///
/// Data is stored with the second axis contiguous: the pixel at `(ix, iy)`
/// is at index `ix * ny + iy`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Create a new grid with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `nx` or `ny` is 0.
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        Self::new_with_value(nx, ny, 0.0)
    }

    /// Create a new grid with all pixels set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `nx` or `ny` is 0 or `nx * ny`
    /// overflows, and `Error::TypeMismatch` if `value` is NaN.
    pub fn new_with_value(nx: usize, ny: usize, value: f64) -> Result<Self> {
        let n = pixel_count(nx, ny)?;
        Self::from_data(nx, ny, vec![value; n])
    }

    /// Create a grid from flattened data (`ix * ny + iy` layout)
    ///
    /// # Errors
    ///
    /// * `Error::InvalidDimension` if `nx` or `ny` is 0 or `nx * ny` overflows
    /// * `Error::ShapeMismatch` if `data.len() != nx * ny`
    /// * `Error::TypeMismatch` if any value is NaN
    pub fn from_data(nx: usize, ny: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != pixel_count(nx, ny)? {
            return Err(Error::ShapeMismatch {
                name: "grid",
                expected: vec![nx, ny],
                actual: vec![data.len()],
            });
        }

        if let Some(index) = data.iter().position(|v| v.is_nan()) {
            return Err(Error::TypeMismatch {
                name: "grid",
                message: format!("NaN at flattened index {}", index),
            });
        }

        Ok(Grid { nx, ny, data })
    }

    /// Create a grid from rows, `rows[ix][iy]`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let nx = rows.len();
        let ny = rows.first().map_or(0, Vec::len);

        if let Some(bad) = rows.iter().find(|row| row.len() != ny) {
            return Err(Error::ShapeMismatch {
                name: "grid rows",
                expected: vec![nx, ny],
                actual: vec![nx, bad.len()],
            });
        }

        Self::from_data(nx, ny, rows.concat())
    }

    /// Create a grid by evaluating `f(ix, iy)` for every pixel
    pub fn from_fn<F>(nx: usize, ny: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(pixel_count(nx, ny)?);
        for ix in 0..nx {
            for iy in 0..ny {
                data.push(f(ix, iy));
            }
        }
        Self::from_data(nx, ny, data)
    }

    /// Extent of the first axis
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Extent of the second axis
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Get the shape as `(nx, ny)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a successfully constructed grid
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flattened index of `(ix, iy)`
    #[inline]
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        ix * self.ny + iy
    }

    /// Coordinates `(ix, iy)` of a flattened index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.ny, index % self.ny)
    }

    /// Get the value at `(ix, iy)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get(&self, ix: usize, iy: usize) -> Result<f64> {
        if ix >= self.nx || iy >= self.ny {
            return Err(Error::IndexOutOfBounds {
                index: ix * self.ny + iy,
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(ix, iy)])
    }

    /// Set the value at `(ix, iy)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range and
    /// `Error::TypeMismatch` for NaN.
    pub fn set(&mut self, ix: usize, iy: usize, value: f64) -> Result<()> {
        if ix >= self.nx || iy >= self.ny {
            return Err(Error::IndexOutOfBounds {
                index: ix * self.ny + iy,
                len: self.data.len(),
            });
        }
        if value.is_nan() {
            return Err(Error::TypeMismatch {
                name: "grid",
                message: format!("NaN written at ({}, {})", ix, iy),
            });
        }
        let index = self.index(ix, iy);
        self.data[index] = value;
        Ok(())
    }

    /// Value at a flattened index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.data[index]
    }

    /// Get raw access to the flattened data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Flattened index of the neighbour of `index` in `dir`, if inside the grid
    #[inline]
    pub fn neighbour(&self, index: usize, dir: Direction) -> Option<usize> {
        let (ix, iy) = self.coords(index);
        let ix2 = ix.checked_add_signed(dir.dx())?;
        let iy2 = iy.checked_add_signed(dir.dy())?;
        if ix2 < self.nx && iy2 < self.ny {
            Some(self.index(ix2, iy2))
        } else {
            None
        }
    }

    /// Minimum value
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum value
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

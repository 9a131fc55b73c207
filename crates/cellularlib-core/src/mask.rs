//! Mask - boolean grid
//!
//! A [`Mask`] has the same `ix * ny + iy` layout as [`Grid`]. Region markers
//! only ever set bits, so the mutation API is limited to [`Mask::mark`].

use crate::error::{Error, Result};
use crate::grid::{Grid, pixel_count};

/// Boolean per-pixel output buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    nx: usize,
    ny: usize,
    data: Vec<bool>,
}

impl Mask {
    /// Create a mask with every bit cleared
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `nx` or `ny` is 0 or `nx * ny`
    /// overflows.
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        let n = pixel_count(nx, ny)?;
        Ok(Mask {
            nx,
            ny,
            data: vec![false; n],
        })
    }

    /// Create a cleared mask shaped like `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Mask {
            nx: grid.nx(),
            ny: grid.ny(),
            data: vec![false; grid.len()],
        }
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

    /// Always false for a successfully constructed mask
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bit at `(ix, iy)`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get(&self, ix: usize, iy: usize) -> Result<bool> {
        if ix >= self.nx || iy >= self.ny {
            return Err(Error::IndexOutOfBounds {
                index: ix * self.ny + iy,
                len: self.data.len(),
            });
        }
        Ok(self.data[ix * self.ny + iy])
    }

    /// Bit at a flattened index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn is_marked(&self, index: usize) -> bool {
        self.data[index]
    }

    /// Set the bit at a flattened index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.data[index] = true;
    }

    /// Number of set bits
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Get raw access to the flattened bits
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Check that this mask has the shape of `grid`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` when the shapes differ.
    pub fn check_grid(&self, grid: &Grid) -> Result<()> {
        if self.shape() != grid.shape() {
            return Err(Error::ShapeMismatch {
                name: "mask",
                expected: vec![grid.nx(), grid.ny()],
                actual: vec![self.nx, self.ny],
            });
        }
        Ok(())
    }
}

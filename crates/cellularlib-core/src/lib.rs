//! cellularlib Core - Basic data structures for cluster analysis
//!
//! This crate provides the typed, shape-checked buffers that every
//! cellularlib algorithm consumes:
//!
//! - [`Grid`] - 2D array of `f64` intensities, flattened as `ix * ny + iy`
//! - [`IntensityOrder`] - permutation of pixel indices, ascending by value
//! - [`Mask`] - boolean per-pixel output buffer
//! - [`Direction`] - the four grid neighbours
//!
//! Shape and element checks happen when these values are built, and again
//! when an order or mask is paired with a grid (`check_grid`), so the
//! algorithms in `cellularlib-region` never see inconsistent buffers.

pub mod error;
pub mod grid;
pub mod mask;
pub mod order;

pub use error::{Error, Result};
pub use grid::{Direction, Grid};
pub use mask::Mask;
pub use order::IntensityOrder;

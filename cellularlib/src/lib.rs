//! cellularlib - Cluster analysis of 2D intensity grids
//!
//! Finds connected clusters of bright pixels in a grid of `f64` values and
//! characterizes them. The heart of the library is a watershed-style
//! union-find flood that processes pixels from the brightest down.
//!
//! # Overview
//!
//! - Watershed graph construction and re-partitioning at any threshold
//! - Single-threshold flood fill
//! - Cluster counts for many thresholds in one pass
//! - Masks of size-bounded regions ("nuclei")
//! - Best-fit ellipses of clusters
//! - Automatic threshold estimators
//!
//! # Example
//!
//! ```
//! use cellularlib::{Grid, IntensityOrder};
//! use cellularlib::region::{CountOptions, count_by_threshold};
//!
//! let mut grid = Grid::new(3, 3).unwrap();
//! grid.set(0, 0, 10.0).unwrap();
//! grid.set(2, 2, 10.0).unwrap();
//!
//! let order = IntensityOrder::from_grid(&grid);
//! let options = CountOptions::new().with_size_threshold(1);
//! let counts = count_by_threshold(&grid, &order, &[5.0], &options).unwrap();
//! assert_eq!(counts, vec![2]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use cellularlib_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use cellularlib_region as region;

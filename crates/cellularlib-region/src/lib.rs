//! cellularlib-region - Watershed cluster extraction for cellularlib
//!
//! This crate finds connected clusters of bright pixels in a [`Grid`] and
//! characterizes them:
//!
//! - **Watershed graph** - Flood from the highest value down, recording each
//!   merge as a weighted edge; re-partition at any threshold
//! - **Flood fill** - Direct single-threshold component extraction
//! - **Threshold counting** - Cluster counts for many thresholds in one pass
//! - **Nuclei marking** - Mask every component whose size falls in a window
//! - **Ellipses** - Best-fit ellipse of each cluster
//!
//! [`Grid`]: cellularlib_core::Grid
//!
//! # Examples
//!
//! ## Clusters from a watershed graph
//!
//! ```
//! use cellularlib_core::{Grid, IntensityOrder};
//! use cellularlib_region::{ExtractOptions, GraphOptions, WatershedGraph, flood_components};
//!
//! let grid = Grid::new_with_value(3, 3, 10.0).unwrap();
//! let order = IntensityOrder::from_grid(&grid);
//!
//! let options = GraphOptions::new().with_pixel_threshold(5.0);
//! let graph = WatershedGraph::build(&grid, &order, &options).unwrap();
//! let clusters = graph.extract_components(&ExtractOptions::new(5.0)).unwrap();
//! assert_eq!(clusters.sizes(), vec![9]);
//!
//! // A plain flood fill finds the same pixels
//! let flooded = flood_components(&grid, 5.0, 1).unwrap();
//! assert_eq!(flooded.canonical(), clusters.canonical());
//! ```
//!
//! ## Ellipses
//!
//! ```
//! use cellularlib_core::Grid;
//! use cellularlib_region::describe_ellipses;
//!
//! let grid = Grid::new_with_value(3, 3, 10.0).unwrap();
//! let ellipses = describe_ellipses(&grid, 5.0, 1).unwrap();
//! assert_eq!(ellipses.len(), 1);
//! assert_eq!((ellipses[0].mean_x, ellipses[0].mean_y), (1.0, 1.0));
//! assert_eq!(ellipses[0].semi_major, ellipses[0].semi_minor);
//! ```
//!
//! ## Nuclei
//!
//! ```
//! use cellularlib_core::{Grid, IntensityOrder, Mask};
//! use cellularlib_region::{NucleiOptions, mark_regions};
//!
//! let grid = Grid::from_rows(&[vec![9.0, 0.0, 8.0, 8.0]]).unwrap();
//! let order = IntensityOrder::from_grid(&grid);
//! let mut mask = Mask::for_grid(&grid);
//!
//! mark_regions(&grid, &order, &[5.0], &NucleiOptions::new(2, 4), &mut mask).unwrap();
//! assert_eq!(mask.data(), &[false, false, true, true]);
//! ```

pub mod cluster;
pub mod ellipse;
pub mod error;
pub mod graph;
pub mod ncluster;
pub mod nuclei;
pub mod seedfill;
pub mod threshold;
pub mod union_find;
pub mod watershed;

// Re-export core types
pub use cellularlib_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export cluster types
pub use cluster::{Component, ComponentSet, Edge};
pub use graph::{EdgeCoords, Graph};

// Re-export union-find types
pub use union_find::{DirectionPicker, Forest, MergeStrategy};

// Re-export watershed types
pub use watershed::{ExtractOptions, GraphOptions, Vertex, WatershedGraph};

// Re-export seedfill functions
pub use seedfill::flood_components;

// Re-export counting types and functions
pub use ncluster::{CountOptions, count_by_threshold};

// Re-export nuclei types and functions
pub use nuclei::{NucleiOptions, mark_regions, nuclei_mask};

// Re-export ellipse types and functions
pub use ellipse::{ELLIPSE_SCALE, EllipseDescriptor, describe_ellipses};

// Re-export threshold functions
pub use threshold::{
    DEFAULT_THRESHOLD_COUNT, count_curve, default_thresholds, mean2, median_quarter_maximum,
};

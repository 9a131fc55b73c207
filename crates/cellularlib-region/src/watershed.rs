//! Watershed graph construction and querying
//!
//! The grid is treated as a landscape that is slowly drained: pixels are
//! flooded from the highest value down, and each newly exposed pixel joins
//! the components of its already exposed neighbours. Every join is recorded
//! as an edge weighted by the value of the pixel that caused it, so the edge
//! graph remembers at which level two regions became connected.
//!
//! A built [`WatershedGraph`] can then be re-partitioned at any pixel and
//! edge thresholds without rebuilding.
//!
//! # Examples
//!
//! ```
//! use cellularlib_core::{Grid, IntensityOrder};
//! use cellularlib_region::{ExtractOptions, GraphOptions, WatershedGraph};
//!
//! // Two peaks joined by a saddle at 4.0
//! let grid = Grid::from_rows(&[vec![9.0, 4.0, 8.0]]).unwrap();
//! let order = IntensityOrder::from_grid(&grid);
//! let graph = WatershedGraph::build(&grid, &order, &GraphOptions::default()).unwrap();
//! assert_eq!(graph.n_edges(), 2);
//!
//! // Above the saddle no edge connects, and lone peaks are not reported
//! let high = graph
//!     .extract_components(&ExtractOptions::new(5.0).with_size_threshold(1))
//!     .unwrap();
//! assert_eq!(high.len(), 0); // no edge survives at 5.0
//!
//! // At the saddle everything is one cluster
//! let low = graph.extract_components(&ExtractOptions::new(4.0)).unwrap();
//! assert_eq!(low.sizes(), vec![3]);
//! ```

use crate::cluster::{Component, ComponentSet, Edge};
use crate::error::{RegionResult, check_threshold};
use crate::graph::{EdgeCoords, Graph};
use crate::union_find::{DirectionPicker, Forest, MergeStrategy};
use cellularlib_core::{Direction, Grid, IntensityOrder};
use std::collections::VecDeque;

/// Options for watershed graph construction
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Pixels below this value are never flooded
    pub pixel_threshold: f64,
    /// Two components that both reach this size are not merged;
    /// `None` means no limit
    pub merge_threshold: Option<usize>,
    /// Seed for the first neighbour direction; 0 disables randomization
    pub direction_seed: u64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            pixel_threshold: 0.0,
            merge_threshold: None,
            direction_seed: 0,
        }
    }
}

impl GraphOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flood threshold
    pub fn with_pixel_threshold(mut self, threshold: f64) -> Self {
        self.pixel_threshold = threshold;
        self
    }

    /// Set the size cap above which components stop merging
    pub fn with_merge_threshold(mut self, size: usize) -> Self {
        self.merge_threshold = Some(size);
        self
    }

    /// Set the direction seed
    pub fn with_direction_seed(mut self, seed: u64) -> Self {
        self.direction_seed = seed;
        self
    }
}

/// Options for extracting components from a built graph
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Pixels below this value are traversed but not counted as members
    pub pixel_threshold: f64,
    /// Edges below this weight do not connect; defaults to `pixel_threshold`
    pub edge_threshold: Option<f64>,
    /// Components with fewer member pixels are dropped
    pub size_threshold: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pixel_threshold: 0.0,
            edge_threshold: None,
            size_threshold: 0,
        }
    }
}

impl ExtractOptions {
    /// Create options for a pixel threshold, with the edge threshold
    /// following it
    pub fn new(pixel_threshold: f64) -> Self {
        Self {
            pixel_threshold,
            ..Default::default()
        }
    }

    /// Set an independent edge threshold
    pub fn with_edge_threshold(mut self, threshold: f64) -> Self {
        self.edge_threshold = Some(threshold);
        self
    }

    /// Set the minimum component size
    pub fn with_size_threshold(mut self, size: usize) -> Self {
        self.size_threshold = size;
        self
    }

    /// The edge threshold in effect
    pub fn effective_edge_threshold(&self) -> f64 {
        self.edge_threshold.unwrap_or(self.pixel_threshold)
    }
}

/// Read-only view of one pixel of a built graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Pixel value
    pub value: f64,
    /// Union-find parent; `None` if the pixel was never flooded
    pub parent: Option<usize>,
    /// Component size, meaningful at roots
    pub size: usize,
    /// Edge index per [`Direction`] slot
    pub edges: [Option<usize>; 4],
}

/// Union-find forest plus merge-edge list of a flooded grid
#[derive(Debug, Clone)]
pub struct WatershedGraph {
    grid: Grid,
    options: GraphOptions,
    forest: Forest,
    slots: Vec<[Option<usize>; 4]>,
    edges: Vec<Edge>,
}

impl WatershedGraph {
    /// Flood `grid` in descending `order` and record every merge
    ///
    /// # Errors
    ///
    /// * `RegionError::Core` with a shape mismatch if `order` does not
    ///   cover `grid`
    /// * `RegionError::InvalidParameters` if the pixel threshold is NaN
    pub fn build(grid: &Grid, order: &IntensityOrder, options: &GraphOptions) -> RegionResult<Self> {
        order.check_grid(grid)?;
        check_threshold("pixel_threshold", options.pixel_threshold)?;

        let n = grid.len();
        let merge_threshold = options.merge_threshold.unwrap_or(n + 1);

        let mut forest = Forest::new(n);
        let mut slots = vec![[None; 4]; n];
        let mut edges: Vec<Edge> = Vec::new();
        let mut picker = DirectionPicker::new(options.direction_seed);
        let mut skipped = 0usize;

        for index1 in order.descending() {
            let f1 = grid.value(index1);
            if f1 < options.pixel_threshold {
                break;
            }

            forest.make_root(index1);
            let mut current: Option<usize> = None;

            for dir in Direction::rotated(picker.next_start()) {
                let Some(index2) = forest.flooded_neighbour(grid, index1, dir) else {
                    continue;
                };
                let top = forest.find_root(index2);

                match current {
                    None => {
                        forest.attach(index1, top);
                        current = Some(top);
                    }
                    Some(cur) if cur != top => {
                        if forest.size(top) >= merge_threshold && forest.size(cur) >= merge_threshold {
                            skipped += 1;
                            continue;
                        }
                        current = Some(forest.union(cur, top, MergeStrategy::HigherValue, grid));
                    }
                    Some(_) => continue,
                }

                let slot1 = &mut slots[index1][dir.index()];
                assert!(slot1.is_none(), "edge slot {:?} of pixel {} occupied", dir, index1);
                *slot1 = Some(edges.len());

                let slot2 = &mut slots[index2][dir.opposite().index()];
                assert!(slot2.is_none(), "edge slot {:?} of pixel {} occupied", dir.opposite(), index2);
                *slot2 = Some(edges.len());

                edges.push(Edge::new(index1, index2, f1));
            }
        }

        log::debug!(
            "watershed graph: {}x{} threshold={} merge<{} seed={} -> {} edges, {} merges skipped",
            grid.nx(),
            grid.ny(),
            options.pixel_threshold,
            merge_threshold,
            options.direction_seed,
            edges.len(),
            skipped
        );

        Ok(Self {
            grid: grid.clone(),
            options: options.clone(),
            forest,
            slots,
            edges,
        })
    }

    /// Replace this graph with one built from new inputs
    ///
    /// On error the existing graph is left untouched.
    pub fn rebuild(
        &mut self,
        grid: &Grid,
        order: &IntensityOrder,
        options: &GraphOptions,
    ) -> RegionResult<()> {
        *self = Self::build(grid, order, options)?;
        Ok(())
    }

    /// Partition the edge graph into connected components
    ///
    /// Traversal follows edges, not union-find links. An edge below the edge
    /// threshold is consumed without connecting anything. A pixel below the
    /// pixel threshold can still be crossed but is not counted as a member.
    /// Components with no members or fewer than `size_threshold` members are
    /// dropped. The graph itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if a threshold is NaN.
    pub fn extract_components(&self, options: &ExtractOptions) -> RegionResult<ComponentSet> {
        let pixel_threshold = options.pixel_threshold;
        let edge_threshold = options.effective_edge_threshold();
        check_threshold("pixel_threshold", pixel_threshold)?;
        check_threshold("edge_threshold", edge_threshold)?;

        let mut clusters = ComponentSet::new(self.grid.nx(), self.grid.ny());

        let mut edge_explored = vec![false; self.edges.len()];
        let mut pixel_explored = vec![false; self.grid.len()];
        let mut queue = VecDeque::new();

        for seed in 0..self.edges.len() {
            let [a, b] = self.edges[seed].index;
            if edge_explored[seed] || (pixel_explored[a] && pixel_explored[b]) {
                continue;
            }

            assert!(queue.is_empty(), "edge queue not drained");
            queue.push_back(seed);
            let mut component = Component::new();

            while let Some(j) = queue.pop_front() {
                assert!(!edge_explored[j], "edge {} queued twice", j);
                edge_explored[j] = true;

                let edge = self.edges[j];
                if edge.weight < edge_threshold {
                    continue;
                }
                component.push_edge(edge);

                for index in edge.index {
                    if pixel_explored[index] {
                        continue;
                    }
                    pixel_explored[index] = true;
                    if self.grid.value(index) >= pixel_threshold {
                        component.push_pixel(index);
                    }

                    for &adj in self.slots[index].iter().flatten() {
                        if !edge_explored[adj] {
                            queue.push_back(adj);
                        }
                    }
                }
            }

            if component.is_empty() || component.len() < options.size_threshold {
                continue;
            }
            clusters.push(component);
        }

        log::debug!(
            "extract_components: pixel>={} edge>={} size>={} -> {} clusters",
            pixel_threshold,
            edge_threshold,
            options.size_threshold,
            clusters.len()
        );

        Ok(clusters)
    }

    /// Sizes of union-find components whose root value is at least
    /// `pixel_threshold` and whose size is at least `size_threshold`
    pub fn cluster_sizes(&self, pixel_threshold: f64, size_threshold: usize) -> Vec<usize> {
        self.forest
            .roots()
            .filter(|&r| self.grid.value(r) >= pixel_threshold)
            .map(|r| self.forest.size(r))
            .filter(|&s| s >= size_threshold)
            .collect()
    }

    /// All merge edges, in creation order
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of merge edges
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// View of pixel `index`, or `None` outside the grid
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        if index >= self.grid.len() {
            return None;
        }
        Some(Vertex {
            value: self.grid.value(index),
            parent: self.forest.parent(index),
            size: self.forest.size(index),
            edges: self.slots[index],
        })
    }

    /// Sorted indices of pixels that are an endpoint of some edge
    pub fn vertices(&self) -> Vec<usize> {
        (0..self.grid.len())
            .filter(|&i| self.slots[i].iter().any(Option::is_some))
            .collect()
    }

    /// Coordinates `(ix, iy)` of [`vertices`](Self::vertices)
    pub fn vertex_coords(&self) -> Vec<(usize, usize)> {
        self.vertices()
            .into_iter()
            .map(|i| self.grid.coords(i))
            .collect()
    }

    /// Merge edges as endpoint coordinates and weight, in creation order
    pub fn edge_coords(&self) -> Vec<EdgeCoords> {
        self.obtain_graph().edge_coords().to_vec()
    }

    /// Coordinate view of the whole merge-edge graph
    pub fn obtain_graph(&self) -> Graph {
        let (nx, ny) = self.grid.shape();
        Graph::from_edges(&self.edges, nx, ny)
    }

    /// The grid this graph was built from
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Options used to build this graph
    #[inline]
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Grid shape as `(nx, ny)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}

//! Components (clusters) and component sets
//!
//! A [`Component`] owns the flattened indices of its member pixels and the
//! edges discovered while it was grown. A [`ComponentSet`] is the result of
//! one extraction query and remembers the grid shape so that indices can be
//! turned back into coordinates.

use crate::ellipse::EllipseDescriptor;
use crate::error::{RegionError, RegionResult};
use crate::graph::Graph;

/// Weighted adjacency between two pixels
///
/// `weight` is the threshold above which the edge stays connective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Flattened indices of the two endpoints
    pub index: [usize; 2],
    /// Connectivity threshold of this edge
    pub weight: f64,
}

impl Edge {
    /// Create a new edge
    pub fn new(i1: usize, i2: usize, weight: f64) -> Self {
        Self {
            index: [i1, i2],
            weight,
        }
    }
}

/// A connected set of pixels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    pixels: Vec<usize>,
    edges: Vec<Edge>,
}

impl Component {
    /// Create an empty component
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_pixel(&mut self, index: usize) {
        self.pixels.push(index);
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Member pixel indices
    #[inline]
    pub fn pixels(&self) -> &[usize] {
        &self.pixels
    }

    /// Edges discovered while growing the component
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of member pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True if no pixel was counted as a member
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Number of edges
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Member pixels in ascending index order
    pub fn sorted_pixels(&self) -> Vec<usize> {
        let mut pixels = self.pixels.clone();
        pixels.sort_unstable();
        pixels
    }
}

/// Result of a component extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSet {
    nx: usize,
    ny: usize,
    components: Vec<Component>,
}

impl ComponentSet {
    pub(crate) fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            components: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Grid shape as `(nx, ny)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Number of components
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if no component survived
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// All components
    #[inline]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Component `i`; negative indices count from the end
    ///
    /// # Errors
    ///
    /// Returns `RegionError::IndexOutOfRange` if `i` is outside the set.
    pub fn get(&self, i: isize) -> RegionResult<&Component> {
        let len = self.components.len();
        let resolved = if i < 0 {
            len.checked_sub(i.unsigned_abs())
        } else {
            Some(i as usize)
        };

        resolved
            .and_then(|k| self.components.get(k))
            .ok_or(RegionError::IndexOutOfRange { index: i, len })
    }

    /// Member pixels of component `i`
    pub fn pixels(&self, i: isize) -> RegionResult<&[usize]> {
        Ok(self.get(i)?.pixels())
    }

    /// Edges of component `i`
    pub fn edges(&self, i: isize) -> RegionResult<&[Edge]> {
        Ok(self.get(i)?.edges())
    }

    /// Coordinate view of the edges of component `i`
    pub fn obtain_graph(&self, i: isize) -> RegionResult<Graph> {
        Ok(Graph::from_edges(self.edges(i)?, self.nx, self.ny))
    }

    /// Sizes of all components, in order
    pub fn sizes(&self) -> Vec<usize> {
        self.components.iter().map(Component::len).collect()
    }

    /// Total number of member pixels across all components
    pub fn total_pixels(&self) -> usize {
        self.components.iter().map(Component::len).sum()
    }

    /// Mean coordinates `(x, y)` of component `i`
    pub fn centre(&self, i: isize) -> RegionResult<(f64, f64)> {
        let c = self.get(i)?;
        let n = c.len().max(1) as f64;
        let (sx, sy) = c.pixels().iter().fold((0.0, 0.0), |(sx, sy), &p| {
            (sx + (p / self.ny) as f64, sy + (p % self.ny) as f64)
        });
        Ok((sx / n, sy / n))
    }

    /// Best-fit ellipse of every non-empty component
    pub fn ellipses(&self) -> Vec<EllipseDescriptor> {
        self.components
            .iter()
            .filter_map(|c| EllipseDescriptor::from_pixels(c.pixels(), self.ny))
            .collect()
    }

    /// Membership as sorted pixel lists, sorted by first pixel
    ///
    /// Two sets partition the grid identically exactly when their canonical
    /// forms are equal.
    pub fn canonical(&self) -> Vec<Vec<usize>> {
        let mut parts: Vec<Vec<usize>> = self
            .components
            .iter()
            .map(Component::sorted_pixels)
            .collect();
        parts.sort();
        parts
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

//! Coordinate view of an edge list
//!
//! A [`Graph`] turns flattened edge endpoints back into `(ix, iy)`
//! coordinates, for plotting a whole watershed graph or the tree of a single
//! cluster.

use crate::cluster::Edge;
use std::collections::BTreeSet;

/// One edge as endpoint coordinates plus its weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCoords {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    /// Edge weight
    pub value: f64,
}

/// Vertices and edges in grid coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nx: usize,
    ny: usize,
    vertices: Vec<(usize, usize)>,
    edges: Vec<EdgeCoords>,
}

impl Graph {
    /// Build from edges on an `nx x ny` grid
    ///
    /// Vertices are the distinct endpoints, in ascending index order.
    pub fn from_edges(edges: &[Edge], nx: usize, ny: usize) -> Self {
        let coords = |i: usize| (i / ny, i % ny);

        let vertices = edges
            .iter()
            .flat_map(|e| e.index)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(coords)
            .collect();

        let edges = edges
            .iter()
            .map(|e| {
                let (x1, y1) = coords(e.index[0]);
                let (x2, y2) = coords(e.index[1]);
                EdgeCoords {
                    x1,
                    y1,
                    x2,
                    y2,
                    value: e.weight,
                }
            })
            .collect();

        Self {
            nx,
            ny,
            vertices,
            edges,
        }
    }

    /// Grid shape `(nx, ny)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Vertex coordinates `(ix, iy)`
    #[inline]
    pub fn vertex_coords(&self) -> &[(usize, usize)] {
        &self.vertices
    }

    /// Edges in input order
    #[inline]
    pub fn edge_coords(&self) -> &[EdgeCoords] {
        &self.edges
    }

    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        // 2 x 3 grid: 4 = (1, 1), 1 = (0, 1), 5 = (1, 2)
        let edges = [Edge::new(4, 1, 0.7), Edge::new(5, 4, 0.3)];
        let graph = Graph::from_edges(&edges, 2, 3);

        assert_eq!(graph.shape(), (2, 3));
        assert_eq!(graph.vertex_coords(), &[(0, 1), (1, 1), (1, 2)]);
        assert_eq!(graph.n_edges(), 2);
        assert_eq!(
            graph.edge_coords()[0],
            EdgeCoords {
                x1: 1,
                y1: 1,
                x2: 0,
                y2: 1,
                value: 0.7
            }
        );
        assert_eq!(graph.edge_coords()[1].value, 0.3);
    }

    #[test]
    fn test_empty() {
        let graph = Graph::from_edges(&[], 4, 4);
        assert_eq!(graph.n_vertices(), 0);
        assert_eq!(graph.n_edges(), 0);
    }
}

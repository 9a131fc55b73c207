//! Flood-fill component extraction
//!
//! The simplest way to find clusters: a 4-neighbour breadth-first flood fill
//! over the pixels at or above a single threshold. No union-find or edge
//! graph is built, so this is the method of choice when only one threshold
//! is of interest.

use crate::cluster::{Component, ComponentSet, Edge};
use crate::error::{RegionResult, check_threshold};
use cellularlib_core::{Direction, Grid};
use std::collections::VecDeque;

/// Find 4-connected clusters of pixels with value `>= pixel_threshold`
///
/// Components are discovered in increasing order of their first pixel
/// index. Each time the fill steps to a new pixel, the adjacency it used is
/// recorded as an edge weighted by the smaller of the two endpoint values,
/// so every component carries a spanning tree of its pixels.
///
/// Components with fewer than `size_threshold` pixels are discarded after
/// they are complete.
///
/// # Errors
///
/// Returns `RegionError::InvalidParameters` if `pixel_threshold` is NaN.
///
/// # Examples
///
/// ```
/// use cellularlib_core::Grid;
/// use cellularlib_region::flood_components;
///
/// let grid = Grid::from_rows(&[
///     vec![1.0, 1.0, 0.0],
///     vec![0.0, 0.0, 0.0],
///     vec![0.0, 1.0, 1.0],
/// ]).unwrap();
///
/// let clusters = flood_components(&grid, 0.5, 1).unwrap();
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters.sizes(), vec![2, 2]);
/// ```
pub fn flood_components(
    grid: &Grid,
    pixel_threshold: f64,
    size_threshold: usize,
) -> RegionResult<ComponentSet> {
    check_threshold("pixel_threshold", pixel_threshold)?;

    let n = grid.len();
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    let mut clusters = ComponentSet::new(grid.nx(), grid.ny());

    for index0 in 0..n {
        if visited[index0] || grid.value(index0) < pixel_threshold {
            continue;
        }

        visited[index0] = true;
        assert!(queue.is_empty(), "flood queue not drained");
        queue.push_back(index0);

        let mut component = Component::new();

        while let Some(index1) = queue.pop_front() {
            component.push_pixel(index1);
            let f1 = grid.value(index1);

            for dir in Direction::ALL {
                let Some(index2) = grid.neighbour(index1, dir) else {
                    continue;
                };
                let f2 = grid.value(index2);
                if visited[index2] || f2 < pixel_threshold {
                    continue;
                }

                visited[index2] = true;
                queue.push_back(index2);
                component.push_edge(Edge::new(index1, index2, f1.min(f2)));
            }
        }

        if component.len() >= size_threshold {
            clusters.push(component);
        }
    }

    log::debug!(
        "flood_components: {}x{} threshold={} size>={} -> {} clusters",
        grid.nx(),
        grid.ny(),
        pixel_threshold,
        size_threshold,
        clusters.len()
    );

    Ok(clusters)
}

//! Flood-fill regression test
//!
//! Checks the flood-fill extractor on hand-built patterns and on the
//! synthetic sin/cos fields: membership, edge weights and size filtering.
//!
//! Run with:
//! ```
//! cargo test -p cellularlib-region --test seedfill_reg
//! ```

use cellularlib_core::Grid;
use cellularlib_region::{RegionError, flood_components};
use cellularlib_test::{RegParams, synthetic_grid};

#[test]
fn seedfill_uniform_square() {
    let mut rp = RegParams::new("seedfill_square");

    let grid = Grid::new_with_value(3, 3, 10.0).expect("grid");
    let clusters = flood_components(&grid, 5.0, 1).expect("flood failed");

    rp.compare_values(1.0, clusters.len() as f64, 0.0);
    rp.compare_values(9.0, clusters.sizes()[0] as f64, 0.0);
    rp.compare_values(8.0, clusters.edges(0).expect("edges").len() as f64, 0.0);

    let (x, y) = clusters.centre(0).expect("centre");
    rp.compare_values(1.0, x, 0.0);
    rp.compare_values(1.0, y, 0.0);

    assert!(rp.cleanup(), "seedfill square test failed");
}

#[test]
fn seedfill_cross_and_diagonal() {
    let mut rp = RegParams::new("seedfill_pattern");

    // A plus sign is one component; its diagonal neighbours are separate
    let grid = Grid::from_rows(&[
        vec![1.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 1.0, 1.0, 1.0, 0.0],
        vec![1.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0],
    ])
    .expect("grid");

    let clusters = flood_components(&grid, 0.5, 0).expect("flood failed");
    rp.compare_values(4.0, clusters.len() as f64, 0.0);
    rp.compare_partitions(
        &[vec![0], vec![2, 6, 7, 8, 12], vec![10], vec![19]],
        &clusters.canonical(),
    );

    let large = flood_components(&grid, 0.5, 2).expect("flood failed");
    rp.compare_values(1.0, large.len() as f64, 0.0);
    rp.compare_values(5.0, large.total_pixels() as f64, 0.0);

    // Negative index reaches the last component
    let last = clusters.pixels(-1).expect("last");
    rp.check(last == [19], "negative index");
    rp.check(
        matches!(clusters.get(4), Err(RegionError::IndexOutOfRange { .. })),
        "out of range index",
    );

    assert!(rp.cleanup(), "seedfill pattern test failed");
}

#[test]
fn seedfill_synthetic() {
    let mut rp = RegParams::new("seedfill");

    for variant in 0..2 {
        let grid = synthetic_grid(100, 100, variant);
        for &threshold in &[0.4, 0.5, 0.6, 0.7] {
            let clusters = flood_components(&grid, threshold, 1).expect("flood failed");

            // Every pixel at or above the threshold is in exactly one cluster
            let above = grid.data().iter().filter(|&&v| v >= threshold).count();
            rp.compare_values(above as f64, clusters.total_pixels() as f64, 0.0);

            // Each cluster carries a spanning tree with min-value weights
            let mut trees = true;
            for c in &clusters {
                trees &= c.n_edges() + 1 == c.len();
                for e in c.edges() {
                    let [a, b] = e.index;
                    trees &= e.weight == grid.value(a).min(grid.value(b));
                    trees &= e.weight >= threshold;
                }
            }
            rp.check(trees, &format!("spanning trees at {}", threshold));

            eprintln!(
                "  variant {} threshold {}: {} clusters",
                variant,
                threshold,
                clusters.len()
            );
        }
    }

    assert!(rp.cleanup(), "seedfill regression test failed");
}

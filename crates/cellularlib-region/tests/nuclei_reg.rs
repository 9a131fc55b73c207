//! Nuclei marker regression test
//!
//! Sweeps the default thresholds over the synthetic sin/cos fields and
//! checks the marker against direct flood fills: every component that fits
//! the size window at some threshold must be painted, and nothing outside a
//! qualifying component may be.
//!
//! Run with:
//! ```
//! cargo test -p cellularlib-region --test nuclei_reg
//! ```

use cellularlib_core::{Grid, IntensityOrder, Mask};
use cellularlib_region::{NucleiOptions, flood_components, mark_regions, nuclei_mask};
use cellularlib_test::{RegParams, synthetic_grid};

/// Mask painted by flooding each threshold independently
fn flood_reference(grid: &Grid, thresholds: &[f64], options: &NucleiOptions) -> Mask {
    let mut mask = Mask::for_grid(grid);
    for &t in thresholds {
        let clusters = flood_components(grid, t, options.size_min).expect("flood failed");
        for c in clusters.iter().filter(|c| c.len() <= options.size_max) {
            for &p in c.pixels() {
                mask.mark(p);
            }
        }
    }
    mask
}

fn do_nuclei(rp: &mut RegParams, grid: &Grid, options: &NucleiOptions) {
    let order = IntensityOrder::from_grid(grid);
    let thresholds: Vec<f64> = (1..40).map(|k| k as f64 / 40.0).collect();

    let mut mask = Mask::for_grid(grid);
    mark_regions(grid, &order, &thresholds, options, &mut mask).expect("mark failed");

    let expected = flood_reference(grid, &thresholds, options);
    eprintln!(
        "  size in [{}, {}]: {} pixels marked, {} expected",
        options.size_min,
        options.size_max,
        mask.count(),
        expected.count()
    );
    rp.compare_masks(&expected, &mask);
}

#[test]
fn nuclei_synthetic() {
    let mut rp = RegParams::new("nuclei");

    for variant in 0..2 {
        eprintln!("=== Synthetic image {} ===", variant + 1);
        let grid = synthetic_grid(90, 110, variant);
        for (lo, hi) in [(1, 1), (5, 60), (20, 400), (100, 2000)] {
            do_nuclei(&mut rp, &grid, &NucleiOptions::new(lo, hi));
        }
    }

    assert!(rp.cleanup(), "nuclei regression test failed");
}

#[test]
fn nuclei_only_sets_bits() {
    let mut rp = RegParams::new("nuclei_monotone");

    let grid = synthetic_grid(80, 80, 1);
    let order = IntensityOrder::from_grid(&grid);
    let options = NucleiOptions::new(10, 200);

    // Pre-painted bits survive, and the sweep never clears anything
    let mut mask = Mask::for_grid(&grid);
    for index in (0..grid.len()).step_by(7) {
        mask.mark(index);
    }
    let before = mask.clone();

    let thresholds: Vec<f64> = (1..30).map(|k| k as f64 / 30.0).collect();
    mark_regions(&grid, &order, &thresholds, &options, &mut mask).expect("mark failed");

    let kept = (0..grid.len()).all(|i| !before.is_marked(i) || mask.is_marked(i));
    rp.check(kept, "bits cleared");
    rp.check(mask.count() >= before.count(), "mark count decreased");

    assert!(rp.cleanup(), "nuclei monotone test failed");
}

#[test]
fn nuclei_default_thresholds() {
    let mut rp = RegParams::new("nuclei_default");

    let grid = synthetic_grid(64, 64, 0);
    let mask = nuclei_mask(&grid, &NucleiOptions::new(5, 100)).expect("nuclei failed");
    rp.compare_values(64.0 * 64.0, mask.len() as f64, 0.0);

    let bits: Vec<u8> = mask.data().iter().map(|&b| if b { b'1' } else { b'0' }).collect();
    rp.write_data_and_check(&bits, "txt").expect("write failed");

    assert!(rp.cleanup(), "nuclei default threshold test failed");
}

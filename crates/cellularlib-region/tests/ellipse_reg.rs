//! Ellipse descriptor regression test
//!
//! Run with:
//! ```
//! cargo test -p cellularlib-region --test ellipse_reg
//! ```

use cellularlib_core::Grid;
use cellularlib_region::ellipse::orientation;
use cellularlib_region::{ELLIPSE_SCALE, EllipseDescriptor, describe_ellipses, flood_components};
use cellularlib_test::{RegParams, synthetic_grid};
use std::f64::consts::PI;

#[test]
fn ellipse_square() {
    let mut rp = RegParams::new("ellipse_square");

    let grid = Grid::new_with_value(3, 3, 10.0).expect("grid");
    let ellipses = describe_ellipses(&grid, 5.0, 1).expect("ellipses failed");
    rp.compare_values(1.0, ellipses.len() as f64, 0.0);

    let e = ellipses[0];
    rp.compare_values(9.0, e.size as f64, 0.0);
    rp.compare_values(1.0, e.mean_x, 0.0);
    rp.compare_values(1.0, e.mean_y, 0.0);
    rp.compare_values(e.semi_major, e.semi_minor, 0.0);

    // Variance 2/3 + 1/12 along both axes
    let r = (ELLIPSE_SCALE * 0.75).sqrt();
    rp.compare_values(r, e.semi_major, 1e-12);

    assert!(rp.cleanup(), "ellipse square test failed");
}

#[test]
fn ellipse_bars() {
    let mut rp = RegParams::new("ellipse_bars");

    // One bar along x and one along y on a 10x10 grid
    let grid = Grid::from_fn(10, 10, |ix, iy| {
        let along_x = iy == 1 && (2..8).contains(&ix);
        let along_y = ix == 8 && (4..9).contains(&iy);
        if along_x || along_y { 1.0 } else { 0.0 }
    })
    .expect("grid");

    let ellipses = describe_ellipses(&grid, 0.5, 2).expect("ellipses failed");
    rp.compare_values(2.0, ellipses.len() as f64, 0.0);

    for e in &ellipses {
        eprintln!(
            "  size {} mean ({}, {}) axes {:.4} {:.4} angle {:.4}",
            e.size, e.mean_x, e.mean_y, e.semi_major, e.semi_minor, e.orientation
        );
        rp.check(e.semi_major > e.semi_minor, "elongated");
    }

    // Discovery order follows the first pixel index: the x bar starts at 21
    rp.compare_values(0.0, ellipses[0].orientation, 1e-12);
    rp.compare_values(PI / 2.0, ellipses[1].orientation, 1e-12);
    rp.compare_values(4.5, ellipses[0].mean_x, 1e-12);
    rp.compare_values(6.0, ellipses[1].mean_y, 1e-12);

    assert!(rp.cleanup(), "ellipse bar test failed");
}

#[test]
fn ellipse_orientation_sign() {
    let mut rp = RegParams::new("ellipse_orientation");

    for k in 0..36 {
        let theta = k as f64 * PI / 18.0;
        let (ex, ey) = (theta.cos(), theta.sin());
        let a = orientation(ex, ey);
        let b = orientation(-ex, -ey);
        rp.compare_values(a, b, 0.0);
        rp.check((0.0..PI).contains(&a), &format!("angle {} in [0, pi)", a));
    }

    assert!(rp.cleanup(), "ellipse orientation test failed");
}

#[test]
fn ellipse_synthetic() {
    let mut rp = RegParams::new("ellipse");

    let grid = synthetic_grid(100, 100, 1);
    let clusters = flood_components(&grid, 0.6, 5).expect("flood failed");
    let ellipses = describe_ellipses(&grid, 0.6, 5).expect("ellipses failed");
    rp.compare_values(clusters.len() as f64, ellipses.len() as f64, 0.0);

    let (nx, ny) = grid.shape();
    let mut text = String::new();
    for (c, e) in clusters.iter().zip(&ellipses) {
        let expected = EllipseDescriptor::from_pixels(c.pixels(), ny).expect("non-empty");
        rp.check(expected == *e, "ellipse matches its cluster");
        rp.check(
            e.mean_x >= 0.0 && e.mean_x < nx as f64 && e.mean_y >= 0.0 && e.mean_y < ny as f64,
            "mean inside grid",
        );
        rp.check(e.semi_minor <= e.semi_major, "axis order");
        text.push_str(&format!(
            "{} {:.6} {:.6} {:.6} {:.6} {:.6}\n",
            e.size, e.mean_x, e.mean_y, e.semi_major, e.semi_minor, e.orientation
        ));
    }
    rp.write_data_and_check(text.as_bytes(), "txt")
        .expect("write failed");

    assert!(rp.cleanup(), "ellipse regression test failed");
}

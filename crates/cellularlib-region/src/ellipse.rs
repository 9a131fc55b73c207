//! Best-fit ellipses of clusters
//!
//! Each cluster is summarized by the ellipse of its pixel-coordinate
//! covariance. Pixels are modelled as unit squares with uniform sub-pixel
//! position, which adds `1/12` to the variance along both axes; a single
//! pixel therefore still yields a small circle.
//!
//! Semi-axes are `sqrt(ELLIPSE_SCALE * eigenvalue)`, the 95% contour of a
//! 2D Gaussian with that covariance.

use crate::error::RegionResult;
use crate::seedfill::flood_components;
use cellularlib_core::Grid;
use nalgebra::{Matrix2, SymmetricEigen};
use std::f64::consts::PI;

/// 95% chi-square quantile for 2 degrees of freedom
pub const ELLIPSE_SCALE: f64 = 5.991;

/// Variance of a uniform position inside a unit pixel
pub const PIXEL_VARIANCE: f64 = 1.0 / 12.0;

/// Ellipse summary of one cluster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseDescriptor {
    /// Number of pixels in the cluster
    pub size: usize,
    /// Mean x (first axis) coordinate
    pub mean_x: f64,
    /// Mean y (second axis) coordinate
    pub mean_y: f64,
    /// Semi-major axis
    pub semi_major: f64,
    /// Semi-minor axis, never larger than `semi_major`
    pub semi_minor: f64,
    /// Angle between the x axis and the major axis, in `[0, pi)`
    pub orientation: f64,
}

impl EllipseDescriptor {
    /// Fit an ellipse to pixels given by flattened index on a grid with
    /// second-axis extent `ny`
    ///
    /// Returns `None` for an empty pixel list.
    pub fn from_pixels(pixels: &[usize], ny: usize) -> Option<Self> {
        if pixels.is_empty() || ny == 0 {
            return None;
        }

        let n = pixels.len() as f64;
        let coords = pixels.iter().map(|&p| ((p / ny) as f64, (p % ny) as f64));

        let (sx, sy) = coords.clone().fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
        let (mx, my) = (sx / n, sy / n);

        let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
        for (x, y) in coords {
            let (dx, dy) = (x - mx, y - my);
            cxx += dx * dx;
            cxy += dx * dy;
            cyy += dy * dy;
        }
        cxx = cxx / n + PIXEL_VARIANCE;
        cxy /= n;
        cyy = cyy / n + PIXEL_VARIANCE;

        let eig = SymmetricEigen::new(Matrix2::new(cxx, cxy, cxy, cyy));
        let (major_axis, major, minor) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
            (eig.eigenvectors.column(0), eig.eigenvalues[0], eig.eigenvalues[1])
        } else {
            (eig.eigenvectors.column(1), eig.eigenvalues[1], eig.eigenvalues[0])
        };

        Some(Self {
            size: pixels.len(),
            mean_x: mx,
            mean_y: my,
            semi_major: (ELLIPSE_SCALE * major).sqrt(),
            semi_minor: (ELLIPSE_SCALE * minor.max(0.0)).sqrt(),
            orientation: orientation(major_axis[0], major_axis[1]),
        })
    }

    /// Fields as `[size, mean_x, mean_y, semi_major, semi_minor, orientation]`
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.size as f64,
            self.mean_x,
            self.mean_y,
            self.semi_major,
            self.semi_minor,
            self.orientation,
        ]
    }
}

/// Angle of the axis through `(ex, ey)`, folded into `[0, pi)`
///
/// `(ex, ey)` and `(-ex, -ey)` describe the same axis and give the same angle.
pub fn orientation(ex: f64, ey: f64) -> f64 {
    let (ex, ey) = if ex < 0.0 { (-ex, -ey) } else { (ex, ey) };
    let mut theta = ey.atan2(ex);
    if theta < 0.0 {
        theta += PI;
    }
    if theta >= PI {
        theta -= PI;
    }
    // fold -0.0 into 0.0
    theta + 0.0
}

/// Ellipses of the clusters of pixels `>= pixel_threshold` with at least
/// `size_threshold` pixels, in flood-fill discovery order
pub fn describe_ellipses(
    grid: &Grid,
    pixel_threshold: f64,
    size_threshold: usize,
) -> RegionResult<Vec<EllipseDescriptor>> {
    let clusters = flood_components(grid, pixel_threshold, size_threshold)?;
    let ellipses = clusters.ellipses();
    log::debug!(
        "describe_ellipses: threshold={} size>={} -> {} ellipses",
        pixel_threshold,
        size_threshold,
        ellipses.len()
    );
    Ok(ellipses)
}

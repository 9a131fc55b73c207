//! cellularlib-test - Regression harness shared by the cellularlib crates
//!
//! Integration tests create a [`RegParams`], run numbered comparisons on it
//! and finish with [`RegParams::cleanup`], which reports every failed step at
//! once instead of stopping at the first one.
//!
//! Text outputs can be pinned with golden files. `REGTEST_MODE` selects what
//! happens to them:
//!
//! - `generate`: copy the current output over the golden file
//! - `compare` (default): fail when output and golden file differ
//! - `display`: run the checks, ignore golden files
//!
//! ```ignore
//! use cellularlib_test::{RegParams, synthetic_grid};
//!
//! let grid = synthetic_grid(100, 100, 0);
//! let mut rp = RegParams::new("ncluster");
//! rp.compare_counts(&expected, &counts);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use cellularlib_core::Grid;
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    // crates/cellularlib-test -> workspace root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Directory of golden files, `tests/golden` under the workspace root
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests").join("golden")
}

/// Directory of test outputs, `tests/regout` under the workspace root
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests").join("regout")
}

/// Smooth test field of sines and cosines with values in `(0, 1)`
///
/// `variant == 0` has higher frequencies and therefore more peaks than
/// `variant == 1`.
///
/// # Panics
///
/// Panics if `nx` or `ny` is 0.
pub fn synthetic_grid(nx: usize, ny: usize, variant: u32) -> Grid {
    let (fx1, fx2, fy1, fy2) = if variant == 0 {
        (0.0438, 0.0712, 0.0561, 0.0327)
    } else {
        (0.0238, 0.0312, 0.0261, 0.0207)
    };

    let field = |ix: usize, iy: usize| {
        let (x, y) = (ix as f64, iy as f64);
        let level = 128.0
            + 26.3 * (fx1 * x).sin()
            + 33.4 * (fx2 * x).cos()
            + 18.6 * (fy1 * y).sin()
            + 23.6 * (fy2 * y).cos();
        level / 256.0
    };

    Grid::from_fn(nx, ny, field)
        .unwrap_or_else(|e| panic!("synthetic grid {}x{}: {}", nx, ny, e))
}

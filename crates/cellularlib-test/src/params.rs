//! Per-test bookkeeping: numbered checks, failure log and golden files

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use cellularlib_core::Mask;
use std::fs;
use std::path::Path;

/// How golden files are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Overwrite golden files with the current output
    Generate,
    /// Check output against golden files
    #[default]
    Compare,
    /// Only run and print; golden files are ignored
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`; anything unrecognized means compare
    pub fn from_env() -> Self {
        let value = std::env::var("REGTEST_MODE").unwrap_or_default();
        match value.trim().to_ascii_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test
///
/// Every comparison advances a step counter, so a failure message names the
/// step that failed and golden files are numbered in call order.
#[derive(Debug)]
pub struct RegParams {
    /// Test name, used in messages and file names
    pub test_name: String,
    /// Golden-file mode
    pub mode: RegTestMode,
    step: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test named `test_name`, with the mode taken from `REGTEST_MODE`
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // A failure here surfaces on the first write
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!("\n==== {}_reg ({:?}) ====", test_name, mode);

        Self {
            test_name: test_name.to_string(),
            mode,
            step: 0,
            failures: Vec::new(),
        }
    }

    /// Number of steps taken so far
    pub fn index(&self) -> usize {
        self.step
    }

    /// True in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn next_step(&mut self) -> usize {
        self.step += 1;
        self.step
    }

    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        if !ok {
            let msg = format!("{}_reg step {}: {}", self.test_name, self.step, detail());
            eprintln!("FAIL {}", msg);
            self.failures.push(msg);
        }
        ok
    }

    /// Pass if `|expected - actual| <= delta`; NaN never passes
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next_step();
        let diff = (expected - actual).abs();
        self.record(diff <= delta, || {
            format!("expected {}, got {} (|diff| {} > {})", expected, actual, diff, delta)
        })
    }

    /// Pass if `condition` holds
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.next_step();
        self.record(condition, || what.to_string())
    }

    /// Pass if two count sequences are equal
    pub fn compare_counts(&mut self, expected: &[usize], actual: &[usize]) -> bool {
        self.next_step();
        let first_diff = expected
            .iter()
            .zip(actual)
            .position(|(a, b)| a != b);
        let ok = expected.len() == actual.len() && first_diff.is_none();
        self.record(ok, || match first_diff {
            Some(i) => format!("counts differ at {}: {} vs {}", i, expected[i], actual[i]),
            None => format!("count lengths differ: {} vs {}", expected.len(), actual.len()),
        })
    }

    /// Pass if two partitions, each given as sorted member lists, are equal
    pub fn compare_partitions(&mut self, expected: &[Vec<usize>], actual: &[Vec<usize>]) -> bool {
        self.next_step();
        let ok = expected == actual;
        self.record(ok, || {
            let n_expected: usize = expected.iter().map(Vec::len).sum();
            let n_actual: usize = actual.iter().map(Vec::len).sum();
            format!(
                "partitions differ: {} parts / {} pixels vs {} parts / {} pixels",
                expected.len(),
                n_expected,
                actual.len(),
                n_actual
            )
        })
    }

    /// Pass if two masks have the same shape and bits
    pub fn compare_masks(&mut self, expected: &Mask, actual: &Mask) -> bool {
        self.next_step();
        if expected.shape() != actual.shape() {
            return self.record(false, || {
                format!("mask shapes {:?} vs {:?}", expected.shape(), actual.shape())
            });
        }
        let diff = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        self.record(diff.is_none(), || {
            format!(
                "mask bit {} differs; {} vs {} bits set",
                diff.unwrap_or(0),
                expected.count(),
                actual.count()
            )
        })
    }

    /// Pass if two byte strings are equal
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.next_step();
        self.record(expected == actual, || {
            format!("byte strings differ ({} vs {} bytes)", expected.len(), actual.len())
        })
    }

    /// Write `data` to the output directory and check it against its golden
    /// file
    ///
    /// The file is named `<test>.<step>.<ext>`. In compare mode a missing
    /// golden file is reported and skipped so that a fresh checkout passes.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        let step = self.next_step();
        let local = regout_dir().join(format!("{}.{:02}.{}", self.test_name, step, ext));
        fs::write(&local, data).map_err(|e| TestError::DataWrite {
            path: local.display().to_string(),
            message: e.to_string(),
        })?;

        let golden = golden_dir().join(format!("{}_golden.{:02}.{}", self.test_name, step, ext));
        self.check_golden(&local, &golden)
    }

    fn check_golden(&mut self, local: &Path, golden: &Path) -> TestResult<()> {
        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local, golden)?;
                eprintln!("wrote golden {}", golden.display());
            }
            RegTestMode::Compare if golden.exists() => {
                let same = fs::read(local)? == fs::read(golden)?;
                self.record(same, || {
                    format!("{} differs from {}", local.display(), golden.display())
                });
            }
            RegTestMode::Compare => {
                eprintln!("no golden file {}, skipped", golden.display());
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Print a summary and return whether every step passed
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("PASS {}_reg ({} steps)\n", self.test_name, self.step);
            return true;
        }
        eprintln!(
            "FAILED {}_reg: {} of {} steps",
            self.test_name,
            self.failures.len(),
            self.step
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        eprintln!();
        false
    }

    /// True while no step has failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Messages of the failed steps
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

//! Union-find forest over grid pixels
//!
//! Every flood algorithm in this crate processes pixels from the highest
//! value down and links each newly flooded pixel to the components of its
//! already flooded neighbours. The forest is an arena of parent links
//! addressed by flattened pixel index.
//!
//! Root lookups walk the parent chain without path compression. Under the
//! descending flood order chains stay shallow, and the uncompressed links
//! keep the forest a faithful record of merge history.
//!
//! Two merge strategies coexist, because they give observably different
//! forests:
//!
//! - [`MergeStrategy::HigherValue`]: the root whose pixel is brighter
//!   survives (used by graph construction and threshold counting)
//! - [`MergeStrategy::LargerSize`]: the larger component survives (used by
//!   the region marker, which splices member lists)

use cellularlib_core::{Direction, Grid};
use rand::prelude::*;
use rand::rngs::StdRng;

const UNVISITED: usize = usize::MAX;

/// Which root survives when two components merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Keep the root with the higher pixel value; ties keep the current root
    #[default]
    HigherValue,
    /// Keep the root of the larger component; ties keep the current root
    LargerSize,
}

/// Disjoint-set forest of grid pixels
#[derive(Debug, Clone)]
pub struct Forest {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl Forest {
    /// Create a forest of `n` pixels, all still under water
    pub fn new(n: usize) -> Self {
        Self {
            parent: vec![UNVISITED; n],
            size: vec![0; n],
        }
    }

    /// Number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True if the forest has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Whether the flood has reached pixel `i`
    #[inline]
    pub fn is_flooded(&self, i: usize) -> bool {
        self.parent[i] != UNVISITED
    }

    /// Parent link of `i`, `None` before the flood reaches it
    #[inline]
    pub fn parent(&self, i: usize) -> Option<usize> {
        let p = self.parent[i];
        (p != UNVISITED).then_some(p)
    }

    /// True if `i` is flooded and is the root of its component
    #[inline]
    pub fn is_root(&self, i: usize) -> bool {
        self.parent[i] == i
    }

    /// Component size; only meaningful at a root
    #[inline]
    pub fn size(&self, i: usize) -> usize {
        self.size[i]
    }

    /// Flood pixel `i` as a new component of size 1
    #[inline]
    pub fn make_root(&mut self, i: usize) {
        self.parent[i] = i;
        self.size[i] = 1;
    }

    /// Root of the component containing `i`
    ///
    /// # Panics
    ///
    /// Panics if `i` has not been flooded.
    pub fn find_root(&self, mut i: usize) -> usize {
        assert!(self.is_flooded(i), "find_root on unflooded pixel {}", i);
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    /// Link a freshly flooded singleton `pixel` under `root`
    pub fn attach(&mut self, pixel: usize, root: usize) {
        debug_assert!(self.is_root(root));
        self.parent[pixel] = root;
        self.size[root] += 1;
    }

    /// Merge the components rooted at `current` and `other`
    ///
    /// Returns the surviving root. The donor root is relinked beneath it and
    /// its size folded in.
    pub fn union(
        &mut self,
        current: usize,
        other: usize,
        strategy: MergeStrategy,
        grid: &Grid,
    ) -> usize {
        debug_assert!(current != other);
        let other_wins = match strategy {
            MergeStrategy::HigherValue => grid.value(other) > grid.value(current),
            MergeStrategy::LargerSize => self.size[other] > self.size[current],
        };
        let (survivor, donor) = if other_wins {
            (other, current)
        } else {
            (current, other)
        };

        self.parent[donor] = survivor;
        self.size[survivor] += self.size[donor];
        survivor
    }

    /// Neighbour of `index` in `dir` if it is inside the grid and flooded
    #[inline]
    pub fn flooded_neighbour(&self, grid: &Grid, index: usize, dir: Direction) -> Option<usize> {
        grid.neighbour(index, dir)
            .filter(|&nbr| self.is_flooded(nbr))
    }

    /// Iterator over component roots
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.parent.len()).filter(move |&i| self.parent[i] == i)
    }
}

/// Source of the first neighbour direction visited for each pixel
///
/// A zero seed disables randomization: every pixel starts with
/// [`Direction::Up`]. Otherwise a generator owned by this value is seeded
/// once per call, so results are reproducible and independent calls never
/// share state.
#[derive(Debug)]
pub struct DirectionPicker {
    rng: Option<StdRng>,
}

impl DirectionPicker {
    /// Create a picker for `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            rng: (seed != 0).then(|| StdRng::seed_from_u64(seed)),
        }
    }

    /// Index of the direction to start the next neighbour scan from
    pub fn next_start(&mut self) -> usize {
        match self.rng.as_mut() {
            Some(rng) => rng.random_range(0..4),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: &[f64]) -> Grid {
        Grid::from_data(1, values.len(), values.to_vec()).unwrap()
    }

    #[test]
    fn test_forest_basic() {
        let mut forest = Forest::new(4);
        assert!(!forest.is_flooded(0));
        assert_eq!(forest.parent(0), None);

        forest.make_root(1);
        forest.make_root(2);
        forest.attach(2, 1);
        assert_eq!(forest.find_root(2), 1);
        assert_eq!(forest.size(1), 2);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_union_higher_value() {
        let grid = line(&[1.0, 5.0, 3.0]);
        let mut forest = Forest::new(3);
        forest.make_root(0);
        forest.make_root(1);

        let survivor = forest.union(0, 1, MergeStrategy::HigherValue, &grid);
        assert_eq!(survivor, 1);
        assert_eq!(forest.size(1), 2);
        assert_eq!(forest.find_root(0), 1);
    }

    #[test]
    fn test_union_ties_keep_current() {
        let grid = line(&[2.0, 2.0]);
        let mut forest = Forest::new(2);
        forest.make_root(0);
        forest.make_root(1);
        assert_eq!(forest.union(0, 1, MergeStrategy::HigherValue, &grid), 0);

        let mut forest = Forest::new(2);
        forest.make_root(0);
        forest.make_root(1);
        assert_eq!(forest.union(1, 0, MergeStrategy::LargerSize, &grid), 1);
    }

    #[test]
    fn test_union_larger_size() {
        let grid = line(&[9.0, 1.0, 1.0, 1.0]);
        let mut forest = Forest::new(4);
        forest.make_root(1);
        forest.make_root(2);
        forest.attach(2, 1);
        forest.make_root(0);

        // The brighter singleton loses against the larger component
        let survivor = forest.union(0, 1, MergeStrategy::LargerSize, &grid);
        assert_eq!(survivor, 1);
        assert_eq!(forest.size(1), 3);
    }

    #[test]
    #[should_panic]
    fn test_find_root_unflooded() {
        let forest = Forest::new(2);
        forest.find_root(0);
    }

    #[test]
    fn test_direction_picker() {
        let mut fixed = DirectionPicker::new(0);
        assert!((0..10).all(|_| fixed.next_start() == 0));

        let mut a = DirectionPicker::new(42);
        let mut b = DirectionPicker::new(42);
        let sa: Vec<usize> = (0..32).map(|_| a.next_start()).collect();
        let sb: Vec<usize> = (0..32).map(|_| b.next_start()).collect();
        assert_eq!(sa, sb);
        assert!(sa.iter().all(|&s| s < 4));
    }
}

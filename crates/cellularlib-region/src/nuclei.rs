//! Size-bounded region ("nuclei") detection
//!
//! A nucleus is a component whose pixel count falls in a target window at
//! some threshold. Sweeping the thresholds from the highest down, the flood
//! keeps the full member list of every component so that any component that
//! enters the window can be painted into a mask. Once painted, a pixel stays
//! painted even when its component later grows past the window.

use crate::error::{RegionError, RegionResult, check_ascending};
use crate::threshold::default_thresholds;
use crate::union_find::{Forest, MergeStrategy};
use cellularlib_core::{Direction, Grid, IntensityOrder, Mask};
use std::collections::{BTreeSet, VecDeque};

/// Size window for [`mark_regions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleiOptions {
    /// Minimum component size, inclusive
    pub size_min: usize,
    /// Maximum component size, inclusive
    pub size_max: usize,
}

impl Default for NucleiOptions {
    fn default() -> Self {
        Self {
            size_min: 1,
            size_max: usize::MAX,
        }
    }
}

impl NucleiOptions {
    /// Create options for the window `[size_min, size_max]`
    pub fn new(size_min: usize, size_max: usize) -> Self {
        Self { size_min, size_max }
    }

    /// Check that the window is not empty
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if `size_min > size_max`.
    pub fn validate(&self) -> RegionResult<()> {
        if self.size_min > self.size_max {
            return Err(RegionError::InvalidParameters(format!(
                "size_min ({}) > size_max ({})",
                self.size_min, self.size_max
            )));
        }
        Ok(())
    }

    #[inline]
    fn contains(&self, size: usize) -> bool {
        (self.size_min..=self.size_max).contains(&size)
    }
}

/// Union-find forest whose roots own their member lists
struct MemberForest {
    forest: Forest,
    members: Vec<VecDeque<usize>>,
}

impl MemberForest {
    fn new(n: usize) -> Self {
        Self {
            forest: Forest::new(n),
            members: vec![VecDeque::new(); n],
        }
    }

    /// Flood `index` and link it to its flooded neighbours
    ///
    /// Returns the root that holds `index` afterwards.
    fn flood(&mut self, grid: &Grid, index: usize) -> usize {
        self.forest.make_root(index);
        let mut current: Option<usize> = None;

        for dir in Direction::ALL {
            let Some(nbr) = self.forest.flooded_neighbour(grid, index, dir) else {
                continue;
            };
            let top = self.forest.find_root(nbr);

            match current {
                None => {
                    self.forest.attach(index, top);
                    self.members[top].push_back(index);
                    current = Some(top);
                }
                Some(cur) if cur != top => {
                    let survivor = self.forest.union(cur, top, MergeStrategy::LargerSize, grid);
                    let donor = if survivor == cur { top } else { cur };
                    self.splice(survivor, donor);
                    current = Some(survivor);
                }
                Some(_) => {}
            }
        }

        match current {
            Some(root) => root,
            None => {
                self.members[index].push_back(index);
                index
            }
        }
    }

    /// Move the donor's members to the front of the survivor's list
    fn splice(&mut self, survivor: usize, donor: usize) {
        let moved = std::mem::take(&mut self.members[donor]);
        let list = &mut self.members[survivor];
        for &p in moved.iter().rev() {
            list.push_front(p);
        }
        debug_assert_eq!(list.len(), self.forest.size(survivor));
    }
}

/// Paint every component whose size falls in the window at any threshold
///
/// `thresholds` must be ascending. They are processed from the highest to
/// the lowest, sharing a single descending walk over `order`. After the
/// pixels of each threshold are flooded, every component that gained a
/// pixel or a merge during that batch is checked against the window, and
/// its members are set in `mask` if it fits. Bits are only ever set.
///
/// # Errors
///
/// * `RegionError::Core` with a shape mismatch if `order` or `mask` does not
///   match `grid`
/// * `RegionError::InvalidParameters` if the window is empty or `thresholds`
///   is not ascending
pub fn mark_regions(
    grid: &Grid,
    order: &IntensityOrder,
    thresholds: &[f64],
    options: &NucleiOptions,
    mask: &mut Mask,
) -> RegionResult<()> {
    order.check_grid(grid)?;
    mask.check_grid(grid)?;
    options.validate()?;
    check_ascending(thresholds)?;

    let mut regions = MemberForest::new(grid.len());
    let mut pixels = order.descending().peekable();
    let mut touched = BTreeSet::new();
    let marked_before = mask.count();

    for &threshold in thresholds.iter().rev() {
        touched.clear();

        while let Some(index) = pixels.next_if(|&i| grid.value(i) >= threshold) {
            touched.insert(regions.flood(grid, index));
        }

        // Roots touched early in the batch may have been absorbed since
        let roots: BTreeSet<usize> = touched.iter().map(|&r| regions.forest.find_root(r)).collect();

        let mut painted = 0;
        for root in roots {
            let members = &regions.members[root];
            if options.contains(members.len()) {
                for &p in members {
                    mask.mark(p);
                }
                painted += 1;
            }
        }
        log::trace!("mark_regions: threshold {} painted {} regions", threshold, painted);
    }

    log::debug!(
        "mark_regions: {}x{} {} thresholds size in [{}, {}] -> {} new pixels",
        grid.nx(),
        grid.ny(),
        thresholds.len(),
        options.size_min,
        options.size_max,
        mask.count() - marked_before
    );

    Ok(())
}

/// Run [`mark_regions`] over [`default_thresholds`] into a fresh mask
pub fn nuclei_mask(grid: &Grid, options: &NucleiOptions) -> RegionResult<Mask> {
    let order = IntensityOrder::from_grid(grid);
    let mut mask = Mask::for_grid(grid);
    mark_regions(grid, &order, &default_thresholds(), options, &mut mask)?;
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(grid: &Grid, thresholds: &[f64], options: &NucleiOptions) -> Mask {
        let order = IntensityOrder::from_grid(grid);
        let mut mask = Mask::for_grid(grid);
        mark_regions(grid, &order, thresholds, options, &mut mask).unwrap();
        mask
    }

    fn marked(mask: &Mask) -> Vec<usize> {
        (0..mask.len()).filter(|&i| mask.is_marked(i)).collect()
    }

    #[test]
    fn test_mark_singletons() {
        let grid = Grid::from_rows(&[vec![9.0, 0.0, 8.0, 0.0, 0.0]]).unwrap();
        let mask = mark(&grid, &[5.0], &NucleiOptions::new(1, 1));
        assert_eq!(marked(&mask), vec![0, 2]);
    }

    #[test]
    fn test_mark_window() {
        // A 3-pixel plateau and a 1-pixel peak
        let grid = Grid::from_rows(&[vec![5.0, 5.0, 5.0, 0.0, 7.0]]).unwrap();
        let mask = mark(&grid, &[1.0], &NucleiOptions::new(2, 3));
        assert_eq!(marked(&mask), vec![0, 1, 2]);
    }

    #[test]
    fn test_marks_survive_growth() {
        // At 8.5 the peak is a single pixel; at 0.5 it joins everything
        let grid = Grid::from_rows(&[vec![9.0, 2.0, 2.0, 2.0]]).unwrap();
        let mask = mark(&grid, &[0.5, 8.5], &NucleiOptions::new(1, 1));
        assert_eq!(marked(&mask), vec![0]);
    }

    #[test]
    fn test_merged_component_in_window() {
        // Two singletons bridged at 1.0 form a 3-pixel region
        let grid = Grid::from_rows(&[vec![9.0, 1.0, 8.0, 0.0]]).unwrap();
        let mask = mark(&grid, &[0.5, 5.0], &NucleiOptions::new(3, 3));
        assert_eq!(marked(&mask), vec![0, 1, 2]);
    }

    #[test]
    fn test_only_sets_bits() {
        let grid = Grid::from_rows(&[vec![9.0, 0.0, 0.0]]).unwrap();
        let order = IntensityOrder::from_grid(&grid);
        let mut mask = Mask::for_grid(&grid);
        mask.mark(2);
        mark_regions(&grid, &order, &[5.0], &NucleiOptions::new(1, 1), &mut mask).unwrap();
        assert_eq!(marked(&mask), vec![0, 2]);
    }

    #[test]
    fn test_member_list_splice_order() {
        let grid = Grid::from_rows(&[vec![9.0, 1.0, 8.0, 7.0]]).unwrap();
        let mut regions = MemberForest::new(grid.len());
        for index in [0, 2, 3, 1] {
            regions.flood(&grid, index);
        }
        let root = regions.forest.find_root(0);
        assert_eq!(root, 2);
        // {0} spliced in front of {2, 3, 1}
        assert_eq!(regions.members[root], VecDeque::from(vec![0, 2, 3, 1]));
        assert!(regions.members[0].is_empty());
    }

    #[test]
    fn test_invalid_window() {
        let grid = Grid::new(2, 2).unwrap();
        let order = IntensityOrder::from_grid(&grid);
        let mut mask = Mask::for_grid(&grid);
        assert!(matches!(
            mark_regions(&grid, &order, &[0.5], &NucleiOptions::new(3, 2), &mut mask),
            Err(RegionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_mask_shape_mismatch() {
        let grid = Grid::new(2, 2).unwrap();
        let order = IntensityOrder::from_grid(&grid);
        let mut mask = Mask::new(3, 2).unwrap();
        assert!(matches!(
            mark_regions(&grid, &order, &[0.5], &NucleiOptions::default(), &mut mask),
            Err(RegionError::Core(_))
        ));
    }

    #[test]
    fn test_stale_order_rejected() {
        let grid = Grid::from_rows(&[vec![9.0, 1.0]]).unwrap();
        let stale = IntensityOrder::from_grid(&Grid::from_rows(&[vec![1.0, 9.0]]).unwrap());
        let mut mask = Mask::for_grid(&grid);
        assert!(matches!(
            mark_regions(&grid, &stale, &[5.0], &NucleiOptions::default(), &mut mask),
            Err(RegionError::Core(_))
        ));
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn test_nuclei_mask_default_thresholds() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(1, 1, 0.9).unwrap();
        grid.set(1, 2, 0.8).unwrap();
        grid.set(3, 3, 0.6).unwrap();
        let mask = nuclei_mask(&grid, &NucleiOptions::new(1, 2)).unwrap();
        assert_eq!(marked(&mask), vec![5, 6, 15]);
    }
}

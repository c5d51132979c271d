//! Running minimum/maximum trackers.

use glam::DVec4;
use serde::{Deserialize, Serialize};

use crate::surface::SampleGrid;

/// Outcome of [`Extent::assess`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assessment {
    /// Strictly between the current bounds, or not comparable (NaN). Nothing moved.
    Interior,
    /// Equal to one of the current bounds. Nothing moved.
    OnBound,
    /// The minimum moved.
    NewMin,
    /// The maximum moved (also reported when both bounds move).
    NewMax,
}

impl Assessment {
    #[inline]
    pub fn is_interior(self) -> bool {
        self == Self::Interior
    }
}

/// Running min/max over a scalar stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    min: f64,
    max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Extent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn midpoint(&self) -> f64 {
        (self.max + self.min) / 2.0
    }

    /// True until a value has been assessed.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Fold `value` into the bounds and report what changed.
    pub fn assess(&mut self, value: f64) -> Assessment {
        let mut state = if value == self.min || value == self.max {
            Assessment::OnBound
        } else {
            Assessment::Interior
        };

        if self.min > value {
            self.min = value;
            state = Assessment::NewMin;
        }
        if self.max < value {
            self.max = value;
            state = Assessment::NewMax;
        }

        state
    }
}

impl FromIterator<f64> for Extent {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut extent = Self::default();
        for value in iter {
            extent.assess(value);
        }
        extent
    }
}

/// Independent x, y and z extents of a point set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtentSet {
    pub x: Extent,
    pub y: Extent,
    pub z: Extent,
}

impl ExtentSet {
    /// Recompute all three extents from scratch.
    pub fn set<'a>(&mut self, points: impl IntoIterator<Item = &'a DVec4>) {
        self.x.reset();
        self.y.reset();
        self.z.reset();

        for p in points {
            self.x.assess(p.x);
            self.y.assess(p.y);
            self.z.assess(p.z);
        }
    }

    pub fn from_grid(grid: &SampleGrid) -> Self {
        let mut extents = Self::default();
        extents.set(grid.points());
        extents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn tracks_min_max_range_midpoint() {
        let e: Extent = [5.0, -3.0, 10.0, 0.0].into_iter().collect();
        assert_eq!(e.min(), -3.0);
        assert_eq!(e.max(), 10.0);
        assert_eq!(e.range(), 13.0);
        assert_eq!(e.midpoint(), 3.5);
    }

    #[test]
    fn interior_value_moves_nothing() {
        let mut e: Extent = [1.0, 4.0].into_iter().collect();
        assert_eq!(e.assess(2.5), Assessment::Interior);
        assert_eq!((e.min(), e.max()), (1.0, 4.0));
    }

    #[test]
    fn reports_which_bound_moved() {
        let mut e = Extent::new();
        assert!(e.is_empty());
        assert_eq!(e.assess(2.0), Assessment::NewMax);
        assert_eq!(e.assess(1.0), Assessment::NewMin);
        assert_eq!(e.assess(3.0), Assessment::NewMax);
        assert_eq!(e.assess(3.0), Assessment::OnBound);
        assert_eq!(e.assess(1.0), Assessment::OnBound);
        assert!(!e.assess(1.0).is_interior());
    }

    #[test]
    fn nan_is_interior() {
        let mut e: Extent = [0.0, 1.0].into_iter().collect();
        assert_eq!(e.assess(f64::NAN), Assessment::Interior);
        let mut empty = Extent::new();
        assert_eq!(empty.assess(f64::NAN), Assessment::Interior);
        assert!(empty.is_empty());
    }

    #[test]
    fn set_matches_true_bounds_and_resets() {
        let mut set = ExtentSet::default();
        set.set(&[point(100.0, 100.0, 100.0)]);
        let points = [point(0.0, 2.0, -1.0), point(3.0, -4.0, 5.0), point(1.0, 1.0, 1.0)];
        set.set(&points);
        assert_eq!((set.x.min(), set.x.max()), (0.0, 3.0));
        assert_eq!((set.y.min(), set.y.max()), (-4.0, 2.0));
        assert_eq!((set.z.min(), set.z.max()), (-1.0, 5.0));
    }
}

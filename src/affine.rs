//! Per-target transforms from model space to plot coordinates.
//!
//! All targets share `projection · horizontal · shift`; the `affine.horizontalAxis` option picks
//! which model axis runs across the screen.

use glam::DMat4;

use crate::extent::{Extent, ExtentSet};
use crate::math::{X_UNIT, Y_UNIT, Z_UNIT, direction, from_rows, rotate, scale, to_rad, translate};
use crate::options::Options;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AffineTarget {
    XAxis,
    YAxis,
    ZAxis,
    XyGrid,
    XzGrid,
    YzGrid,
    Surface,
}

impl AffineTarget {
    pub const ALL: [Self; 7] = [
        Self::XAxis,
        Self::YAxis,
        Self::ZAxis,
        Self::XyGrid,
        Self::XzGrid,
        Self::YzGrid,
        Self::Surface,
    ];
}

/// Which model axis is drawn horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAxis {
    X,
    Y,
}

/// A matrix for each [`HorizontalAxis`] case.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Choice {
    case_x: DMat4,
    case_y: DMat4,
}

impl Choice {
    fn new(case_x: DMat4, case_y: DMat4) -> Self {
        Self { case_x, case_y }
    }

    fn pick(&self, horizontal: HorizontalAxis) -> &DMat4 {
        match horizontal {
            HorizontalAxis::X => &self.case_x,
            HorizontalAxis::Y => &self.case_y,
        }
    }
}

#[derive(Debug)]
pub struct AffineManager {
    /// The `affine` section.
    options: Options,
    projection: DMat4,
    horizontal: Choice,
    shift: Choice,
    x_axis: Choice,
    z_axis: Choice,
    xz_grid: Choice,
}

impl AffineManager {
    pub fn new(options: Options) -> Self {
        let (sin, cos) = to_rad(45.0).sin_cos();
        let projection = from_rows([
            [1.0, 0.0, -cos, 0.0],
            [0.0, 1.0, -sin, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let to_side = rotate(-90.0, X_UNIT);

        Self {
            options,
            projection,
            horizontal: Choice::new(to_side, to_side * rotate(-90.0, Z_UNIT)),
            shift: Choice::new(DMat4::IDENTITY, translate(-X_UNIT)),
            x_axis: Choice::new(
                DMat4::IDENTITY,
                translate(Y_UNIT) * scale(1.0, -1.0, 1.0),
            ),
            z_axis: Choice::new(DMat4::IDENTITY, translate(X_UNIT) * rotate(90.0, Z_UNIT)),
            xz_grid: Choice::new(translate(Y_UNIT), DMat4::IDENTITY),
        }
    }

    pub fn horizontal_axis(&self) -> HorizontalAxis {
        if self.options.get("horizontalAxis") != 0 {
            HorizontalAxis::Y
        } else {
            HorizontalAxis::X
        }
    }

    /// Projection, orientation and shift shared by every target.
    pub fn common(&self) -> DMat4 {
        let h = self.horizontal_axis();
        self.projection * *self.horizontal.pick(h) * *self.shift.pick(h)
    }

    /// Matrix for `target`. `extents` only matters for [`AffineTarget::Surface`].
    pub fn get(&self, target: AffineTarget, extents: &ExtentSet) -> DMat4 {
        let h = self.horizontal_axis();
        let common = self.common();

        match target {
            AffineTarget::XAxis => common * *self.x_axis.pick(h),
            AffineTarget::YAxis => common * translate(X_UNIT),
            AffineTarget::ZAxis => common * *self.z_axis.pick(h),
            AffineTarget::XzGrid => common * *self.xz_grid.pick(h),
            AffineTarget::XyGrid | AffineTarget::YzGrid => common,
            AffineTarget::Surface => common * self.normalize(extents) * to_origin(extents),
        }
    }

    /// Scale the surface into the unit box (half height along z).
    fn normalize(&self, extents: &ExtentSet) -> DMat4 {
        scale(
            1.0 / self.scale_range("x", &extents.x),
            1.0 / self.scale_range("y", &extents.y),
            0.5 / self.scale_range("z", &extents.z),
        )
    }

    /// Tracked range of an axis while `<axis>Axis.isFix` is set (the default), otherwise the
    /// section's `maxValue`.
    ///
    /// Falls back to 1 for zero or non-finite ranges.
    pub fn scale_range(&self, axis: &str, extent: &Extent) -> f64 {
        let section = self.options.section(format!("{axis}Axis"));
        let range = if section.flag("isFix") {
            extent.range()
        } else {
            section.get("maxValue") as f64
        };

        if range == 0.0 || !range.is_finite() {
            1.0
        } else {
            range
        }
    }
}

fn to_origin(extents: &ExtentSet) -> DMat4 {
    translate(direction(-extents.x.min(), -extents.y.min(), -extents.z.min()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::DVec4;

    use super::*;
    use crate::math::{point, transform};
    use crate::options::MemoryOptions;
    use crate::surface::parse;

    const C: f64 = std::f64::consts::FRAC_1_SQRT_2;

    fn manager(store: MemoryOptions) -> AffineManager {
        AffineManager::new(Options::new(Arc::new(store), "affine"))
    }


    fn close(a: DVec4, b: DVec4) -> bool {
        (a - b).abs().max_element() < 1e-12
    }

    #[test]
    fn x_horizontal_projection() {
        let m = manager(MemoryOptions::new().with("affine", "horizontalAxis", 0));
        assert_eq!(m.horizontal_axis(), HorizontalAxis::X);

        let p = transform(&m.common(), point(0.3, 0.6, 0.9));
        assert!(close(p, point(0.3 + C * 0.6, 0.9 + C * 0.6, 0.0)));
    }

    #[test]
    fn y_horizontal_projection() {
        let m = manager(MemoryOptions::new());
        assert_eq!(m.horizontal_axis(), HorizontalAxis::Y);

        let (x, y, z) = (0.3, 0.6, 0.9);
        let p = transform(&m.common(), point(x, y, z));
        assert!(close(p, point(y - C * (x - 1.0), z - C * (x - 1.0), 0.0)));
    }

    #[test]
    fn axis_targets_place_axes_on_the_box() {
        let m = manager(MemoryOptions::new().with("affine", "horizontalAxis", 0));
        let none = ExtentSet::default();

        // The y axis runs along x = 1.
        let y_axis = m.get(AffineTarget::YAxis, &none);
        assert!(close(transform(&y_axis, point(0.0, 0.0, 0.0)), point(1.0, 0.0, 0.0)));

        // Grids other than xz use the shared matrix.
        assert_eq!(m.get(AffineTarget::XyGrid, &none), m.common());
        assert_eq!(m.get(AffineTarget::YzGrid, &none), m.common());
        assert_eq!(m.get(AffineTarget::XzGrid, &none), m.common() * translate(Y_UNIT));
    }

    #[test]
    fn surface_fits_the_unit_box() {
        let m = manager(MemoryOptions::new().with("affine", "horizontalAxis", 0));
        let grid = parse("0 1\n2 3\n").unwrap();
        let extents = ExtentSet::from_grid(&grid);
        let surface = m.get(AffineTarget::Surface, &extents);

        // (1, 1, 3) normalizes to (1, 1, 0.5).
        let top = transform(&surface, point(1.0, 1.0, 3.0));
        assert!(close(top, transform(&m.common(), point(1.0, 1.0, 0.5))));
        let bottom = transform(&surface, point(0.0, 0.0, 0.0));
        assert!(close(bottom, point(0.0, 0.0, 0.0)));
    }

    #[test]
    fn cleared_fix_uses_max_value() {
        let m = manager(
            MemoryOptions::new()
                .with("zAxis", "isFix", 0)
                .with("zAxis", "maxValue", 10),
        );
        let extent: Extent = [0.0, 3.0].into_iter().collect();
        assert_eq!(m.scale_range("z", &extent), 10.0);
        assert_eq!(m.scale_range("x", &extent), 3.0);
    }

    #[test]
    fn default_options_scale_by_tracked_range() {
        let m = manager(MemoryOptions::new().with("zAxis", "maxValue", 10));
        let extent: Extent = [-2.0, 5.0].into_iter().collect();
        for axis in ["x", "y", "z"] {
            assert_eq!(m.scale_range(axis, &extent), 7.0);
        }
    }

    #[test]
    fn degenerate_ranges_fall_back_to_one() {
        let m = manager(
            MemoryOptions::new()
                .with("yAxis", "isFix", 0)
                .with("yAxis", "maxValue", 0),
        );
        let flat: Extent = [2.0, 2.0].into_iter().collect();
        assert_eq!(m.scale_range("x", &flat), 1.0);
        assert_eq!(m.scale_range("x", &Extent::new()), 1.0);
        assert_eq!(m.scale_range("y", &flat), 1.0);
    }

    #[test]
    fn every_target_is_finite() {
        let m = manager(MemoryOptions::new());
        let extents = ExtentSet::from_grid(&parse("1 2 3\n4 5 6\n").unwrap());
        for target in AffineTarget::ALL {
            assert!(m.get(target, &extents).is_finite(), "{target:?}");
        }
    }
}

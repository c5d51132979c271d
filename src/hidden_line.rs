//! Scan-line hidden-line removal over one polyline family.
//!
//! Every line end contributes a sweep position along x. Lines are then re-sampled at the sweep
//! positions they span and a sample survives only when it is a new extreme (or ties one) of the
//! running y extent kept for that position. Polylines are processed front to back, so whatever
//! falls inside the silhouette drawn so far is hidden.

use glam::DVec4;
use tracing::debug;

use crate::backend::Backend;
use crate::core::Color;
use crate::extent::Extent;
use crate::math::{X, Y};
use crate::surface::SampleGrid;

/// Sweep axis.
pub const SOURCE: usize = X;
/// Compared axis.
pub const TARGET: usize = Y;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanLine {
    pub position: f64,
    pub extent: Extent,
}

impl ScanLine {
    pub fn new(position: f64) -> Self {
        Self {
            position,
            extent: Extent::new(),
        }
    }
}

/// Something the remover can walk.
pub trait Scannee {
    /// Push every sweep position this contributes.
    fn accept_scanning(&mut self, positions: &mut Vec<f64>);

    /// Re-sample against `scan_lines` starting at `cursor`; returns where the next caller starts.
    fn accept_complementing(&mut self, scan_lines: &mut [ScanLine], cursor: usize) -> usize;

    fn draw(&self, hidden: bool, backend: &mut dyn Backend);
}

/// Segment between two consecutive grid points.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    begin: DVec4,
    end: DVec4,
    delta: f64,
    intercept: f64,
    visible: Vec<DVec4>,
}

impl Line {
    pub fn new(begin: DVec4, end: DVec4) -> Self {
        Self {
            begin,
            end,
            delta: 0.0,
            intercept: 0.0,
            visible: Vec::new(),
        }
    }

    pub fn begin(&self) -> DVec4 {
        self.begin
    }

    pub fn end(&self) -> DVec4 {
        self.end
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Points kept by the last complementing pass.
    pub fn visible(&self) -> &[DVec4] {
        &self.visible
    }

    /// Slope and intercept of the line in the sweep plane.
    ///
    /// A line without extent along the sweep axis gets a non-finite slope.
    fn find_character(&mut self) {
        let (x1, x2) = (self.begin[SOURCE], self.end[SOURCE]);
        let (y1, y2) = (self.begin[TARGET], self.end[TARGET]);

        self.delta = (y2 - y1) / (x2 - x1);
        self.intercept = y1 - self.delta * x1;
    }

    fn f(&self, x: f64) -> f64 {
        self.delta * x + self.intercept
    }

    /// Height at `position`, exact at the end points.
    fn at(&self, position: f64) -> f64 {
        match self.delta.is_finite() {
            true if position == self.begin[SOURCE] => self.begin[TARGET],
            true if position == self.end[SOURCE] => self.end[TARGET],
            _ => self.f(position),
        }
    }

    fn in_range(&self, position: f64) -> bool {
        self.begin[SOURCE] <= position && position <= self.end[SOURCE]
    }
}

impl Scannee for Line {
    fn accept_scanning(&mut self, positions: &mut Vec<f64>) {
        self.find_character();

        positions.push(self.begin[SOURCE]);
        positions.push(self.end[SOURCE]);
    }

    fn accept_complementing(&mut self, scan_lines: &mut [ScanLine], mut cursor: usize) -> usize {
        self.visible.clear();

        while cursor < scan_lines.len() && self.in_range(scan_lines[cursor].position) {
            let scan = &mut scan_lines[cursor];

            let mut point = DVec4::W;
            point[SOURCE] = scan.position;
            point[TARGET] = self.at(scan.position);
            point.z = self.begin[TARGET];

            if !scan.extent.assess(point[TARGET]).is_interior() {
                self.visible.push(point);
            }
            cursor += 1;
        }

        // The next line starts on our end point.
        cursor.saturating_sub(1)
    }

    fn draw(&self, hidden: bool, backend: &mut dyn Backend) {
        if hidden {
            for pair in self.visible.windows(2) {
                backend.line(pair[0], pair[1]);
            }
        } else {
            backend.line(self.begin, self.end);
        }
    }
}

/// Lines joining consecutive points of one grid row or column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    lines: Vec<Line>,
}

impl Polyline {
    pub fn new(points: impl IntoIterator<Item = DVec4>) -> Self {
        let points: Vec<DVec4> = points.into_iter().collect();
        Self {
            lines: points.windows(2).map(|w| Line::new(w[0], w[1])).collect(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn color(hidden: bool) -> Color {
        Color::BLACK.with_a(if hidden { 0.2 } else { 0.7 })
    }
}

impl Scannee for Polyline {
    fn accept_scanning(&mut self, positions: &mut Vec<f64>) {
        for line in &mut self.lines {
            line.accept_scanning(positions);
        }
    }

    fn accept_complementing(&mut self, scan_lines: &mut [ScanLine], _cursor: usize) -> usize {
        let Some(first) = self.lines.first() else {
            return 0;
        };
        let first = first.begin[SOURCE];

        let mut cursor = 0;
        while cursor < scan_lines.len() && scan_lines[cursor].position < first {
            cursor += 1;
        }

        for line in &mut self.lines {
            cursor = line.accept_complementing(scan_lines, cursor);
        }
        cursor
    }

    fn draw(&self, hidden: bool, backend: &mut dyn Backend) {
        if self.is_empty() {
            return;
        }
        backend.set_color(Self::color(hidden));
        for line in &self.lines {
            line.draw(hidden, backend);
        }
    }
}

/// Polylines processed front to back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolylineFamily {
    polylines: Vec<Polyline>,
}

impl PolylineFamily {
    pub fn new(polylines: Vec<Polyline>) -> Self {
        Self { polylines }
    }

    /// One polyline per row, in row order.
    pub fn rows(grid: &SampleGrid) -> Self {
        Self::new(
            (0..grid.rows())
                .map(|j| Polyline::new(grid.row(j).iter().copied()))
                .collect(),
        )
    }

    /// One polyline per column, last column first, each walked by ascending row.
    pub fn reversed_columns(grid: &SampleGrid) -> Self {
        Self::new(
            (0..grid.cols())
                .rev()
                .map(|i| Polyline::new(grid.column(i).copied()))
                .collect(),
        )
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn line_count(&self) -> usize {
        self.polylines.iter().map(|p| p.lines.len()).sum()
    }
}

impl Scannee for PolylineFamily {
    fn accept_scanning(&mut self, positions: &mut Vec<f64>) {
        for polyline in &mut self.polylines {
            polyline.accept_scanning(positions);
        }
    }

    fn accept_complementing(&mut self, scan_lines: &mut [ScanLine], mut cursor: usize) -> usize {
        for polyline in self.polylines.iter_mut().filter(|p| !p.is_empty()) {
            cursor = polyline.accept_complementing(scan_lines, cursor);
        }
        cursor
    }

    fn draw(&self, hidden: bool, backend: &mut dyn Backend) {
        for polyline in &self.polylines {
            polyline.draw(hidden, backend);
        }
    }
}

/// Sorted, duplicate-free sweep set.
pub fn sweep(mut positions: Vec<f64>) -> Vec<ScanLine> {
    positions.sort_by(f64::total_cmp);
    positions.dedup();
    positions.into_iter().map(ScanLine::new).collect()
}

/// One hidden-line pass; the sweep set lives as long as the value returned by [`Self::run`].
#[derive(Debug, Default)]
pub struct HiddenLineRemover {
    scan_lines: Vec<ScanLine>,
}

impl HiddenLineRemover {
    /// Resolve visibility of `target` (when `hidden` is set) and draw it.
    pub fn run(target: &mut dyn Scannee, hidden: bool, backend: &mut dyn Backend) -> Self {
        let mut remover = Self::default();

        if hidden {
            let mut positions = Vec::new();
            target.accept_scanning(&mut positions);
            remover.scan_lines = sweep(positions);
            target.accept_complementing(&mut remover.scan_lines, 0);
            debug!("hidden-line sweep over {} positions", remover.scan_lines.len());
        }

        target.draw(hidden, backend);
        remover
    }

    pub fn scan_lines(&self) -> &[ScanLine] {
        &self.scan_lines
    }
}

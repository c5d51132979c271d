//! The sampled height field: loading, normalization and the polyline families drawn from it.

use std::path::{Path, PathBuf};

use error_stack::{Report, ResultExt};
use glam::{DMat4, DVec4};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::extent::ExtentSet;
use crate::hidden_line::{HiddenLineRemover, PolylineFamily};
use crate::math::{point, transform};
use crate::options::Options;
use crate::{PlotError, Result};

/// Row-major `rows × cols` grid of points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    points: Vec<DVec4>,
}

impl SampleGrid {
    /// Lattice grid: the value at row `j`, column `i` becomes the point `(i, j, value)`.
    ///
    /// Every row must be as wide as the first one.
    pub fn from_values(values: &[Vec<f64>]) -> Result<Self> {
        let cols = values.first().map_or(0, Vec::len);
        let mut points = Vec::with_capacity(values.len() * cols);

        for (j, row) in values.iter().enumerate() {
            if row.len() != cols {
                return Err(Report::new(PlotError::RaggedRow {
                    row: j,
                    expected: cols,
                    found: row.len(),
                }));
            }
            points.extend(
                row.iter()
                    .enumerate()
                    .map(|(i, &z)| point(i as f64, j as f64, z)),
            );
        }

        Ok(Self {
            rows: values.len(),
            cols,
            points,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<DVec4> {
        if row < self.rows && col < self.cols {
            Some(self.points[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn points(&self) -> &[DVec4] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [DVec4] {
        &mut self.points
    }

    pub fn row(&self, row: usize) -> &[DVec4] {
        &self.points[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &DVec4> {
        self.points.iter().skip(col).step_by(self.cols.max(1))
    }

    /// Map every point through `affine` (w forced to 1).
    pub fn transform(&mut self, affine: &DMat4) {
        for p in &mut self.points {
            *p = transform(affine, *p);
        }
    }

    /// Divide each row's z values by the row's sum of |z|; rows summing to 0 are left alone.
    pub fn regularize_rows(&mut self) {
        let cols = self.cols.max(1);
        for row in self.points.chunks_mut(cols) {
            let sum: f64 = row.iter().map(|p| p.z.abs()).sum();
            if sum != 0.0 {
                row.iter_mut().for_each(|p| p.z /= sum);
            }
        }
    }

    /// Column-wise counterpart of [`Self::regularize_rows`].
    pub fn regularize_columns(&mut self) {
        for col in 0..self.cols {
            let sum: f64 = self.column(col).map(|p| p.z.abs()).sum();
            if sum != 0.0 {
                let cols = self.cols;
                self.points
                    .iter_mut()
                    .skip(col)
                    .step_by(cols)
                    .for_each(|p| p.z /= sum);
            }
        }
    }

    /// `z ← log10(z) + 1` for every non-zero z. Zeros stay zero.
    pub fn log_scale(&mut self) {
        for p in &mut self.points {
            if p.z != 0.0 {
                p.z = p.z.log10() + 1.0;
            }
        }
    }
}

/// Parse whitespace-separated rows. Blank lines are skipped.
pub fn parse(text: &str) -> Result<SampleGrid> {
    let mut values = Vec::new();

    for (row, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let parsed = line
            .split_whitespace()
            .enumerate()
            .map(|(column, token)| {
                token.parse::<f64>().map_err(|e| {
                    Report::new(e)
                        .change_context(PlotError::Parse { row, column })
                        .attach(format!("token: {token:?}"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        values.push(parsed);
    }

    if values.is_empty() {
        return Err(Report::new(PlotError::Empty));
    }
    SampleGrid::from_values(&values)
}

/// Read and parse a data file.
pub fn load(path: &Path) -> Result<SampleGrid> {
    let text = std::fs::read_to_string(path)
        .change_context(PlotError::Read)
        .attach(format!("path: {}", path.display()))?;

    parse(&text).attach(format!("path: {}", path.display()))
}

/// Owns the loaded samples and turns them into surface polylines each frame.
#[derive(Debug)]
pub struct SurfaceSampler {
    options: Options,
    source: Option<PathBuf>,
    original: SampleGrid,
    transformed: SampleGrid,
    extents: ExtentSet,
    x_family: PolylineFamily,
    y_family: PolylineFamily,
}

impl SurfaceSampler {
    /// `options` is the `graph` section.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            source: None,
            original: SampleGrid::default(),
            transformed: SampleGrid::default(),
            extents: ExtentSet::default(),
            x_family: PolylineFamily::default(),
            y_family: PolylineFamily::default(),
        }
    }

    /// Load `path`; on failure the current grid is kept.
    pub fn set(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match load(path) {
            Ok(grid) => {
                info!(
                    "loaded {} ({} rows x {} cols)",
                    path.display(),
                    grid.rows(),
                    grid.cols()
                );
                self.source = Some(path.to_path_buf());
                self.set_grid(grid);
                Ok(())
            }
            Err(report) => {
                warn!("keeping previous surface: {report:?}");
                Err(report)
            }
        }
    }

    /// Load the last successfully loaded file again.
    pub fn reload(&mut self) -> Result<()> {
        match self.source.clone() {
            Some(path) => self.set(path),
            None => Ok(()),
        }
    }

    pub fn set_grid(&mut self, grid: SampleGrid) {
        self.original = grid;
        self.transformed = SampleGrid::default();
        self.x_family = PolylineFamily::default();
        self.y_family = PolylineFamily::default();
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn original(&self) -> &SampleGrid {
        &self.original
    }

    pub fn transformed(&self) -> &SampleGrid {
        &self.transformed
    }

    pub fn extents(&self) -> &ExtentSet {
        &self.extents
    }

    pub fn x_family(&self) -> &PolylineFamily {
        &self.x_family
    }

    pub fn y_family(&self) -> &PolylineFamily {
        &self.y_family
    }

    pub fn rows(&self) -> usize {
        self.original.rows()
    }

    pub fn cols(&self) -> usize {
        self.original.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Normalize, transform and draw the surface.
    ///
    /// `affine_for` receives the extents of the normalized grid and returns the surface matrix.
    pub fn draw(&mut self, affine_for: impl FnOnce(&ExtentSet) -> DMat4, backend: &mut dyn Backend) {
        if self.is_empty() {
            return;
        }

        self.transformed = self.original.clone();
        if self.options.flag("isRegularizeX") {
            self.transformed.regularize_rows();
        }
        if self.options.flag("isRegularizeY") {
            self.transformed.regularize_columns();
        }
        if self.options.flag("isLogScale") {
            self.transformed.log_scale();
        }

        self.extents = ExtentSet::from_grid(&self.transformed);
        let affine = affine_for(&self.extents);
        self.transformed.transform(&affine);

        self.x_family = PolylineFamily::rows(&self.transformed);
        self.y_family = PolylineFamily::reversed_columns(&self.transformed);

        let hidden = self.options.flag("isHiddenLine");
        if self.options.flag("isDrawXPolyLines") {
            HiddenLineRemover::run(&mut self.x_family, hidden, backend);
        }
        if self.options.flag("isDrawYPolyLines") {
            HiddenLineRemover::run(&mut self.y_family, hidden, backend);
        }
        debug!(
            "surface drawn: {} x-lines, {} y-lines, hidden={}",
            self.x_family.line_count(),
            self.y_family.line_count(),
            hidden
        );
    }
}

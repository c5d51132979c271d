use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::Result;
use crate::affine::{AffineManager, AffineTarget};
use crate::backend::Backend;
use crate::core::{Color, FrameSetup, Stroke, Viewport};
use crate::extent::ExtentSet;
use crate::options::{OptionStore, Options};
use crate::scene::{AxisChain, AxisId, GridChain};
use crate::surface::SurfaceSampler;

/// Grid alpha.
const GRID_ALPHA: f32 = 0.7;

/// The whole plot: surface, axes, grids and their transforms.
#[derive(Debug)]
pub struct Plotter {
    surface: SurfaceSampler,
    axes: [AxisChain; 3],
    grids: [GridChain; 3],
    affine: AffineManager,
    viewport: Option<Viewport>,
}

impl Plotter {
    pub fn new(store: Arc<dyn OptionStore>) -> Self {
        let graph = Options::new(store, "graph");

        Self {
            axes: AxisId::ALL.map(|id| AxisChain::new(&graph, id)),
            grids: [
                GridChain::new(&graph, AxisId::X, AxisId::Y),
                GridChain::new(&graph, AxisId::X, AxisId::Z),
                GridChain::new(&graph, AxisId::Y, AxisId::Z),
            ],
            affine: AffineManager::new(graph.section("affine")),
            surface: SurfaceSampler::new(graph),
            viewport: None,
        }
    }

    /// Load a data file. On failure the previous surface stays.
    pub fn set(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.surface.set(path)
    }

    /// Load the current data file again.
    pub fn reload(&mut self) -> Result<()> {
        self.surface.reload()
    }

    pub fn surface(&self) -> &SurfaceSampler {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut SurfaceSampler {
        &mut self.surface
    }

    pub fn axes(&self) -> &[AxisChain; 3] {
        &self.axes
    }

    pub fn grids(&self) -> &[GridChain; 3] {
        &self.grids
    }

    pub fn affine(&self) -> &AffineManager {
        &self.affine
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn frame_setup(&self) -> FrameSetup {
        FrameSetup {
            viewport: self.viewport,
            ..FrameSetup::default()
        }
    }

    /// Draw one full frame.
    pub fn draw(&mut self, backend: &mut dyn Backend) {
        backend.begin_frame(&self.frame_setup());
        backend.set_blend(true);

        self.draw_axes(backend);
        self.draw_grids(backend);
        self.draw_surface(backend);

        backend.set_blend(false);
        backend.end_frame();
    }

    /// Fit the viewport to a `width × height` client area and redraw.
    pub fn resize(&mut self, width: u32, height: u32, backend: &mut dyn Backend) {
        let viewport = Viewport::fit(width, height);
        debug!("viewport {viewport:?} for {width}x{height}");
        self.viewport = Some(viewport);
        self.draw(backend);
    }

    fn draw_axes(&self, backend: &mut dyn Backend) {
        let none = ExtentSet::default();
        backend.set_color(Color::BLACK);
        backend.set_stroke(Stroke::Solid);

        for (axis, target) in self
            .axes
            .iter()
            .zip([AffineTarget::XAxis, AffineTarget::YAxis, AffineTarget::ZAxis])
        {
            axis.draw(&self.affine.get(target, &none), backend);
        }
    }

    fn draw_grids(&self, backend: &mut dyn Backend) {
        let none = ExtentSet::default();
        backend.set_color(Color::BLACK.with_a(GRID_ALPHA));

        for (grid, target) in self
            .grids
            .iter()
            .zip([AffineTarget::XyGrid, AffineTarget::XzGrid, AffineTarget::YzGrid])
        {
            grid.draw(&self.axes, &self.affine.get(target, &none), backend);
        }
    }

    fn draw_surface(&mut self, backend: &mut dyn Backend) {
        backend.set_stroke(Stroke::Smooth);
        let affine = &self.affine;
        self.surface
            .draw(|extents| affine.get(AffineTarget::Surface, extents), backend);
        backend.set_stroke(Stroke::Solid);
    }
}

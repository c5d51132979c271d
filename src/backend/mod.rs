//! Rendering backend contract.
//!
//! The engine never rasterizes. It hands already-transformed homogeneous vertex pairs to a
//! [`Backend`], bracketed by color, blend and stroke state changes.

mod recorder;
pub mod svg;

pub use recorder::{Frame, FrameRecorder, Segment};

use glam::{DMat4, DVec4};

use crate::core::{Color, FrameSetup, Stroke};
use crate::math::transform;

pub trait Backend {
    fn begin_frame(&mut self, setup: &FrameSetup);
    fn set_color(&mut self, color: Color);
    fn set_blend(&mut self, enabled: bool);
    fn set_stroke(&mut self, stroke: Stroke);
    /// One segment, endpoints in plot coordinates.
    fn line(&mut self, from: DVec4, to: DVec4);
    fn end_frame(&mut self) {}
}

/// Draw `origin → origin + to` after mapping both ends through `affine`.
pub fn draw_line(backend: &mut dyn Backend, affine: &DMat4, origin: DVec4, to: DVec4) {
    let begin = transform(affine, origin);
    let end = transform(affine, origin + to);
    backend.line(begin, end);
}

/// Draw one segment along `direction` from each of `positions`.
pub fn draw_parallel_lines(
    backend: &mut dyn Backend,
    affine: &DMat4,
    positions: &[DVec4],
    direction: DVec4,
) {
    for &origin in positions {
        draw_line(backend, affine, origin, direction);
    }
}

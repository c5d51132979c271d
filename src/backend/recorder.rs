use glam::DVec4;
use serde::{Deserialize, Serialize};

use super::Backend;
use crate::core::{Color, FrameSetup, Stroke};

/// A segment with the state it was drawn under.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: DVec4,
    pub to: DVec4,
    pub color: Color,
    pub stroke: Stroke,
    pub blend: bool,
}

/// Everything one draw emitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub setup: FrameSetup,
    pub segments: Vec<Segment>,
}

impl Frame {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn with_stroke(&self, stroke: Stroke) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.stroke == stroke)
    }
}

/// Backend that keeps what it is given.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frame: Frame,
    color: Color,
    stroke: Stroke,
    blend: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn take(&mut self) -> Frame {
        std::mem::take(&mut self.frame)
    }
}

impl Backend for FrameRecorder {
    fn begin_frame(&mut self, setup: &FrameSetup) {
        self.frame = Frame {
            setup: *setup,
            segments: Vec::new(),
        };
        self.color = Color::BLACK;
        self.stroke = Stroke::Solid;
        self.blend = false;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_blend(&mut self, enabled: bool) {
        self.blend = enabled;
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    fn line(&mut self, from: DVec4, to: DVec4) {
        self.frame.segments.push(Segment {
            from,
            to,
            color: self.color,
            stroke: self.stroke,
            blend: self.blend,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn segments_carry_current_state() {
        let mut rec = FrameRecorder::new();
        rec.begin_frame(&FrameSetup::default());
        rec.line(point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0));
        rec.set_color(Color::BLACK.with_a(0.7));
        rec.set_stroke(Stroke::GRID);
        rec.set_blend(true);
        rec.line(point(0.0, 1.0, 0.0), point(1.0, 1.0, 0.0));

        let frame = rec.take();
        assert_eq!(frame.segments[0].stroke, Stroke::Solid);
        assert!(!frame.segments[0].blend);
        assert_eq!(frame.segments[1].color.a, 0.7);
        assert_eq!(frame.with_stroke(Stroke::GRID).count(), 1);
        assert!(rec.frame().is_empty());
    }

    #[test]
    fn begin_frame_discards_previous_segments() {
        let mut rec = FrameRecorder::new();
        rec.line(point(0.0, 0.0, 0.0), point(1.0, 0.0, 0.0));
        rec.begin_frame(&FrameSetup::default());
        assert!(rec.frame().is_empty());
    }
}

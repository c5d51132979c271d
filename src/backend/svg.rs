//! SVG export of a recorded [`Frame`].

use core::fmt::Write as _;

use super::{Frame, Segment};
use crate::core::{Color, Stroke, Viewport};

/// Render `frame` on a `width × height` canvas.
///
/// The view bounds are mapped onto the frame's viewport (or the centered square when the frame
/// has none), y pointing up.
pub fn to_svg(frame: &Frame, width: u32, height: u32) -> String {
    let viewport = frame
        .setup
        .viewport
        .unwrap_or_else(|| Viewport::fit(width, height));
    let bounds = frame.setup.bounds;
    let size = f64::from(viewport.size);

    let map = |x: f64, y: f64| -> (f64, f64) {
        let px = f64::from(viewport.x) + (x - bounds.left) / bounds.width() * size;
        let py = f64::from(viewport.y) + (y - bounds.bottom) / bounds.height() * size;
        (px, f64::from(height) - py)
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        svg,
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
        rgb(frame.setup.clear)
    );

    for segment in frame.segments() {
        let (x1, y1) = map(segment.from.x / segment.from.w, segment.from.y / segment.from.w);
        let (x2, y2) = map(segment.to.x / segment.to.w, segment.to.y / segment.to.w);
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            continue;
        }
        let _ = write!(
            svg,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            fmt_f64(x1),
            fmt_f64(y1),
            fmt_f64(x2),
            fmt_f64(y2),
            stroke_attrs(segment)
        );
    }

    svg.push_str("</svg>");
    svg
}

fn stroke_attrs(segment: &Segment) -> String {
    let mut attrs = String::new();
    let _ = write!(attrs, " stroke=\"{}\"", rgb(segment.color));
    let opacity = if segment.blend { segment.color.a } else { 1.0 };
    if opacity < 1.0 {
        let _ = write!(attrs, " stroke-opacity=\"{}\"", fmt_f64(f64::from(opacity)));
    }
    match segment.stroke {
        Stroke::Solid => attrs.push_str(" shape-rendering=\"crispEdges\""),
        Stroke::Smooth => attrs.push_str(" stroke-linecap=\"round\""),
        Stroke::Dashed { pattern, factor } => {
            if let Some(runs) = dash_array(pattern, factor) {
                let runs: Vec<String> = runs.iter().map(u32::to_string).collect();
                let _ = write!(attrs, " stroke-dasharray=\"{}\"", runs.join(" "));
            }
        }
    }
    attrs
}

/// Alternating on/off run lengths of a 16-bit stipple, starting with an "on" run.
///
/// `None` means the pattern is solid.
pub fn dash_array(pattern: u16, factor: u8) -> Option<Vec<u32>> {
    if pattern == u16::MAX {
        return None;
    }
    let factor = u32::from(factor.max(1));
    if pattern == 0 {
        return Some(vec![0, 16 * factor]);
    }

    // Rotate so bit 0 starts an "on" run.
    let start = (0..16)
        .find(|&i| pattern & (1 << i) != 0 && pattern & (1 << ((i + 15) % 16)) == 0)
        .unwrap_or(0);
    let bit = |i: u32| pattern & (1 << ((start + i) % 16)) != 0;

    let mut runs = Vec::new();
    let mut current = true;
    let mut length = 0;
    for i in 0..16 {
        if bit(i) == current {
            length += 1;
        } else {
            runs.push(length * factor);
            current = !current;
            length = 1;
        }
    }
    runs.push(length * factor);

    // Keep one period of repeating patterns such as 0x8888.
    let period = (1..=runs.len() / 2)
        .filter(|p| p % 2 == 0 && runs.len() % p == 0)
        .find(|&p| runs.chunks(p).all(|chunk| chunk == &runs[..p]))
        .unwrap_or(runs.len());
    runs.truncate(period);
    Some(runs)
}

fn rgb(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({},{},{})", channel(c.r), channel(c.g), channel(c.b))
}

fn fmt_f64(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

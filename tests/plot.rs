use std::path::PathBuf;
use std::sync::Arc;

use glam::DVec4;

use wireplot::backend::svg::to_svg;
use wireplot::prelude::*;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wireplot-it-{}-{name}", std::process::id()))
}

fn plain() -> MemoryOptions {
    MemoryOptions::new()
        .with("graph", "isRegularizeX", 0)
        .with("graph", "isRegularizeY", 0)
        .with("graph", "isLogScale", 0)
}

#[test]
fn two_by_two_surface_in_a_wide_window() {
    let data = scratch("two-by-two.txt");
    std::fs::write(&data, "0 1\n2 3\n").unwrap();

    let mut plotter = Plotter::new(Arc::new(plain().with("graph", "isHiddenLine", 0)));
    plotter.set(&data).unwrap();
    assert_eq!((plotter.surface().rows(), plotter.surface().cols()), (2, 2));

    let mut rec = FrameRecorder::new();
    plotter.resize(800, 600, &mut rec);
    let frame = rec.take();

    assert_eq!(frame.setup.viewport, Some(Viewport { x: 100, y: 0, size: 600 }));
    // Two rows and two columns of one segment each.
    assert_eq!(frame.with_stroke(Stroke::Smooth).count(), 4);
    assert_eq!(frame.with_stroke(Stroke::Solid).count(), 9);

    let extents = plotter.surface().extents();
    assert_eq!((extents.z.min(), extents.z.max()), (0.0, 3.0));

    std::fs::remove_file(&data).unwrap();
}

#[test]
fn hidden_segments_lie_on_grid_lines() {
    let data = scratch("ridge.txt");
    std::fs::write(&data, "0 0 0 0\n0 4 4 0\n0 1 1 0\n0 0 0 0\n").unwrap();

    let mut bypass = Plotter::new(Arc::new(plain().with("graph", "isHiddenLine", 0)));
    bypass.set(&data).unwrap();
    let mut rec = FrameRecorder::new();
    bypass.draw(&mut rec);
    let bypass_frame = rec.take();
    let grid: Vec<&Segment> = bypass_frame.with_stroke(Stroke::Smooth).collect();
    assert_eq!(grid.len(), 24);

    let mut hidden = Plotter::new(Arc::new(plain()));
    hidden.set(&data).unwrap();
    hidden.draw(&mut rec);
    let frame = rec.take();
    let kept: Vec<&Segment> = frame.with_stroke(Stroke::Smooth).collect();
    assert!(!kept.is_empty());

    let on = |s: &Segment, p: DVec4| {
        let (a, b) = (s.from, s.to);
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        cross.abs() < 1e-9 && a.x.min(b.x) - 1e-9 <= p.x && p.x <= a.x.max(b.x) + 1e-9
    };
    for piece in &kept {
        assert!(
            grid.iter().any(|s| on(s, piece.from) && on(s, piece.to)),
            "{piece:?}"
        );
    }

    std::fs::remove_file(&data).unwrap();
}

#[test]
fn failed_load_keeps_the_previous_surface() {
    let data = scratch("keep.txt");
    std::fs::write(&data, "1 2 3\n4 5 6\n").unwrap();

    let mut plotter = Plotter::new(Arc::new(plain()));
    plotter.set(&data).unwrap();

    let err = plotter.set(scratch("missing.txt")).unwrap_err();
    assert_eq!(*err.current_context(), PlotError::Read);
    assert_eq!(plotter.surface().rows(), 2);
    assert_eq!(plotter.surface().source(), Some(data.as_path()));

    std::fs::write(&data, "1 2 3\n4 x 6\n").unwrap();
    let err = plotter.reload().unwrap_err();
    assert_eq!(*err.current_context(), PlotError::Parse { row: 1, column: 1 });
    assert_eq!(plotter.surface().original().get(1, 1).map(|p| p.z), Some(5.0));

    std::fs::remove_file(&data).unwrap();
}

#[test]
fn extent_tracks_assessed_values() {
    let extent: Extent = [5.0, -3.0, 10.0, 0.0].into_iter().collect();
    assert_eq!(extent.min(), -3.0);
    assert_eq!(extent.max(), 10.0);
    assert_eq!(extent.range(), 13.0);
    assert_eq!(extent.midpoint(), 3.5);
}

#[test]
fn log_scale_shifts_by_one_decade() {
    let data = scratch("log.txt");
    std::fs::write(&data, "1 10\n100 0\n").unwrap();

    let mut plotter = Plotter::new(Arc::new(plain().with("graph", "isLogScale", 1)));
    plotter.set(&data).unwrap();
    plotter.draw(&mut FrameRecorder::new());

    let extents = plotter.surface().extents();
    assert_eq!(extents.z.min(), 0.0);
    assert!((extents.z.max() - 3.0).abs() < 1e-12);

    std::fs::remove_file(&data).unwrap();
}

#[test]
fn svg_holds_one_line_per_segment() {
    let data = scratch("svg.txt");
    std::fs::write(&data, "0 1 0\n1 2 1\n0 1 0\n").unwrap();

    let mut plotter = Plotter::new(Arc::new(plain()));
    plotter.set(&data).unwrap();
    let mut rec = FrameRecorder::new();
    plotter.resize(640, 480, &mut rec);
    let frame = rec.take();

    let svg = to_svg(&frame, 640, 480);
    assert_eq!(svg.matches("<line ").count(), frame.segments().len());
    assert!(svg.contains("stroke-dasharray=\"1 3\""));

    let json = serde_json::to_string(&frame).unwrap();
    let back: Frame = serde_json::from_str(&json).unwrap();
    assert_eq!(back.segments().len(), frame.segments().len());

    std::fs::remove_file(&data).unwrap();
}

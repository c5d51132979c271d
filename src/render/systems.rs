use bevy::prelude::*;
use bevy::window::{FileDragAndDrop, PrimaryWindow};
use bevy_camera::{OrthographicProjection, Projection, ScalingMode, Viewport};
use bevy_math::UVec2;

use super::*;
use crate::backend::Segment;
use crate::core::{Stroke, ViewBounds, Viewport as PlotViewport};

/// Spawn the camera that maps plot coordinates onto the square viewport.
pub fn setup_plot_camera(mut commands: Commands) {
    let bounds = ViewBounds::PLOT;
    let (cx, cy) = bounds.center();

    let mut ortho = OrthographicProjection::default_2d();
    ortho.scaling_mode = ScalingMode::Fixed {
        width: bounds.width() as f32,
        height: bounds.height() as f32,
    };

    commands.spawn((
        PlotCamera,
        Camera2d::default(),
        Camera::default(),
        Projection::from(ortho),
        Transform::from_xyz(cx as f32, cy as f32, 0.0),
    ));
}

pub fn configure_gizmos(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<GridGizmos>();
    config.line.style = GizmoLineStyle::Dashed {
        gap_scale: 3.0,
        line_scale: 1.0,
    };
    config.line.width = 1.0;

    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = 1.5;
}

/// Refit the viewport whenever the window's physical size changes.
pub fn fit_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut plotter: ResMut<PlotterRes>,
    mut cameras: Query<&mut Camera, With<PlotCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = UVec2::new(window.physical_width(), window.physical_height());
    if size.x == 0 || size.y == 0 || !plotter.resize(size) {
        return;
    }

    if let Some(viewport) = plotter.frame.setup.viewport {
        for mut camera in cameras.iter_mut() {
            camera.viewport = Some(camera_viewport(viewport));
        }
    }
}

pub fn handle_file_drop(mut drops: MessageReader<FileDragAndDrop>, mut plotter: ResMut<PlotterRes>) {
    for event in drops.read() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            plotter.open(path_buf.clone());
        }
    }
}

/// `R` reloads the data file, `O` re-reads the options.
pub fn handle_keys(keys: Res<ButtonInput<KeyCode>>, mut plotter: ResMut<PlotterRes>) {
    if keys.just_pressed(KeyCode::KeyR) {
        plotter.reload();
    }
    if keys.just_pressed(KeyCode::KeyO) {
        plotter.dirty = true;
    }
}

pub fn poll_option_file(
    time: Res<Time>,
    mut watch: ResMut<OptionWatch>,
    mut plotter: ResMut<PlotterRes>,
) {
    if !watch.timer.tick(time.delta()).just_finished() {
        return;
    }
    if watch.check() {
        debug!("options changed");
        plotter.dirty = true;
    }
}

pub fn redraw_dirty(mut plotter: ResMut<PlotterRes>) {
    if plotter.dirty {
        plotter.redraw();
        debug!("redrew {} segments", plotter.frame.segments().len());
    }
}

/// Repaint: draw the recorded frame again.
pub fn replay_frame(
    plotter: Res<PlotterRes>,
    mut gizmos: Gizmos,
    mut grid_gizmos: Gizmos<GridGizmos>,
) {
    for segment in plotter.frame.segments() {
        let (from, to) = segment_ends(segment);
        let color = segment_color(segment);
        match segment.stroke {
            Stroke::Dashed { .. } => grid_gizmos.line_2d(from, to, color),
            Stroke::Solid | Stroke::Smooth => gizmos.line_2d(from, to, color),
        }
    }
}

pub fn camera_viewport(viewport: PlotViewport) -> Viewport {
    Viewport {
        physical_position: UVec2::new(viewport.x, viewport.y),
        physical_size: UVec2::splat(viewport.size.max(1)),
        ..default()
    }
}

/// Segment ends in plot coordinates.
pub fn segment_ends(segment: &Segment) -> (Vec2, Vec2) {
    let flat = |p: glam::DVec4| Vec2::new((p.x / p.w) as f32, (p.y / p.w) as f32);
    (flat(segment.from), flat(segment.to))
}

/// Colors are opaque unless the segment was drawn with blending on.
pub fn segment_color(segment: &Segment) -> Color {
    let color = if segment.blend {
        segment.color
    } else {
        segment.color.with_a(1.0)
    };
    color.into()
}

use bevy::prelude::*;

/// The camera looking at the plot coordinates.
#[derive(Component)]
pub struct PlotCamera;

/// Dashed lines (grids).
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmos;

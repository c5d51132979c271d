//! Bevy viewer: keeps a [`Plotter`](crate::plotter::Plotter) in a resource, redraws it into a
//! recorded frame when something changed and replays that frame with gizmos.

pub mod components;
pub mod resources;
pub mod systems;

pub use components::*;
pub use resources::*;
use systems::*;

use bevy::prelude::*;

#[derive(Default)]
pub struct PlotViewerPlugin;

impl Plugin for PlotViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<GridGizmos>()
            .init_resource::<OptionWatch>()
            .add_systems(Startup, (setup_plot_camera, configure_gizmos))
            .add_systems(
                Update,
                (
                    fit_viewport,
                    handle_file_drop,
                    handle_keys,
                    poll_option_file,
                    redraw_dirty,
                    replay_frame,
                )
                    .chain(),
            );
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::options::JsonOptionFile;
use crate::plotter::Plotter;
use crate::render::{OptionWatch, PlotViewerPlugin, PlotterRes};

pub use bevy::app::AppExit;

/// Everything the windowed viewer needs to start.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// JSON options file, watched for edits.
    pub options: PathBuf,
    /// Data file opened at start-up.
    pub data: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "3D Graph".to_owned(),
            width: 640,
            height: 480,
            options: PathBuf::from("option.json"),
            data: None,
        }
    }
}

impl ViewerConfig {
    /// Plotter reading options from [`Self::options`], with the start-up file loaded if any.
    pub fn plotter(&self) -> PlotterRes {
        let mut res = PlotterRes::new(Plotter::new(Arc::new(JsonOptionFile::new(&self.options))));
        if let Some(path) = &self.data {
            res.open(path.clone());
        }
        res
    }
}

/// Open the viewer window and block until it closes.
pub fn run_viewer(config: ViewerConfig) -> AppExit {
    let bg = crate::core::Color::WHITE;
    App::new()
        .insert_resource(ClearColor(bg.into()))
        .insert_resource(config.plotter())
        .insert_resource(OptionWatch::new(&config.options))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.title.clone(),
                    resolution: WindowResolution::new(config.width, config.height),
                    ..default()
                }),
                ..default()
            }),
            PlotViewerPlugin,
        ))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_classic_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.title, "3D Graph");
        assert_eq!((config.width, config.height), (640, 480));
    }

    #[test]
    fn start_up_file_failure_leaves_empty_plot() {
        let config = ViewerConfig {
            data: Some(PathBuf::from("/nonexistent/wireplot.txt")),
            ..ViewerConfig::default()
        };
        let res = config.plotter();
        assert!(res.plotter.surface().is_empty());
        assert!(res.dirty);
    }
}

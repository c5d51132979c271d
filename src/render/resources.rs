use std::path::PathBuf;
use std::time::SystemTime;

use bevy::prelude::*;
use bevy_math::UVec2;
use tracing::warn;

use crate::backend::{Frame, FrameRecorder};
use crate::plotter::Plotter;

/// Seconds between option file checks.
pub const OPTION_POLL_SECS: f32 = 0.5;

/// The plotter and the last frame it drew.
#[derive(Resource)]
pub struct PlotterRes {
    pub plotter: Plotter,
    pub frame: Frame,
    /// Redraw before the next replay.
    pub dirty: bool,
    /// Physical window size the viewport was last fitted to.
    pub window_size: Option<UVec2>,
}

impl PlotterRes {
    pub fn new(plotter: Plotter) -> Self {
        Self {
            plotter,
            frame: Frame::default(),
            dirty: true,
            window_size: None,
        }
    }

    /// Load `path` and schedule a redraw; the previous surface stays on failure.
    pub fn open(&mut self, path: PathBuf) {
        if let Err(report) = self.plotter.set(&path) {
            warn!("could not open {}: {report:?}", path.display());
        }
        self.dirty = true;
    }

    pub fn reload(&mut self) {
        if let Err(report) = self.plotter.reload() {
            warn!("reload failed: {report:?}");
        }
        self.dirty = true;
    }

    /// Fit the viewport to a new window size; `true` if it changed.
    pub fn resize(&mut self, size: UVec2) -> bool {
        if self.window_size == Some(size) {
            return false;
        }
        self.window_size = Some(size);

        let mut recorder = FrameRecorder::new();
        self.plotter.resize(size.x, size.y, &mut recorder);
        self.frame = recorder.take();
        self.dirty = false;
        true
    }

    pub fn redraw(&mut self) {
        let mut recorder = FrameRecorder::new();
        self.plotter.draw(&mut recorder);
        self.frame = recorder.take();
        self.dirty = false;
    }
}

/// Watches the option file for edits.
#[derive(Resource)]
pub struct OptionWatch {
    pub path: Option<PathBuf>,
    pub modified: Option<SystemTime>,
    pub timer: Timer,
}

impl Default for OptionWatch {
    fn default() -> Self {
        Self {
            path: None,
            modified: None,
            timer: Timer::from_seconds(OPTION_POLL_SECS, TimerMode::Repeating),
        }
    }
}

impl OptionWatch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            modified: modified(&path),
            path: Some(path),
            ..default()
        }
    }

    /// Record the file's current mtime; `true` if it differs from the last one seen.
    pub fn check(&mut self) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        let now = modified(path);
        if now == self.modified {
            return false;
        }
        self.modified = now;
        true
    }
}

fn modified(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

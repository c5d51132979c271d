//! Command-line configuration

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use wireplot::runtime::ViewerConfig;

/// Axonometric 3-D line plots with hidden-line removal
#[derive(Parser, Clone, Debug)]
#[command(name = "wireplot")]
#[command(about = "Plot a grid of samples as a 3-D wireframe")]
pub struct Config {
    /// Data file: one row per line, whitespace-separated numbers
    pub data: Option<PathBuf>,

    /// JSON options file (sections of integer keys)
    #[arg(long, default_value = "option.json")]
    pub options: PathBuf,

    /// Window or canvas width in pixels
    #[arg(long, default_value = "640")]
    pub width: u32,

    /// Window or canvas height in pixels
    #[arg(long, default_value = "480")]
    pub height: u32,

    /// Render one frame without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Output file for --headless (stdout when absent)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format for --headless
    #[arg(long, value_enum, default_value = "svg")]
    pub format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Svg,
}

impl Config {
    pub fn viewer(&self) -> ViewerConfig {
        ViewerConfig {
            width: self.width,
            height: self.height,
            options: self.options.clone(),
            data: self.data.clone(),
            ..ViewerConfig::default()
        }
    }
}

//! wireplot command line
//!
//! Opens the plot viewer, or renders a single frame to SVG or JSON with `--headless`.

mod config;
mod error;
mod headless;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wireplot::runtime::{AppExit, run_viewer};

use crate::config::Config;
use crate::error::{CliError, FatalError};

fn main() -> ExitCode {
    let config = Config::parse();

    let outcome = if config.headless {
        // The viewer installs its own subscriber through Bevy's log plugin.
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "wireplot=info,wireplot_cli=info".into()),
            )
            .init();
        headless::run(&config).map_err(anyhow::Error::from)
    } else {
        viewer(&config)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let fatal = FatalError::from(err);
            eprintln!("{fatal}");
            ExitCode::FAILURE
        }
    }
}

fn viewer(config: &Config) -> anyhow::Result<()> {
    match run_viewer(config.viewer()) {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(CliError::Viewer(code.get()).into()),
    }
}

//! Error types for the command line

use std::path::PathBuf;

use error_stack::Report;
use thiserror::Error;
use wireplot::PlotError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("no data file given")]
    MissingData,

    #[error("could not load {}: {report}", .path.display())]
    Load {
        path: PathBuf,
        report: Report<PlotError>,
    },

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("viewer exited with code {0}")]
    Viewer(u8),
}

impl CliError {
    /// Label shown in front of the cause of a fatal error.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::MissingData => "usage",
            CliError::Load { .. } => "file",
            CliError::Output(_) | CliError::Serialization(_) => "output",
            CliError::Viewer(_) => "window",
        }
    }
}

/// Unrecoverable failure, reported as one line before exiting.
#[derive(Error, Debug)]
#[error("Error : {category}  --  {cause}")]
pub struct FatalError {
    pub category: &'static str,
    pub cause: String,
}

impl From<anyhow::Error> for FatalError {
    fn from(err: anyhow::Error) -> Self {
        let category = err
            .downcast_ref::<CliError>()
            .map_or("startup", CliError::category);
        Self {
            category,
            cause: format!("{err:#}"),
        }
    }
}

pub mod affine;
pub mod backend;
pub mod core;
pub mod extent;
pub mod hidden_line;
pub mod math;
pub mod options;
pub mod plotter;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod surface;

use std::fmt;

/// Why a data file could not become a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// The file could not be opened or read.
    Read,
    /// No non-blank rows.
    Empty,
    /// A token is not a number.
    Parse { row: usize, column: usize },
    /// A row is wider or narrower than the first one.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "could not read plot file"),
            Self::Empty => write!(f, "plot file holds no rows"),
            Self::Parse { row, column } => {
                write!(f, "value at row {row}, column {column} is not a number")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} values, expected {expected}"),
        }
    }
}

impl std::error::Error for PlotError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<PlotError>>;

pub mod prelude {
    pub use crate::affine::*;
    pub use crate::backend::*;
    pub use crate::core::*;
    pub use crate::extent::*;
    pub use crate::options::*;
    pub use crate::plotter::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::surface::*;
    pub use crate::{PlotError, Result};
}

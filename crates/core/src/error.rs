//! Error type shared by the grid and piece APIs.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A column, row or placement falls outside the physical limits.
    #[error("{what} {index} is out of bounds (limit {limit})")]
    OutOfBounds {
        what: &'static str,
        index: i64,
        limit: usize,
    },

    #[error("shape `{0}` not recognised")]
    UnrecognizedShape(String),

    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),

    /// Cells hold 0 or a shape color (1-7).
    #[error("invalid cell color {0}")]
    InvalidColor(u8),
}

impl GridError {
    pub(crate) fn out_of_bounds(what: &'static str, index: impl TryInto<i64>, limit: usize) -> Self {
        Self::OutOfBounds {
            what,
            index: index.try_into().unwrap_or(i64::MAX),
            limit,
        }
    }
}

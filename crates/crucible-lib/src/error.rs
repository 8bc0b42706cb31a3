use thiserror::Error;

use crate::grid::Position;

/// Convenient result alias for the crucible library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when grid text is empty, ragged, or contains a non-digit.
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// Raised when run-length bounds are zero or inverted.
    #[error("invalid run constraints: min_run={min_run}, max_run={max_run} (require 1 <= min_run <= max_run)")]
    Configuration { min_run: u32, max_run: u32 },

    /// Raised when a position falls outside the grid.
    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    /// Raised when a search exhausts every legal state without reaching the target.
    #[error("no legal path from {start} to {target}")]
    UnreachableTarget { start: Position, target: Position },

    /// Raised when a lower-bound table built for one target is used to search for another.
    #[error("lower-bound table was built for target {table_target}, not {target}")]
    BoundsTargetMismatch {
        table_target: Position,
        target: Position,
    },

    /// Raised when the two search engines disagree on the optimal cost.
    #[error("search engines disagree: {primary_engine} found {primary}, {secondary_engine} found {secondary}")]
    EngineMismatch {
        primary_engine: String,
        primary: u32,
        secondary_engine: String,
        secondary: u32,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Self {
        Error::InvalidGrid {
            reason: reason.into(),
        }
    }
}

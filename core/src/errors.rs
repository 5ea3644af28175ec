//! Error types for genuine misuse of the occupancy and spawn surfaces.

use thiserror::Error;

use crate::{CellCoord, Occupant};

/// Raised when a placement targets a cell that already holds an occupant.
///
/// Callers are expected to consult the occupancy index first, so this always
/// indicates a logic error on the caller's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cell ({}, {}) is already occupied by {occupant:?}", .cell.column(), .cell.row())]
pub struct OccupiedCellError {
    /// Cell the caller attempted to fill.
    pub cell: CellCoord,
    /// Occupant already stored in the cell.
    pub occupant: Occupant,
}

/// Failures reported by occupancy index mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OccupancyError {
    /// The target cell already holds an occupant.
    #[error(transparent)]
    Occupied(#[from] OccupiedCellError),
    /// The target cell lies outside the grid.
    #[error("cell ({}, {}) lies outside the grid", .cell.column(), .cell.row())]
    OutOfRange {
        /// Cell that failed the bounds check.
        cell: CellCoord,
    },
}

/// Raised when no candidate cell can host a new entity.
///
/// This is recoverable: the caller skips the attempt and retries on a later tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("none of the {candidates} candidate cells can host a new entity")]
pub struct NoValidSpawnError {
    /// Number of candidates that were examined and rejected.
    pub candidates: usize,
}

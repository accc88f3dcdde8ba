//! Error types for gameplay rejections and board construction.
//!
//! None of these are fatal: a rejected split leaves the board exactly as it was.

use thiserror::Error;

use crate::types::{CellPos, Frame, SplitAxis, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("no tile at index {index} (board has {len} tiles)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no tile with id {id}")]
    UnknownTile { id: TileId },
    #[error("tile {frame} is a point block and cannot be split")]
    NotSplittable { frame: Frame },
    #[error("tile {frame} is too small to split {}", .axis.as_str())]
    TooSmall { frame: Frame, axis: SplitAxis },
}

impl SplitError {
    pub fn code(self) -> &'static str {
        match self {
            SplitError::IndexOutOfRange { .. } => "index_out_of_range",
            SplitError::UnknownTile { .. } => "unknown_tile",
            SplitError::NotSplittable { .. } => "not_splittable",
            SplitError::TooSmall { .. } => "too_small",
        }
    }
}

/// Rejections from [`Board::from_tiles`](crate::Board::from_tiles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("tile {frame} has an empty dimension")]
    DegenerateFrame { frame: Frame },
    #[error("tile {frame} extends past the grid")]
    OutOfGrid { frame: Frame },
    #[error("tile {frame} overlaps another tile at ({}, {})", .cell.0, .cell.1)]
    Overlap { frame: Frame, cell: CellPos },
    #[error("point block {frame} has no countdown left")]
    ZeroCountdown { frame: Frame },
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::DegenerateFrame { .. } => "degenerate_frame",
            BoardError::OutOfGrid { .. } => "out_of_grid",
            BoardError::Overlap { .. } => "overlap",
            BoardError::ZeroCountdown { .. } => "zero_countdown",
        }
    }
}

/// A broken board invariant, reported by [`Board::check_invariants`](crate::Board::check_invariants).
///
/// Seeing one of these means the engine has a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("tile {id} at {frame} does not fit the grid")]
    TileOutsideGrid { id: TileId, frame: Frame },
    #[error("tiles overlap at ({}, {})", .cell.0, .cell.1)]
    Overlap { cell: CellPos },
    #[error("occupancy cache disagrees with the tiles at ({}, {})", .cell.0, .cell.1)]
    StaleOccupancy { cell: CellPos },
    #[error("tile areas ({area}) plus empty cells ({empty}) do not cover the grid")]
    AreaMismatch { area: usize, empty: usize },
    #[error("point-block view does not match the point-block tiles")]
    PointBlockViewMismatch,
    #[error("point block {id} has no countdown left")]
    ExhaustedPointBlock { id: TileId },
    #[error("tile {id} was left mid-fall")]
    DanglingFallOrigin { id: TileId },
    #[error("tile id {id} is used twice")]
    DuplicateId { id: TileId },
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::core::{Board, SplitError, SplitReport};

/// A tile position in the board's collection at the moment a move is applied.
///
/// Negative indices in move lists count from the end: `-1` is the last tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileRef {
    Index(usize),
    /// 1-based distance from the end
    FromEnd(usize),
}

impl TileRef {
    /// Concrete index for a collection of `len` tiles
    pub fn resolve(self, len: usize) -> Option<usize> {
        match self {
            TileRef::Index(i) if i < len => Some(i),
            TileRef::FromEnd(n) if n >= 1 && n <= len => Some(len - n),
            _ => None,
        }
    }

    pub const fn from_signed(value: i64) -> Self {
        if value < 0 {
            TileRef::FromEnd(value.unsigned_abs() as usize)
        } else {
            TileRef::Index(value as usize)
        }
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileRef::Index(i) => write!(f, "{i}"),
            TileRef::FromEnd(n) => write!(f, "-{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tile reference {input:?}: expected an integer index")]
pub struct ParseTileRefError {
    pub input: String,
}

impl FromStr for TileRef {
    type Err = ParseTileRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(TileRef::from_signed)
            .map_err(|_| ParseTileRefError {
                input: s.to_string(),
            })
    }
}

/// Parse a move list such as `"0, 1, -4 -5"` (commas and/or whitespace)
pub fn parse_moves(input: &str) -> Result<Vec<TileRef>, ParseTileRefError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// The move list played by the reference SPL-T session
pub const DEMO_MOVES: [TileRef; 19] = [
    TileRef::Index(0),
    TileRef::Index(1),
    TileRef::Index(2),
    TileRef::Index(3),
    TileRef::Index(4),
    TileRef::Index(5),
    TileRef::Index(6),
    TileRef::FromEnd(4),
    TileRef::FromEnd(5),
    TileRef::FromEnd(8),
    TileRef::FromEnd(6),
    TileRef::Index(0),
    TileRef::Index(4),
    TileRef::Index(0),
    TileRef::FromEnd(1),
    TileRef::FromEnd(6),
    TileRef::FromEnd(1),
    TileRef::FromEnd(1),
    TileRef::FromEnd(1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("tile reference {tile_ref} does not name a tile (board has {len} tiles)")]
    Unresolved { tile_ref: TileRef, len: usize },
    #[error(transparent)]
    Split(#[from] SplitError),
}

impl ReplayError {
    pub fn code(self) -> &'static str {
        match self {
            ReplayError::Unresolved { .. } => "unresolved_ref",
            ReplayError::Split(err) => err.code(),
        }
    }
}

/// One applied move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub tile_ref: TileRef,
    /// Index the reference resolved to, if it resolved
    pub index: Option<usize>,
    pub outcome: Result<SplitReport, ReplayError>,
}

impl ReplayStep {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Apply a single move
pub fn apply_move(board: &mut Board, tile_ref: TileRef) -> ReplayStep {
    let len = board.tile_count();
    let index = tile_ref.resolve(len);
    let outcome = match index {
        Some(i) => board.split(i).map_err(ReplayError::from),
        None => Err(ReplayError::Unresolved { tile_ref, len }),
    };
    if let Err(err) = &outcome {
        debug!(%tile_ref, code = err.code(), "move rejected");
    }
    ReplayStep {
        tile_ref,
        index,
        outcome,
    }
}

/// Apply every move in order. Rejected moves are recorded and skipped.
pub fn replay(board: &mut Board, moves: &[TileRef]) -> Vec<ReplayStep> {
    moves.iter().map(|&m| apply_move(board, m)).collect()
}

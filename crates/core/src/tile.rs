//! Tile module - a single rectangle on the grid
//!
//! A tile owns its geometry and its falling behavior. Splitting is mediated by the
//! board because it replaces one tile with two in the collection.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::occupancy::OccupancyGrid;
use crate::types::{CellPos, Frame, TileId};

/// What a tile is.
///
/// Point blocks carry their remaining countdown; standard tiles carry nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileKind {
    Standard,
    PointBlock { countdown: u32 },
}

impl TileKind {
    pub fn is_standard(&self) -> bool {
        matches!(self, TileKind::Standard)
    }

    pub fn is_point_block(&self) -> bool {
        matches!(self, TileKind::PointBlock { .. })
    }

    /// Remaining countdown of a point block
    pub fn countdown(&self) -> Option<u32> {
        match self {
            TileKind::Standard => None,
            TileKind::PointBlock { countdown } => Some(*countdown),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Standard => "standard",
            TileKind::PointBlock { .. } => "point_block",
        }
    }
}

/// Result of [`Tile::fall`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The tile was blocked before moving
    Stayed,
    /// The tile dropped `rows` rows from `from` and is now resting
    Landed { from: Frame, rows: u8 },
}

impl FallOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, FallOutcome::Landed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    frame: Frame,
    kind: TileKind,
    /// Frame held before the current chain of falls began
    fall_origin: Option<Frame>,
}

impl Tile {
    /// Create a standard tile
    pub fn new(id: TileId, frame: Frame) -> Self {
        Self::with_kind(id, frame, TileKind::Standard)
    }

    pub fn with_kind(id: TileId, frame: Frame, kind: TileKind) -> Self {
        Self {
            id,
            frame,
            kind,
            fall_origin: None,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn countdown(&self) -> Option<u32> {
        self.kind.countdown()
    }

    pub fn is_splittable(&self) -> bool {
        self.kind.is_standard()
    }

    /// Set while a fall is in progress; always `None` between board operations
    pub fn fall_origin(&self) -> Option<Frame> {
        self.fall_origin
    }

    /// Cells covered by the tile, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellPos> {
        self.frame.cells()
    }

    /// Drop the tile one row at a time while the row beneath its footprint is empty.
    ///
    /// `grid` must already contain this tile; it is updated at every step so
    /// tiles falling later in the same pass see the vacated cells. A point block
    /// that moved loses one countdown when it lands.
    pub fn fall(&mut self, grid: &mut OccupancyGrid) -> FallOutcome {
        let mut rows = 0u8;
        while grid.is_clear_below(self.frame) {
            if self.fall_origin.is_none() {
                self.fall_origin = Some(self.frame);
            }
            let next = self.frame.shifted_down();
            grid.vacate(self.frame, self.id);
            let placed = grid.occupy(next, self.id);
            debug_assert!(placed.is_ok(), "tile {} fell into an occupied cell", self.id);
            self.frame = next;
            rows += 1;
        }

        match self.fall_origin.take() {
            Some(from) => {
                if let TileKind::PointBlock { countdown } = &mut self.kind {
                    *countdown = countdown.saturating_sub(1);
                }
                trace!(tile = %self.id, %from, to = %self.frame, rows, "tile landed");
                FallOutcome::Landed { from, rows }
            }
            None => FallOutcome::Stayed,
        }
    }

    /// Turn a standard tile into a point block. No-op on point blocks.
    pub(crate) fn convert_to_point_block(&mut self, countdown: u32) -> bool {
        if !self.kind.is_standard() {
            return false;
        }
        self.kind = TileKind::PointBlock { countdown };
        true
    }

    /// Count a point block down by one and return what is left.
    pub(crate) fn tick_countdown(&mut self) -> Option<u32> {
        match &mut self.kind {
            TileKind::PointBlock { countdown } => {
                *countdown = countdown.saturating_sub(1);
                Some(*countdown)
            }
            TileKind::Standard => None,
        }
    }
}

//! Plain read-only copies of the board for renderers and tooling.

use serde::{Deserialize, Serialize};

use crate::tile::TileKind;
use crate::types::{Frame, SplitAxis, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub frame: Frame,
    #[serde(flatten)]
    pub kind: TileKind,
}

impl TileSnapshot {
    pub fn countdown(&self) -> Option<u32> {
        self.kind.countdown()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Tiles in collection order
    pub tiles: Vec<TileSnapshot>,
    pub score: u32,
    pub split_count: u32,
    pub split_axis: SplitAxis,
    pub empty_cells: usize,
}

impl BoardSnapshot {
    /// Index of the tile covering (x, y)
    pub fn index_at(&self, x: u8, y: u8) -> Option<usize> {
        self.tiles.iter().position(|t| t.frame.contains((x, y)))
    }

    pub fn tile_at(&self, x: u8, y: u8) -> Option<&TileSnapshot> {
        self.index_at(x, y).map(|i| &self.tiles[i])
    }

    pub fn point_block_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.kind.is_point_block()).count()
    }
}

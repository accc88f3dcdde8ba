//! Board module - the tile collection and the per-move update pass
//!
//! The board owns every tile, the occupancy grid that indexes them, and the
//! global counters. A successful split runs the whole update pass before
//! returning:
//!
//! 1. count down existing point blocks and remove the ones that reach zero
//! 2. let tiles fall into empty space, lowest tiles first
//! 3. refill the top row (when enabled)
//! 4. convert new 2x2-or-larger groups of equal standard tiles into point blocks

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BoardError, InvariantViolation, SplitError};
use crate::groups;
use crate::occupancy::OccupancyGrid;
use crate::snapshot::{BoardSnapshot, TileSnapshot};
use crate::tile::{FallOutcome, Tile, TileKind};
use crate::types::{CellPos, Frame, SplitAxis, TileId, GRID_CELLS, GRID_WIDTH};

/// What happens to empty cells left in the top row after gravity settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefillPolicy {
    /// Leave them empty. The board may carry gaps at the top indefinitely.
    #[default]
    Off,
    /// Spawn a 1x1 standard tile on each gap. The tiles fall on the next pass.
    TopRow,
}

impl RefillPolicy {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Some(RefillPolicy::Off),
            "top-row" | "top_row" | "toprow" => Some(RefillPolicy::TopRow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefillPolicy::Off => "off",
            RefillPolicy::TopRow => "top-row",
        }
    }
}

/// Rules that may vary between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    pub refill: RefillPolicy,
}

/// Everything the update pass did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateReport {
    /// Point-block countdown ticks, one point each
    pub countdown_ticks: u32,
    /// Point blocks removed because their countdown ran out
    pub expired: Vec<TileId>,
    /// Tiles that fell at least one row
    pub landed: Vec<TileId>,
    /// Point blocks removed because landing used up their last tick
    pub worn_out: Vec<TileId>,
    /// Empty top-row cells after gravity
    pub refill_cells: Vec<CellPos>,
    /// Tiles created by the top-row refill
    pub spawned: Vec<TileId>,
    /// Standard tiles converted into point blocks
    pub converted: Vec<TileId>,
}

/// Result of a successful split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub parent: Frame,
    pub children: [Frame; 2],
    pub axis: SplitAxis,
    pub update: UpdateReport,
}

/// One game session: the tiles plus score, split count and the split axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    /// Ids of the tiles that are point blocks, without duplicates
    point_blocks: Vec<TileId>,
    occupancy: OccupancyGrid,
    split_axis: SplitAxis,
    score: u32,
    split_count: u32,
    next_id: u32,
    config: BoardConfig,
}

impl Board {
    /// A fresh game: one standard tile covering the whole grid
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let mut board = Self::empty(config);
        board.push_tile(Frame::full_grid(), TileKind::Standard);
        board
    }

    /// Build a board from an arbitrary layout.
    ///
    /// Tiles keep the given order. Counters start at zero and the split axis is
    /// horizontal; see [`Board::with_split_axis`] and [`Board::with_split_count`].
    /// No update pass runs, so groups in the layout stay standard until the next split.
    pub fn from_tiles<I>(tiles: I, config: BoardConfig) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Frame, TileKind)>,
    {
        let mut board = Self::empty(config);
        for (frame, kind) in tiles {
            if frame.width == 0 || frame.height == 0 {
                return Err(BoardError::DegenerateFrame { frame });
            }
            if !frame.fits_grid() {
                return Err(BoardError::OutOfGrid { frame });
            }
            if kind.countdown() == Some(0) {
                return Err(BoardError::ZeroCountdown { frame });
            }
            let id = TileId(board.next_id);
            board
                .occupancy
                .occupy(frame, id)
                .map_err(|cell| BoardError::Overlap { frame, cell })?;
            board.next_id += 1;
            board.tiles.push(Tile::with_kind(id, frame, kind));
            if kind.is_point_block() {
                board.point_blocks.push(id);
            }
        }
        Ok(board)
    }

    pub fn with_split_axis(mut self, axis: SplitAxis) -> Self {
        self.split_axis = axis;
        self
    }

    pub fn with_split_count(mut self, split_count: u32) -> Self {
        self.split_count = split_count;
        self
    }

    fn empty(config: BoardConfig) -> Self {
        Self {
            tiles: Vec::new(),
            point_blocks: Vec::new(),
            occupancy: OccupancyGrid::new(),
            split_axis: SplitAxis::Horizontal,
            score: 0,
            split_count: 0,
            next_id: 0,
            config,
        }
    }

    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a tile on cells the caller knows to be empty
    fn push_tile(&mut self, frame: Frame, kind: TileKind) -> TileId {
        let id = self.alloc_id();
        let placed = self.occupancy.occupy(frame, id);
        debug_assert!(placed.is_ok(), "pushed tile {frame} over an occupied cell");
        self.tiles.push(Tile::with_kind(id, frame, kind));
        id
    }

    fn remove_at(&mut self, index: usize) -> Tile {
        let tile = self.tiles.remove(index);
        self.occupancy.vacate(tile.frame(), tile.id());
        tile
    }

    // ---- read access ----

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`. Indices shift after every split or removal.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Current index of the tile with `id`
    pub fn position(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id() == id)
    }

    pub fn tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id() == id)
    }

    /// Tile covering cell (x, y)
    pub fn tile_at(&self, x: u8, y: u8) -> Option<&Tile> {
        self.occupancy.owner(x, y).and_then(|id| self.tile_by_id(id))
    }

    pub fn point_blocks(&self) -> &[TileId] {
        &self.point_blocks
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn split_count(&self) -> u32 {
        self.split_count
    }

    /// Axis the next split will use
    pub fn split_axis(&self) -> SplitAxis {
        self.split_axis
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// Every covered cell, row-major, without duplicates
    pub fn full_cells(&self) -> Vec<CellPos> {
        self.occupancy.full_cells()
    }

    /// Every uncovered grid cell, row-major
    pub fn empty_cells(&self) -> Vec<CellPos> {
        self.occupancy.empty_cells()
    }

    /// True if some standard tile can still be split on the current axis
    pub fn has_legal_split(&self) -> bool {
        self.tiles
            .iter()
            .any(|t| t.is_splittable() && t.frame().halves(self.split_axis).is_some())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tiles: self
                .tiles
                .iter()
                .map(|t| TileSnapshot {
                    id: t.id(),
                    frame: t.frame(),
                    kind: t.kind(),
                })
                .collect(),
            score: self.score,
            split_count: self.split_count,
            split_axis: self.split_axis,
            empty_cells: self.occupancy.empty_count(),
        }
    }

    // ---- moves ----

    /// Split the tile at `index` along the current axis.
    ///
    /// On success the parent is replaced by its two halves (appended at the end),
    /// the axis flips, the update pass runs, and score and split count go up by one.
    /// On failure nothing changes.
    pub fn split(&mut self, index: usize) -> Result<SplitReport, SplitError> {
        let len = self.tiles.len();
        let tile = self
            .tiles
            .get(index)
            .ok_or(SplitError::IndexOutOfRange { index, len })?;
        let frame = tile.frame();
        if !tile.is_splittable() {
            return Err(SplitError::NotSplittable { frame });
        }
        let axis = self.split_axis;
        let children = frame
            .halves(axis)
            .ok_or(SplitError::TooSmall { frame, axis })?;

        let parent = self.remove_at(index);
        for child in children {
            self.push_tile(child, TileKind::Standard);
        }
        self.split_axis = axis.flipped();
        debug!(
            parent = %parent.frame(),
            first = %children[0],
            second = %children[1],
            axis = axis.as_str(),
            "split tile"
        );

        let update = self.update();
        self.score += 1;
        self.split_count += 1;

        Ok(SplitReport {
            parent: parent.frame(),
            children,
            axis,
            update,
        })
    }

    /// Split the tile with `id`, wherever it currently sits
    pub fn split_tile(&mut self, id: TileId) -> Result<SplitReport, SplitError> {
        let index = self.position(id).ok_or(SplitError::UnknownTile { id })?;
        self.split(index)
    }

    /// The global actions triggered by every move
    fn update(&mut self) -> UpdateReport {
        let mut report = UpdateReport::default();
        // Count down *before* falling.
        self.update_point_blocks(&mut report);
        if self.occupancy.has_empty() {
            self.fall_blocks(&mut report);
            self.remove_worn_out(&mut report);
        }
        self.fill_new_tiles(&mut report);
        self.new_point_blocks(&mut report);
        report
    }

    fn update_point_blocks(&mut self, report: &mut UpdateReport) {
        let mut keep = Vec::with_capacity(self.point_blocks.len());
        for id in std::mem::take(&mut self.point_blocks) {
            let Some(index) = self.position(id) else {
                continue;
            };
            let Some(remaining) = self.tiles[index].tick_countdown() else {
                continue;
            };
            self.score += 1;
            report.countdown_ticks += 1;
            if remaining == 0 {
                let tile = self.remove_at(index);
                debug!(tile = %id, frame = %tile.frame(), "point block expired");
                report.expired.push(id);
            } else {
                keep.push(id);
            }
        }
        self.point_blocks = keep;
    }

    fn fall_blocks(&mut self, report: &mut UpdateReport) {
        // Only tiles over a column with a gap can move.
        let gaps = self.occupancy.columns_with_gaps();
        let mut fallers: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| {
                self.tiles[i]
                    .frame()
                    .columns()
                    .any(|col| gaps[col as usize])
            })
            .collect();
        // Lower tiles first, so tiles above fall into the space they vacate.
        fallers.sort_by_key(|&i| Reverse(self.tiles[i].frame().y));

        for i in fallers {
            let tile = &mut self.tiles[i];
            if let FallOutcome::Landed { .. } = tile.fall(&mut self.occupancy) {
                report.landed.push(tile.id());
            }
        }
    }

    fn remove_worn_out(&mut self, report: &mut UpdateReport) {
        let worn: Vec<TileId> = self
            .tiles
            .iter()
            .filter(|t| t.countdown() == Some(0))
            .map(Tile::id)
            .collect();
        for id in worn {
            if let Some(index) = self.position(id) {
                let tile = self.remove_at(index);
                debug!(tile = %id, frame = %tile.frame(), "point block worn out by falling");
            }
            self.point_blocks.retain(|&pb| pb != id);
            report.worn_out.push(id);
        }
    }

    fn fill_new_tiles(&mut self, report: &mut UpdateReport) {
        report.refill_cells = self.occupancy.top_row_gaps();
        if self.config.refill == RefillPolicy::Off {
            return;
        }

        // Spawned tiles stay on row 0; the next pass's gravity drops them.
        let cells = report.refill_cells.clone();
        for (x, y) in cells {
            let id = self.push_tile(Frame::new(x, y, 1, 1), TileKind::Standard);
            report.spawned.push(id);
        }
        if !report.spawned.is_empty() {
            debug!(count = report.spawned.len(), "refilled top row");
        }
    }

    fn new_point_blocks(&mut self, report: &mut UpdateReport) {
        let marked = groups::point_block_frames(&self.tiles, &self.occupancy);
        if marked.is_empty() {
            return;
        }
        // Deliberately floored at 1: a board built with `from_tiles` starts at
        // split count 0, and a zero countdown would expire before it was seen.
        let countdown = self.split_count.max(1);
        for tile in self.tiles.iter_mut() {
            if marked.contains(&tile.frame()) && tile.convert_to_point_block(countdown) {
                self.point_blocks.push(tile.id());
                report.converted.push(tile.id());
            }
        }
        let mut seen = HashSet::with_capacity(self.point_blocks.len());
        self.point_blocks.retain(|id| seen.insert(*id));
        debug!(count = report.converted.len(), countdown, "formed point blocks");
    }

    // ---- diagnostics ----

    /// Verify every structural invariant, returning the first one that is broken
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut rebuilt = OccupancyGrid::new();
        let mut ids = HashSet::with_capacity(self.tiles.len());
        let mut area = 0;

        for tile in &self.tiles {
            let (id, frame) = (tile.id(), tile.frame());
            if !ids.insert(id) {
                return Err(InvariantViolation::DuplicateId { id });
            }
            if !frame.fits_grid() {
                return Err(InvariantViolation::TileOutsideGrid { id, frame });
            }
            rebuilt
                .occupy(frame, id)
                .map_err(|cell| InvariantViolation::Overlap { cell })?;
            if tile.countdown() == Some(0) {
                return Err(InvariantViolation::ExhaustedPointBlock { id });
            }
            if tile.fall_origin().is_some() {
                return Err(InvariantViolation::DanglingFallOrigin { id });
            }
            area += frame.area();
        }

        if let Some(idx) = (0..GRID_CELLS).find(|&i| rebuilt.cells()[i] != self.occupancy.cells()[i]) {
            let cell = (
                (idx % GRID_WIDTH as usize) as u8,
                (idx / GRID_WIDTH as usize) as u8,
            );
            return Err(InvariantViolation::StaleOccupancy { cell });
        }

        let empty = self.occupancy.empty_count();
        if area + empty != GRID_CELLS {
            return Err(InvariantViolation::AreaMismatch { area, empty });
        }

        let expected: HashSet<TileId> = self
            .tiles
            .iter()
            .filter(|t| t.kind().is_point_block())
            .map(Tile::id)
            .collect();
        let view: HashSet<TileId> = self.point_blocks.iter().copied().collect();
        if view.len() != self.point_blocks.len() || view != expected {
            return Err(InvariantViolation::PointBlockViewMismatch);
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

impl std::ops::Index<usize> for Board {
    type Output = Tile;

    fn index(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }
}

//! Occupancy module - cell-to-tile spatial index
//!
//! The grid is 8x16 and every cell either belongs to exactly one tile or is empty.
//! Uses a flat array for cache locality; the board keeps it in sync with every
//! tile mutation so occupancy queries never rescan the tile list.
//! Coordinates: (x, y) where x ranges 0..7 (left to right), y ranges 0..15 (top to bottom)

use crate::types::{CellPos, Frame, TileId, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// Flat map from grid cell to the id of the tile covering it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    /// Row-major cells (y * WIDTH + x)
    cells: [Option<TileId>; GRID_CELLS],
}

impl OccupancyGrid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    #[inline(always)]
    fn index(x: u8, y: u8) -> Option<usize> {
        if x >= GRID_WIDTH || y >= GRID_HEIGHT {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn position(idx: usize) -> CellPos {
        (
            (idx % GRID_WIDTH as usize) as u8,
            (idx / GRID_WIDTH as usize) as u8,
        )
    }

    /// Cell contents, or `None` if (x, y) is off the grid
    pub fn get(&self, x: u8, y: u8) -> Option<Option<TileId>> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Id of the tile covering (x, y)
    pub fn owner(&self, x: u8, y: u8) -> Option<TileId> {
        self.get(x, y).flatten()
    }

    /// In bounds and unowned. Cells off the grid are never empty.
    pub fn is_empty(&self, x: u8, y: u8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Claim every cell of `frame` for `id`.
    ///
    /// Returns the first cell that is off the grid or already owned by another
    /// tile; nothing is written in that case.
    pub fn occupy(&mut self, frame: Frame, id: TileId) -> Result<(), CellPos> {
        for (x, y) in frame.cells() {
            match self.get(x, y) {
                Some(None) => {}
                Some(Some(owner)) if owner == id => {}
                _ => return Err((x, y)),
            }
        }
        for (x, y) in frame.cells() {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = Some(id);
            }
        }
        Ok(())
    }

    /// Release the cells of `frame` that are owned by `id`
    pub fn vacate(&mut self, frame: Frame, id: TileId) {
        for (x, y) in frame.cells() {
            if let Some(idx) = Self::index(x, y) {
                if self.cells[idx] == Some(id) {
                    self.cells[idx] = None;
                }
            }
        }
    }

    /// True if every cell directly beneath `frame` is empty.
    /// A frame resting on the floor is never clear.
    pub fn is_clear_below(&self, frame: Frame) -> bool {
        match frame.cells_below() {
            Some(mut cells) => cells.all(|(x, y)| self.is_empty(x, y)),
            None => false,
        }
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Owned cells, row-major
    pub fn full_cells(&self) -> Vec<CellPos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_some())
            .map(|(idx, _)| Self::position(idx))
            .collect()
    }

    /// Unowned cells, row-major
    pub fn empty_cells(&self) -> Vec<CellPos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(idx, _)| Self::position(idx))
            .collect()
    }

    /// Per-column flag: does the column contain any empty cell
    pub fn columns_with_gaps(&self) -> [bool; GRID_WIDTH as usize] {
        let mut cols = [false; GRID_WIDTH as usize];
        for (idx, cell) in self.cells.iter().enumerate() {
            if cell.is_none() {
                cols[idx % GRID_WIDTH as usize] = true;
            }
        }
        cols
    }

    /// Empty cells of the top row, left to right
    pub fn top_row_gaps(&self) -> Vec<CellPos> {
        (0..GRID_WIDTH)
            .filter(|&x| self.is_empty(x, 0))
            .map(|x| (x, 0))
            .collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Option<TileId>] {
        &self.cells
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

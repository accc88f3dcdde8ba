//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the SPL-T engine.
//! All types are plain data with no game logic attached, making them usable in
//! any context (core simulation, replay tooling, text rendering, JSON export).
//!
//! # Grid
//!
//! The playfield is a fixed grid:
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 16 rows (indexed 0-15)
//! - **Origin**: (0, 0) is the top-left cell, `y` grows downward
//!
//! Every tile occupies an axis-aligned rectangle of cells described by a [`Frame`].
//!
//! # Examples
//!
//! ```
//! use splt_types::{Frame, SplitAxis, GRID_HEIGHT, GRID_WIDTH};
//!
//! let whole = Frame::new(0, 0, GRID_WIDTH, GRID_HEIGHT);
//! let [top, bottom] = whole.halves(SplitAxis::Horizontal).unwrap();
//! assert_eq!(top, Frame::new(0, 0, 8, 8));
//! assert_eq!(bottom, Frame::new(0, 8, 8, 8));
//!
//! assert_eq!(SplitAxis::Horizontal.flipped(), SplitAxis::Vertical);
//! ```

use std::fmt;
use std::ops::Range;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Grid width in cells (8 columns)
pub const GRID_WIDTH: u8 = 8;

/// Grid height in cells (16 rows)
pub const GRID_HEIGHT: u8 = 16;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// A grid cell as `(x, y)`
pub type CellPos = (u8, u8);

/// Board-unique tile identifier.
///
/// Ids are handed out by the board when a tile is created and are never reused,
/// so they stay meaningful across splits and removals even though tile indices shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orientation of the next split.
///
/// - **Horizontal**: the cut runs horizontally, halving the tile's height
/// - **Vertical**: the cut runs vertically, halving the tile's width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

impl SplitAxis {
    /// The other axis
    ///
    /// ```
    /// use splt_types::SplitAxis;
    ///
    /// assert_eq!(SplitAxis::Vertical.flipped(), SplitAxis::Horizontal);
    /// ```
    pub fn flipped(self) -> Self {
        match self {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitAxis::Horizontal => "horizontal",
            SplitAxis::Vertical => "vertical",
        }
    }
}

impl Default for SplitAxis {
    fn default() -> Self {
        SplitAxis::Horizontal
    }
}

/// A tile rectangle in grid cells: origin `(x, y)` plus `width` x `height`.
///
/// Ordering is lexicographic on `(x, y, width, height)`, which gives group
/// detection a stable order to report frames in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Frame {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl Frame {
    pub const fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The frame covering the whole grid
    pub const fn full_grid() -> Self {
        Self::new(0, 0, GRID_WIDTH, GRID_HEIGHT)
    }

    /// One past the rightmost column
    pub fn right(&self) -> u16 {
        self.x as u16 + self.width as u16
    }

    /// One past the bottom row
    pub fn bottom(&self) -> u16 {
        self.y as u16 + self.height as u16
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Columns spanned by this frame
    pub fn columns(&self) -> Range<u8> {
        self.x..self.x.saturating_add(self.width)
    }

    /// True if the frame is non-empty and lies completely inside the grid
    pub fn fits_grid(&self) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.right() <= GRID_WIDTH as u16
            && self.bottom() <= GRID_HEIGHT as u16
    }

    pub fn contains(&self, (cx, cy): CellPos) -> bool {
        cx >= self.x && (cx as u16) < self.right() && cy >= self.y && (cy as u16) < self.bottom()
    }

    /// Every cell covered by the frame, row-major.
    ///
    /// ```
    /// use splt_types::Frame;
    ///
    /// let cells: Vec<_> = Frame::new(2, 3, 2, 2).cells().collect();
    /// assert_eq!(cells, vec![(2, 3), (3, 3), (2, 4), (3, 4)]);
    /// ```
    pub fn cells(&self) -> impl Iterator<Item = CellPos> {
        let Frame {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y.saturating_add(height))
            .flat_map(move |cy| (x..x.saturating_add(width)).map(move |cx| (cx, cy)))
    }

    /// The row of cells directly beneath the frame.
    ///
    /// Returns `None` when the frame already rests on the grid floor.
    pub fn cells_below(&self) -> Option<impl Iterator<Item = CellPos>> {
        if self.bottom() >= GRID_HEIGHT as u16 {
            return None;
        }
        let below = self.y + self.height;
        Some(self.columns().map(move |cx| (cx, below)))
    }

    /// Same size, one row lower
    pub fn shifted_down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    /// Cut the frame in two along `axis`.
    ///
    /// The first half keeps the origin; the second is offset by the halved
    /// dimension. Returns `None` when the halved dimension would drop below one
    /// cell or would not be integral.
    ///
    /// ```
    /// use splt_types::{Frame, SplitAxis};
    ///
    /// let frame = Frame::new(0, 8, 8, 8);
    /// assert_eq!(
    ///     frame.halves(SplitAxis::Vertical),
    ///     Some([Frame::new(0, 8, 4, 8), Frame::new(4, 8, 4, 8)])
    /// );
    /// assert_eq!(Frame::new(0, 0, 1, 1).halves(SplitAxis::Vertical), None);
    /// ```
    pub fn halves(&self, axis: SplitAxis) -> Option<[Frame; 2]> {
        let Frame {
            x,
            y,
            width,
            height,
        } = *self;
        match axis {
            SplitAxis::Horizontal => {
                let half = halve(height)?;
                Some([
                    Frame::new(x, y, width, half),
                    Frame::new(x, y + half, width, half),
                ])
            }
            SplitAxis::Vertical => {
                let half = halve(width)?;
                Some([
                    Frame::new(x, y, half, height),
                    Frame::new(x + half, y, half, height),
                ])
            }
        }
    }

    /// Same-size frames sharing a full edge with this one: right, below, left, above.
    ///
    /// Candidates that would start at a negative coordinate are skipped.
    pub fn neighbors(&self) -> ArrayVec<Frame, 4> {
        let mut out = ArrayVec::new();
        let Frame {
            x,
            y,
            width,
            height,
        } = *self;
        if let Some(nx) = x.checked_add(width) {
            out.push(Frame::new(nx, y, width, height));
        }
        if let Some(ny) = y.checked_add(height) {
            out.push(Frame::new(x, ny, width, height));
        }
        if let Some(nx) = x.checked_sub(width) {
            out.push(Frame::new(nx, y, width, height));
        }
        if let Some(ny) = y.checked_sub(height) {
            out.push(Frame::new(x, ny, width, height));
        }
        out
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

fn halve(len: u8) -> Option<u8> {
    if len < 2 || len % 2 != 0 {
        return None;
    }
    Some(len / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions() {
        assert_eq!(GRID_WIDTH, 8);
        assert_eq!(GRID_HEIGHT, 16);
        assert_eq!(GRID_CELLS, 128);
        assert!(Frame::full_grid().fits_grid());
    }

    #[test]
    fn cells_cover_area_once() {
        let frame = Frame::new(1, 2, 3, 4);
        let cells: Vec<_> = frame.cells().collect();
        assert_eq!(cells.len(), frame.area());
        assert!(cells.iter().all(|&c| frame.contains(c)));
        assert_eq!(cells.first(), Some(&(1, 2)));
        assert_eq!(cells.last(), Some(&(3, 5)));
    }

    #[test]
    fn halves_reject_odd_and_unit_dimensions() {
        assert_eq!(Frame::new(0, 0, 8, 1).halves(SplitAxis::Horizontal), None);
        assert_eq!(Frame::new(0, 0, 3, 4).halves(SplitAxis::Vertical), None);
        assert!(Frame::new(0, 0, 1, 2).halves(SplitAxis::Horizontal).is_some());
    }

    #[test]
    fn halves_tile_the_parent() {
        let parent = Frame::new(4, 8, 4, 8);
        for axis in [SplitAxis::Horizontal, SplitAxis::Vertical] {
            let [a, b] = parent.halves(axis).unwrap();
            let mut cells: Vec<_> = a.cells().chain(b.cells()).collect();
            cells.sort_unstable();
            let mut expected: Vec<_> = parent.cells().collect();
            expected.sort_unstable();
            assert_eq!(cells, expected, "axis {}", axis.as_str());
        }
    }

    #[test]
    fn cells_below_stops_at_floor() {
        assert!(Frame::new(0, 8, 8, 8).cells_below().is_none());
        let below: Vec<_> = Frame::new(2, 3, 2, 1).cells_below().unwrap().collect();
        assert_eq!(below, vec![(2, 4), (3, 4)]);
    }

    #[test]
    fn neighbors_skip_negative_origins() {
        let corner = Frame::new(0, 0, 2, 2);
        let ns = corner.neighbors();
        assert_eq!(ns.as_slice(), &[Frame::new(2, 0, 2, 2), Frame::new(0, 2, 2, 2)]);

        let inner = Frame::new(2, 2, 2, 2);
        assert_eq!(inner.neighbors().len(), 4);
    }
}

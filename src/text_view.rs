//! TextView: maps a `BoardSnapshot` into a plain-text grid.
//!
//! Pure (no I/O). Standard tiles are drawn with a letter per tile, point blocks
//! with their countdown, empty cells with dots.

use std::fmt::Write;

use crate::core::{BoardSnapshot, TileKind};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

pub struct TextView {
    /// Board cell width in characters
    cell_w: usize,
}

impl Default for TextView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl TextView {
    pub fn new(cell_w: usize) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Framed grid followed by the counters
    pub fn render(&self, snap: &BoardSnapshot) -> String {
        let inner = GRID_WIDTH as usize * self.cell_w;
        let mut out = String::new();
        let border = format!("+{}+\n", "-".repeat(inner));

        out.push_str(&border);
        for y in 0..GRID_HEIGHT {
            out.push('|');
            for x in 0..GRID_WIDTH {
                out.push_str(&self.cell(snap, x, y));
            }
            out.push_str("|\n");
        }
        out.push_str(&border);

        let _ = writeln!(
            out,
            "score {}  splits {}  next {}",
            snap.score,
            snap.split_count,
            snap.split_axis.as_str()
        );
        out
    }

    /// One line per tile, in collection order
    pub fn tile_list(&self, snap: &BoardSnapshot) -> String {
        let mut out = String::new();
        for (i, tile) in snap.tiles.iter().enumerate() {
            let _ = match tile.kind {
                TileKind::Standard => writeln!(out, "{i:>3} {} {}", tile_glyph(i), tile.frame),
                TileKind::PointBlock { countdown } => writeln!(
                    out,
                    "{i:>3} * {} {} {countdown}",
                    tile.frame,
                    tile.kind.as_str()
                ),
            };
        }
        out
    }

    fn cell(&self, snap: &BoardSnapshot, x: u8, y: u8) -> String {
        let Some(index) = snap.index_at(x, y) else {
            return ".".repeat(self.cell_w);
        };
        match snap.tiles[index].countdown() {
            None => tile_glyph(index).to_string().repeat(self.cell_w),
            Some(countdown) => format!("{:>width$}", countdown % 100, width = self.cell_w),
        }
    }
}

fn tile_glyph(index: usize) -> char {
    const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    GLYPHS[index % GLYPHS.len()] as char
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the SPL-T board-state engine. It has **no dependencies** on
//! rendering, input, or I/O:
//!
//! - **Deterministic**: the same sequence of splits always yields the same board
//! - **Synchronous**: a split runs its whole update cascade before returning
//! - **Session-local**: all state lives in a [`Board`] value; no globals
//!
//! # Module Structure
//!
//! - [`board`]: tile collection, counters, split and the per-move update pass
//! - [`tile`]: tile geometry, kinds and gravity for a single tile
//! - [`groups`]: detection of equal-size 2x2 groups that become point blocks
//! - [`occupancy`]: flat cell-to-tile index used for gravity and neighbor lookup
//! - [`snapshot`]: serializable read-only copies for renderers and tooling
//! - [`rng`]: small deterministic RNG for automated play
//!
//! # Game Rules
//!
//! - The board starts as one standard tile covering the 8x16 grid
//! - Splitting halves a standard tile; the axis alternates after every split
//! - Each split scores a point and runs the update pass:
//!   point blocks count down (a point per tick), tiles fall, the top row is
//!   optionally refilled, and new point blocks form
//! - Point blocks vanish when their countdown reaches zero
//!
//! # Example
//!
//! ```
//! use splt_core::Board;
//! use splt_types::{Frame, SplitAxis};
//!
//! let mut board = Board::new();
//! let report = board.split(0).unwrap();
//!
//! assert_eq!(report.children, [Frame::new(0, 0, 8, 8), Frame::new(0, 8, 8, 8)]);
//! assert_eq!(board.score(), 1);
//! assert_eq!(board.split_count(), 1);
//! assert_eq!(board.split_axis(), SplitAxis::Vertical);
//! ```
//!
//! # Logging
//!
//! The engine never prints. It emits `tracing` events (`debug` for splits and
//! point-block changes, `trace` for individual falls); install a subscriber to see them.

pub mod board;
pub mod error;
pub mod groups;
pub mod occupancy;
pub mod rng;
pub mod snapshot;
pub mod tile;

pub use splt_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardConfig, RefillPolicy, SplitReport, UpdateReport};
pub use error::{BoardError, InvariantViolation, SplitError};
pub use occupancy::OccupancyGrid;
pub use rng::SimpleRng;
pub use snapshot::{BoardSnapshot, TileSnapshot};
pub use tile::{FallOutcome, Tile, TileKind};

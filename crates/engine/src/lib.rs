//! Engine module - drives a board with sequences of moves
//!
//! The core only knows how to split one tile. This crate turns move lists into
//! splits and supplies a deterministic automatic player:
//!
//! - [`replay`]: resolve tile references (including negative, from-the-end
//!   indices) and apply them in order, recording each outcome
//! - [`autoplay`]: seeded player that keeps splitting random legal tiles

pub mod autoplay;
pub mod replay;

pub use splt_core as core;
pub use splt_types as types;

pub use autoplay::Autoplayer;
pub use replay::{
    apply_move, parse_moves, replay, ParseTileRefError, ReplayError, ReplayStep, TileRef, DEMO_MOVES,
};

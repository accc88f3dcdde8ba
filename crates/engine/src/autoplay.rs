//! Seeded automatic player.
//!
//! Picks uniformly among the tiles that can legally be split on the current axis.
//! The game is over when there are none.

use tracing::debug;

use crate::core::{Board, SimpleRng, SplitReport};

#[derive(Debug, Clone)]
pub struct Autoplayer {
    rng: SimpleRng,
}

impl Autoplayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Indices of tiles that a split on the current axis would accept
    pub fn legal_moves(board: &Board) -> Vec<usize> {
        let axis = board.split_axis();
        board
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_splittable() && t.frame().halves(axis).is_some())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn choose(&mut self, board: &Board) -> Option<usize> {
        let moves = Self::legal_moves(board);
        self.rng.choose(&moves).copied()
    }

    /// Split one random legal tile. `None` once no split is possible.
    pub fn play_turn(&mut self, board: &mut Board) -> Option<SplitReport> {
        let index = self.choose(board)?;
        board.split(index).ok()
    }

    /// Play up to `turns` turns and return how many were played
    pub fn play(&mut self, board: &mut Board, turns: usize) -> usize {
        for played in 0..turns {
            if self.play_turn(board).is_none() {
                debug!(played, score = board.score(), "no legal split left");
                return played;
            }
        }
        turns
    }
}

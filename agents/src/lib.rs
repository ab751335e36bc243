pub mod alphabeta;
pub mod evaluation;
pub mod minimax;
pub mod player;
pub mod random;
pub mod search;

#[cfg(test)]
mod testing;

use mancala_core::{MancalaBoard, Pit, Side};
use std::fmt::Debug;

/// Core trait for move-choosing agents
pub trait Agent {
    /// Choose a move for the agent's side on the given board
    fn choose_move(&mut self, board: &MancalaBoard) -> Result<Pit, AgentError>;

    /// Get the agent's name
    fn name(&self) -> &str;

    /// The side this agent plays
    fn side(&self) -> Side;
}

/// The board interface the search engines consume.
///
/// Implementations must enumerate moves in a stable order and produce
/// successors without touching the receiver.
pub trait Position: Sized {
    type Move: Copy + PartialEq + Debug;

    fn legal_moves(&self, side: Side) -> Vec<Self::Move>;
    fn is_terminal(&self) -> bool;
    fn has_won(&self, side: Side) -> bool;
    fn apply_move(&self, side: Side, mv: Self::Move) -> Self;
}

impl Position for MancalaBoard {
    type Move = Pit;

    fn legal_moves(&self, side: Side) -> Vec<Pit> {
        MancalaBoard::legal_moves(self, side)
    }

    fn is_terminal(&self) -> bool {
        self.is_game_over()
    }

    fn has_won(&self, side: Side) -> bool {
        MancalaBoard::has_won(self, side)
    }

    fn apply_move(&self, side: Side, pit: Pit) -> Self {
        MancalaBoard::apply_move(self, side, pit)
    }
}

pub use alphabeta::alpha_beta;
pub use evaluation::*;
pub use minimax::minimax;
pub use player::*;
pub use random::random_move;
pub use search::*;

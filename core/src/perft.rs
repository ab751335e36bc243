use crate::board::MancalaBoard;
use crate::types::{Pit, Side};

/// Counts the leaves of the move tree to `depth`, with sides strictly
/// alternating exactly as the search engines alternate them.
/// Finished games count as a single leaf.
pub fn perft(board: &MancalaBoard, side: Side, depth: u8) -> u64 {
    if depth == 0 || board.is_game_over() {
        return 1;
    }

    let moves = board.legal_moves(side);

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|pit| perft(&board.apply_move(side, pit), side.opponent(), depth - 1))
        .sum()
}

/// Performs perft with a per-move breakdown at the root.
pub fn perft_divide(board: &MancalaBoard, side: Side, depth: u8) -> Vec<(Pit, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    board
        .legal_moves(side)
        .into_iter()
        .map(|pit| {
            let next = board.apply_move(side, pit);
            (pit, perft(&next, side.opponent(), depth - 1))
        })
        .collect()
}

use crate::evaluation::Evaluation;
use crate::search::{improves, SearchInfo, SearchResult, SearchStrategy};
use crate::Position;
use mancala_core::Side;

/// Exhaustive fixed-depth minimax from `side`'s point of view.
///
/// `side` moves first as the maximizer; the sides then alternate every ply.
/// Terminal positions, positions without a legal move and the depth cutoff
/// are all scored by `evaluation` for `side`.
pub fn minimax<P, E>(position: &P, side: Side, depth: u8, evaluation: &E) -> SearchResult<P::Move>
where
    P: Position,
    E: Evaluation<P>,
{
    let mut info = SearchInfo::new(side, evaluation);
    let (score, best_move) = minimax_node(position, side, depth, &mut info);
    info.finish(SearchStrategy::Minimax, depth, score, best_move)
}

fn minimax_node<P, E>(
    position: &P,
    side: Side,
    depth: u8,
    info: &mut SearchInfo<'_, E>,
) -> (f64, Option<P::Move>)
where
    P: Position,
    E: Evaluation<P>,
{
    info.nodes += 1;

    if position.is_terminal() || depth == 0 {
        return (info.evaluate(position), None);
    }

    let moves = position.legal_moves(side);
    if moves.is_empty() {
        return (info.evaluate(position), None);
    }

    let maximizing = side == info.turn;
    let mut best_score = None;
    let mut best_move = None;

    for mv in moves {
        let child = position.apply_move(side, mv);
        let (score, _) = minimax_node(&child, side.opponent(), depth - 1, info);

        if improves(best_score, score, maximizing) {
            best_score = Some(score);
            best_move = Some(mv);
        }
    }

    match best_score {
        Some(score) => (score, best_move),
        None => (info.evaluate(position), None),
    }
}

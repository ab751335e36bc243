use crate::evaluation::Evaluation;
use crate::search::{improves, SearchInfo, SearchResult, SearchStrategy};
use crate::Position;
use mancala_core::Side;

/// Fixed-depth minimax with alpha-beta pruning from `side`'s point of view.
///
/// Returns the same score and move as [`crate::minimax`] for the same input;
/// only subtrees that cannot change the root decision are skipped.
pub fn alpha_beta<P, E>(
    position: &P,
    side: Side,
    depth: u8,
    evaluation: &E,
) -> SearchResult<P::Move>
where
    P: Position,
    E: Evaluation<P>,
{
    let mut info = SearchInfo::new(side, evaluation);
    let (score, best_move) = alpha_beta_node(
        position,
        side,
        depth,
        f64::NEG_INFINITY,
        f64::INFINITY,
        &mut info,
    );
    info.finish(SearchStrategy::AlphaBeta, depth, score, best_move)
}

fn alpha_beta_node<P, E>(
    position: &P,
    side: Side,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
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
        let (score, _) = alpha_beta_node(&child, side.opponent(), depth - 1, alpha, beta, info);

        if improves(best_score, score, maximizing) {
            best_score = Some(score);
            best_move = Some(mv);
        }
        let Some(best) = best_score else { continue };

        if maximizing {
            // Beta cutoff: the minimizer above already has something better
            if best >= beta {
                return (best, best_move);
            }
            alpha = alpha.max(best);
        } else {
            // Alpha cutoff
            if best <= alpha {
                return (best, best_move);
            }
            beta = beta.min(best);
        }
    }

    match best_score {
        Some(score) => (score, best_move),
        None => (info.evaluate(position), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimax::minimax;
    use crate::testing::{Tree, TreePosition};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;

    fn leaf_value(_side: Side, position: &TreePosition) -> f64 {
        position.value()
    }

    #[test]
    fn test_hand_computed_value_with_pruning() {
        let root = Tree::uniform(&[&[3.0, 12.0, 8.0], &[2.0, 4.0, 6.0], &[14.0, 5.0, 2.0]]);

        let pruned = alpha_beta(&root, Side::One, 2, &leaf_value);
        let full = minimax(&root, Side::One, 2, &leaf_value);

        assert_eq!(pruned.score, 3.0);
        assert_eq!(pruned.best_move, Some(root.child(0)));
        assert_eq!((pruned.score, pruned.best_move), (full.score, full.best_move));

        // The second row is cut after its first leaf (2 <= alpha = 3)
        assert_eq!(pruned.nodes, 11);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn test_no_cutoff_means_no_savings() {
        // Rows improve left to right, so every leaf must be examined
        let root = Tree::uniform(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);

        let pruned = alpha_beta(&root, Side::One, 2, &leaf_value);
        let full = minimax(&root, Side::One, 2, &leaf_value);

        assert_eq!(pruned.score, 5.0);
        assert_eq!(pruned.best_move, Some(root.child(2)));
        assert_eq!(pruned.nodes, full.nodes);
    }

    #[test]
    fn test_depth_zero_evaluates_root() {
        let root = Tree::flat(&[1.0, 2.0]).with_value(-3.0);
        let result = alpha_beta(&root, Side::Two, 0, &leaf_value);

        assert_eq!(result.score, -3.0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
        assert_eq!(root.enumerations(), 0);
    }

    #[test]
    fn test_terminal_root_short_circuits() {
        let root = Tree::flat(&[1.0, 2.0]).terminal().with_value(8.0);
        let result = alpha_beta(&root, Side::One, 5, &leaf_value);

        assert_eq!(result.score, 8.0);
        assert_eq!(result.best_move, None);
        assert_eq!(root.enumerations(), 0);
    }

    #[test]
    fn test_no_moves_falls_back_to_evaluation() {
        let root = Tree::leaf(-1.5);
        let result = alpha_beta(&root, Side::Two, 2, &leaf_value);

        assert_eq!(result.score, -1.5);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_ties_go_to_first_move() {
        let root = Tree::uniform(&[&[1.0, 5.0], &[5.0, 9.0], &[5.0, 5.0]]);
        let result = alpha_beta(&root, Side::One, 2, &leaf_value);

        assert_eq!(result.score, 5.0);
        assert_eq!(result.best_move, Some(root.child(1)));

        let flat = Tree::flat(&[4.0, 6.0, 6.0, 2.0]);
        let result = alpha_beta(&flat, Side::One, 1, &leaf_value);
        assert_eq!(result.best_move, Some(flat.child(1)));
    }

    #[test]
    fn test_scores_stay_in_root_perspective() {
        let root = Tree::uniform(&[&[3.0, 12.0], &[2.0, 4.0]]);
        let seen = RefCell::new(Vec::new());
        let recording = |side: Side, position: &TreePosition| {
            seen.borrow_mut().push(side);
            position.value()
        };

        let result = alpha_beta(&root, Side::Two, 2, &recording);

        assert_eq!(result.score, 3.0);
        assert_eq!(result.best_move, Some(root.child(0)));
        // The 4 leaf is cut off once the second row drops to 2
        assert_eq!(seen.borrow().len(), 3);
        assert!(seen.borrow().iter().all(|&side| side == Side::Two));
    }

    #[test]
    fn test_random_rows_match_minimax() {
        // Nine rows of three pseudo-random leaves
        let mut rng = StdRng::seed_from_u64(17);
        let values: Vec<f64> = (0..27).map(|_| f64::from(rng.gen_range(0..50u8))).collect();
        let rows: Vec<&[f64]> = values.chunks(3).collect();
        let root = Tree::uniform(&rows);

        for depth in 0..=3 {
            let full = minimax(&root, Side::One, depth, &leaf_value);
            let pruned = alpha_beta(&root, Side::One, depth, &leaf_value);
            assert_eq!((full.score, full.best_move), (pruned.score, pruned.best_move));
            assert!(pruned.nodes <= full.nodes);
        }
    }
}

use crate::alphabeta::alpha_beta;
use crate::evaluation::Evaluation;
use crate::minimax::minimax;
use crate::Position;
use mancala_core::Side;
use std::fmt;

/// Outcome of a fixed-depth search.
///
/// `score` is always measured from the side that started the search.
/// `best_move` is None when the root was terminal, had no legal move, or
/// the depth budget was zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
}

/// Which engine answers a search request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SearchStrategy {
    Minimax,
    AlphaBeta,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Minimax => f.write_str("minimax"),
            SearchStrategy::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

/// Node bookkeeping shared by both engines.
pub(crate) struct SearchInfo<'a, E> {
    pub turn: Side,
    pub evaluation: &'a E,
    pub nodes: u64,
}

impl<'a, E> SearchInfo<'a, E> {
    pub fn new(turn: Side, evaluation: &'a E) -> Self {
        Self {
            turn,
            evaluation,
            nodes: 0,
        }
    }

    /// Scores `position` for the side that started the search.
    pub fn evaluate<P>(&self, position: &P) -> f64
    where
        E: Evaluation<P>,
    {
        self.evaluation.evaluate(self.turn, position)
    }

    pub fn finish<M: fmt::Debug>(
        self,
        strategy: SearchStrategy,
        depth: u8,
        score: f64,
        best_move: Option<M>,
    ) -> SearchResult<M> {
        log::debug!(
            "{} search for {} to depth {}: score {} move {:?} ({} nodes)",
            strategy,
            self.turn,
            depth,
            score,
            best_move,
            self.nodes
        );
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        }
    }
}

/// Returns true if `score` should replace the running best.
/// The first candidate always does; later ones only on strict improvement,
/// so ties go to the move enumerated first.
pub(crate) fn improves(best: Option<f64>, score: f64, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best,
        Some(best) => score < best,
    }
}

/// Runs the chosen engine from `side`'s point of view.
pub fn search<P, E>(
    position: &P,
    side: Side,
    depth: u8,
    evaluation: &E,
    strategy: SearchStrategy,
) -> SearchResult<P::Move>
where
    P: Position,
    E: Evaluation<P>,
{
    match strategy {
        SearchStrategy::Minimax => minimax(position, side, depth, evaluation),
        SearchStrategy::AlphaBeta => alpha_beta(position, side, depth, evaluation),
    }
}

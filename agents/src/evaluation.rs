use crate::Position;
use mancala_core::{MancalaBoard, Side};

/// Score for a side that has already won.
pub const WIN_SCORE: f64 = 100.0;
/// Score for a side that has already lost.
pub const LOSS_SCORE: f64 = 0.0;
/// Score for any position that is not yet decided.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Static evaluation of a position from `side`'s point of view.
/// Higher is better for `side`. Must be defined for every reachable position.
pub trait Evaluation<P> {
    fn evaluate(&self, side: Side, position: &P) -> f64;
}

impl<P, F> Evaluation<P> for F
where
    F: Fn(Side, &P) -> f64,
{
    fn evaluate(&self, side: Side, position: &P) -> f64 {
        self(side, position)
    }
}

/// Win/loss/undecided scoring that ignores everything but the final result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Baseline;

impl<P: Position> Evaluation<P> for Baseline {
    fn evaluate(&self, side: Side, position: &P) -> f64 {
        if position.has_won(side) {
            WIN_SCORE
        } else if position.has_won(side.opponent()) {
            LOSS_SCORE
        } else {
            NEUTRAL_SCORE
        }
    }
}

/// Store difference plus stones-in-play difference, optionally rewarding
/// every empty pit on the opponent's row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarginHeuristic {
    pub empty_pit_bonus: bool,
}

impl MarginHeuristic {
    pub const fn new(empty_pit_bonus: bool) -> Self {
        Self { empty_pit_bonus }
    }

    /// The tuned variant: only the second player takes the empty-pit bonus.
    pub const fn for_side(side: Side) -> Self {
        Self::new(matches!(side, Side::Two))
    }
}

impl Evaluation<MancalaBoard> for MarginHeuristic {
    fn evaluate(&self, side: Side, board: &MancalaBoard) -> f64 {
        let opponent = side.opponent();
        let stores = board.store_margin(side);
        let in_play =
            i64::from(board.stones_in_play(side)) - i64::from(board.stones_in_play(opponent));

        let mut score = f64::from(stores) + in_play as f64;
        if self.empty_pit_bonus {
            score += board.empty_pits(opponent) as f64;
        }
        score
    }
}

/// Runtime-selectable evaluation for Mancala players.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Heuristic {
    #[default]
    Baseline,
    Margin(MarginHeuristic),
}

impl Heuristic {
    /// The margin heuristic tuned for `side`.
    pub const fn margin_for(side: Side) -> Self {
        Heuristic::Margin(MarginHeuristic::for_side(side))
    }
}

impl Evaluation<MancalaBoard> for Heuristic {
    fn evaluate(&self, side: Side, board: &MancalaBoard) -> f64 {
        match self {
            Heuristic::Baseline => Baseline.evaluate(side, board),
            Heuristic::Margin(margin) => margin.evaluate(side, board),
        }
    }
}

use crate::Position;
use mancala_core::Side;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks one of `side`'s legal moves uniformly at random.
/// Returns None when there is nothing to play.
pub fn random_move<P, R>(position: &P, side: Side, rng: &mut R) -> Option<P::Move>
where
    P: Position,
    R: Rng + ?Sized,
{
    position.legal_moves(side).choose(rng).copied()
}

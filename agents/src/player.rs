use crate::evaluation::{Evaluation, Heuristic};
use crate::random::random_move;
use crate::search::{search, SearchStrategy};
use crate::Agent;
use log::{info, warn};
use mancala_core::{MancalaBoard, Pit, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

/// Largest weight the random branch of the custom policy can reach.
const MAX_RANDOM_WEIGHT: i32 = 4;
/// Weight of the searched branch of the custom policy.
const SEARCH_WEIGHT: f64 = 50.0;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0} has no legal move")]
    NoLegalMoves(Side),
    #[error("unknown player policy: {0}")]
    UnknownPolicy(String),
    #[error("{0} has no move input attached")]
    MissingInput(Side),
    #[error("{0} resigned")]
    Resigned(Side),
    #[error("failed to read move: {0}")]
    Input(#[from] std::io::Error),
}

/// How a player picks its moves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Policy {
    Human,
    Random,
    Minimax,
    AlphaBeta,
    /// Alpha-beta, with occasional random moves when trailing.
    Custom,
}

impl Policy {
    pub const ALL: [Policy; 5] = [
        Policy::Human,
        Policy::Random,
        Policy::Minimax,
        Policy::AlphaBeta,
        Policy::Custom,
    ];
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Human => "human",
            Policy::Random => "random",
            Policy::Minimax => "minimax",
            Policy::AlphaBeta => "alphabeta",
            Policy::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for Policy {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Policy::Human),
            "random" => Ok(Policy::Random),
            "minimax" => Ok(Policy::Minimax),
            "alphabeta" | "alpha-beta" | "abprune" => Ok(Policy::AlphaBeta),
            "custom" => Ok(Policy::Custom),
            _ => Err(AgentError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Source of moves for human-controlled players.
pub trait MoveInput {
    /// Returns the pit the human wants to play. Validation is the caller's job.
    fn read_move(&mut self, board: &MancalaBoard, side: Side) -> Result<Pit, AgentError>;
}

/// One input source driving several players, e.g. a single terminal shared
/// by two humans.
impl<M: MoveInput + ?Sized> MoveInput for Rc<RefCell<M>> {
    fn read_move(&mut self, board: &MancalaBoard, side: Side) -> Result<Pit, AgentError> {
        self.borrow_mut().read_move(board, side)
    }
}

/// Chance that the custom policy plays at random when trailing by `deficit`
/// stones in the stores: `k / (k + 50)` with `k = clamp(deficit - 1, 0, 4)`.
pub fn random_move_probability(deficit: i32) -> f64 {
    let weight = f64::from((deficit - 1).clamp(0, MAX_RANDOM_WEIGHT));
    weight / (weight + SEARCH_WEIGHT)
}

/// A match participant: a side, a policy, a search depth and an evaluation.
pub struct Player<E = Heuristic> {
    side: Side,
    policy: Policy,
    depth: u8,
    evaluation: E,
    name: String,
    rng: StdRng,
    input: Option<Box<dyn MoveInput>>,
}

impl<E> Player<E> {
    pub fn new(side: Side, policy: Policy, depth: u8, evaluation: E) -> Self {
        Player {
            side,
            policy,
            depth,
            evaluation,
            name: format!("{}({}, depth={})", policy, side, depth),
            rng: StdRng::from_entropy(),
            input: None,
        }
    }

    /// Makes the random choices of this player reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Attaches the move source used by the human policy.
    pub fn with_input(mut self, input: Box<dyn MoveInput>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl<E: Evaluation<MancalaBoard>> Player<E> {
    fn searched_move(
        &self,
        board: &MancalaBoard,
        strategy: SearchStrategy,
        fallback: Pit,
        start: Instant,
    ) -> Pit {
        let result = search(board, self.side, self.depth, &self.evaluation, strategy);
        info!(
            "{} chose move {:?} with value {} ({} nodes, {:.3}s)",
            self.name,
            result.best_move,
            result.score,
            result.nodes,
            start.elapsed().as_secs_f64()
        );

        match result.best_move {
            Some(pit) => pit,
            None => {
                warn!(
                    "{} searched to depth {} without a move, playing pit {}",
                    self.name, self.depth, fallback
                );
                fallback
            }
        }
    }

    fn random_choice(&mut self, board: &MancalaBoard, fallback: Pit) -> Pit {
        let pit = random_move(board, self.side, &mut self.rng).unwrap_or(fallback);
        info!("{} chose move {} at random", self.name, pit);
        pit
    }
}

impl<E: Evaluation<MancalaBoard>> Agent for Player<E> {
    fn choose_move(&mut self, board: &MancalaBoard) -> Result<Pit, AgentError> {
        let legal = board.legal_moves(self.side);
        let Some(&first) = legal.first() else {
            return Err(AgentError::NoLegalMoves(self.side));
        };
        let start = Instant::now();

        let pit = match self.policy {
            Policy::Human => {
                let side = self.side;
                let input = self.input.as_mut().ok_or(AgentError::MissingInput(side))?;
                input.read_move(board, side)?
            }
            Policy::Random => self.random_choice(board, first),
            Policy::Minimax => self.searched_move(board, SearchStrategy::Minimax, first, start),
            Policy::AlphaBeta => self.searched_move(board, SearchStrategy::AlphaBeta, first, start),
            Policy::Custom => {
                let deficit = board.store_margin(self.side.opponent());
                let probability = random_move_probability(deficit);
                if probability > 0.0 && self.rng.gen_bool(probability) {
                    warn!("{} is behind by {} - choosing at random", self.name, deficit);
                    self.random_choice(board, first)
                } else {
                    self.searched_move(board, SearchStrategy::AlphaBeta, first, start)
                }
            }
        };

        Ok(pit)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn side(&self) -> Side {
        self.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{Baseline, MarginHeuristic};
    use mancala_core::positions;

    struct Scripted(Vec<Pit>);

    impl MoveInput for Scripted {
        fn read_move(&mut self, _board: &MancalaBoard, side: Side) -> Result<Pit, AgentError> {
            self.0.pop().ok_or(AgentError::Resigned(side))
        }
    }

    fn pit(n: u8) -> Pit {
        Pit::new(n).unwrap()
    }

    fn board(notation: &str) -> MancalaBoard {
        MancalaBoard::from_notation(notation).unwrap()
    }

    #[test]
    fn test_policy_parsing() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!("ABPRUNE".parse::<Policy>().unwrap(), Policy::AlphaBeta);
        assert!(matches!(
            "expectimax".parse::<Policy>(),
            Err(AgentError::UnknownPolicy(name)) if name == "expectimax"
        ));
    }

    #[test]
    fn test_no_legal_moves_is_reported() {
        let finished = board("0,0,0,0,0,0/0,0,0,0,0,0 30 18");
        for policy in Policy::ALL {
            let mut player = Player::new(Side::One, policy, 3, Heuristic::Baseline).with_seed(1);
            assert!(matches!(
                player.choose_move(&finished),
                Err(AgentError::NoLegalMoves(Side::One))
            ));
        }
    }

    #[test]
    fn test_search_policies_find_the_win() {
        let near_end = board(positions::NEAR_END);
        for policy in [Policy::Minimax, Policy::AlphaBeta, Policy::Custom] {
            let mut player = Player::new(Side::One, policy, 3, Baseline).with_seed(5);
            assert_eq!(player.choose_move(&near_end).unwrap(), pit(4), "{}", policy);
        }
    }

    #[test]
    fn test_depth_zero_plays_first_legal_move() {
        let b = board(positions::CAPTURE_READY);
        let mut player = Player::new(Side::One, Policy::AlphaBeta, 0, Heuristic::Baseline);
        assert_eq!(player.choose_move(&b).unwrap(), pit(1));
    }

    #[test]
    fn test_random_policy_is_reproducible() {
        let b = MancalaBoard::new();
        let mut first = Player::new(Side::Two, Policy::Random, 0, Heuristic::Baseline).with_seed(42);
        let mut second = Player::new(Side::Two, Policy::Random, 0, Heuristic::Baseline).with_seed(42);

        for _ in 0..20 {
            let a = first.choose_move(&b).unwrap();
            assert_eq!(a, second.choose_move(&b).unwrap());
            assert!(b.is_legal(Side::Two, a));
        }
    }

    #[test]
    fn test_human_policy_reads_input() {
        let b = MancalaBoard::new();
        let mut player = Player::new(Side::One, Policy::Human, 0, Heuristic::Baseline)
            .with_input(Box::new(Scripted(vec![pit(2), pit(5)])));

        assert_eq!(player.choose_move(&b).unwrap(), pit(5));
        assert_eq!(player.choose_move(&b).unwrap(), pit(2));
        assert!(matches!(
            player.choose_move(&b),
            Err(AgentError::Resigned(Side::One))
        ));

        let mut detached = Player::new(Side::Two, Policy::Human, 0, Heuristic::Baseline);
        assert!(matches!(
            detached.choose_move(&b),
            Err(AgentError::MissingInput(Side::Two))
        ));
    }

    #[test]
    fn test_humans_can_share_one_input() {
        let b = MancalaBoard::new();
        let shared = Rc::new(RefCell::new(Scripted(vec![pit(6), pit(4), pit(1)])));
        let mut first = Player::new(Side::One, Policy::Human, 0, Heuristic::Baseline)
            .with_input(Box::new(Rc::clone(&shared)));
        let mut second = Player::new(Side::Two, Policy::Human, 0, Heuristic::Baseline)
            .with_input(Box::new(Rc::clone(&shared)));

        assert_eq!(first.choose_move(&b).unwrap(), pit(1));
        assert_eq!(second.choose_move(&b).unwrap(), pit(4));
        assert_eq!(first.choose_move(&b).unwrap(), pit(6));
        assert!(shared.borrow().0.is_empty());
    }

    #[test]
    fn test_random_move_probability_curve() {
        assert_eq!(random_move_probability(-10), 0.0);
        assert_eq!(random_move_probability(1), 0.0);
        assert_eq!(random_move_probability(3), 2.0 / 52.0);
        assert_eq!(random_move_probability(5), 4.0 / 54.0);
        assert_eq!(random_move_probability(40), 4.0 / 54.0);
    }

    #[test]
    fn test_custom_policy_searches_when_not_behind() {
        let b = board(positions::CAPTURE_READY);
        let margin = MarginHeuristic::for_side(Side::One);
        let expected = crate::alpha_beta(&b, Side::One, 3, &margin).best_move;

        for seed in 0..20 {
            let mut player = Player::new(Side::One, Policy::Custom, 3, margin).with_seed(seed);
            assert_eq!(Some(player.choose_move(&b).unwrap()), expected);
        }
    }

    #[test]
    fn test_custom_policy_gambles_when_far_behind() {
        let trailing = board("4,4,4,4,4,4/4,4,4,4,4,4 0 10");
        let margin = MarginHeuristic::for_side(Side::One);
        let searched = crate::alpha_beta(&trailing, Side::One, 1, &margin).best_move;

        let mut player = Player::new(Side::One, Policy::Custom, 1, margin).with_seed(9);
        let deviations = (0..400)
            .map(|_| player.choose_move(&trailing).unwrap())
            .filter(|&chosen| Some(chosen) != searched)
            .count();

        assert!(deviations > 0, "custom policy never played at random");
        assert!(deviations < 100, "custom policy played at random {} times", deviations);
    }

    #[test]
    fn test_player_names() {
        let player = Player::new(Side::Two, Policy::Minimax, 4, Heuristic::Baseline);
        assert_eq!(player.name(), "minimax(Player 2, depth=4)");
        assert_eq!(player.side(), Side::Two);
        assert_eq!(player.depth(), 4);
        assert_eq!(player.policy(), Policy::Minimax);
    }
}

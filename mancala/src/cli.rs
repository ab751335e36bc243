//! Command-line interface for the mancala engine.

use clap::{Args, Parser, Subcommand, ValueEnum};
use mancala_agents::{Heuristic, MarginHeuristic, Policy};
use mancala_core::{positions, Side, DEFAULT_STONES};

/// Kalah with minimax and alpha-beta players
#[derive(Parser, Debug)]
#[command(name = "mancala")]
#[command(about = "Kalah with minimax and alpha-beta players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game between two players
    Play(PlayArgs),

    /// Search a position and report the best move
    Search {
        /// Board in notation, e.g. "4,4,4,4,4,4/4,4,4,4,4,4 0 0"
        #[arg(long, default_value = positions::STARTING)]
        position: String,

        /// Side to move (1 or 2)
        #[arg(long, default_value = "1")]
        side: Side,

        /// Search depth in plies
        #[arg(short, long, default_value_t = 6, env = "MANCALA_DEPTH")]
        depth: u8,

        /// Engine to run
        #[arg(long, value_enum, default_value_t = EngineChoice::Both)]
        engine: EngineChoice,

        /// Static evaluation used at the leaves
        #[arg(long, value_enum, default_value_t = HeuristicChoice::Tuned)]
        heuristic: HeuristicChoice,
    },

    /// Count the leaves of the move tree
    Perft {
        /// Depth in plies
        depth: u8,

        /// Board in notation
        #[arg(long, default_value = positions::STARTING)]
        position: String,

        /// Side to move (1 or 2)
        #[arg(long, default_value = "1")]
        side: Side,

        /// Show the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

/// Options for a single game
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Policy for player 1: human, random, minimax, alphabeta or custom
    #[arg(long = "p1", default_value = "human")]
    pub player1: Policy,

    /// Policy for player 2: human, random, minimax, alphabeta or custom
    #[arg(long = "p2", default_value = "custom")]
    pub player2: Policy,

    /// Search depth for player 1
    #[arg(long, default_value_t = 4, env = "MANCALA_DEPTH")]
    pub depth1: u8,

    /// Search depth for player 2
    #[arg(long, default_value_t = 4, env = "MANCALA_DEPTH")]
    pub depth2: u8,

    /// Static evaluation for player 1
    #[arg(long, value_enum, default_value_t = HeuristicChoice::Tuned)]
    pub heuristic1: HeuristicChoice,

    /// Static evaluation for player 2
    #[arg(long, value_enum, default_value_t = HeuristicChoice::Tuned)]
    pub heuristic2: HeuristicChoice,

    /// Stones per pit at the start
    #[arg(long, default_value_t = DEFAULT_STONES)]
    pub stones: u8,

    /// Side that moves first
    #[arg(long, default_value = "1")]
    pub first: Side,

    /// Seed for reproducible random choices
    #[arg(long, env = "MANCALA_SEED")]
    pub seed: Option<u64>,
}

/// Engines the search command can run
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    Minimax,
    Alphabeta,
    Both,
}

/// Named static evaluations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeuristicChoice {
    /// 100 for a win, 0 for a loss, 50 otherwise
    Baseline,
    /// Store and stones-in-play difference
    Margin,
    /// Margin, plus the empty-pit bonus when playing second
    Tuned,
}

impl HeuristicChoice {
    /// The evaluation this choice stands for when playing `side`.
    pub fn for_side(self, side: Side) -> Heuristic {
        match self {
            HeuristicChoice::Baseline => Heuristic::Baseline,
            HeuristicChoice::Margin => Heuristic::Margin(MarginHeuristic::new(false)),
            HeuristicChoice::Tuned => Heuristic::margin_for(side),
        }
    }
}

use log::{debug, info};
use mancala_agents::{Agent, AgentError};
use mancala_core::{BoardError, MancalaBoard, Pit, Side};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("{agent} tried an illegal move: {source}")]
    IllegalMove { agent: String, source: BoardError },
}

/// How a hosted game ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub board: MancalaBoard,
    pub moves: Vec<(Side, Pit)>,
    pub resigned: Option<Side>,
}

impl GameRecord {
    /// The winning side, or None on a draw.
    pub fn winner(&self) -> Option<Side> {
        match self.resigned {
            Some(side) => Some(side.opponent()),
            None => self.board.winner(),
        }
    }
}

/// Runs a game to completion. `agents[0]` plays player 1 and `agents[1]`
/// player 2. A side that lands its last stone in its own store moves again.
/// `observer` sees the board after every move.
pub fn host_game<F>(
    mut board: MancalaBoard,
    first: Side,
    agents: &mut [Box<dyn Agent>; 2],
    mut observer: F,
) -> Result<GameRecord, GameError>
where
    F: FnMut(&MancalaBoard, Side, Pit),
{
    debug_assert!(agents.iter().zip(Side::ALL).all(|(agent, side)| agent.side() == side));

    let mut turn = first;
    let mut moves = Vec::new();

    while !board.is_game_over() {
        let agent = &mut agents[turn.index()];
        let pit = match agent.choose_move(&board) {
            Ok(pit) => pit,
            Err(AgentError::Resigned(side)) => {
                info!("{} resigned", agent.name());
                return Ok(GameRecord {
                    board,
                    moves,
                    resigned: Some(side),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let extra_turn = board
            .make_move(turn, pit)
            .map_err(|source| GameError::IllegalMove {
                agent: agent.name().to_string(),
                source,
            })?;
        debug!("{} played pit {}: {}", agent.name(), pit, board);

        moves.push((turn, pit));
        observer(&board, turn, pit);

        if extra_turn && !board.is_game_over() {
            debug!("{} moves again", turn);
        } else {
            turn = turn.opponent();
        }
    }

    info!(
        "game over after {} moves: {} {} - {} {}",
        moves.len(),
        Side::One,
        board.store(Side::One),
        board.store(Side::Two),
        Side::Two
    );

    Ok(GameRecord {
        board,
        moves,
        resigned: None,
    })
}

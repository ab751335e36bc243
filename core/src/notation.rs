use crate::board::MancalaBoard;
use crate::types::*;
use std::fmt;
use thiserror::Error;

/// Compact text notation for a board, in the spirit of FEN:
/// `"<player 1 pits>/<player 2 pits> <store 1> <store 2>"`, with each row's
/// pits comma-separated from pit 1 to pit 6.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid notation format: {0}")]
    InvalidFormat(String),
    #[error("invalid stone count: {0}")]
    InvalidCount(String),
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

impl MancalaBoard {
    /// Parses a board from notation.
    /// Starting position: "4,4,4,4,4,4/4,4,4,4,4,4 0 0"
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(NotationError::InvalidFormat(format!(
                "Expected 3 fields, got {}",
                parts.len()
            )));
        }

        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != 2 {
            return Err(NotationError::InvalidFormat(format!(
                "Expected 2 rows, got {}",
                rows.len()
            )));
        }

        let pits = [parse_row(rows[0])?, parse_row(rows[1])?];
        let stores = [parse_count(parts[1])?, parse_count(parts[2])?];

        Ok(MancalaBoard::from_parts(pits, stores)?)
    }

    /// Converts the board to notation.
    pub fn to_notation(&self) -> String {
        format!(
            "{}/{} {} {}",
            row_to_notation(self.pits(Side::One)),
            row_to_notation(self.pits(Side::Two)),
            self.store(Side::One),
            self.store(Side::Two)
        )
    }
}

impl fmt::Display for MancalaBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

fn parse_row(row: &str) -> Result<[u8; PITS_PER_SIDE], NotationError> {
    let counts: Vec<&str> = row.split(',').collect();
    if counts.len() != PITS_PER_SIDE {
        return Err(NotationError::InvalidFormat(format!(
            "Row '{}' has {} pits, expected {}",
            row,
            counts.len(),
            PITS_PER_SIDE
        )));
    }

    let mut pits = [0; PITS_PER_SIDE];
    for (pit, count) in pits.iter_mut().zip(counts) {
        *pit = parse_count(count)?;
    }
    Ok(pits)
}

fn parse_count(count: &str) -> Result<u8, NotationError> {
    count
        .trim()
        .parse::<u8>()
        .map_err(|_| NotationError::InvalidCount(count.to_string()))
}

fn row_to_notation(row: &[u8; PITS_PER_SIDE]) -> String {
    row.iter()
        .map(|count| count.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Reference positions used by tests and the command line.
pub mod positions {
    /// Standard opening: four stones per pit.
    pub const STARTING: &str = "4,4,4,4,4,4/4,4,4,4,4,4 0 0";

    /// Middle game with captures available to both sides.
    pub const CAPTURE_READY: &str = "1,0,3,4,5,6/4,4,0,6,5,1 4 5";

    /// Player 1 wins on the spot with the capture from pit 4.
    pub const NEAR_END: &str = "0,1,0,1,0,0/0,3,0,0,0,0 12 12";
}

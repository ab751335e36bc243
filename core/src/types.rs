use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of pits on each side of the board.
pub const PITS_PER_SIDE: usize = 6;

/// Stones placed in every pit at the start of a standard game.
pub const DEFAULT_STONES: u8 = 4;

/// Upper bound on the stones a board may hold (counts are stored as `u8`).
pub const MAX_TOTAL_STONES: u32 = u8::MAX as u32;

/// Errors raised by board construction, parsing and move validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid side: {0}")]
    InvalidSide(String),
    #[error("invalid pit: {0} (expected 1-{})", PITS_PER_SIDE)]
    InvalidPit(String),
    #[error("board would hold {0} stones (at most {})", MAX_TOTAL_STONES)]
    TooManyStones(u32),
    #[error("{side} cannot play pit {pit}")]
    IllegalMove { side: Side, pit: Pit },
}

/// One of the two players.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::One, Side::Two];

    /// Returns the other side.
    pub const fn opponent(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Array index of this side (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    /// The player number shown to humans (1 or 2).
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl FromStr for Side {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" => Ok(Side::One),
            "2" | "two" => Ok(Side::Two),
            _ => Err(BoardError::InvalidSide(s.to_string())),
        }
    }
}

/// A pit on the mover's own row, numbered 1 to `PITS_PER_SIDE`.
/// Using a newtype keeps every move token in range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Pit(u8);

impl Pit {
    /// Creates a pit from its 1-based number.
    /// Returns None if the number is out of range.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= PITS_PER_SIDE {
            Some(Pit(number))
        } else {
            None
        }
    }

    /// Creates a pit from a 0-based row index.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PITS_PER_SIDE {
            Some(Pit(index as u8 + 1))
        } else {
            None
        }
    }

    /// The 1-based pit number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The 0-based index into a row.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Index of the pit facing this one across the board.
    pub const fn opposite_index(self) -> usize {
        PITS_PER_SIDE - self.0 as usize
    }

    /// All pits in row order.
    pub fn all() -> impl DoubleEndedIterator<Item = Pit> {
        (1..=PITS_PER_SIDE as u8).map(Pit)
    }
}

impl fmt::Display for Pit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pit {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Pit::new)
            .ok_or_else(|| BoardError::InvalidPit(s.to_string()))
    }
}

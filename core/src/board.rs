use crate::types::*;

/// Where the last sown stone came to rest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Landing {
    Store,
    Pit(Side, Pit),
}

/// Complete Kalah position: two rows of pits and a store per side.
///
/// The board is `Copy` and 14 bytes wide, so successors produced by
/// [`MancalaBoard::apply_move`] never share state with their parent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MancalaBoard {
    pits: [[u8; PITS_PER_SIDE]; 2],
    stores: [u8; 2],
}

impl MancalaBoard {
    /// Creates the standard opening position.
    pub const fn new() -> Self {
        Self {
            pits: [[DEFAULT_STONES; PITS_PER_SIDE]; 2],
            stores: [0; 2],
        }
    }

    /// Creates an opening position with `stones` in every pit.
    pub fn with_stones(stones: u8) -> Result<Self, BoardError> {
        Self::from_parts([[stones; PITS_PER_SIDE]; 2], [0; 2])
    }

    /// Builds a board from explicit pit rows and stores, indexed by `Side::index`.
    pub fn from_parts(
        pits: [[u8; PITS_PER_SIDE]; 2],
        stores: [u8; 2],
    ) -> Result<Self, BoardError> {
        let total: u32 = pits.iter().flatten().map(|&s| u32::from(s)).sum::<u32>()
            + stores.iter().map(|&s| u32::from(s)).sum::<u32>();
        if total > MAX_TOTAL_STONES {
            return Err(BoardError::TooManyStones(total));
        }
        Ok(Self { pits, stores })
    }

    /// The row of pits belonging to `side`, pit 1 first.
    pub fn pits(&self, side: Side) -> &[u8; PITS_PER_SIDE] {
        &self.pits[side.index()]
    }

    /// Stones in one pit of `side`'s row.
    pub fn stones(&self, side: Side, pit: Pit) -> u8 {
        self.pits[side.index()][pit.index()]
    }

    /// Stones banked in `side`'s store.
    pub fn store(&self, side: Side) -> u8 {
        self.stores[side.index()]
    }

    /// Stones still in play on `side`'s row.
    pub fn stones_in_play(&self, side: Side) -> u32 {
        self.pits(side).iter().map(|&s| u32::from(s)).sum()
    }

    /// Number of empty pits on `side`'s row.
    pub fn empty_pits(&self, side: Side) -> usize {
        self.pits(side).iter().filter(|&&s| s == 0).count()
    }

    /// Every stone on the board, stores included.
    pub fn total_stones(&self) -> u32 {
        Side::ALL
            .iter()
            .map(|&side| self.stones_in_play(side) + u32::from(self.store(side)))
            .sum()
    }

    /// `side`'s store minus the opponent's store.
    pub fn store_margin(&self, side: Side) -> i32 {
        i32::from(self.store(side)) - i32::from(self.store(side.opponent()))
    }

    /// Non-empty pits of `side`, in ascending pit order.
    pub fn legal_moves(&self, side: Side) -> Vec<Pit> {
        if self.is_game_over() {
            return Vec::new();
        }
        Pit::all().filter(|&pit| self.stones(side, pit) > 0).collect()
    }

    /// Returns true if `side` may sow from `pit`.
    pub fn is_legal(&self, side: Side, pit: Pit) -> bool {
        !self.is_game_over() && self.stones(side, pit) > 0
    }

    /// The game ends as soon as either row is empty.
    pub fn is_game_over(&self) -> bool {
        Side::ALL.iter().any(|&side| self.stones_in_play(side) == 0)
    }

    /// Returns true if the game is over and `side` banked strictly more stones.
    pub fn has_won(&self, side: Side) -> bool {
        self.is_game_over() && self.store(side) > self.store(side.opponent())
    }

    /// The winning side of a finished game; None while playing or on a draw.
    pub fn winner(&self) -> Option<Side> {
        Side::ALL.into_iter().find(|&side| self.has_won(side))
    }

    /// Plays `pit` for `side` in place.
    /// Returns true if `side` earned another turn.
    pub fn make_move(&mut self, side: Side, pit: Pit) -> Result<bool, BoardError> {
        if !self.is_legal(side, pit) {
            return Err(BoardError::IllegalMove { side, pit });
        }
        Ok(self.sow(side, pit))
    }

    /// Returns the board after `side` plays `pit`, leaving `self` untouched.
    pub fn apply_move(&self, side: Side, pit: Pit) -> Self {
        debug_assert!(self.is_legal(side, pit), "{side} cannot play pit {pit}");
        let mut next = *self;
        next.sow(side, pit);
        next
    }

    fn sow(&mut self, side: Side, pit: Pit) -> bool {
        let mut stones = std::mem::take(&mut self.pits[side.index()][pit.index()]);
        if stones == 0 {
            return false;
        }

        let mut row = side;
        let mut next = pit.index() + 1;
        let mut landing = Landing::Store;

        while stones > 0 {
            match Pit::from_index(next) {
                Some(target) => {
                    self.pits[row.index()][target.index()] += 1;
                    landing = Landing::Pit(row, target);
                    stones -= 1;
                    next += 1;
                }
                None => {
                    // The opponent's store is skipped
                    if row == side {
                        self.stores[side.index()] += 1;
                        landing = Landing::Store;
                        stones -= 1;
                    }
                    row = row.opponent();
                    next = 0;
                }
            }
        }

        if let Landing::Pit(row, last) = landing {
            if row == side && self.stones(side, last) == 1 {
                self.capture(side, last);
            }
        }

        if self.is_game_over() {
            self.sweep();
            return false;
        }

        landing == Landing::Store
    }

    fn capture(&mut self, side: Side, pit: Pit) {
        let opposite = pit.opposite_index();
        let captured = self.pits[side.opponent().index()][opposite];
        if captured == 0 {
            return;
        }
        self.pits[side.opponent().index()][opposite] = 0;
        self.pits[side.index()][pit.index()] = 0;
        self.stores[side.index()] += captured + 1;
    }

    fn sweep(&mut self) {
        for side in Side::ALL {
            let remaining: u8 = self.pits[side.index()].iter().sum();
            self.stores[side.index()] += remaining;
            self.pits[side.index()] = [0; PITS_PER_SIDE];
        }
    }
}

impl Default for MancalaBoard {
    fn default() -> Self {
        Self::new()
    }
}

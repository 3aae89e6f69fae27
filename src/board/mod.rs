//! Board representation for gravity connection games

pub mod board;


// Re-exports
pub use board::{Board, BoardError, Probe};

/// Players. `One` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Dense index (0 for `One`, 1 for `Two`) for key tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Filled(Player),
}

/// Game state derived from the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Game still in progress
    Open,
    /// Grid full with no completed line
    Draw,
    /// The given player completed a line
    Won(Player),
}

/// A placed token: where it landed and who placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
}

impl Placement {
    #[inline]
    pub fn new(row: usize, column: usize, player: Player) -> Self {
        Self {
            row,
            column,
            player,
        }
    }
}

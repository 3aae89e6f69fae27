//! Board structure with an undo stack

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{Cell, Outcome, Placement, Player};
use crate::rules::completes_line;

/// Errors raised by board mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("game is already over ({0:?})")]
    GameOver(Outcome),
}

/// Record of a move for undo
#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveRecord {
    placement: Placement,
    /// Outcome before this move was played
    previous: Outcome,
}

/// M×N gravity grid. Row 0 is the bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    win_length: usize,
    cells: Vec<Cell>,
    /// Number of tokens in each column
    heights: Vec<usize>,
    history: Vec<MoveRecord>,
    outcome: Outcome,
}

impl Board {
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Self {
        Self {
            rows,
            columns,
            win_length,
            cells: vec![Cell::Empty; rows * columns],
            heights: vec![0; columns],
            history: Vec::with_capacity(rows * columns),
            outcome: Outcome::Open,
        }
    }

    /// Replay a list of columns from the empty board.
    pub fn from_moves(
        rows: usize,
        columns: usize,
        win_length: usize,
        moves: &[usize],
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, columns, win_length);
        for &column in moves {
            board.place(column)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Get cell contents. Out-of-range coordinates read as empty.
    #[inline]
    pub fn cell_at(&self, row: usize, column: usize) -> Cell {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column]
        } else {
            Cell::Empty
        }
    }

    #[inline]
    pub fn is_full(&self, column: usize) -> bool {
        self.heights.get(column).map_or(true, |&h| h >= self.rows)
    }

    /// Tokens currently in `column`
    #[inline]
    pub fn height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(0)
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn side_to_move(&self) -> Player {
        if self.history.len() % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    #[inline]
    pub fn current_outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn last_move(&self) -> Option<Placement> {
        self.history.last().map(|r| r.placement)
    }

    /// Every placed token, oldest first.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Placement> + '_ {
        self.history.iter().map(|r| r.placement)
    }

    /// Columns that accept a token. Empty once the game is decided.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.outcome != Outcome::Open {
            return Vec::new();
        }
        (0..self.columns).filter(|&c| !self.is_full(c)).collect()
    }

    /// Drop a token for the side to move into `column`.
    pub fn place(&mut self, column: usize) -> Result<Outcome, BoardError> {
        if column >= self.columns {
            return Err(BoardError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        if self.outcome != Outcome::Open {
            return Err(BoardError::GameOver(self.outcome));
        }
        if self.is_full(column) {
            return Err(BoardError::ColumnFull(column));
        }

        let player = self.side_to_move();
        let row = self.heights[column];
        let placement = Placement::new(row, column, player);
        self.cells[row * self.columns + column] = Cell::Filled(player);
        self.heights[column] += 1;
        self.history.push(MoveRecord {
            placement,
            previous: self.outcome,
        });

        self.outcome = if completes_line(self, placement) {
            Outcome::Won(player)
        } else if self.history.len() == self.rows * self.columns {
            Outcome::Draw
        } else {
            Outcome::Open
        };
        Ok(self.outcome)
    }

    /// Take back the most recent move.
    pub fn undo(&mut self) -> Option<Placement> {
        let record = self.history.pop()?;
        let p = record.placement;
        self.cells[p.row * self.columns + p.column] = Cell::Empty;
        self.heights[p.column] -= 1;
        self.outcome = record.previous;
        Some(p)
    }

    /// Place a token and get a guard that takes it back when dropped.
    ///
    /// Returns `None` when the move is not playable (full column, finished
    /// game, out of range).
    #[inline]
    pub fn probe(&mut self, column: usize) -> Option<Probe<'_>> {
        self.place(column).ok()?;
        Some(Probe { board: self })
    }
}

/// A placement that is undone when the guard goes out of scope.
pub struct Probe<'a> {
    board: &'a mut Board,
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.board.undo();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let ch = match self.cell_at(row, column) {
                    Cell::Empty => '.',
                    Cell::Filled(Player::One) => 'O',
                    Cell::Filled(Player::Two) => 'X',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        for column in 0..self.columns {
            write!(f, "{}", column % 10)?;
        }
        writeln!(f)
    }
}

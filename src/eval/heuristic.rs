//! Heuristic evaluation function for connection-game positions
//!
//! This module provides the static evaluation used at the leaves of the
//! alpha-beta search. It scores positions based on:
//! - Win/loss/draw detection
//! - Column control (center-biased, by move-order rank)
//! - Open K-windows along rows, diagonals and anti-diagonals
//!
//! All scores are from the engine's own perspective: positive favors the
//! engine whichever color it plays.

use crate::board::{Board, Cell, Outcome, Player};
use crate::search::MoveOrder;

use super::score::Score;

/// Score per token inside a window that only one player occupies
pub const WINDOW_WEIGHT: i64 = 10;

/// Static evaluator bound to one side.
#[derive(Debug, Clone)]
pub struct Evaluator {
    own: Player,
    win_length: usize,
    /// Weight per board column: `N - rank` where rank is the column's
    /// position in the search order (center column gets `N`)
    column_weights: Vec<i64>,
}

impl Evaluator {
    #[must_use]
    pub fn new(own: Player, order: &MoveOrder, win_length: usize) -> Self {
        let columns = order.len();
        let column_weights = (0..columns)
            .map(|column| (columns - order.rank_of(column)) as i64)
            .collect();
        Self {
            own,
            win_length,
            column_weights,
        }
    }

    /// The side whose wins count as `Score::Win`
    #[inline]
    pub fn own(&self) -> Player {
        self.own
    }

    /// Evaluate the board from the engine's perspective.
    ///
    /// Returns:
    /// - `Score::Win` / `Score::Loss` for decided games
    /// - `Score::DRAW` for a full board without a line
    /// - a clamped `Score::Heuristic` for open positions
    #[must_use]
    pub fn evaluate(&self, board: &Board) -> Score {
        match board.current_outcome() {
            Outcome::Open => Score::heuristic(self.heuristic(board)),
            Outcome::Draw => Score::DRAW,
            Outcome::Won(player) if player == self.own => Score::Win,
            Outcome::Won(_) => Score::Loss,
        }
    }

    /// Raw (unclamped) heuristic sum for an open position.
    #[must_use]
    pub fn heuristic(&self, board: &Board) -> i64 {
        self.column_control(board)
            + self.row_windows(board)
            + self.diagonal_windows(board)
            + self.anti_diagonal_windows(board)
    }

    #[inline]
    fn sign(&self, player: Player) -> i64 {
        if player == self.own {
            1
        } else {
            -1
        }
    }

    /// Tokens below the first gap of each column, weighted by column rank.
    fn column_control(&self, board: &Board) -> i64 {
        let mut total = 0;
        for (column, &weight) in self.column_weights.iter().enumerate() {
            for row in 0..board.rows() {
                match board.cell_at(row, column) {
                    Cell::Empty => break,
                    Cell::Filled(player) => total += self.sign(player) * weight,
                }
            }
        }
        total
    }

    /// Score one K-window starting at (row, column) stepping by (dr, dc).
    ///
    /// Mixed windows can never become a line and score 0.
    fn window(&self, board: &Board, row: usize, column: usize, dr: isize, dc: isize) -> i64 {
        let mut own = 0;
        let mut other = 0;
        for i in 0..self.win_length as isize {
            let r = (row as isize + dr * i) as usize;
            let c = (column as isize + dc * i) as usize;
            match board.cell_at(r, c) {
                Cell::Empty => {}
                Cell::Filled(player) if player == self.own => own += 1,
                Cell::Filled(_) => other += 1,
            }
        }
        match (own, other) {
            (0, 0) => 0,
            (n, 0) => WINDOW_WEIGHT * n,
            (0, n) => -WINDOW_WEIGHT * n,
            _ => 0,
        }
    }

    fn row_windows(&self, board: &Board) -> i64 {
        let k = self.win_length;
        if k > board.columns() {
            return 0;
        }
        let mut total = 0;
        for row in 0..board.rows() {
            for column in 0..=board.columns() - k {
                total += self.window(board, row, column, 0, 1);
            }
        }
        total
    }

    fn diagonal_windows(&self, board: &Board) -> i64 {
        let k = self.win_length;
        if k > board.rows() || k > board.columns() {
            return 0;
        }
        let mut total = 0;
        for row in 0..=board.rows() - k {
            for column in 0..=board.columns() - k {
                total += self.window(board, row, column, 1, 1);
            }
        }
        total
    }

    fn anti_diagonal_windows(&self, board: &Board) -> i64 {
        let k = self.win_length;
        if k > board.rows() || k > board.columns() {
            return 0;
        }
        let mut total = 0;
        for row in 0..=board.rows() - k {
            for column in k - 1..board.columns() {
                total += self.window(board, row, column, 1, -1);
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(own: Player, columns: usize, k: usize) -> Evaluator {
        Evaluator::new(own, &MoveOrder::center_out(columns), k)
    }

    #[test]
    fn test_empty_board_is_neutral() {
        let board = Board::new(6, 7, 4);
        assert_eq!(evaluator(Player::One, 7, 4).evaluate(&board), Score::Heuristic(0));
    }

    #[test]
    fn test_center_token_score() {
        let board = Board::from_moves(6, 7, 4, &[3]).unwrap();
        // column weight 7, four row windows, one diagonal, one anti-diagonal
        assert_eq!(evaluator(Player::One, 7, 4).heuristic(&board), 7 + 40 + 10 + 10);
    }

    #[test]
    fn test_perspective_is_symmetric() {
        let board = Board::from_moves(6, 7, 4, &[3, 2, 3, 4, 1]).unwrap();
        let one = evaluator(Player::One, 7, 4).heuristic(&board);
        let two = evaluator(Player::Two, 7, 4).heuristic(&board);
        assert_eq!(one, -two);
    }

    #[test]
    fn test_column_weight_follows_search_rank() {
        // N=4 order is [2, 1, 3, 0]: weights col2=4, col1=3, col3=2, col0=1
        let eval = evaluator(Player::One, 4, 4);
        assert_eq!(eval.column_weights, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_mixed_window_ignored() {
        // Single-row board: One at col 0, Two at col 3, the only window is mixed
        let board = Board::from_moves(1, 4, 4, &[0, 3]).unwrap();
        // column control: +1 (col 0) - 2 (col 3)
        assert_eq!(evaluator(Player::One, 4, 4).heuristic(&board), -1);
    }

    #[test]
    fn test_win_and_loss_are_proven() {
        let board = Board::from_moves(6, 7, 4, &[0, 0, 1, 1, 2, 2, 3]).unwrap();
        assert_eq!(evaluator(Player::One, 7, 4).evaluate(&board), Score::Win);
        assert_eq!(evaluator(Player::Two, 7, 4).evaluate(&board), Score::Loss);
    }

    #[test]
    fn test_draw_scores_zero() {
        let board = Board::from_moves(2, 2, 3, &[0, 1, 0, 1]).unwrap();
        assert_eq!(board.current_outcome(), Outcome::Draw);
        assert_eq!(evaluator(Player::One, 2, 3).evaluate(&board), Score::DRAW);
        assert_eq!(evaluator(Player::Two, 2, 3).evaluate(&board), Score::DRAW);
    }

    #[test]
    fn test_win_length_larger_than_board() {
        let board = Board::from_moves(2, 2, 3, &[0]).unwrap();
        // Only column control applies: N=2 order [1, 0], col 0 weight 1
        assert_eq!(evaluator(Player::One, 2, 3).heuristic(&board), 1);
    }
}

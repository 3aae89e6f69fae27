//! Win condition checking for K-in-a-row gravity games
//!
//! A player wins by aligning `win_length` (K) or more of their own tokens
//! horizontally, vertically, or along either diagonal. Longer runs also win.

use crate::board::{Board, Cell, Placement, Player};

/// Direction vectors for line checking (4 directions)
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal
    (1, -1), // Anti-diagonal
];

/// Count consecutive `player` tokens from (row, column) stepping by (dr, dc),
/// excluding the starting cell.
#[inline]
fn run_length(board: &Board, row: usize, column: usize, dr: isize, dc: isize, player: Player) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = column as isize + dc;
    while r >= 0
        && c >= 0
        && (r as usize) < board.rows()
        && (c as usize) < board.columns()
        && board.cell_at(r as usize, c as usize) == Cell::Filled(player)
    {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Fast line check through a freshly placed token.
///
/// Only looks along the 4 directions through `placement`. No allocation.
#[inline]
pub fn completes_line(board: &Board, placement: Placement) -> bool {
    let Placement {
        row,
        column,
        player,
    } = placement;
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + run_length(board, row, column, dr, dc, player)
            + run_length(board, row, column, -dr, -dc, player)
            >= board.win_length()
    })
}

/// Scan the whole board for a completed line.
///
/// Returns the first player found with a K-run, or `None`.
pub fn find_winner(board: &Board) -> Option<Player> {
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            if let Cell::Filled(player) = board.cell_at(row, column) {
                if completes_line(board, Placement::new(row, column, player)) {
                    return Some(player);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_on_open_board() {
        let board = Board::from_moves(6, 7, 4, &[3, 3, 4, 4]).unwrap();
        assert_eq!(find_winner(&board), None);
    }

    #[test]
    fn test_winner_horizontal() {
        let board = Board::from_moves(6, 7, 4, &[0, 0, 1, 1, 2, 2, 3]).unwrap();
        assert_eq!(find_winner(&board), Some(Player::One));
    }

    #[test]
    fn test_winner_vertical_second_player() {
        let board = Board::from_moves(6, 7, 4, &[0, 1, 2, 1, 3, 1, 6, 1]).unwrap();
        assert_eq!(find_winner(&board), Some(Player::Two));
    }

    #[test]
    fn test_completes_line_only_through_placement() {
        let board = Board::from_moves(6, 7, 4, &[0, 6, 1, 6, 2]).unwrap();
        // One holds (0,0) (0,1) (0,2): three, not four
        assert!(!completes_line(&board, Placement::new(0, 2, Player::One)));
        assert!(!completes_line(&board, Placement::new(1, 6, Player::Two)));
    }

    #[test]
    fn test_longer_run_also_wins() {
        // K=3 on a wide board; a run of 3 completed in the middle
        let board = Board::from_moves(3, 7, 3, &[0, 0, 2, 2, 1]).unwrap();
        assert_eq!(find_winner(&board), Some(Player::One));
        assert!(completes_line(&board, Placement::new(0, 1, Player::One)));
    }

    #[test]
    fn test_win_length_one() {
        let board = Board::from_moves(3, 3, 1, &[1]).unwrap();
        assert_eq!(find_winner(&board), Some(Player::One));
    }
}

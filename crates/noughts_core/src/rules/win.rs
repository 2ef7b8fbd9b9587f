//! Win detection logic for tic-tac-toe.

use tracing::instrument;

use crate::{Board, Mark, Square};

/// The eight winning index triples: rows, then columns, then diagonals.
pub const WIN_COMBINATIONS: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed combination and its mark.
#[instrument(level = "trace")]
pub fn winning_line(board: &Board) -> Option<([usize; 3], Mark)> {
    let squares = board.squares();
    WIN_COMBINATIONS.iter().find_map(|&[a, b, c]| {
        match (squares[a], squares[b], squares[c]) {
            (Square::Occupied(p1), Square::Occupied(p2), Square::Occupied(p3))
                if p1 == p2 && p2 == p3 =>
            {
                Some(([a, b, c], p1))
            }
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a mark has three in a row, `None` otherwise.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [&str; 9]) -> Board {
        Board::from_cells(&cells).unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let b = board(["X", "X", "X", "O", "O", "", "", "", ""]);
        assert_eq!(check_winner(&b), Some(Mark::X));
        assert_eq!(winning_line(&b), Some(([0, 1, 2], Mark::X)));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let b = board(["X", "X", "O", "", "O", "", "O", "X", ""]);
        assert_eq!(winning_line(&b), Some(([2, 4, 6], Mark::O)));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let b = board(["X", "X", "", "", "", "", "", "", ""]);
        assert_eq!(check_winner(&b), None);
    }

    #[test]
    fn test_double_win_reports_first_combination() {
        // Illegal position: O completes the middle row, X the top row.
        let b = board(["X", "X", "X", "O", "O", "O", "", "", ""]);
        assert_eq!(check_winner(&b), Some(Mark::X));
    }
}

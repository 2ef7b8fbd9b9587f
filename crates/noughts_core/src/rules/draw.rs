//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use crate::Board;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner is a draw.
#[instrument(level = "trace")]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

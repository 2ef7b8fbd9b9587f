//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are separated from board
//! storage so the session and the move selector can share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_COMBINATIONS, check_winner, winning_line};

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, Mark, RulesError};

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and at least one empty square.
    Ongoing,
    /// A mark completed a line.
    Win(Mark),
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

/// Evaluates a board.
///
/// Combinations are checked rows, then columns, then diagonals; the first
/// completed one decides the winner even on a board with two completed lines.
#[instrument(level = "trace")]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::Win(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// Evaluates loosely typed cells (`""`, `"X"`, `"O"`).
///
/// Fails with an `InvalidBoard` error unless given exactly nine valid cells.
#[instrument]
pub fn evaluate_cells<S: AsRef<str> + Debug>(cells: &[S]) -> Result<Outcome, RulesError> {
    Board::from_cells(cells).map(|board| evaluate(&board))
}

//! Rule error types.

use derive_more::{Display, Error};

use crate::Mark;

/// What went wrong when the rules rejected an input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RulesErrorKind {
    /// Board has the wrong number of cells or an unknown cell symbol.
    #[display("invalid board: {_0}")]
    InvalidBoard(String),
    /// Acting mark is neither X nor O.
    #[display("invalid mark: {_0:?}")]
    InvalidMark(String),
    /// Move selection was requested on a full board.
    #[display("no legal move: board is full")]
    NoLegalMove,
    /// Cell index outside 0-8.
    #[display("position {_0} is out of bounds (must be 0-8)")]
    OutOfBounds(usize),
    /// Cell already holds a mark.
    #[display("square {_0} is already occupied")]
    CellOccupied(usize),
    /// The game already reached a terminal outcome.
    #[display("game is already over")]
    GameOver,
    /// An automated move arrived when the computer is not to move.
    #[display("{_0} is not the mark to move")]
    OutOfTurn(Mark),
}

/// Rules error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Rules error: {} at {}:{}", kind, file, line)]
pub struct RulesError {
    /// Error kind.
    pub kind: RulesErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RulesError {
    /// Creates a new rules error with caller location tracking.
    #[track_caller]
    pub fn new(kind: RulesErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &RulesErrorKind {
        &self.kind
    }
}

impl From<RulesErrorKind> for RulesError {
    #[track_caller]
    fn from(kind: RulesErrorKind) -> Self {
        Self::new(kind)
    }
}

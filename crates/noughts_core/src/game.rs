//! Game session state.
//!
//! `Game` owns everything that changes during a match: the board, whose
//! turn it is, the outcome, and the move history. The rules and the move
//! selector stay stateless and receive the board as a parameter.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    Board, Difficulty, Mark, Outcome, RandomSource, RulesError, RulesErrorKind, evaluate,
    select_move,
};

/// Who controls the O mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Human plays X, the computer plays O.
    #[default]
    SinglePlayer,
    /// Two humans share the board.
    TwoPlayer,
}

impl GameMode {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SinglePlayer => "1 Player",
            Self::TwoPlayer => "2 Players",
        }
    }
}

/// A tic-tac-toe match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Game {
    board: Board,
    to_move: Mark,
    outcome: Outcome,
    history: Vec<usize>,
    mode: GameMode,
    difficulty: Difficulty,
    automated_mark: Mark,
    #[getter(skip)]
    result_recorded: bool,
}

impl Game {
    /// Creates a new game; X moves first and the computer plays O.
    #[instrument]
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            outcome: Outcome::Ongoing,
            history: Vec::new(),
            mode,
            difficulty,
            automated_mark: Mark::O,
            result_recorded: false,
        }
    }

    /// True while no terminal outcome has been reached.
    pub fn is_ongoing(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// True when the computer should move next.
    pub fn is_automated_turn(&self) -> bool {
        self.mode == GameMode::SinglePlayer
            && self.is_ongoing()
            && self.to_move == self.automated_mark
    }

    /// Places the mark to move at `pos`.
    ///
    /// Re-evaluates the board afterwards; the turn passes only while the
    /// game is still ongoing.
    #[instrument(skip(self))]
    pub fn play(&mut self, pos: usize) -> Result<Outcome, RulesError> {
        if !self.is_ongoing() {
            return Err(RulesError::new(RulesErrorKind::GameOver));
        }

        let mark = self.to_move;
        self.board.place(pos, mark)?;
        self.history.push(pos);
        self.outcome = evaluate(&self.board);
        debug!(position = pos, outcome = ?self.outcome, "Mark placed");

        if self.is_ongoing() {
            self.to_move = mark.opponent();
        } else {
            info!(outcome = ?self.outcome, moves = self.history.len(), "Game over");
        }
        Ok(self.outcome)
    }

    /// Asks the move selector for the computer's square.
    #[instrument(skip(self, rng))]
    pub fn choose_automated_move<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<usize, RulesError> {
        if !self.is_ongoing() {
            return Err(RulesError::new(RulesErrorKind::GameOver));
        }
        select_move(&self.board, self.automated_mark, self.difficulty, rng)
    }

    /// Applies a square chosen earlier by [`Game::choose_automated_move`].
    ///
    /// The square is re-validated: if the game ended or the square filled
    /// since it was chosen, the move is rejected and nothing changes.
    #[instrument(skip(self))]
    pub fn apply_automated_move(&mut self, pos: usize) -> Result<Outcome, RulesError> {
        if !self.is_ongoing() {
            warn!(position = pos, "Discarding automated move after game over");
            return Err(RulesError::new(RulesErrorKind::GameOver));
        }
        if !self.is_automated_turn() {
            warn!(position = pos, "Discarding automated move outside its turn");
            return Err(RulesError::new(RulesErrorKind::OutOfTurn(
                self.automated_mark,
            )));
        }
        self.play(pos)
    }

    /// Returns the terminal outcome once per game, then `None`.
    ///
    /// Used to feed the statistics hook exactly once.
    pub fn take_unrecorded_outcome(&mut self) -> Option<Outcome> {
        if self.result_recorded || !self.outcome.is_terminal() {
            return None;
        }
        self.result_recorded = true;
        Some(self.outcome)
    }

    /// Clears the board for a new match with the same mode and difficulty.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Game reset");
        *self = Self::new(self.mode, self.difficulty);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameMode::default(), Difficulty::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_passes_only_while_ongoing() {
        let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
        for pos in [0, 3, 1, 4] {
            game.play(pos).unwrap();
        }
        assert_eq!(*game.to_move(), Mark::X);
        assert_eq!(game.play(2).unwrap(), Outcome::Win(Mark::X));
        assert_eq!(*game.to_move(), Mark::X);
        let err = game.play(8).unwrap_err();
        assert_eq!(err.kind(), &RulesErrorKind::GameOver);
    }

    #[test]
    fn test_outcome_taken_once() {
        let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
        assert_eq!(game.take_unrecorded_outcome(), None);
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert_eq!(game.take_unrecorded_outcome(), Some(Outcome::Win(Mark::X)));
        assert_eq!(game.take_unrecorded_outcome(), None);
        game.reset();
        assert!(game.board().empty_positions().len() == 9);
        assert_eq!(*game.mode(), GameMode::TwoPlayer);
    }
}

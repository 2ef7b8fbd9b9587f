//! Tic-tac-toe rules for the Belgium vs France game.
//!
//! The decision core is two stateless pieces:
//!
//! - **Board evaluator**: [`evaluate`] maps a board to an [`Outcome`].
//! - **Move selector**: [`select_move`] picks a square for a mark under a
//!   [`Difficulty`], drawing randomness from an injected [`RandomSource`].
//!
//! [`Game`] is the session object the front end drives; it owns the board
//! and turn order and calls into the two pure functions.
//!
//! # Example
//!
//! ```
//! use noughts_core::{Board, Difficulty, Mark, Outcome, evaluate, select_move};
//! use rand::SeedableRng;
//!
//! let board = Board::new();
//! assert_eq!(evaluate(&board), Outcome::Ongoing);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let pos = select_move(&board, Mark::X, Difficulty::Hard, &mut rng).unwrap();
//! assert_eq!(pos, 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod position;
mod random;
pub mod rules;
mod selector;
mod types;

pub use error::{RulesError, RulesErrorKind};
pub use game::{Game, GameMode};
pub use position::Position;
pub use random::{RandomSource, ScriptedRandom};
pub use rules::{
    Outcome, WIN_COMBINATIONS, check_winner, evaluate, evaluate_cells, is_full, winning_line,
};
pub use selector::{
    Difficulty, MEDIUM_HARD_PROBABILITY, completing_cell, easy_move, hard_move, medium_move,
    select_move,
};
pub use types::{BOARD_CELLS, Board, Mark, Square};

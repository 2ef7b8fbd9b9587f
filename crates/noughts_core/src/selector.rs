//! Move selection for the computer opponent.
//!
//! A fixed greedy priority list, not a search: win now, block, center,
//! random corner, random remaining square. Easy plays uniformly at random
//! and Medium flips a fair coin between the two on every call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Board, Mark, Position, RandomSource, RulesError, RulesErrorKind, WIN_COMBINATIONS};

/// Probability that Medium plays the Hard policy on a given call.
pub const MEDIUM_HARD_PROBABILITY: f64 = 0.5;

/// Center square index.
const CENTER: usize = 4;

/// Which policy drives automated play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty square.
    Easy,
    /// Hard or Easy, chosen by a fair coin each call.
    Medium,
    /// Greedy tactical policy.
    #[default]
    Hard,
}

impl Difficulty {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// Chooses an empty square for `mark` under `difficulty`.
///
/// Fails with `NoLegalMove` on a full board. The returned index is always
/// empty on the board it was computed from.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn select_move<R: RandomSource + ?Sized>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, RulesError> {
    let pos = match difficulty {
        Difficulty::Easy => easy_move(board, rng)?,
        Difficulty::Medium => medium_move(board, mark, rng)?,
        Difficulty::Hard => hard_move(board, mark, rng)?,
    };
    debug!(position = pos, "Move selected");
    Ok(pos)
}

/// Greedy tactical policy.
#[instrument(level = "debug", skip(board, rng))]
pub fn hard_move<R: RandomSource + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Result<usize, RulesError> {
    if board.is_full() {
        return Err(RulesError::new(RulesErrorKind::NoLegalMove));
    }

    if let Some(pos) = completing_cell(board, mark) {
        debug!(position = pos, "Winning move");
        return Ok(pos);
    }

    if let Some(pos) = completing_cell(board, mark.opponent()) {
        debug!(position = pos, "Blocking opponent");
        return Ok(pos);
    }

    if board.is_empty(CENTER) {
        debug!(position = CENTER, "Taking center");
        return Ok(CENTER);
    }

    let corners: Vec<usize> = Position::CORNERS
        .iter()
        .map(|p| p.to_index())
        .filter(|&pos| board.is_empty(pos))
        .collect();
    if !corners.is_empty() {
        let pos = corners[rng.pick(corners.len())];
        debug!(position = pos, "Taking corner");
        return Ok(pos);
    }

    let pos = random_empty(board, rng)?;
    debug!(position = pos, "Taking remaining position");
    Ok(pos)
}

/// Uniformly random empty square.
#[instrument(level = "debug", skip(board, rng))]
pub fn easy_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, RulesError> {
    random_empty(board, rng)
}

/// Hard with probability [`MEDIUM_HARD_PROBABILITY`], Easy otherwise.
///
/// The coin is flipped anew on every call.
#[instrument(level = "debug", skip(board, rng))]
pub fn medium_move<R: RandomSource + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Result<usize, RulesError> {
    if board.is_full() {
        return Err(RulesError::new(RulesErrorKind::NoLegalMove));
    }
    if rng.coin(MEDIUM_HARD_PROBABILITY) {
        debug!("Medium playing strategically");
        hard_move(board, mark, rng)
    } else {
        debug!("Medium playing randomly");
        easy_move(board, rng)
    }
}

/// The empty square completing a line for `mark`.
///
/// Scans combinations in canonical order and stops at the first one holding
/// two of `mark` and one empty square.
pub fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    WIN_COMBINATIONS.iter().find_map(|combo| {
        let owned = combo
            .iter()
            .filter(|&&i| board.get(i).and_then(|s| s.mark()) == Some(mark))
            .count();
        let empty: Vec<usize> = combo
            .iter()
            .copied()
            .filter(|&i| board.is_empty(i))
            .collect();
        match (owned, empty.as_slice()) {
            (2, [pos]) => Some(*pos),
            _ => None,
        }
    })
}

fn random_empty<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, RulesError> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return Err(RulesError::new(RulesErrorKind::NoLegalMove));
    }
    Ok(empty[rng.pick(empty.len())])
}

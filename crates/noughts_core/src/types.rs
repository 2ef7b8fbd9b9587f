//! Core domain types for tic-tac-toe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{RulesError, RulesErrorKind};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Mark a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Mark {
    /// Mark X (Belgium, moves first).
    X,
    /// Mark O (France).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the one-letter symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Mark {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(RulesError::new(RulesErrorKind::InvalidMark(
                other.to_string(),
            ))),
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody played here.
    #[default]
    Empty,
    /// Square holds a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// Parses a cell symbol: `""` is empty, `"X"`/`"O"` are marks.
    pub fn from_symbol(symbol: &str) -> Result<Self, RulesError> {
        if symbol.trim().is_empty() {
            return Ok(Square::Empty);
        }
        symbol
            .parse::<Mark>()
            .map(Square::Occupied)
            .map_err(|_| {
                RulesError::new(RulesErrorKind::InvalidBoard(format!(
                    "unknown cell symbol {:?}",
                    symbol
                )))
            })
    }
}

/// 3x3 board, squares in row-major order (index = row * 3 + col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from loosely typed cells (`""`, `"X"`, `"O"`).
    ///
    /// Fails with [`RulesErrorKind::InvalidBoard`] unless there are exactly
    /// nine cells, each a recognized symbol.
    #[instrument]
    pub fn from_cells<S: AsRef<str> + fmt::Debug>(cells: &[S]) -> Result<Self, RulesError> {
        if cells.len() != BOARD_CELLS {
            return Err(RulesError::new(RulesErrorKind::InvalidBoard(format!(
                "expected {} cells, got {}",
                BOARD_CELLS,
                cells.len()
            ))));
        }
        let mut squares = [Square::Empty; BOARD_CELLS];
        for (square, cell) in squares.iter_mut().zip(cells) {
            *square = Square::from_symbol(cell.as_ref())?;
        }
        Ok(Self { squares })
    }

    /// Gets the square at the given index, `None` when out of bounds.
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if the square at `pos` exists and is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; BOARD_CELLS] {
        &self.squares
    }

    /// Indices of all empty squares, ascending.
    pub fn empty_positions(&self) -> Vec<usize> {
        (0..BOARD_CELLS).filter(|&pos| self.is_empty(pos)).collect()
    }

    /// True when no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|&s| s != Square::Empty)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(mark))
            .count()
    }

    /// Places `mark` on an empty square.
    ///
    /// A filled square is never overwritten.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: usize, mark: Mark) -> Result<(), RulesError> {
        match self.get(pos) {
            None => Err(RulesError::new(RulesErrorKind::OutOfBounds(pos))),
            Some(Square::Occupied(_)) => Err(RulesError::new(RulesErrorKind::CellOccupied(pos))),
            Some(Square::Empty) => {
                self.squares[pos] = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Resets every square to empty.
    pub fn clear(&mut self) {
        self.squares = [Square::Empty; BOARD_CELLS];
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

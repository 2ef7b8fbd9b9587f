//! Keyboard and mouse mapping onto board cells.

use crossterm::event::KeyCode;
use noughts_core::Position;
use ratatui::layout::Rect;

/// Moves the cursor one cell in the arrow key's direction, stopping at edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => return cursor,
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Digit keys 1-9 select cells in reading order.
pub fn cell_from_key(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// Maps a terminal coordinate inside `board_area` to a cell index.
///
/// Each cell spans a third of the area; points outside the area, or in the
/// remainder columns/rows past the third cell, map to `None`.
pub fn cell_from_point(board_area: Rect, column: u16, row: u16) -> Option<usize> {
    let cell_width = board_area.width / 3;
    let cell_height = board_area.height / 3;
    if cell_width == 0 || cell_height == 0 {
        return None;
    }
    let dx = column.checked_sub(board_area.x)?;
    let dy = row.checked_sub(board_area.y)?;
    let col = usize::from(dx / cell_width);
    let row = usize::from(dy / cell_height);
    if col > 2 || row > 2 {
        return None;
    }
    Some(row * 3 + col)
}

//! Stateless board rendering.

use noughts_core::{Board, Mark, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Width of one cell in terminal columns.
pub const CELL_WIDTH: u16 = 13;

/// Height of one cell in terminal rows.
pub const CELL_HEIGHT: u16 = 5;

/// Colour for a mark: Belgian gold for X, French blue for O.
pub fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::X => Color::Rgb(253, 203, 110),
        Mark::O => Color::Rgb(116, 185, 255),
    }
}

/// Team name shown for a mark.
pub fn team_name(mark: Mark) -> &'static str {
    match mark {
        Mark::X => "Belgium",
        Mark::O => "France",
    }
}

/// Where the board lands inside `area`.
pub fn board_rect(area: Rect) -> Rect {
    center_rect(area, CELL_WIDTH * 3, CELL_HEIGHT * 3)
}

/// Screen rectangle of cell `index` within a board drawn at `board_area`.
pub fn cell_rect(board_area: Rect, index: usize) -> Rect {
    let width = board_area.width / 3;
    let height = board_area.height / 3;
    let (row, col) = ((index / 3) as u16, (index % 3) as u16);
    Rect::new(
        board_area.x + col * width,
        board_area.y + row * height,
        width,
        height,
    )
}

/// Draws the grid, returning the board's rectangle for pointer mapping.
///
/// `cursor` outlines the keyboard cursor; cells in `highlight` are drawn
/// reversed to mark the winning line.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Position>,
    highlight: Option<[usize; 3]>,
) -> Rect {
    let board_area = board_rect(area);
    for (index, square) in board.squares().iter().enumerate() {
        let is_cursor = cursor.is_some_and(|c| c.to_index() == index);
        let is_winning = highlight.is_some_and(|line| line.contains(&index));
        draw_cell(
            frame,
            cell_rect(board_area, index),
            index,
            *square,
            is_cursor,
            is_winning,
        );
    }
    board_area
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    index: usize,
    square: Square,
    is_cursor: bool,
    is_winning: bool,
) {
    let (symbol, mut style) = match square {
        Square::Empty => (
            (index + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(mark) => (
            mark.symbol().to_string(),
            Style::default()
                .fg(mark_color(mark))
                .add_modifier(Modifier::BOLD),
        ),
    };
    if is_winning {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let border_style = if is_cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Centers a `width` x `height` rectangle inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_from_point;

    #[test]
    fn test_cell_rect_round_trips_through_pointer() {
        let board_area = board_rect(Rect::new(0, 0, 80, 24));
        for index in 0..9 {
            let rect = cell_rect(board_area, index);
            assert_eq!(cell_from_point(board_area, rect.x, rect.y), Some(index));
            assert_eq!(
                cell_from_point(
                    board_area,
                    rect.x + rect.width - 1,
                    rect.y + rect.height - 1
                ),
                Some(index)
            );
        }
    }

    #[test]
    fn test_board_is_centered() {
        let board_area = board_rect(Rect::new(0, 0, 80, 24));
        assert_eq!(board_area, Rect::new(20, 4, 39, 15));
    }
}

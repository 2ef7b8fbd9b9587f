//! The board: human input, the computer's delayed reply, and the game-over
//! banner.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use derive_getters::Getters;
use noughts_core::{Difficulty, Game, GameMode, Mark, Outcome, Position, winning_line};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::board::{draw_board, mark_color, team_name};
use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{FireworkShow, SoundEffect, cell_from_key, cell_from_point, move_cursor};

/// Banner shown for a finished game.
pub fn outcome_banner(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Win(Mark::X) => Some("Belgium Wins!"),
        Outcome::Win(Mark::O) => Some("France Wins!"),
        Outcome::Draw => Some("You have the same brain"),
        Outcome::Ongoing => None,
    }
}

/// Buttons offered once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndChoice {
    /// Play again with the same mode and difficulty.
    #[default]
    Restart,
    /// Return to the main menu.
    Menu,
}

impl EndChoice {
    fn toggle(self) -> Self {
        match self {
            Self::Restart => Self::Menu,
            Self::Menu => Self::Restart,
        }
    }
}

/// State for an in-progress or just-finished game.
#[derive(Debug, Getters)]
pub struct PlayingScreen {
    game: Game,
    cursor: Position,
    /// When the computer started "thinking", if it is its turn.
    thinking_since: Option<Instant>,
    ai_delay: Duration,
    fireworks: FireworkShow,
    end_choice: EndChoice,
    #[getter(skip)]
    rng: StdRng,
    #[getter(skip)]
    board_area: Cell<Rect>,
}

impl PlayingScreen {
    /// Starts a game seeded from the operating system.
    #[instrument]
    pub fn new(mode: GameMode, difficulty: Difficulty, ai_delay: Duration) -> Self {
        Self::with_rng(mode, difficulty, ai_delay, StdRng::from_os_rng())
    }

    /// Starts a game with a caller-provided generator.
    pub fn with_rng(mode: GameMode, difficulty: Difficulty, ai_delay: Duration, rng: StdRng) -> Self {
        info!(mode = ?mode, difficulty = %difficulty, "Starting game");
        Self {
            game: Game::new(mode, difficulty),
            cursor: Position::Center,
            thinking_since: None,
            ai_delay,
            fireworks: FireworkShow::new(),
            end_choice: EndChoice::default(),
            rng,
            board_area: Cell::new(Rect::default()),
        }
    }

    /// Board rectangle from the last render, used to map clicks.
    pub fn board_area(&self) -> Rect {
        self.board_area.get()
    }

    /// True while input is held back for the computer's move.
    pub fn is_thinking(&self) -> bool {
        self.thinking_since.is_some()
    }

    /// Places the human's mark, ignoring input that is not theirs to give.
    #[instrument(skip(self, ctx))]
    pub fn human_move(&mut self, pos: usize, ctx: &mut LobbyContext) {
        if self.game.is_automated_turn() {
            debug!(position = pos, "Ignoring input while the computer is thinking");
            return;
        }
        let mark = *self.game.to_move();
        match self.game.play(pos) {
            Ok(_) => {
                if let Some(cursor) = Position::from_index(pos) {
                    self.cursor = cursor;
                }
                ctx.mixer.play(place_sound(mark));
                self.after_move(ctx);
            }
            Err(e) => debug!(error = %e, "Move rejected"),
        }
    }

    fn after_move(&mut self, ctx: &mut LobbyContext) {
        if let Some(outcome) = self.game.take_unrecorded_outcome() {
            if let Err(e) = ctx.stats.record_result(outcome) {
                warn!(error = %e, "Failed to record game result");
            }
            self.fireworks.celebrate(outcome, &mut self.rng);
            self.end_choice = EndChoice::default();
            return;
        }
        if self.game.is_automated_turn() {
            self.thinking_since = Some(Instant::now());
        }
    }

    fn automated_move(&mut self, ctx: &mut LobbyContext) {
        let mark = *self.game.automated_mark();
        let chosen = self.game.choose_automated_move(&mut self.rng);
        match chosen.and_then(|pos| self.game.apply_automated_move(pos)) {
            Ok(_) => {
                ctx.mixer.play(place_sound(mark));
                self.after_move(ctx);
            }
            Err(e) => warn!(error = %e, "Automated move discarded"),
        }
    }

    /// Starts over with the same mode and difficulty.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game.reset();
        self.thinking_since = None;
        self.fireworks.clear();
        self.end_choice = EndChoice::default();
    }

    fn handle_end_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        let choice = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.end_choice = self.end_choice.toggle();
                return ScreenTransition::Stay;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.end_choice,
            KeyCode::Char('r') | KeyCode::Char('R') => EndChoice::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => EndChoice::Menu,
            KeyCode::Char('s') | KeyCode::Char('S') => return ScreenTransition::OpenSettings,
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            _ => return ScreenTransition::Stay,
        };
        ctx.mixer.play(SoundEffect::Click);
        info!(choice = ?choice, "Game over choice");
        match choice {
            EndChoice::Restart => {
                self.restart();
                ScreenTransition::Stay
            }
            EndChoice::Menu => ScreenTransition::GoToMainMenu,
        }
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(banner) = outcome_banner(*self.game.outcome()) {
            let color = match self.game.outcome().winner() {
                Some(mark) => mark_color(mark),
                None => Color::White,
            };
            return Line::from(Span::styled(
                banner,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        let mark = *self.game.to_move();
        let text = if self.game.is_automated_turn() {
            format!("{} ({}) is thinking...", team_name(mark), mark)
        } else {
            format!("{} ({}) to move", team_name(mark), mark)
        };
        Line::from(Span::styled(text, Style::default().fg(mark_color(mark))))
    }

    fn end_buttons(&self) -> Line<'static> {
        let button = |label: &'static str, selected: bool| {
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!(" {} ", label), style)
        };
        Line::from(vec![
            button("Restart", self.end_choice == EndChoice::Restart),
            Span::raw("    "),
            button("Menu", self.end_choice == EndChoice::Menu),
        ])
    }
}

fn place_sound(mark: Mark) -> SoundEffect {
    match mark {
        Mark::X => SoundEffect::PlaceX,
        Mark::O => SoundEffect::PlaceO,
    }
}

impl Screen for PlayingScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(15),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title_text = match self.game.mode() {
            GameMode::SinglePlayer => format!(
                "Belgium (X) vs France (O), {}",
                self.game.difficulty().label()
            ),
            GameMode::TwoPlayer => "Belgium (X) vs France (O)".to_string(),
        };
        let title = Paragraph::new(title_text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let highlight = winning_line(self.game.board()).map(|(line, _)| line);
        let cursor = self.game.is_ongoing().then_some(self.cursor);
        let board_area = draw_board(frame, chunks[1], self.game.board(), cursor, highlight);
        self.board_area.set(board_area);
        self.fireworks.render(frame, chunks[1]);

        let status = Paragraph::new(self.status_line())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let footer = if self.game.is_ongoing() {
            Paragraph::new("1-9 / click: Place | Arrows + Enter: Place | s: Settings | Esc: Menu")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.end_buttons())
        };
        frame.render_widget(
            footer
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[3],
        );
    }

    #[instrument(skip(self, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        if !self.game.is_ongoing() {
            return self.handle_end_key(key, ctx);
        }
        if let Some(pos) = cell_from_key(key.code) {
            self.human_move(pos, ctx);
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(self.cursor.to_index(), ctx);
                ScreenTransition::Stay
            }
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::OpenSettings,
            KeyCode::Esc => {
                info!("Abandoning game");
                ScreenTransition::GoToMainMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    #[instrument(skip_all)]
    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return ScreenTransition::Stay;
        }
        if let Some(pos) = cell_from_point(self.board_area.get(), mouse.column, mouse.row) {
            self.human_move(pos, ctx);
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self, now: Instant, ctx: &mut LobbyContext) -> ScreenTransition {
        self.fireworks.tick();
        if let Some(since) = self.thinking_since
            && now.saturating_duration_since(since) >= self.ai_delay
        {
            self.thinking_since = None;
            self.automated_move(ctx);
        }
        ScreenTransition::Stay
    }

    fn resume(&mut self, paused_for: Duration) {
        // Time under the overlay does not count toward the computer's delay.
        if let Some(since) = self.thinking_since {
            self.thinking_since = Some(since.checked_add(paused_for).unwrap_or(since));
            debug!(paused_ms = paused_for.as_millis() as u64, "Thinking clock resumed");
        }
    }
}

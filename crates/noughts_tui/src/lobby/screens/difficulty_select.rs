//! Difficulty selection before a single-player game.

use crossterm::event::{KeyCode, KeyEvent};
use noughts_core::{Difficulty, GameMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::SoundEffect;
use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};

fn description(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "France picks any free square",
        Difficulty::Medium => "France plays well half the time",
        Difficulty::Hard => "France wins when it can and always blocks",
    }
}

/// State for the difficulty selection screen.
#[derive(Debug)]
pub struct DifficultySelectScreen {
    options: Vec<Difficulty>,
    list_state: ListState,
}

impl DifficultySelectScreen {
    /// Creates the screen with `preselected` highlighted.
    #[instrument]
    pub fn new(preselected: Difficulty) -> Self {
        let options: Vec<Difficulty> = Difficulty::iter().collect();
        let index = options.iter().position(|d| *d == preselected).unwrap_or(0);
        debug!(index, "Initializing DifficultySelectScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(index));
        Self {
            options,
            list_state,
        }
    }

    /// The highlighted difficulty.
    pub fn selected(&self) -> Difficulty {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options
            .get(idx)
            .copied()
            .unwrap_or_default()
    }

    fn step(&mut self, forward: bool) {
        let count = self.options.len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.list_state.select(Some(next));
    }
}

impl Screen for DifficultySelectScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Choose Difficulty")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|d| ListItem::new(d.label()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Opponent"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let hint = Paragraph::new(description(self.selected()))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, chunks[2]);

        let help = Paragraph::new("↑↓: Navigate | Enter: Play | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.step(false);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.step(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let difficulty = self.selected();
                info!(difficulty = %difficulty, "Difficulty selected");
                ctx.mixer.play(SoundEffect::Click);
                ScreenTransition::StartGame {
                    mode: GameMode::SinglePlayer,
                    difficulty,
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::OpenSettings,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => ScreenTransition::GoToMainMenu,
            _ => ScreenTransition::Stay,
        }
    }
}

//! Main menu: choose a mode, view statistics, or quit.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use noughts_core::GameMode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::SoundEffect;
use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    OnePlayer,
    TwoPlayers,
    Statistics,
    Settings,
    Quit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::OnePlayer => GameMode::SinglePlayer.label(),
            Self::TwoPlayers => GameMode::TwoPlayer.label(),
            Self::Statistics => "Statistics",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [MenuOption] {
        &[
            Self::OnePlayer,
            Self::TwoPlayers,
            Self::Statistics,
            Self::Settings,
            Self::Quit,
        ]
    }
}

/// State for the main menu screen.
#[derive(Debug, Getters)]
pub struct MainMenuScreen {
    list_state: ListState,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuScreen {
    /// Creates the menu with the first option selected.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing MainMenuScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Belgium vs France: Tic-Tac-Toe")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let stats = ctx.stats.stats();
        let scoreline = Paragraph::new(format!(
            "Belgium {}  |  France {}  |  Draws {}",
            stats.belgium_wins(),
            stats.france_wins(),
            stats.draws()
        ))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(scoreline, chunks[1]);

        let items: Vec<ListItem> = MenuOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | s: Settings | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                ctx.mixer.play(SoundEffect::Click);
                match option {
                    MenuOption::OnePlayer => ScreenTransition::GoToDifficultySelect,
                    MenuOption::TwoPlayers => ScreenTransition::StartGame {
                        mode: GameMode::TwoPlayer,
                        difficulty: *ctx.config.default_difficulty(),
                    },
                    MenuOption::Statistics => ScreenTransition::GoToStats,
                    MenuOption::Settings => ScreenTransition::OpenSettings,
                    MenuOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::OpenSettings,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

//! Statistics view: counters, win shares, and a reset button.

use crossterm::event::{KeyCode, KeyEvent};
use noughts_core::Mark;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{info, instrument, warn};

use crate::SoundEffect;
use crate::board::mark_color;
use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsButton {
    Back,
    Reset,
}

/// State for the statistics screen.
#[derive(Debug)]
pub struct StatsViewScreen {
    selected: StatsButton,
}

impl Default for StatsViewScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsViewScreen {
    /// Creates the screen with Back selected.
    pub fn new() -> Self {
        Self {
            selected: StatsButton::Back,
        }
    }

    fn reset(&mut self, ctx: &mut LobbyContext) {
        match ctx.stats.reset() {
            Ok(()) => info!("Statistics reset from stats view"),
            Err(e) => warn!(error = %e, "Failed to reset statistics"),
        }
    }
}

impl Screen for StatsViewScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Statistics")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let stats = ctx.stats.stats();
        let shares = stats.shares();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let header = Row::new(vec![
            Cell::from("Result").style(bold),
            Cell::from("Games").style(bold),
            Cell::from("Share").style(bold),
        ])
        .style(Style::default().fg(Color::Yellow));

        let rows = vec![
            Row::new(vec![
                Cell::from("Belgium wins").style(Style::default().fg(mark_color(Mark::X))),
                Cell::from(stats.belgium_wins().to_string()),
                Cell::from(format!("{:.1}%", shares.belgium)),
            ]),
            Row::new(vec![
                Cell::from("France wins").style(Style::default().fg(mark_color(Mark::O))),
                Cell::from(stats.france_wins().to_string()),
                Cell::from(format!("{:.1}%", shares.france)),
            ]),
            Row::new(vec![
                Cell::from("Draws"),
                Cell::from(stats.draws().to_string()),
                Cell::from(format!("{:.1}%", shares.draws)),
            ]),
            Row::new(vec![
                Cell::from("Total").style(bold),
                Cell::from(stats.total_games().to_string()).style(bold),
                Cell::from(""),
            ]),
        ];

        let last_played = stats.last_played().as_deref().unwrap_or("never");
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Summary (last played: {})", last_played)),
        );
        frame.render_widget(table, chunks[1]);

        let bars = [
            ("Belgium", shares.belgium, mark_color(Mark::X)),
            ("France", shares.france, mark_color(Mark::O)),
            ("Draws", shares.draws, Color::Gray),
        ]
        .map(|(label, share, color)| {
            Bar::default()
                .label(Line::from(label))
                .value(share.round() as u64)
                .text_value(format!("{:.0}%", share))
                .style(Style::default().fg(color))
        });
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Win shares"))
            .data(BarGroup::default().bars(&bars))
            .bar_width(9)
            .bar_gap(3)
            .max(100);
        frame.render_widget(chart, chunks[2]);

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
        let footer = Paragraph::new(Line::from(vec![
            button("Back", self.selected == StatsButton::Back),
            Span::raw("    "),
            button("Reset statistics", self.selected == StatsButton::Reset),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    #[instrument(skip(self, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = match self.selected {
                    StatsButton::Back => StatsButton::Reset,
                    StatsButton::Reset => StatsButton::Back,
                };
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                ctx.mixer.play(SoundEffect::Click);
                match self.selected {
                    StatsButton::Back => ScreenTransition::GoToMainMenu,
                    StatsButton::Reset => {
                        self.reset(ctx);
                        ScreenTransition::Stay
                    }
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset(ctx);
                ScreenTransition::Stay
            }
            KeyCode::Char('s') | KeyCode::Char('S') => ScreenTransition::OpenSettings,
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to main menu from stats");
                ScreenTransition::GoToMainMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

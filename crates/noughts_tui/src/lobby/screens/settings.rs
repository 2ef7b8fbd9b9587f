//! Settings overlay: music and sound effect toggles and volume sliders.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::board::center_rect;
use crate::config::clamp_volume;
use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{AudioSettings, SoundEffect};

/// Volume change per arrow key press.
pub const VOLUME_STEP: f32 = 0.1;

const SLIDER_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsRow {
    Music,
    MusicVolume,
    Effects,
    EffectsVolume,
}

impl SettingsRow {
    fn all() -> &'static [SettingsRow] {
        &[
            Self::Music,
            Self::MusicVolume,
            Self::Effects,
            Self::EffectsVolume,
        ]
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "On" } else { "Off" }
}

fn slider(volume: f32) -> String {
    let filled = (clamp_volume(volume) * SLIDER_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(SLIDER_WIDTH - filled),
        clamp_volume(volume) * 100.0
    )
}

/// State for the settings overlay.
#[derive(Debug)]
pub struct SettingsScreen {
    settings: AudioSettings,
    list_state: ListState,
}

impl SettingsScreen {
    /// Creates the overlay pre-populated with the current audio settings.
    #[instrument]
    pub fn new(settings: AudioSettings) -> Self {
        debug!("Initializing SettingsScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            settings,
            list_state,
        }
    }

    /// Returns the edited settings (called by the controller on close).
    pub fn settings(&self) -> AudioSettings {
        self.settings
    }

    fn selected_row(&self) -> SettingsRow {
        let rows = SettingsRow::all();
        let idx = self.list_state.selected().unwrap_or(0);
        rows[idx.min(rows.len() - 1)]
    }

    fn toggle(&mut self) {
        match self.selected_row() {
            SettingsRow::Music | SettingsRow::MusicVolume => {
                self.settings.music_enabled = !self.settings.music_enabled;
            }
            SettingsRow::Effects | SettingsRow::EffectsVolume => {
                self.settings.sfx_enabled = !self.settings.sfx_enabled;
            }
        }
        info!(
            music = self.settings.music_enabled,
            sfx = self.settings.sfx_enabled,
            "Toggled audio setting"
        );
    }

    /// Moves the selected slider by `delta`, clamped to `[0.0, 1.0]`.
    fn adjust(&mut self, delta: f32) {
        let volume = match self.selected_row() {
            SettingsRow::MusicVolume => &mut self.settings.music_volume,
            SettingsRow::EffectsVolume => &mut self.settings.sfx_volume,
            SettingsRow::Music | SettingsRow::Effects => {
                self.toggle();
                return;
            }
        };
        // Snap to tenths.
        *volume = clamp_volume(((*volume + delta) * 10.0).round() / 10.0);
        debug!(volume = *volume, "Volume adjusted");
    }

    fn step(&mut self, forward: bool) {
        let count = SettingsRow::all().len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.list_state.select(Some(next));
    }
}

impl Screen for SettingsScreen {
    #[instrument(skip_all)]
    fn render(&self, frame: &mut Frame, _ctx: &LobbyContext) {
        let area = center_rect(frame.area(), 56, 12);
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(area);

        let items = vec![
            ListItem::new(format!(
                "Music           [ {} ]",
                on_off(self.settings.music_enabled)
            )),
            ListItem::new(format!(
                "Music volume    {}",
                slider(self.settings.music_volume)
            )),
            ListItem::new(format!(
                "Sound effects   [ {} ]",
                on_off(self.settings.sfx_enabled)
            )),
            ListItem::new(format!(
                "Effects volume  {}",
                slider(self.settings.sfx_volume)
            )),
        ];

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Settings")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let help = Paragraph::new("↑↓: Select | Enter: Toggle | ←→: Volume | Esc: Close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);
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
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.adjust(-VOLUME_STEP);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.adjust(VOLUME_STEP);
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') => {
                info!("Closing settings overlay");
                ctx.mixer.play(SoundEffect::Click);
                ScreenTransition::CloseSettings
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_text() {
        assert_eq!(slider(0.5), format!("[{}{}]  50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(slider(2.0), format!("[{}] 100%", "#".repeat(20)));
    }
}

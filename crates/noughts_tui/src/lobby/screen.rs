//! Screen trait and transition type for the lobby state machine.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseEvent};
use noughts_core::{Difficulty, GameMode};
use ratatui::Frame;

use crate::lobby::LobbyContext;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Navigate to difficulty selection for a single-player game.
    GoToDifficultySelect,
    /// Navigate to the statistics view.
    GoToStats,
    /// Start a new game.
    StartGame {
        /// Who controls O.
        mode: GameMode,
        /// Policy for the computer opponent.
        difficulty: Difficulty,
    },
    /// Open the settings overlay above the current screen.
    OpenSettings,
    /// Close the settings overlay and persist its changes.
    CloseSettings,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles input events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &LobbyContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut LobbyContext) -> ScreenTransition;

    /// Handles a mouse event. Screens without pointer support ignore it.
    fn handle_mouse(&mut self, _mouse: MouseEvent, _ctx: &mut LobbyContext) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Advances time-driven state once per frame.
    fn tick(&mut self, _now: Instant, _ctx: &mut LobbyContext) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Called when an overlay that covered the screen for `paused_for` closes.
    fn resume(&mut self, _paused_for: Duration) {}
}

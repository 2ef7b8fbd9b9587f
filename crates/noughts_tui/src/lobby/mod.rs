//! Lobby system: menu, difficulty choice, board, statistics, and settings.

mod context;
mod controller;
mod screen;
mod screens;

pub use context::LobbyContext;
pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
pub use screens::{
    DifficultySelectScreen, EndChoice, MainMenuScreen, PlayingScreen, SettingsScreen,
    StatsViewScreen, VOLUME_STEP, outcome_banner,
};

//! Screen implementations for the lobby state machine.

mod difficulty_select;
mod main_menu;
mod playing;
mod settings;
mod stats_view;

pub use difficulty_select::DifficultySelectScreen;
pub use main_menu::MainMenuScreen;
pub use playing::{EndChoice, PlayingScreen, outcome_banner};
pub use settings::{SettingsScreen, VOLUME_STEP};
pub use stats_view::StatsViewScreen;

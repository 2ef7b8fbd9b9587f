//! Terminal front end for Belgium vs France tic-tac-toe.
//!
//! The game rules and the computer opponent live in `noughts_core`; this
//! crate adds the screens, persistence, sound, and celebration effects.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audio;
mod board;
pub mod cli;
mod config;
mod fireworks;
mod input;
mod lobby;
mod stats;

pub use audio::{AudioSink, BellSink, Mixer, NullSink, SoundEffect};
pub use board::{board_rect, cell_rect, center_rect, draw_board, mark_color, team_name};
pub use config::{
    AppConfig, AudioSettings, ConfigError, DEFAULT_CONFIG_PATH, MAX_FPS, clamp_volume,
};
pub use fireworks::{
    DRAG, FIELD_SIZE, FIREWORKS_PER_SHOW, Firework, FireworkShow, GRAVITY, Particle, palette,
};
pub use input::{cell_from_key, cell_from_point, move_cursor};
pub use lobby::{
    DifficultySelectScreen, EndChoice, LobbyContext, LobbyController, MainMenuScreen,
    PlayingScreen, Screen, ScreenTransition, SettingsScreen, StatsViewScreen, VOLUME_STEP,
    outcome_banner,
};
pub use stats::{GameStats, LAST_PLAYED_FORMAT, Shares, StatsError, StatsStore};

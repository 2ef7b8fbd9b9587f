//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default config file name.
pub const DEFAULT_CONFIG_PATH: &str = "noughts.toml";

/// Highest frame rate the render loop accepts.
pub const MAX_FPS: u32 = 240;

/// Volume and mute preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Background music volume (0.0 - 1.0).
    pub music_volume: f32,
    /// Sound effect volume (0.0 - 1.0).
    pub sfx_volume: f32,
    /// Whether background music plays.
    pub music_enabled: bool,
    /// Whether sound effects play.
    pub sfx_enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 0.7,
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

impl AudioSettings {
    /// Clamps both volumes into `[0.0, 1.0]`.
    pub fn clamped(self) -> Self {
        Self {
            music_volume: clamp_volume(self.music_volume),
            sfx_volume: clamp_volume(self.sfx_volume),
            ..self
        }
    }

    /// Effective sound effect volume, zero when disabled.
    pub fn effective_sfx(&self) -> f32 {
        if self.sfx_enabled {
            clamp_volume(self.sfx_volume)
        } else {
            0.0
        }
    }

    /// Effective music volume, zero when disabled.
    pub fn effective_music(&self) -> f32 {
        if self.music_enabled {
            clamp_volume(self.music_volume)
        } else {
            0.0
        }
    }
}

/// Clamps a volume into `[0.0, 1.0]`; NaN becomes silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// User-editable application configuration.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Milliseconds the computer "thinks" before moving.
    ai_delay_ms: u64,

    /// Difficulty preselected on the difficulty screen.
    default_difficulty: Difficulty,

    /// Location of the statistics file.
    stats_path: PathBuf,

    /// Target frames per second for the render loop.
    fps: u32,

    /// Audio preferences.
    audio: AudioSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: 1200,
            default_difficulty: Difficulty::Hard,
            stats_path: PathBuf::from("stats.json"),
            fps: 60,
            audio: AudioSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            ai_delay_ms = config.ai_delay_ms,
            difficulty = %config.default_difficulty,
            "Config loaded successfully"
        );
        Ok(config.normalized())
    }

    /// Writes the configuration as TOML.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write config file: {}", e)))?;
        debug!("Config saved");
        Ok(())
    }

    /// Replaces the audio preferences.
    pub fn set_audio(&mut self, audio: AudioSettings) {
        self.audio = audio.clamped();
    }

    /// Overrides the statistics file location.
    pub fn set_stats_path(&mut self, path: PathBuf) {
        self.stats_path = path;
    }

    /// Overrides the preselected difficulty.
    pub fn set_default_difficulty(&mut self, difficulty: Difficulty) {
        self.default_difficulty = difficulty;
    }

    fn normalized(mut self) -> Self {
        self.audio = self.audio.clamped();
        if self.fps == 0 {
            warn!("fps of 0 is invalid, using 60");
            self.fps = 60;
        } else if self.fps > MAX_FPS {
            warn!(fps = self.fps, max = MAX_FPS, "fps too high, capping");
            self.fps = MAX_FPS;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

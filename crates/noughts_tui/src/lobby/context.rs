//! State shared by every screen.

use std::path::PathBuf;

use derive_new::new;
use tracing::{info, instrument, warn};

use crate::{AppConfig, AudioSettings, Mixer, StatsStore};

/// Configuration, statistics, and audio handed to screens.
#[derive(Debug, new)]
pub struct LobbyContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Where configuration changes are saved.
    pub config_path: PathBuf,
    /// Persistent win counters.
    pub stats: StatsStore,
    /// Sound effect output.
    pub mixer: Mixer,
}

impl LobbyContext {
    /// Applies new audio preferences and writes them to the config file.
    ///
    /// Only the audio section is written back; command-line overrides held
    /// in memory stay out of the file. A failed save is logged and the
    /// preferences still apply for this run. An unreadable config file is left
    /// untouched.
    #[instrument(skip(self))]
    pub fn apply_audio(&mut self, audio: AudioSettings) {
        self.config.set_audio(audio);
        self.mixer.set_settings(*self.config.audio());

        let mut on_disk = match AppConfig::load_or_default(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Config file unreadable, audio settings not saved");
                return;
            }
        };
        on_disk.set_audio(audio);
        match on_disk.save(&self.config_path) {
            Ok(()) => info!(path = %self.config_path.display(), "Audio settings saved"),
            Err(e) => warn!(error = %e, "Failed to save audio settings"),
        }
    }
}

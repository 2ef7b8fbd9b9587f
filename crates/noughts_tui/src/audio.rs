//! Sound effect and music playback behind a swappable sink.

use std::io::Write;

use derive_getters::Getters;
use tracing::{debug, instrument, warn};

use crate::AudioSettings;

/// Sounds the game can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SoundEffect {
    /// X placed a mark.
    PlaceX,
    /// O placed a mark.
    PlaceO,
    /// A menu button was activated.
    Click,
}

/// Output device for sound effects and the background music loop.
pub trait AudioSink: std::fmt::Debug {
    /// Plays `effect` at `volume` in `(0.0, 1.0]`.
    fn play(&mut self, effect: SoundEffect, volume: f32) -> std::io::Result<()>;

    /// Sets the music loop volume in `[0.0, 1.0]`; `0.0` stops the music.
    fn set_music(&mut self, volume: f32) -> std::io::Result<()>;
}

/// Discards every sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> std::io::Result<()> {
        Ok(())
    }

    fn set_music(&mut self, _volume: f32) -> std::io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell.
///
/// The bell is the only sound a terminal can make: every effect rings the
/// same bell regardless of volume, and there is no music channel, so music
/// settings are accepted and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellSink;

impl AudioSink for BellSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }

    fn set_music(&mut self, _volume: f32) -> std::io::Result<()> {
        Ok(())
    }
}

/// Applies audio preferences before handing sounds to the sink.
#[derive(Debug, Getters)]
pub struct Mixer {
    #[getter(skip)]
    sink: Box<dyn AudioSink>,
    settings: AudioSettings,
    /// Sounds actually forwarded to the sink.
    played: usize,
    /// Music volume last handed to the sink.
    music_volume: f32,
}

impl Mixer {
    /// Creates a mixer over `sink` and starts the music at the configured
    /// volume.
    pub fn new(sink: Box<dyn AudioSink>, settings: AudioSettings) -> Self {
        let mut mixer = Self {
            sink,
            settings: settings.clamped(),
            played: 0,
            music_volume: 0.0,
        };
        mixer.apply_music();
        mixer
    }

    /// A mixer that never makes a sound.
    pub fn muted(settings: AudioSettings) -> Self {
        Self::new(Box::new(NullSink), settings)
    }

    /// Replaces the audio preferences and updates the music volume.
    pub fn set_settings(&mut self, settings: AudioSettings) {
        self.settings = settings.clamped();
        self.apply_music();
    }

    fn apply_music(&mut self) {
        let volume = self.settings.effective_music();
        match self.sink.set_music(volume) {
            Ok(()) => {
                self.music_volume = volume;
                debug!(volume, "Music volume set");
            }
            Err(e) => self.mute_after(&e),
        }
    }

    fn mute_after(&mut self, e: &std::io::Error) {
        warn!(error = %e, "Audio sink failed, muting");
        self.sink = Box::new(NullSink);
        self.music_volume = 0.0;
    }

    /// Plays a sound effect unless effects are disabled or silent.
    ///
    /// A failing sink is swapped for [`NullSink`] so the game keeps running.
    #[instrument(skip(self))]
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.settings.effective_sfx();
        if volume <= 0.0 {
            return;
        }
        match self.sink.play(effect, volume) {
            Ok(()) => {
                self.played += 1;
                debug!(volume, "Sound played");
            }
            Err(e) => self.mute_after(&e),
        }
    }
}

//! Win/loss counters persisted as a flat JSON file.

use std::path::{Path, PathBuf};

use chrono::Local;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Timestamp format for `last_played`.
pub const LAST_PLAYED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters stored in the statistics file.
///
/// X is Belgium and O is France.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    belgium_wins: u32,
    #[serde(default)]
    france_wins: u32,
    #[serde(default)]
    draws: u32,
    #[serde(default)]
    total_games: u32,
    #[serde(default)]
    last_played: Option<String>,
}

/// Percentage split of recorded games.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shares {
    /// Share of X wins (0-100).
    pub belgium: f64,
    /// Share of O wins (0-100).
    pub france: f64,
    /// Share of draws (0-100).
    pub draws: f64,
}

impl GameStats {
    /// Counts a finished game. `Ongoing` is not a result.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome, played_at: String) -> Result<(), StatsError> {
        match outcome {
            Outcome::Win(Mark::X) => self.belgium_wins += 1,
            Outcome::Win(Mark::O) => self.france_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {
                return Err(StatsError::new(
                    "cannot record an unfinished game".to_string(),
                ));
            }
        }
        self.total_games += 1;
        self.last_played = Some(played_at);
        Ok(())
    }

    /// Percentage split of wins and draws; all zero before the first game.
    pub fn shares(&self) -> Shares {
        let total = self.belgium_wins + self.france_wins + self.draws;
        if total == 0 {
            return Shares::default();
        }
        let pct = |n: u32| f64::from(n) * 100.0 / f64::from(total);
        Shares {
            belgium: pct(self.belgium_wins),
            france: pct(self.france_wins),
            draws: pct(self.draws),
        }
    }
}

/// File-backed statistics.
#[derive(Debug, Clone, Getters)]
pub struct StatsStore {
    path: PathBuf,
    stats: GameStats,
}

impl StatsStore {
    /// Opens the statistics file.
    ///
    /// A missing file is created with zeroed counters. An unreadable or
    /// corrupt file is not fatal: counters start from zero and the file is
    /// left untouched until the next save.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("No stats file found, creating new one");
            let store = Self {
                path,
                stats: GameStats::default(),
            };
            if let Err(e) = store.save() {
                warn!(error = %e, "Failed to create stats file");
            }
            return store;
        }

        let stats = match Self::read(&path) {
            Ok(stats) => {
                info!(total_games = stats.total_games, "Stats loaded");
                stats
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stats, starting from zero");
                GameStats::default()
            }
        };
        Self { path, stats }
    }

    fn read(path: &Path) -> Result<GameStats, StatsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StatsError::new(format!("Failed to read stats file: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| StatsError::new(format!("Failed to parse stats file: {}", e)))
    }

    /// Writes the counters as pretty-printed JSON.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), StatsError> {
        let content = serde_json::to_string_pretty(&self.stats)
            .map_err(|e| StatsError::new(format!("Failed to serialize stats: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StatsError::new(format!("Failed to write stats file: {}", e)))?;
        debug!("Stats saved");
        Ok(())
    }

    /// Counts a finished game, stamps `last_played` with local time, saves.
    #[instrument(skip(self))]
    pub fn record_result(&mut self, outcome: Outcome) -> Result<(), StatsError> {
        let played_at = Local::now().format(LAST_PLAYED_FORMAT).to_string();
        self.stats.record(outcome, played_at)?;
        info!(
            outcome = ?outcome,
            total_games = self.stats.total_games,
            "Game result recorded"
        );
        self.save()
    }

    /// Zeroes every counter and clears `last_played`, then saves.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), StatsError> {
        self.stats = GameStats::default();
        info!("Stats reset");
        self.save()
    }
}

/// Statistics persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("Stats error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new statistics error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut stats = GameStats::default();
        stats.record(Outcome::Win(Mark::X), "t1".into()).unwrap();
        stats.record(Outcome::Win(Mark::O), "t2".into()).unwrap();
        stats.record(Outcome::Draw, "t3".into()).unwrap();
        assert_eq!(*stats.belgium_wins(), 1);
        assert_eq!(*stats.france_wins(), 1);
        assert_eq!(*stats.draws(), 1);
        assert_eq!(*stats.total_games(), 3);
        assert_eq!(stats.last_played().as_deref(), Some("t3"));
    }

    #[test]
    fn test_record_rejects_ongoing() {
        let mut stats = GameStats::default();
        assert!(stats.record(Outcome::Ongoing, "t".into()).is_err());
        assert_eq!(stats, GameStats::default());
    }

    #[test]
    fn test_shares() {
        assert_eq!(GameStats::default().shares(), Shares::default());
        let mut stats = GameStats::default();
        stats.record(Outcome::Win(Mark::X), "t".into()).unwrap();
        stats.record(Outcome::Win(Mark::X), "t".into()).unwrap();
        stats.record(Outcome::Win(Mark::O), "t".into()).unwrap();
        stats.record(Outcome::Draw, "t".into()).unwrap();
        let shares = stats.shares();
        assert_eq!(shares.belgium, 50.0);
        assert_eq!(shares.france, 25.0);
        assert_eq!(shares.draws, 25.0);
    }
}

//! Command-line interface for noughts.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use noughts_core::{Difficulty, GameMode};

use crate::DEFAULT_CONFIG_PATH;

/// Belgium vs France tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Belgium vs France tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run; defaults to `play`
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command, `play` with defaults when none was given.
    pub fn command(self) -> Command {
        self.command.unwrap_or_else(|| Command::Play(PlayArgs::default()))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive game
    Play(PlayArgs),

    /// Print or reset the win statistics
    Stats {
        /// Statistics file (defaults to the configured path)
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Zero every counter
        #[arg(long)]
        reset: bool,
    },
}

/// Options for `noughts play`.
#[derive(clap::Args, Debug, Clone)]
pub struct PlayArgs {
    /// Path to the config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Statistics file (overrides the config)
    #[arg(long)]
    pub stats: Option<PathBuf>,

    /// Start a game straight away instead of showing the menu
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Computer difficulty (overrides the config)
    #[arg(short, long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Disable every sound
    #[arg(long)]
    pub mute: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            stats: None,
            mode: None,
            difficulty: None,
            mute: false,
        }
    }
}

/// `--mode` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Play against the computer
    One,
    /// Two players on one keyboard
    Two,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::One => GameMode::SinglePlayer,
            ModeArg::Two => GameMode::TwoPlayer,
        }
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["noughts"]).unwrap();
        assert!(matches!(cli.command(), Command::Play(args) if !args.mute));
    }

    #[test]
    fn test_play_flags() {
        let cli = Cli::try_parse_from([
            "noughts",
            "play",
            "--mode",
            "one",
            "--difficulty",
            "medium",
            "--mute",
        ])
        .unwrap();
        let Command::Play(args) = cli.command() else {
            panic!("expected play");
        };
        assert_eq!(args.mode.map(GameMode::from), Some(GameMode::SinglePlayer));
        assert_eq!(args.difficulty, Some(Difficulty::Medium));
        assert!(args.mute);
    }

    #[test]
    fn test_stats_reset() {
        let cli = Cli::try_parse_from(["noughts", "stats", "--reset"]).unwrap();
        assert!(matches!(cli.command(), Command::Stats { reset: true, .. }));
    }
}

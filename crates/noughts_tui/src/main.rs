//! noughts: Belgium vs France tic-tac-toe in the terminal.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts_tui::cli::{Cli, Command, PlayArgs};
use noughts_tui::{
    AppConfig, BellSink, GameStats, LobbyContext, LobbyController, Mixer, StatsStore,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command() {
        Command::Play(args) => run_play(args).await,
        Command::Stats {
            stats,
            config,
            reset,
        } => run_stats(stats, config, reset),
    }
}

/// Run the interactive game
#[instrument(skip_all, fields(config_path = %args.config.display()))]
async fn run_play(args: PlayArgs) -> Result<()> {
    initialize_file_tracing()?;
    info!("Starting noughts");

    let mut config = AppConfig::load_or_default(&args.config).context("Failed to load config")?;
    if let Some(path) = args.stats.clone() {
        info!(path = %path.display(), "Overriding stats path");
        config.set_stats_path(path);
    }
    if let Some(difficulty) = args.difficulty {
        config.set_default_difficulty(difficulty);
    }

    let stats = StatsStore::open(config.stats_path());
    let mixer = if args.mute {
        info!("Sound muted");
        Mixer::muted(*config.audio())
    } else {
        Mixer::new(Box::new(BellSink), *config.audio())
    };
    let difficulty = *config.default_difficulty();
    let ctx = LobbyContext::new(config, args.config.clone(), stats, mixer);

    let mut controller = LobbyController::new(ctx);
    if let Some(mode) = args.mode {
        controller.start_game(mode.into(), difficulty);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    // Setup failures past this point still reach the restore.
    let result = run_terminal(&mut controller).await;
    let restored = restore_terminal();

    if let Err(e) = &result {
        error!(error = %e, "Game loop failed");
    }
    info!("Goodbye");
    result.and(restored)
}

async fn run_terminal(controller: &mut LobbyController) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let result = controller.run(&mut terminal).await;
    terminal.show_cursor()?;
    result
}

/// Undoes terminal setup; both steps run even if the first fails.
fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}

/// Print or reset the statistics file
#[instrument]
fn run_stats(stats_path: Option<PathBuf>, config_path: PathBuf, reset: bool) -> Result<()> {
    initialize_stderr_tracing();

    let config = AppConfig::load_or_default(&config_path).context("Failed to load config")?;
    let path = stats_path.unwrap_or_else(|| config.stats_path().clone());
    let mut store = StatsStore::open(&path);

    if reset {
        store.reset().context("Failed to reset statistics")?;
        println!("Statistics reset ({})", path.display());
    }
    print_stats(store.stats());
    Ok(())
}

fn print_stats(stats: &GameStats) {
    let shares = stats.shares();
    println!("Belgium wins: {:>5}  ({:.1}%)", stats.belgium_wins(), shares.belgium);
    println!("France wins:  {:>5}  ({:.1}%)", stats.france_wins(), shares.france);
    println!("Draws:        {:>5}  ({:.1}%)", stats.draws(), shares.draws);
    println!("Total games:  {:>5}", stats.total_games());
    println!(
        "Last played:  {}",
        stats.last_played().as_deref().unwrap_or("never")
    );
}

/// Logs go to a file so they never corrupt the terminal UI.
fn initialize_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create("noughts.log").context("Failed to create log file")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,noughts_core=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

//! Lobby controller, the state machine driving the multi-screen TUI.

use std::time::Instant;

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use noughts_core::{Difficulty, GameMode};
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, instrument};

use crate::lobby::LobbyContext;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    DifficultySelectScreen, MainMenuScreen, PlayingScreen, SettingsScreen, StatsViewScreen,
};

/// Time between frames at `fps`, never shorter than a millisecond.
fn frame_period(fps: u32) -> Duration {
    (Duration::from_secs(1) / fps.max(1)).max(Duration::from_millis(1))
}

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    DifficultySelect(DifficultySelectScreen),
    Playing(Box<PlayingScreen>),
    Stats(StatsViewScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::DifficultySelect(s) => s,
            Self::Playing(s) => s.as_ref(),
            Self::Stats(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::DifficultySelect(s) => s,
            Self::Playing(s) => s.as_mut(),
            Self::Stats(s) => s,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::MainMenu(_) => "main_menu",
            Self::DifficultySelect(_) => "difficulty_select",
            Self::Playing(_) => "playing",
            Self::Stats(_) => "stats",
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    ctx: LobbyContext,
    #[getter(skip)]
    screen: ActiveScreen,
    #[getter(skip)]
    overlay: Option<SettingsScreen>,
    /// When the overlay opened; the screen below is paused until it closes.
    #[getter(skip)]
    overlay_opened_at: Option<Instant>,
}

impl LobbyController {
    /// Creates a controller showing the main menu.
    #[instrument(skip(ctx))]
    pub fn new(ctx: LobbyContext) -> Self {
        info!("Creating LobbyController");
        Self {
            ctx,
            screen: ActiveScreen::MainMenu(MainMenuScreen::new()),
            overlay: None,
            overlay_opened_at: None,
        }
    }

    /// Skips the menus and opens a game directly.
    pub fn start_game(&mut self, mode: GameMode, difficulty: Difficulty) {
        self.apply_transition(ScreenTransition::StartGame { mode, difficulty });
    }

    /// Name of the screen underneath any overlay.
    pub fn screen_name(&self) -> &'static str {
        self.screen.name()
    }

    /// True while the settings overlay is open.
    pub fn is_settings_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// The game screen, when a game is showing.
    pub fn playing(&self) -> Option<&PlayingScreen> {
        match &self.screen {
            ActiveScreen::Playing(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// Input is drained every frame; time-driven state (the computer's delay
    /// and fireworks) advances once per frame at the configured rate.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut frames = interval(frame_period(*self.ctx.config.fps()));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            terminal.draw(|f| self.render(f))?;

            while event::poll(Duration::ZERO)? {
                if !self.handle_event(event::read()?) {
                    info!("Lobby quitting");
                    return Ok(());
                }
            }

            if !self.tick(Instant::now()) {
                info!("Lobby quitting");
                return Ok(());
            }

            frames.tick().await;
        }
    }

    /// Draws the active screen and, above it, the settings overlay.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, &self.ctx);
        if let Some(overlay) = &self.overlay {
            overlay.render(frame, &self.ctx);
        }
    }

    /// Routes one terminal event. Returns `false` once the user quits.
    ///
    /// While the overlay is open it receives every key and the screen below
    /// receives nothing.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: Event) -> bool {
        let transition = match event {
            // Skip key release events (crossterm fires both press and release).
            Event::Key(key) if key.kind == KeyEventKind::Release => ScreenTransition::Stay,
            Event::Key(key) => match &mut self.overlay {
                Some(overlay) => overlay.handle_key(key, &mut self.ctx),
                None => self.screen.as_screen_mut().handle_key(key, &mut self.ctx),
            },
            Event::Mouse(mouse) if self.overlay.is_none() => {
                self.screen.as_screen_mut().handle_mouse(mouse, &mut self.ctx)
            }
            _ => ScreenTransition::Stay,
        };
        self.apply_transition(transition)
    }

    /// Advances the active screen one frame; paused while the overlay is open.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.overlay.is_some() {
            return true;
        }
        let transition = self.screen.as_screen_mut().tick(now, &mut self.ctx);
        self.apply_transition(transition)
    }

    /// Applies a screen transition, returning `false` to quit.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) -> bool {
        if transition != ScreenTransition::Stay {
            debug!(transition = ?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => {}

            ScreenTransition::GoToMainMenu => {
                info!("Navigating to MainMenu");
                self.screen = ActiveScreen::MainMenu(MainMenuScreen::new());
            }

            ScreenTransition::GoToDifficultySelect => {
                info!("Navigating to DifficultySelect");
                self.screen = ActiveScreen::DifficultySelect(DifficultySelectScreen::new(
                    *self.ctx.config.default_difficulty(),
                ));
            }

            ScreenTransition::GoToStats => {
                info!("Navigating to Stats");
                self.screen = ActiveScreen::Stats(StatsViewScreen::new());
            }

            ScreenTransition::StartGame { mode, difficulty } => {
                info!(mode = ?mode, difficulty = %difficulty, "Navigating to Playing");
                let delay = Duration::from_millis(*self.ctx.config.ai_delay_ms());
                self.screen =
                    ActiveScreen::Playing(Box::new(PlayingScreen::new(mode, difficulty, delay)));
            }

            ScreenTransition::OpenSettings => {
                if self.overlay.is_none() {
                    info!("Opening settings overlay");
                    self.overlay = Some(SettingsScreen::new(*self.ctx.config.audio()));
                    self.overlay_opened_at = Some(Instant::now());
                }
            }

            ScreenTransition::CloseSettings => {
                // Persist any changes made in the overlay.
                if let Some(overlay) = self.overlay.take() {
                    self.ctx.apply_audio(overlay.settings());
                }
                if let Some(opened) = self.overlay_opened_at.take() {
                    self.screen.as_screen_mut().resume(opened.elapsed());
                }
            }

            ScreenTransition::Quit => return false,
        }
        true
    }
}

//! Tests for the screen state machine and the game screen.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use noughts_core::{Difficulty, GameMode, Mark, Outcome, Square};
use noughts_tui::{
    AppConfig, AudioSettings, LobbyContext, LobbyController, Mixer, PlayingScreen, Screen,
    ScreenTransition, StatsStore, cell_rect, outcome_banner,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;

fn context(dir: &TempDir) -> LobbyContext {
    let mut config = AppConfig::default();
    config.set_stats_path(dir.path().join("stats.json"));
    let stats = StatsStore::open(config.stats_path());
    LobbyContext::new(
        config,
        dir.path().join("noughts.toml"),
        stats,
        Mixer::muted(AudioSettings::default()),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(controller: &mut LobbyController, code: KeyCode) -> bool {
    controller.handle_event(Event::Key(key(code)))
}

#[test]
fn test_banners() {
    assert_eq!(outcome_banner(Outcome::Win(Mark::X)), Some("Belgium Wins!"));
    assert_eq!(outcome_banner(Outcome::Win(Mark::O)), Some("France Wins!"));
    assert_eq!(outcome_banner(Outcome::Draw), Some("You have the same brain"));
    assert_eq!(outcome_banner(Outcome::Ongoing), None);
}

#[test]
fn test_quit_from_menu() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));
    assert_eq!(controller.screen_name(), "main_menu");
    assert!(press(&mut controller, KeyCode::Down));
    assert!(!press(&mut controller, KeyCode::Char('q')));
}

#[test]
fn test_key_release_is_ignored() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));
    let mut release = key(KeyCode::Char('q'));
    release.kind = KeyEventKind::Release;
    assert!(controller.handle_event(Event::Key(release)));
}

#[test]
fn test_one_player_goes_through_difficulty_select() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));

    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "difficulty_select");

    // Hard is preselected; Up moves to Medium.
    press(&mut controller, KeyCode::Up);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "playing");
    let playing = controller.playing().unwrap();
    assert_eq!(*playing.game().mode(), GameMode::SinglePlayer);
    assert_eq!(*playing.game().difficulty(), Difficulty::Medium);

    press(&mut controller, KeyCode::Esc);
    assert_eq!(controller.screen_name(), "main_menu");
}

#[test]
fn test_two_player_win_is_recorded_once() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));

    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "playing");

    // X takes the top row.
    for c in ['1', '4', '2', '5', '3'] {
        press(&mut controller, KeyCode::Char(c));
    }
    let playing = controller.playing().unwrap();
    assert_eq!(*playing.game().outcome(), Outcome::Win(Mark::X));
    assert!(playing.fireworks().is_active());

    // Further board input and frames change nothing.
    press(&mut controller, KeyCode::Char('9'));
    controller.tick(Instant::now());
    assert_eq!(*controller.ctx().stats.stats().belgium_wins(), 1);
    assert_eq!(*controller.ctx().stats.stats().total_games(), 1);

    // Restart keeps the mode and clears the board.
    press(&mut controller, KeyCode::Char('r'));
    let playing = controller.playing().unwrap();
    assert!(playing.game().is_ongoing());
    assert_eq!(playing.game().board().empty_positions().len(), 9);
    assert_eq!(*playing.game().mode(), GameMode::TwoPlayer);
    assert!(!playing.fireworks().is_active());

    // Draw: X O X / X O O / O X X
    for c in ['1', '2', '3', '5', '4', '6', '8', '7', '9'] {
        press(&mut controller, KeyCode::Char(c));
    }
    assert_eq!(
        *controller.playing().unwrap().game().outcome(),
        Outcome::Draw
    );

    let reopened = StatsStore::open(dir.path().join("stats.json"));
    assert_eq!(*reopened.stats().belgium_wins(), 1);
    assert_eq!(*reopened.stats().draws(), 1);
    assert_eq!(*reopened.stats().total_games(), 2);

    // Menu from the game-over buttons.
    press(&mut controller, KeyCode::Right);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "main_menu");
}

#[test]
fn test_computer_waits_for_delay_and_ignores_human_meanwhile() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir);
    let delay = Duration::from_secs(30);
    let mut screen = PlayingScreen::with_rng(
        GameMode::SinglePlayer,
        Difficulty::Hard,
        delay,
        StdRng::seed_from_u64(2),
    );

    screen.handle_key(key(KeyCode::Char('5')), &mut ctx);
    assert!(screen.is_thinking());
    assert_eq!(*screen.game().to_move(), Mark::O);

    // Human input while the computer is thinking is dropped.
    screen.handle_key(key(KeyCode::Char('1')), &mut ctx);
    assert_eq!(screen.game().board().get(0), Some(Square::Empty));

    // Not yet.
    screen.tick(Instant::now(), &mut ctx);
    assert_eq!(screen.game().board().count(Mark::O), 0);

    screen.tick(Instant::now() + delay, &mut ctx);
    assert!(!screen.is_thinking());
    assert_eq!(screen.game().board().count(Mark::O), 1);
    assert_eq!(*screen.game().to_move(), Mark::X);
    // Hard answers a center opening with a corner.
    let corner = screen.game().history()[1];
    assert!([0, 2, 6, 8].contains(&corner));
}

#[test]
fn test_overlay_time_does_not_count_toward_delay() {
    let dir = TempDir::new().unwrap();
    let delay = Duration::from_secs(30);
    let mut screen = PlayingScreen::with_rng(
        GameMode::SinglePlayer,
        Difficulty::Hard,
        delay,
        StdRng::seed_from_u64(4),
    );
    let mut ctx = context(&dir);

    screen.handle_key(key(KeyCode::Char('5')), &mut ctx);
    screen.resume(Duration::from_secs(10));

    screen.tick(Instant::now() + delay, &mut ctx);
    assert_eq!(screen.game().board().count(Mark::O), 0);

    screen.tick(Instant::now() + delay + Duration::from_secs(10), &mut ctx);
    assert_eq!(screen.game().board().count(Mark::O), 1);
}

#[test]
fn test_settings_overlay_pauses_computer() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));
    controller.start_game(GameMode::SinglePlayer, Difficulty::Hard);
    let delay = Duration::from_millis(*controller.ctx().config.ai_delay_ms());

    press(&mut controller, KeyCode::Char('5'));
    press(&mut controller, KeyCode::Char('s'));
    std::thread::sleep(Duration::from_millis(300));
    // Ticks under the overlay do nothing.
    assert!(controller.tick(Instant::now() + delay));
    press(&mut controller, KeyCode::Esc);
    assert!(!controller.is_settings_open());

    // The 300ms spent in settings pushed the deadline back.
    controller.tick(Instant::now() + delay - Duration::from_millis(200));
    assert_eq!(
        controller.playing().unwrap().game().board().count(Mark::O),
        0
    );

    controller.tick(Instant::now() + delay + Duration::from_millis(400));
    assert_eq!(
        controller.playing().unwrap().game().board().count(Mark::O),
        1
    );
}

#[test]
fn test_mouse_click_places_mark() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));
    controller.start_game(GameMode::TwoPlayer, Difficulty::Hard);

    let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    terminal.draw(|f| controller.render(f)).unwrap();

    let board_area = controller.playing().unwrap().board_area();
    let target = cell_rect(board_area, 7);
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: target.x + target.width / 2,
        row: target.y + target.height / 2,
        modifiers: KeyModifiers::NONE,
    };
    controller.handle_event(Event::Mouse(click));
    assert_eq!(
        controller.playing().unwrap().game().board().get(7),
        Some(Square::Occupied(Mark::X))
    );

    // Outside the board: nothing happens.
    let miss = MouseEvent {
        column: 0,
        row: 0,
        ..click
    };
    controller.handle_event(Event::Mouse(miss));
    assert_eq!(controller.playing().unwrap().game().history().len(), 1);
}

#[test]
fn test_settings_overlay_persists_audio() {
    let dir = TempDir::new().unwrap();
    let mut controller = LobbyController::new(context(&dir));

    press(&mut controller, KeyCode::Char('s'));
    assert!(controller.is_settings_open());

    // Overlay swallows keys meant for the menu.
    assert!(press(&mut controller, KeyCode::Char('q')));

    // Music volume row, one step down.
    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Left);
    // Sound effects row, toggle off.
    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Enter);
    press(&mut controller, KeyCode::Esc);

    assert!(!controller.is_settings_open());
    assert_eq!(controller.screen_name(), "main_menu");
    let audio = *controller.ctx().config.audio();
    assert_eq!(audio.music_volume, 0.4);
    assert!(!audio.sfx_enabled);
    assert_eq!(controller.ctx().mixer.settings(), &audio);
    assert_eq!(*controller.ctx().mixer.music_volume(), 0.4);

    let saved = AppConfig::from_file(dir.path().join("noughts.toml")).unwrap();
    assert_eq!(saved.audio(), &audio);
    // Only audio is written back.
    assert_eq!(saved.stats_path().to_str(), Some("stats.json"));
}

#[test]
fn test_stats_screen_reset() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("stats.json"),
        r#"{"belgium_wins": 2, "france_wins": 1, "draws": 0, "total_games": 3, "last_played": null}"#,
    )
    .unwrap();
    let mut controller = LobbyController::new(context(&dir));
    assert_eq!(*controller.ctx().stats.stats().total_games(), 3);

    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Down);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "stats");

    // Select the Reset button and press it.
    press(&mut controller, KeyCode::Right);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.screen_name(), "stats");
    assert_eq!(*controller.ctx().stats.stats().total_games(), 0);

    press(&mut controller, KeyCode::Esc);
    assert_eq!(controller.screen_name(), "main_menu");
}

#[test]
fn test_overlay_transition_from_game() {
    let dir = TempDir::new().unwrap();
    let mut ctx = context(&dir);
    let mut screen = PlayingScreen::with_rng(
        GameMode::TwoPlayer,
        Difficulty::Easy,
        Duration::ZERO,
        StdRng::seed_from_u64(1),
    );
    assert_eq!(
        screen.handle_key(key(KeyCode::Char('s')), &mut ctx),
        ScreenTransition::OpenSettings
    );
}

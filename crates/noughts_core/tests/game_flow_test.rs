//! Tests for the game session driving the rules.

use noughts_core::{
    Difficulty, Game, GameMode, Mark, Outcome, RulesErrorKind, ScriptedRandom, Square,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_scripted_game_ends_in_draw() {
    let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
    // X O O / O X X / X X O
    for pos in [4, 0, 8, 2, 1, 7, 6, 3, 5] {
        let outcome = game.play(pos).unwrap();
        if game.history().len() < 9 {
            assert_eq!(outcome, Outcome::Ongoing, "after move {}", pos);
        }
    }
    assert_eq!(*game.outcome(), Outcome::Draw);
    assert!(game.board().is_full());
}

#[test]
fn test_occupied_square_is_rejected_without_state_change() {
    let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
    game.play(4).unwrap();
    let before = game.clone();
    let err = game.play(4).unwrap_err();
    assert_eq!(err.kind(), &RulesErrorKind::CellOccupied(4));
    assert_eq!(game, before);

    let err = game.play(12).unwrap_err();
    assert_eq!(err.kind(), &RulesErrorKind::OutOfBounds(12));
}

#[test]
fn test_single_player_alternates_with_computer() {
    let mut game = Game::new(GameMode::SinglePlayer, Difficulty::Hard);
    let mut rng = StdRng::seed_from_u64(11);
    assert!(!game.is_automated_turn());

    game.play(0).unwrap();
    assert!(game.is_automated_turn());
    let pos = game.choose_automated_move(&mut rng).unwrap();
    assert_eq!(pos, 4);
    game.apply_automated_move(pos).unwrap();
    assert_eq!(game.board().get(4), Some(Square::Occupied(Mark::O)));
    assert_eq!(*game.to_move(), Mark::X);
}

#[test]
fn test_stale_automated_move_is_not_applied() {
    let mut game = Game::new(GameMode::SinglePlayer, Difficulty::Hard);
    let mut rng = StdRng::seed_from_u64(5);
    game.play(0).unwrap();
    let pos = game.choose_automated_move(&mut rng).unwrap();

    // Applying the same choice twice: the second one is out of turn.
    game.apply_automated_move(pos).unwrap();
    let err = game.apply_automated_move(pos).unwrap_err();
    assert_eq!(err.kind(), &RulesErrorKind::OutOfTurn(Mark::O));
    assert_eq!(game.history().len(), 2);

    // The human fills the square the computer picked on its next turn.
    game.play(8).unwrap();
    let stale = 8;
    let err = game.apply_automated_move(stale).unwrap_err();
    assert_eq!(err.kind(), &RulesErrorKind::CellOccupied(8));
    assert_eq!(game.history().len(), 3);
    assert!(game.is_automated_turn());
}

#[test]
fn test_automated_move_rejected_after_reset() {
    let mut game = Game::new(GameMode::SinglePlayer, Difficulty::Easy);
    let mut rng = StdRng::seed_from_u64(8);
    game.play(4).unwrap();
    let pos = game.choose_automated_move(&mut rng).unwrap();
    game.reset();
    let err = game.apply_automated_move(pos).unwrap_err();
    assert_eq!(err.kind(), &RulesErrorKind::OutOfTurn(Mark::O));
    assert!(game.history().is_empty());
}

#[test]
fn test_automated_move_rejected_in_two_player_mode() {
    let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
    game.play(0).unwrap();
    assert!(!game.is_automated_turn());
    assert!(game.apply_automated_move(4).is_err());
}

#[test]
fn test_hard_computer_never_loses_to_simple_script() {
    // X repeats the corner trap; Hard O must block both threats in time.
    let mut game = Game::new(GameMode::SinglePlayer, Difficulty::Hard);
    let mut script = ScriptedRandom::default();
    for human in [0, 8, 6, 5, 7, 1, 2, 3] {
        if !game.is_ongoing() {
            break;
        }
        if game.play(human).is_err() {
            // Square already taken by the computer: try the next one.
            continue;
        }
        if game.is_automated_turn() {
            let pos = game.choose_automated_move(&mut script).unwrap();
            game.apply_automated_move(pos).unwrap();
        }
    }
    assert_ne!(*game.outcome(), Outcome::Win(Mark::X));
}

#[test]
fn test_hard_versus_hard_is_always_a_draw() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new(GameMode::TwoPlayer, Difficulty::Hard);
        while game.is_ongoing() {
            let mark = *game.to_move();
            let pos = noughts_core::select_move(game.board(), mark, Difficulty::Hard, &mut rng)
                .unwrap();
            game.play(pos).unwrap();
        }
        assert_eq!(*game.outcome(), Outcome::Draw, "seed {}", seed);
    }
}

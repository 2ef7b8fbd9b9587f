//! Tests for the serialized form of core types.

use noughts_core::{Board, Difficulty, Mark, Outcome, evaluate};
use serde_json::json;

#[test]
fn test_difficulty_uses_lowercase_names() {
    assert_eq!(serde_json::to_value(Difficulty::Hard).unwrap(), json!("hard"));
    assert_eq!(
        serde_json::from_value::<Difficulty>(json!("medium")).unwrap(),
        Difficulty::Medium
    );
    assert!(serde_json::from_value::<Difficulty>(json!("Hard")).is_err());
    assert!(serde_json::from_value::<Difficulty>(json!("impossible")).is_err());
}

#[test]
fn test_board_keeps_squares_in_order() {
    let board = Board::from_cells(&["X", "", "", "", "O", "", "", "", "X"]).unwrap();
    let value = serde_json::to_value(board).unwrap();

    assert_eq!(value["squares"][0], json!({ "Occupied": "X" }));
    assert_eq!(value["squares"][1], json!("Empty"));
    assert_eq!(value["squares"][4], json!({ "Occupied": "O" }));

    let restored: Board = serde_json::from_value(value).unwrap();
    assert_eq!(restored, board);
    assert_eq!(restored.count(Mark::X), 2);
}

#[test]
fn test_board_with_wrong_length_is_rejected() {
    let short = json!({ "squares": ["Empty", "Empty", "Empty"] });
    assert!(serde_json::from_value::<Board>(short).is_err());
}

#[test]
fn test_outcome_survives_serialization() {
    let board = Board::from_cells(&["O", "O", "O", "X", "X", "", "X", "", ""]).unwrap();
    let outcome = evaluate(&board);
    let text = serde_json::to_string(&outcome).unwrap();

    assert_eq!(text, r#"{"Win":"O"}"#);
    assert_eq!(serde_json::from_str::<Outcome>(&text).unwrap(), Outcome::Win(Mark::O));
    assert_eq!(
        serde_json::from_str::<Outcome>(r#""Draw""#).unwrap(),
        Outcome::Draw
    );
}

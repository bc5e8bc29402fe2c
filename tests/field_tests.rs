//! Field tests - placement, line clears and game-over detection

use tui_tetromino::core::{Field, Piece};
use tui_tetromino::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_field_new_empty() {
    let field = Field::new();
    assert_eq!(field.width(), BOARD_WIDTH);
    assert_eq!(field.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(field.get(x, y), Some(0), "cell ({}, {})", x, y);
        }
    }
    assert!(!field.is_game_over());
}

#[test]
fn test_field_get_out_of_bounds() {
    let field = Field::new();

    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(field.get(0, BOARD_HEIGHT as i32), None);
    assert_eq!(field.get_cell(0, -1), -1);
}

#[test]
fn test_field_set_and_get() {
    let mut field = Field::new();

    assert!(field.set(5, 10, PieceKind::T.cell_value()));
    assert_eq!(field.get(5, 10), Some(3));
    assert!(field.is_occupied(5, 10));

    assert!(!field.set(10, 10, 1));
    assert!(!field.set(-1, 0, 1));
}

#[test]
fn test_place_writes_kind_value() {
    let mut field = Field::new();
    let piece = Piece::new(PieceKind::I);
    assert!(field.can_place(&piece, 3, 18));
    field.place(&piece, 3, 18);

    assert_eq!(field.row(19), &[0, 0, 0, 1, 1, 1, 1, 0, 0, 0]);
    assert_eq!(field.filled_count(), 4);
}

#[test]
fn test_clear_two_bottom_rows() {
    let mut field = Field::from_rows(&["IIIIIIIIII", "OOOOOOOOOO"]);
    assert_eq!(field.clear_lines(), 2);
    assert_eq!(field.filled_count(), 0);
}

#[test]
fn test_clear_preserves_order_of_remaining_rows() {
    let mut field = Field::from_rows(&[
        "T.........",
        "LLLLLLLLLL",
        ".S........",
        "JJJJJJJJJJ",
        "..Z.......",
    ]);
    assert_eq!(field.clear_lines(), 2);

    // Non-full rows keep their order, each shifted by the full rows beneath it.
    assert_eq!(field.get(0, 17), Some(PieceKind::T.cell_value()));
    assert_eq!(field.get(1, 18), Some(PieceKind::S.cell_value()));
    assert_eq!(field.get(2, 19), Some(PieceKind::Z.cell_value()));
    assert_eq!(field.filled_count(), 3);
    assert!(field.row(16).iter().all(|&c| c == 0));
}

#[test]
fn test_clear_adjacent_full_rows_cascade() {
    let mut field = Field::from_rows(&["I.........", "OOOOOOOOOO", "OOOOOOOOOO", "OOOOOOOOOO"]);
    assert_eq!(field.clear_lines(), 3);
    assert_eq!(field.get(0, 19), Some(1));
    assert_eq!(field.filled_count(), 1);
}

#[test]
fn test_clear_nothing() {
    let mut field = Field::from_rows(&["IIIII.IIII"]);
    assert_eq!(field.clear_lines(), 0);
    assert_eq!(field.filled_count(), 9);
}

#[test]
fn test_game_over_only_for_top_two_rows() {
    let mut field = Field::new();
    field.set(0, 2, 1);
    for x in 0..10 {
        field.set(x, 19, 1);
    }
    assert!(!field.is_game_over());

    field.set(9, 1, 1);
    assert!(field.is_game_over());

    let mut field = Field::new();
    field.set(4, 0, 1);
    assert!(field.is_game_over());
}

#[test]
fn test_vertical_piece_above_top_is_placeable() {
    let field = Field::new();
    let piece = Piece::with_rotation(PieceKind::I, Rotation::West);
    assert!(field.can_place(&piece, 3, -2));
    assert!(field.can_place(&piece, 3, -3));
}

#[test]
fn test_clear_resets_field() {
    let mut field = Field::from_rows(&["IIIII.IIII"]);
    field.clear();
    assert_eq!(field, Field::new());
}
